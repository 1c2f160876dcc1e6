//! Convenient re-exports for declaring types.
//!
//! ```
//! use schematic_define::prelude::*;
//!
//! let tag = StringType::new().max_length(32);
//! let tags = TypeDescriptor::array(tag);
//! assert_eq!(tags.type_name(), "array");
//! ```

pub use crate::error::{CoercionError, DefinitionError};
pub use crate::schema::{Schema, TypeDef};
pub use crate::types::{
    ArrayType, BooleanType, DateTimeType, DateType, Descriptor, EmailType, FloatType, HashType,
    IntegerType, ObjectType, OptionalType, Primitive, StringType, TypeDescriptor, UuidType,
};
pub use crate::validation::ValidationResult;
