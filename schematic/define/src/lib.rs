//! Schematic type descriptors.
//!
//! This crate provides the type layer behind endpoint definitions: every
//! input, output and error body declared with the `schematic` builder wraps
//! one of these descriptors.
//!
//! ## Core Types
//!
//! - [`TypeDescriptor`] - any type, the value stored by endpoint descriptors
//! - [`Descriptor`] - the shared capability set: `validate`, `coerce`,
//!   `to_json_schema`, `is_optional`
//! - [`ValidationResult`] - validity plus one message per violation
//! - [`CoercionError`] - a value that could not be converted
//! - [`Schema`] / [`TypeDef`] - shorthand definitions (`"string"`, field maps, `["integer"]`)
//!
//! ## Examples
//!
//! ```
//! use schematic_define::prelude::*;
//! use serde_json::json;
//!
//! let ids = TypeDescriptor::array(TypeDescriptor::integer());
//!
//! let result = ids.validate(&json!([1, "x", 3]));
//! assert!(!result.is_valid());
//! assert_eq!(result.errors(), ["item[1]: expected integer, got string"]);
//!
//! assert_eq!(ids.coerce(&json!(["1", "2"])).unwrap(), json!([1, 2]));
//! ```

pub mod error;
pub mod prelude;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{CoercionError, DefinitionError};
pub use schema::{Schema, TypeDef};
pub use types::{
    ArrayType, BooleanType, DateTimeType, DateType, Descriptor, EmailType, Field, FloatType,
    HashType, IntegerType, ObjectType, OptionalType, Primitive, StringType, TypeDescriptor,
    UuidType,
};
pub use validation::{Breadcrumb, ValidationResult};
