//! Type descriptors.
//!
//! A type descriptor defines what values are valid for a field, how raw
//! values are coerced into that shape, and what JSON Schema describes it.
//! Descriptors are immutable; composing them (wrapping in [`OptionalType`],
//! using as an [`ArrayType`] item) produces new values and never mutates the
//! inner type.
//!
//! - [`StringType`] - text with optional length, pattern and enum constraints
//! - [`IntegerType`] / [`FloatType`] - numbers with inclusive bounds
//! - [`BooleanType`], [`DateType`], [`DateTimeType`], [`UuidType`], [`EmailType`]
//! - [`ArrayType`] - homogeneous sequences
//! - [`HashType`] - mappings whose fields are all required unless optional
//! - [`ObjectType`] - ordered fields with per-field `required` flags
//! - [`OptionalType`] - absent/null tolerant wrapper
//!
//! ## Examples
//!
//! ```
//! use schematic_define::prelude::*;
//! use serde_json::json;
//!
//! let age = TypeDescriptor::from(IntegerType::new().minimum(0).maximum(100));
//! assert!(age.validate(&json!(42)).is_valid());
//!
//! let result = age.validate(&json!(150));
//! assert_eq!(result.errors(), ["must be <= 100"]);
//! ```

mod array;
mod numeric;
mod object;
mod optional;
mod scalar;
mod string;

pub use array::ArrayType;
pub use numeric::{FloatType, IntegerType};
pub use object::{Field, HashType, ObjectType};
pub use optional::OptionalType;
pub use scalar::{BooleanType, DateTimeType, DateType, EmailType, UuidType};
pub use string::StringType;

use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

use crate::error::CoercionError;
use crate::validation::{Breadcrumb, ValidationResult};

/// The capability set shared by every type descriptor.
///
/// `validate` never fails: it collects human-readable messages. `coerce`
/// makes a best-effort conversion and fails with a [`CoercionError`] when the
/// value cannot be represented.
pub trait Descriptor {
    /// Short name of the type, used in error messages (`integer`, `array`).
    fn type_name(&self) -> &'static str;

    /// Validates `value`, appending one message per violation at `at`.
    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>);

    /// Converts a raw value into this type's canonical representation.
    fn coerce(&self, value: &Value) -> Result<Value, CoercionError>;

    /// JSON Schema (OpenAPI 3.0 dialect) describing this type.
    fn to_json_schema(&self) -> Value;

    /// Whether absent/null values are acceptable.
    fn is_optional(&self) -> bool {
        false
    }

    /// Validates `value` from the root.
    fn validate(&self, value: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        self.validate_at(value, &Breadcrumb::root(), &mut errors);
        ValidationResult::from_errors(errors)
    }
}

/// Names accepted by the schema shorthand for primitive types.
///
/// ```
/// use schematic_define::Primitive;
///
/// let parsed: Primitive = "datetime".parse().unwrap();
/// assert_eq!(parsed, Primitive::DateTime);
/// assert_eq!(Primitive::Uuid.to_string(), "uuid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Uuid,
    Email,
}

impl Primitive {
    /// An unconstrained descriptor for this primitive.
    pub fn descriptor(self) -> TypeDescriptor {
        match self {
            Self::String => StringType::new().into(),
            Self::Integer => IntegerType::new().into(),
            Self::Float => FloatType::new().into(),
            Self::Boolean => BooleanType.into(),
            Self::Date => DateType.into(),
            Self::DateTime => DateTimeType.into(),
            Self::Uuid => UuidType.into(),
            Self::Email => EmailType.into(),
        }
    }
}

/// Any type descriptor.
///
/// This is the value stored by inputs and outputs. It dispatches every
/// [`Descriptor`] method to the wrapped variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    String(StringType),
    Integer(IntegerType),
    Float(FloatType),
    Boolean(BooleanType),
    Date(DateType),
    DateTime(DateTimeType),
    Uuid(UuidType),
    Email(EmailType),
    Array(ArrayType),
    Hash(HashType),
    Object(ObjectType),
    Optional(OptionalType),
}

impl TypeDescriptor {
    /// Unconstrained [`StringType`].
    pub fn string() -> Self {
        StringType::new().into()
    }

    /// Unbounded [`IntegerType`].
    pub fn integer() -> Self {
        IntegerType::new().into()
    }

    /// Unbounded [`FloatType`].
    pub fn float() -> Self {
        FloatType::new().into()
    }

    /// [`BooleanType`].
    pub fn boolean() -> Self {
        BooleanType.into()
    }

    /// [`DateType`], `YYYY-MM-DD`.
    pub fn date() -> Self {
        DateType.into()
    }

    /// [`DateTimeType`], RFC 3339 timestamps.
    pub fn datetime() -> Self {
        DateTimeType.into()
    }

    /// [`UuidType`], hyphenated hex.
    pub fn uuid() -> Self {
        UuidType.into()
    }

    /// [`EmailType`].
    pub fn email() -> Self {
        EmailType.into()
    }

    /// An array of `item` with no size bounds.
    pub fn array(item: impl Into<TypeDescriptor>) -> Self {
        ArrayType::new(item).into()
    }

    /// A hash whose fields are all required unless their type is optional.
    pub fn hash<K, T>(fields: impl IntoIterator<Item = (K, T)>) -> Self
    where
        K: Into<String>,
        T: Into<TypeDescriptor>,
    {
        HashType::new(fields).into()
    }

    /// Wraps `inner` so that null and absent values are accepted.
    pub fn optional(inner: impl Into<TypeDescriptor>) -> Self {
        OptionalType::new(inner).into()
    }

    /// Wraps this descriptor in [`OptionalType`].
    pub fn nullable(self) -> Self {
        Self::optional(self)
    }

    fn as_descriptor(&self) -> &dyn Descriptor {
        match self {
            Self::String(t) => t,
            Self::Integer(t) => t,
            Self::Float(t) => t,
            Self::Boolean(t) => t,
            Self::Date(t) => t,
            Self::DateTime(t) => t,
            Self::Uuid(t) => t,
            Self::Email(t) => t,
            Self::Array(t) => t,
            Self::Hash(t) => t,
            Self::Object(t) => t,
            Self::Optional(t) => t,
        }
    }
}

impl Descriptor for TypeDescriptor {
    fn type_name(&self) -> &'static str {
        self.as_descriptor().type_name()
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        self.as_descriptor().validate_at(value, at, errors);
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        self.as_descriptor().coerce(value)
    }

    fn to_json_schema(&self) -> Value {
        self.as_descriptor().to_json_schema()
    }

    fn is_optional(&self) -> bool {
        self.as_descriptor().is_optional()
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(primitive: Primitive) -> Self {
        primitive.descriptor()
    }
}

macro_rules! descriptor_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypeDescriptor {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

descriptor_from! {
    String => StringType,
    Integer => IntegerType,
    Float => FloatType,
    Boolean => BooleanType,
    Date => DateType,
    DateTime => DateTimeType,
    Uuid => UuidType,
    Email => EmailType,
    Array => ArrayType,
    Hash => HashType,
    Object => ObjectType,
    Optional => OptionalType,
}

/// Reports a JSON kind mismatch at `at`.
pub(crate) fn mismatch(at: &Breadcrumb, errors: &mut Vec<String>, expected: &str, value: &Value) {
    at.report(
        errors,
        format_args!("expected {expected}, got {}", crate::validation::kind_of(value)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn primitive_table_is_complete() {
        let names: Vec<String> = Primitive::iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            ["string", "integer", "float", "boolean", "date", "datetime", "uuid", "email"]
        );
    }

    #[test]
    fn unknown_primitive_fails_to_parse() {
        assert!("strng".parse::<Primitive>().is_err());
        assert!("String".parse::<Primitive>().is_err());
    }

    #[test]
    fn dispatch_reaches_variant() {
        let ty = TypeDescriptor::integer();
        assert_eq!(ty.type_name(), "integer");
        assert_eq!(ty.coerce(&json!("12")).unwrap(), json!(12));
        assert_eq!(ty.to_json_schema(), json!({ "type": "integer" }));
    }

    #[test]
    fn nullable_marks_optional() {
        let ty = TypeDescriptor::string().nullable();
        assert!(ty.is_optional());
        assert!(!TypeDescriptor::string().is_optional());
    }

    #[test]
    fn composing_leaves_inner_untouched() {
        let inner = TypeDescriptor::from(IntegerType::new().maximum(5));
        let wrapped = TypeDescriptor::array(inner.clone());
        assert_eq!(inner, TypeDescriptor::from(IntegerType::new().maximum(5)));
        assert!(matches!(wrapped, TypeDescriptor::Array(_)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn primitives() -> Vec<TypeDescriptor> {
        vec![
            TypeDescriptor::string(),
            TypeDescriptor::integer(),
            TypeDescriptor::float(),
            TypeDescriptor::boolean(),
            TypeDescriptor::date(),
            TypeDescriptor::datetime(),
            TypeDescriptor::uuid(),
            TypeDescriptor::email(),
        ]
    }

    fn assert_idempotent(ty: &TypeDescriptor, raw: &Value) -> Result<(), TestCaseError> {
        if let Ok(once) = ty.coerce(raw) {
            let twice = ty.coerce(&once);
            prop_assert_eq!(twice.as_ref(), Ok(&once), "{} on {}", ty.type_name(), raw);
        }
        Ok(())
    }

    proptest! {
        /// Property: coercing an already coerced integer changes nothing
        #[test]
        fn integer_coercion_is_idempotent(n in any::<i64>()) {
            let ty = TypeDescriptor::integer();
            assert_idempotent(&ty, &json!(n))?;
            assert_idempotent(&ty, &json!(n.to_string()))?;
        }

        /// Property: float coercion settles after one pass
        #[test]
        fn float_coercion_is_idempotent(f in -1.0e12f64..1.0e12) {
            let ty = TypeDescriptor::float();
            assert_idempotent(&ty, &json!(f))?;
            assert_idempotent(&ty, &json!(f.to_string()))?;
        }

        /// Property: any text survives string coercion unchanged
        #[test]
        fn string_coercion_is_idempotent(s in ".*") {
            assert_idempotent(&TypeDescriptor::string(), &json!(s))?;
        }

        /// Property: booleans are fixed points of boolean coercion
        #[test]
        fn boolean_coercion_is_idempotent(b in any::<bool>(), spelling in "(true|false|1|0|yes|no|on|off)") {
            let ty = TypeDescriptor::boolean();
            assert_idempotent(&ty, &json!(b))?;
            assert_idempotent(&ty, &json!(spelling))?;
        }

        /// Property: dates and timestamps normalize in one pass
        #[test]
        fn temporal_coercion_is_idempotent(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            offset in -12i32..=12,
        ) {
            let date = format!("{year:04}-{month:02}-{day:02}");
            let timestamp = format!("{date}T{hour:02}:15:00{:+03}:00", offset);
            assert_idempotent(&TypeDescriptor::date(), &json!(date))?;
            assert_idempotent(&TypeDescriptor::date(), &json!(timestamp))?;
            assert_idempotent(&TypeDescriptor::datetime(), &json!(timestamp))?;
        }

        /// Property: UUID normalization is stable
        #[test]
        fn uuid_coercion_is_idempotent(raw in "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}") {
            assert_idempotent(&TypeDescriptor::uuid(), &json!(raw))?;
            assert_idempotent(&TypeDescriptor::email(), &json!(format!("{raw}@Example.com")))?;
        }

        /// Property: Optional accepts null whatever the inner constraints
        #[test]
        fn optional_absorbs_null(min in any::<i64>(), min_len in 0usize..64) {
            let inners = primitives().into_iter().chain([
                IntegerType::new().minimum(min).into(),
                StringType::new().min_length(min_len).into(),
                TypeDescriptor::array(TypeDescriptor::integer()),
                TypeDescriptor::hash([("id", TypeDescriptor::integer())]),
            ]);
            for inner in inners {
                let result = TypeDescriptor::optional(inner).validate(&Value::Null);
                prop_assert!(result.is_valid());
                prop_assert!(result.errors().is_empty());
            }
        }
    }
}
