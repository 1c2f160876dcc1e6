//! Shorthand type definitions.
//!
//! Callers often prefer a lightweight literal over explicit constructors:
//! a primitive name (`"string"`), a field map, or a one-element list. This
//! module turns those literals into full [`TypeDescriptor`] trees.
//!
//! | Shorthand | Resolves to |
//! |-----------|-------------|
//! | `"integer"` | [`IntegerType`](crate::IntegerType) |
//! | `"string?"` | optional string |
//! | `{"type": "uuid"}` | [`UuidType`](crate::UuidType) |
//! | `{"name": "string", "age": "integer"}` | [`ObjectType`](crate::ObjectType), fields required unless optional |
//! | `["email"]` | array of emails |
//! | an existing descriptor | itself |
//!
//! ## Examples
//!
//! ```
//! use schematic_define::prelude::*;
//!
//! let person = Schema::from_definition(TypeDef::fields([
//!     ("name", TypeDef::from("string")),
//!     ("age", TypeDef::list("integer")),
//! ]))
//! .unwrap();
//!
//! let TypeDescriptor::Object(object) = &person else { panic!("expected an object") };
//! assert!(matches!(object.field_type("age"), Some(TypeDescriptor::Array(_))));
//! ```

use serde_json::Value;

use crate::error::DefinitionError;
use crate::types::{ArrayType, ObjectType, Primitive, TypeDescriptor};
use crate::validation::kind_of;

/// A lightweight type definition, resolved by [`Schema::from_definition`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// A primitive name, optionally suffixed with `?`.
    Symbol(String),
    /// The single-key form `{type: name}`.
    Typed(String),
    /// Named fields, in declaration order.
    Fields(Vec<(String, TypeDef)>),
    /// Element definitions of an array. Exactly one is allowed.
    List(Vec<TypeDef>),
    /// An already constructed descriptor, passed through unchanged.
    Resolved(TypeDescriptor),
}

impl TypeDef {
    /// The `{type: name}` form.
    pub fn typed(name: impl Into<String>) -> Self {
        Self::Typed(name.into())
    }

    pub fn fields<K, D>(fields: impl IntoIterator<Item = (K, D)>) -> Self
    where
        K: Into<String>,
        D: Into<TypeDef>,
    {
        Self::Fields(
            fields
                .into_iter()
                .map(|(name, def)| (name.into(), def.into()))
                .collect(),
        )
    }

    /// A single-element list: an array of `item`.
    pub fn list(item: impl Into<TypeDef>) -> Self {
        Self::List(vec![item.into()])
    }

    /// Reads a definition from a JSON literal.
    ///
    /// Strings are primitive names, `{"type": "..."}` is the typed form,
    /// other objects are field maps and arrays are lists.
    ///
    /// ## Errors
    ///
    /// Numbers, booleans and null cannot describe a type.
    pub fn from_json(literal: &Value) -> Result<Self, DefinitionError> {
        match literal {
            Value::String(name) => Ok(Self::Symbol(name.clone())),
            Value::Object(map) => match map.get("type") {
                Some(Value::String(name)) if map.len() == 1 => Ok(Self::Typed(name.clone())),
                _ => map
                    .iter()
                    .map(|(name, def)| Ok((name.clone(), Self::from_json(def)?)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::Fields),
            },
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(DefinitionError::InvalidLiteral {
                found: kind_of(other),
            }),
        }
    }
}

impl From<&str> for TypeDef {
    fn from(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }
}

impl From<String> for TypeDef {
    fn from(name: String) -> Self {
        Self::Symbol(name)
    }
}

impl From<Primitive> for TypeDef {
    fn from(primitive: Primitive) -> Self {
        Self::Resolved(primitive.descriptor())
    }
}

impl<T: Into<TypeDescriptor>> From<Vec<T>> for TypeDef {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(|item| Self::Resolved(item.into())).collect())
    }
}

macro_rules! typedef_from_descriptor {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypeDef {
                fn from(value: $ty) -> Self {
                    Self::Resolved(value.into())
                }
            }
        )*
    };
}

typedef_from_descriptor!(
    TypeDescriptor,
    crate::StringType,
    crate::IntegerType,
    crate::FloatType,
    crate::BooleanType,
    crate::DateType,
    crate::DateTimeType,
    crate::UuidType,
    crate::EmailType,
    crate::ArrayType,
    crate::HashType,
    crate::ObjectType,
    crate::OptionalType,
);

/// Entry point for resolving shorthand definitions.
pub struct Schema;

impl Schema {
    /// Resolves `definition` into a type descriptor.
    ///
    /// ## Errors
    ///
    /// - [`DefinitionError::UnknownPrimitive`] for a name outside the primitive table
    /// - [`DefinitionError::ArrayArity`] for a list without exactly one element type
    pub fn from_definition(definition: impl Into<TypeDef>) -> Result<TypeDescriptor, DefinitionError> {
        resolve(definition.into())
    }

    /// Looks up a primitive by name; a trailing `?` makes it optional.
    pub fn primitive(name: &str) -> Result<TypeDescriptor, DefinitionError> {
        let (base, optional) = match name.strip_suffix('?') {
            Some(base) => (base, true),
            None => (name, false),
        };
        let primitive: Primitive = base
            .parse()
            .map_err(|_| DefinitionError::unknown_primitive(name))?;
        let descriptor = primitive.descriptor();
        Ok(if optional { descriptor.nullable() } else { descriptor })
    }
}

fn resolve(definition: TypeDef) -> Result<TypeDescriptor, DefinitionError> {
    match definition {
        TypeDef::Symbol(name) | TypeDef::Typed(name) => Schema::primitive(&name),
        TypeDef::Fields(fields) => fields
            .into_iter()
            .try_fold(
                ObjectType::new(),
                |object, (name, def)| -> Result<ObjectType, DefinitionError> {
                    Ok(object.field(name, resolve(def)?))
                },
            )
            .map(TypeDescriptor::Object),
        TypeDef::List(mut items) => {
            if items.len() != 1 {
                return Err(DefinitionError::ArrayArity { found: items.len() });
            }
            let item = resolve(items.remove(0))?;
            Ok(ArrayType::new(item).into())
        }
        TypeDef::Resolved(descriptor) => Ok(descriptor),
    }
}
