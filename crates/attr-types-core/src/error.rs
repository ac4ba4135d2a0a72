//! Error types for registry lookups, validation and strict coercion.
//!
//! Transform failures are not listed here: a coercion rule's transform
//! returns an opaque `anyhow::Error` and it reaches the caller of `coerce`
//! exactly as the rule produced it.

use std::fmt;

use attr_types_value::ValueKind;

/// Failures raised by [`TypeRegistry`](crate::TypeRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A definition with this name already exists in the registry scope.
    DuplicateName { name: String, scope: String },
    /// No definition with this name exists in the registry scope.
    UnknownType { name: String, scope: String },
    /// The named type is not a container family and cannot take a parameter.
    NotParameterizable { name: String },
    /// A type expression such as `OrderedList[Str]` could not be parsed.
    MalformedExpression { expr: String, reason: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName { name, scope } => {
                write!(f, "Type '{}' is already registered in '{}'", name, scope)
            }
            RegistryError::UnknownType { name, scope } => {
                write!(f, "Unknown type '{}' in '{}'", name, scope)
            }
            RegistryError::NotParameterizable { name } => {
                write!(f, "Type '{}' does not accept a type parameter", name)
            }
            RegistryError::MalformedExpression { expr, reason } => {
                write!(f, "Malformed type expression '{}': {}", expr, reason)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// A value that does not satisfy a type.
///
/// This is what a host raises after `validate` returns false; the core
/// itself only produces it through [`TypeDefinition::check`](crate::TypeDefinition::check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub type_name: String,
    /// Display form of the rejected value.
    pub value: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation failed for '{}' with value {}",
            self.type_name, self.value
        )
    }
}

impl std::error::Error for ValidationFailure {}

/// Refusals produced by coercion in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The value does not conform and no rule accepts it.
    NoMatchingRule {
        type_name: String,
        kind: ValueKind,
        value: String,
    },
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionError::NoMatchingRule {
                type_name,
                kind,
                value,
            } => write!(
                f,
                "No coercion rule for '{}' accepts {} value {}",
                type_name, kind, value
            ),
        }
    }
}

impl std::error::Error for CoercionError {}
