//! Attr Types
//!
//! Parameterized type constraints and coercion chains for attribute values.
//!
//! This crate wires the [`attr_types_core`] engine to a small catalog of
//! concrete types:
//!
//! - `OrderedList` - the canonical ordered container, parameterizable
//! - `FileHandle` - a file handle built from a string path
//! - `FileHandleList` - `OrderedList[FileHandle]`, coercible from lists and
//!   sequences of strings or handles
//!
//! # Example
//!
//! ```
//! use attr_types::{standard_registry, FILE_HANDLE_LIST};
//! use attr_types::Value;
//!
//! let registry = standard_registry()?;
//! let files = registry.resolve(FILE_HANDLE_LIST)?;
//!
//! let coerced = files.coerce(Value::Sequence(vec!["x".into(), "y".into()]))?;
//! assert!(files.validate(&coerced));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Registries
//!
//! [`standard_registry`] builds a new registry each call; hosts that want a
//! single ambient instance use [`default_registry`], which is built once per
//! process and reads its [`CoercionConfig`] from the environment.

pub mod catalog;

use std::sync::LazyLock;

pub use attr_types_core::{
    coerce_each, foundation, foundation_registry, CoercionConfig, CoercionError, CoercionMode,
    CoercionRule, Constraint, RegistryError, TypeDefinition, TypeExpr, TypeRegistry,
    ValidationFailure,
};
pub use attr_types_value::{FileHandle, OrderedList, Value, ValueKind};
pub use catalog::{register_catalog, Catalog, FILE_HANDLE, FILE_HANDLE_LIST, ORDERED_LIST};

/// Scope name of registries built by [`standard_registry`].
pub const STANDARD_SCOPE: &str = "attr-types";

/// Build a registry holding the foundational types plus the catalog.
pub fn standard_registry() -> Result<TypeRegistry, RegistryError> {
    standard_registry_with_config(CoercionConfig::default())
}

pub fn standard_registry_with_config(config: CoercionConfig) -> Result<TypeRegistry, RegistryError> {
    let registry = TypeRegistry::new(STANDARD_SCOPE).with_config(config);
    registry.extend(&foundation_registry()?)?;
    register_catalog(&registry)?;
    Ok(registry)
}

static DEFAULT_REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(|| {
    standard_registry_with_config(CoercionConfig::from_env())
        .expect("built-in type names are distinct")
});

/// Process-wide registry, built on first use.
///
/// Strict mode applies to [`TypeRegistry::coerce`] only; definitions
/// returned by `resolve` coerce leniently on their own.
pub fn default_registry() -> &'static TypeRegistry {
    &DEFAULT_REGISTRY
}
