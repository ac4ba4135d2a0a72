//! Foundational primitive types.
//!
//! The hierarchy every other registry extends:
//!
//! ```text
//! Any
//! └── Item
//!     ├── Undef
//!     ├── Bool
//!     └── Defined
//!         ├── Value
//!         │   ├── Str
//!         │   └── Num
//!         │       └── Int
//!         └── Ref
//!             ├── ArrayRef      (parameterizable over plain sequences)
//!             ├── HashRef
//!             └── Object        (ordered lists and file handles)
//! ```

use std::sync::Arc;

use attr_types_value::ValueKind;

use crate::constraint::Constraint;
use crate::definition::TypeDefinition;
use crate::error::RegistryError;
use crate::registry::TypeRegistry;

/// Scope name of the foundational registry.
pub const FOUNDATION_SCOPE: &str = "foundation";

pub mod names {
    pub const ANY: &str = "Any";
    pub const ITEM: &str = "Item";
    pub const UNDEF: &str = "Undef";
    pub const BOOL: &str = "Bool";
    pub const DEFINED: &str = "Defined";
    pub const VALUE: &str = "Value";
    pub const STR: &str = "Str";
    pub const NUM: &str = "Num";
    pub const INT: &str = "Int";
    pub const REF: &str = "Ref";
    pub const ARRAY_REF: &str = "ArrayRef";
    pub const HASH_REF: &str = "HashRef";
    pub const OBJECT: &str = "Object";
}

/// Build a fresh foundational registry.
pub fn foundation_registry() -> Result<TypeRegistry, RegistryError> {
    let registry = TypeRegistry::new(FOUNDATION_SCOPE);

    let any = registry.register(TypeDefinition::builder(names::ANY).build())?;
    let item = registry.register(subtype(names::ITEM, &any, Constraint::Inherit))?;
    registry.register(subtype(
        names::UNDEF,
        &item,
        Constraint::kind(ValueKind::Undef),
    ))?;
    registry.register(subtype(names::BOOL, &item, Constraint::kind(ValueKind::Bool)))?;

    let defined_kinds: Vec<ValueKind> = ValueKind::ALL
        .into_iter()
        .filter(|k| *k != ValueKind::Undef)
        .collect();
    let defined = registry.register(subtype(
        names::DEFINED,
        &item,
        Constraint::Kinds(defined_kinds),
    ))?;

    let value = registry.register(subtype(
        names::VALUE,
        &defined,
        Constraint::kinds(&[ValueKind::Bool, ValueKind::Int, ValueKind::Num, ValueKind::Str]),
    ))?;
    registry.register(subtype(names::STR, &value, Constraint::kind(ValueKind::Str)))?;
    let num = registry.register(subtype(
        names::NUM,
        &value,
        Constraint::kinds(&[ValueKind::Int, ValueKind::Num]),
    ))?;
    registry.register(subtype(names::INT, &num, Constraint::kind(ValueKind::Int)))?;

    let reference = registry.register(subtype(
        names::REF,
        &defined,
        Constraint::kinds(&[
            ValueKind::Sequence,
            ValueKind::Map,
            ValueKind::List,
            ValueKind::File,
        ]),
    ))?;
    registry.register(
        TypeDefinition::builder(names::ARRAY_REF)
            .parent(Arc::clone(&reference))
            .constraint(Constraint::kind(ValueKind::Sequence))
            .container(ValueKind::Sequence)
            .build(),
    )?;
    registry.register(subtype(
        names::HASH_REF,
        &reference,
        Constraint::kind(ValueKind::Map),
    ))?;
    registry.register(subtype(
        names::OBJECT,
        &reference,
        Constraint::kinds(&[ValueKind::List, ValueKind::File]),
    ))?;

    Ok(registry)
}

fn subtype(name: &str, parent: &Arc<TypeDefinition>, constraint: Constraint) -> TypeDefinition {
    TypeDefinition::builder(name)
        .parent(Arc::clone(parent))
        .constraint(constraint)
        .build()
}
