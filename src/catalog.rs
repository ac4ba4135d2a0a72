//! Concrete type catalog.
//!
//! Three types built on the foundational registry:
//!
//! - `OrderedList` - instances of [`OrderedList`]; parameterizable. Coerces a
//!   plain sequence by wrapping it verbatim.
//! - `FileHandle` - instances of [`FileHandle`]. Coerces a string path.
//! - `FileHandleList` - `OrderedList[FileHandle]`. Coerces, in order:
//!   1. an `OrderedList[Str]`, mapping every element through `FileHandle`;
//!   2. an `ArrayRef[Str]`, mapping every element and wrapping the result;
//!   3. an `ArrayRef[FileHandle]`, wrapping the handles as they are.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use attr_types_core::foundation::names;
use attr_types_core::{coerce_each, Constraint, RegistryError, TypeDefinition, TypeRegistry};
use attr_types_value::{FileHandle, OrderedList, Value, ValueKind};
use tracing::debug;

pub const ORDERED_LIST: &str = "OrderedList";
pub const FILE_HANDLE: &str = "FileHandle";
pub const FILE_HANDLE_LIST: &str = "FileHandleList";

/// The catalog's definitions, as registered.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub ordered_list: Arc<TypeDefinition>,
    pub file_handle: Arc<TypeDefinition>,
    pub file_handle_list: Arc<TypeDefinition>,
}

/// Register the catalog types into `registry`.
///
/// `registry` must already resolve the foundational types (see
/// [`TypeRegistry::extend`]).
pub fn register_catalog(registry: &TypeRegistry) -> Result<Catalog, RegistryError> {
    let object = registry.resolve(names::OBJECT)?;
    let str_type = registry.resolve(names::STR)?;
    let array_ref = registry.resolve(names::ARRAY_REF)?;

    let ordered_list = registry.register(
        TypeDefinition::builder(ORDERED_LIST)
            .parent(Arc::clone(&object))
            .constraint(Constraint::kind(ValueKind::List))
            .container(ValueKind::List)
            .coerce_from(Arc::clone(&array_ref), wrap_sequence)
            .build(),
    )?;

    let file_handle = registry.register(
        TypeDefinition::builder(FILE_HANDLE)
            .parent(Arc::clone(&object))
            .constraint(Constraint::kind(ValueKind::File))
            .coerce_from(Arc::clone(&str_type), file_from_str)
            .build(),
    )?;

    let list_of_files = registry.resolve_parameterized(ORDERED_LIST, &file_handle)?;
    let list_of_str = registry.resolve_parameterized(ORDERED_LIST, &str_type)?;
    let array_of_str = registry.resolve_parameterized(names::ARRAY_REF, &str_type)?;
    let array_of_files = registry.resolve_parameterized(names::ARRAY_REF, &file_handle)?;

    let from_list = Arc::clone(&file_handle);
    let from_array = Arc::clone(&file_handle);
    let file_handle_list = registry.register(
        TypeDefinition::builder(FILE_HANDLE_LIST)
            .parent(list_of_files)
            .coerce_from(list_of_str, move |value| match value {
                Value::List(list) => Ok(Value::List(list.try_map(|item| from_list.coerce(item))?)),
                other => Err(unexpected(ValueKind::List, &other)),
            })
            .coerce_from(array_of_str, move |value| match value {
                Value::Sequence(items) => Ok(Value::List(OrderedList::from(coerce_each(
                    &from_array,
                    items,
                )?))),
                other => Err(unexpected(ValueKind::Sequence, &other)),
            })
            .coerce_from(array_of_files, wrap_sequence)
            .build(),
    )?;

    debug!(
        scope = %registry.scope(),
        types = ?[ORDERED_LIST, FILE_HANDLE, FILE_HANDLE_LIST],
        "registered catalog"
    );

    Ok(Catalog {
        ordered_list,
        file_handle,
        file_handle_list,
    })
}

/// Move a plain sequence into an ordered list without touching its elements.
fn wrap_sequence(value: Value) -> Result<Value> {
    match value {
        Value::Sequence(items) => Ok(Value::List(OrderedList::from(items))),
        other => Err(unexpected(ValueKind::Sequence, &other)),
    }
}

fn file_from_str(value: Value) -> Result<Value> {
    match value {
        Value::Str(path) => Ok(Value::File(FileHandle::parse(&path)?)),
        other => Err(unexpected(ValueKind::Str, &other)),
    }
}

fn unexpected(expected: ValueKind, got: &Value) -> anyhow::Error {
    anyhow!("Expected {} value, got {} {}", expected, got.kind(), got)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attr_types_core::foundation_registry;

    fn setup() -> (TypeRegistry, Catalog) {
        let registry = TypeRegistry::new("catalog-test");
        registry.extend(&foundation_registry().unwrap()).unwrap();
        let catalog = register_catalog(&registry).unwrap();
        (registry, catalog)
    }

    #[test]
    fn test_requires_foundation() {
        let registry = TypeRegistry::new("bare");
        let err = register_catalog(&registry).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownType { .. }));
    }

    #[test]
    fn test_registering_twice_fails() {
        let (registry, _) = setup();
        let err = register_catalog(&registry).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { ref name, .. } if name == ORDERED_LIST));
    }

    #[test]
    fn test_rule_order() {
        let (_, catalog) = setup();
        let sources: Vec<_> = catalog
            .file_handle_list
            .coercions()
            .iter()
            .map(|r| r.source_name().to_string())
            .collect();
        assert_eq!(
            sources,
            vec![
                "OrderedList[Str]".to_string(),
                "ArrayRef[Str]".to_string(),
                "ArrayRef[FileHandle]".to_string(),
            ]
        );
        assert_eq!(catalog.ordered_list.coercions()[0].source_name(), "ArrayRef");
        assert_eq!(catalog.file_handle.coercions()[0].source_name(), "Str");
    }

    #[test]
    fn test_file_handle_list_element_type() {
        let (_, catalog) = setup();
        let element = catalog.file_handle_list.element_type().unwrap();
        assert!(Arc::ptr_eq(element, &catalog.file_handle));
    }

    #[test]
    fn test_file_from_str_rejects_other_values() {
        assert!(file_from_str(Value::Int(1)).is_err());
        assert!(wrap_sequence(Value::from("x")).is_err());
    }
}
