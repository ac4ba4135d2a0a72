//! Parameterized container types.
//!
//! A container family such as `ArrayRef` or `OrderedList` carries the
//! [`ValueKind`](attr_types_value::ValueKind) of its container. Parameterizing
//! it over an element type produces a new definition, named `Base[Element]`,
//! whose parent is the family and whose own constraint requires every element
//! to satisfy the element type. A value that is not an instance of the
//! family's container is rejected outright; an empty container is accepted.
//!
//! The generator attaches no coercion rules. Catalog code adds them to the
//! specific instances that need them.

use std::sync::Arc;

use tracing::trace;

use crate::constraint::Constraint;
use crate::definition::TypeDefinition;
use crate::error::RegistryError;

/// Canonical name of `base` parameterized over `element`.
pub fn parameterized_name(base: &str, element: &str) -> String {
    format!("{}[{}]", base, element)
}

/// Instantiate `base` over `element`.
///
/// With no element the base definition is returned as-is. Construction has
/// no side effects; calling it twice yields two definitions that validate
/// identically.
pub fn parameterize(
    base: &Arc<TypeDefinition>,
    element: Option<&Arc<TypeDefinition>>,
) -> Result<Arc<TypeDefinition>, RegistryError> {
    let Some(element) = element else {
        return Ok(Arc::clone(base));
    };

    let container = base
        .container()
        .ok_or_else(|| RegistryError::NotParameterizable {
            name: base.name().to_string(),
        })?;

    let name = parameterized_name(base.name(), element.name());
    trace!(name = %name, container = %container, "parameterizing type");

    Ok(Arc::new(
        TypeDefinition::builder(name)
            .parent(Arc::clone(base))
            .constraint(Constraint::Elements {
                container,
                element: Arc::clone(element),
            })
            .parameter(Arc::clone(element))
            .build(),
    ))
}
