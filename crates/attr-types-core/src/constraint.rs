//! Validity predicates.
//!
//! A [`Constraint`] is the check a single [`TypeDefinition`] adds on top of
//! its parent. Most types only test the variant tag of a value; parameterized
//! containers test their elements against an element type; host code can
//! plug in an arbitrary predicate.

use std::fmt;
use std::sync::Arc;

use attr_types_value::{Value, ValueKind};

use crate::definition::TypeDefinition;

/// Host-supplied predicate for [`Constraint::Custom`].
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Constraint {
    /// No check of its own; conformance is decided by the parent chain.
    Inherit,
    /// The value's variant tag must be one of these kinds.
    Kinds(Vec<ValueKind>),
    /// The value must be a `container` whose every element satisfies `element`.
    Elements {
        container: ValueKind,
        element: Arc<TypeDefinition>,
    },
    Custom { label: String, predicate: Predicate },
}

impl Constraint {
    pub fn kind(kind: ValueKind) -> Self {
        Constraint::Kinds(vec![kind])
    }

    pub fn kinds(kinds: &[ValueKind]) -> Self {
        Constraint::Kinds(kinds.to_vec())
    }

    pub fn custom<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Constraint::Custom {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Check a value against this constraint alone, ignoring any parent.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Constraint::Inherit => true,
            Constraint::Kinds(kinds) => kinds.contains(&value.kind()),
            Constraint::Elements { container, element } => match value.elements_of(*container) {
                // `all` stops at the first element that does not conform.
                Some(items) => items.iter().all(|item| element.validate(item)),
                None => false,
            },
            Constraint::Custom { predicate, .. } => predicate(value),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Inherit => f.write_str("Inherit"),
            Constraint::Kinds(kinds) => f.debug_tuple("Kinds").field(kinds).finish(),
            Constraint::Elements { container, element } => f
                .debug_struct("Elements")
                .field("container", container)
                .field("element", &element.name())
                .finish(),
            Constraint::Custom { label, .. } => f.debug_tuple("Custom").field(label).finish(),
        }
    }
}
