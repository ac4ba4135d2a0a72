//! Named type definitions.
//!
//! A [`TypeDefinition`] is immutable once built: its constraint, parent and
//! coercion rules are fixed at construction and shared through `Arc`.
//! Validation walks the parent chain first, then applies the definition's own
//! [`Constraint`]; coercion is a separate, explicit step and never runs as a
//! side effect of validation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use attr_types_core::{Constraint, TypeDefinition};
//! use attr_types_value::{Value, ValueKind};
//!
//! let str_type = Arc::new(
//!     TypeDefinition::builder("Str")
//!         .constraint(Constraint::kind(ValueKind::Str))
//!         .build(),
//! );
//! let int_type = TypeDefinition::builder("Int")
//!     .constraint(Constraint::kind(ValueKind::Int))
//!     .coerce_from(str_type, |v| Ok(Value::Int(v.to_string().len() as i64)))
//!     .build();
//!
//! assert!(int_type.validate(&Value::Int(3)));
//! assert!(!int_type.validate(&Value::from("abc")));
//! ```

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use attr_types_value::{Value, ValueKind};

use crate::coercion::{run_chain, CoercionRule};
use crate::config::CoercionMode;
use crate::constraint::Constraint;
use crate::error::ValidationFailure;

pub struct TypeDefinition {
    name: String,
    parent: Option<Arc<TypeDefinition>>,
    constraint: Constraint,
    coercions: Vec<CoercionRule>,
    /// Container kind for families that accept an element type parameter.
    container: Option<ValueKind>,
    /// Element type, for parameterized instances.
    parameter: Option<Arc<TypeDefinition>>,
}

impl TypeDefinition {
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<TypeDefinition>> {
        self.parent.as_ref()
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Coercion rules in precedence order.
    pub fn coercions(&self) -> &[CoercionRule] {
        &self.coercions
    }

    pub fn has_coercion(&self) -> bool {
        !self.coercions.is_empty()
    }

    pub fn container(&self) -> Option<ValueKind> {
        self.container
    }

    pub fn is_parameterizable(&self) -> bool {
        self.container.is_some()
    }

    /// The element type this definition was parameterized with, if any.
    pub fn parameter(&self) -> Option<&Arc<TypeDefinition>> {
        self.parameter.as_ref()
    }

    /// Element type of this definition or of the nearest parameterized ancestor.
    pub fn element_type(&self) -> Option<&Arc<TypeDefinition>> {
        self.parameter
            .as_ref()
            .or_else(|| self.ancestry().find_map(|t| t.parameter.as_ref()))
    }

    /// Parents from nearest to root, excluding `self`.
    pub fn ancestry(&self) -> impl Iterator<Item = &TypeDefinition> {
        std::iter::successors(self.parent.as_deref(), |t| t.parent.as_deref())
    }

    /// Whether this type is `name` or specializes it.
    pub fn is_subtype_of(&self, name: &str) -> bool {
        self.name == name || self.ancestry().any(|t| t.name == name)
    }

    pub fn validate(&self, value: &Value) -> bool {
        if let Some(parent) = &self.parent {
            if !parent.validate(value) {
                return false;
            }
        }
        self.constraint.matches(value)
    }

    /// Like [`validate`](Self::validate), with a host-facing failure message.
    pub fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if self.validate(value) {
            Ok(())
        } else {
            Err(ValidationFailure {
                type_name: self.name.clone(),
                value: value.to_string(),
            })
        }
    }

    /// Coerce `value`, returning it unchanged when no rule applies.
    ///
    /// Always lenient: a definition does not know which registry it was
    /// resolved from. To honour a registry's strict mode, use
    /// [`TypeRegistry::coerce`](crate::TypeRegistry::coerce) or
    /// `coerce_with_mode(value, registry.config().mode)`.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        run_chain(self, value, CoercionMode::Lenient)
    }

    pub fn coerce_with_mode(&self, value: Value, mode: CoercionMode) -> Result<Value> {
        run_chain(self, value, mode)
    }

    /// Coerce leniently, then require the result to conform.
    ///
    /// This is the sequence a host runs when assigning to a coercing
    /// attribute.
    pub fn coerce_and_check(&self, value: Value) -> Result<Value> {
        let value = self.coerce(value)?;
        self.check(&value)?;
        Ok(value)
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("constraint", &self.constraint)
            .field(
                "coercions",
                &self
                    .coercions
                    .iter()
                    .map(|r| r.source_name())
                    .collect::<Vec<_>>(),
            )
            .field("container", &self.container)
            .finish()
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`TypeDefinition`].
pub struct TypeBuilder {
    name: String,
    parent: Option<Arc<TypeDefinition>>,
    constraint: Constraint,
    coercions: Vec<CoercionRule>,
    container: Option<ValueKind>,
    parameter: Option<Arc<TypeDefinition>>,
}

impl TypeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            constraint: Constraint::Inherit,
            coercions: Vec::new(),
            container: None,
            parameter: None,
        }
    }

    pub fn parent(mut self, parent: Arc<TypeDefinition>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Mark the type as a container family that accepts an element type.
    pub fn container(mut self, kind: ValueKind) -> Self {
        self.container = Some(kind);
        self
    }

    /// Append a coercion rule from values satisfying `from`.
    pub fn coerce_from<F>(mut self, from: Arc<TypeDefinition>, via: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.coercions.push(CoercionRule::new(from, via));
        self
    }

    pub(crate) fn parameter(mut self, element: Arc<TypeDefinition>) -> Self {
        self.parameter = Some(element);
        self
    }

    pub fn build(self) -> TypeDefinition {
        TypeDefinition {
            name: self.name,
            parent: self.parent,
            constraint: self.constraint,
            coercions: self.coercions,
            container: self.container,
            parameter: self.parameter,
        }
    }
}
