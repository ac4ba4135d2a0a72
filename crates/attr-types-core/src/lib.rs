//! Attr Types Core
//!
//! Runtime type constraints and coercion chains for attribute values.
//!
//! This crate provides:
//! - [`definition`]: immutable named types with a parent chain and coercion rules
//! - [`constraint`]: validity predicates, including element-wise container checks
//! - [`parameterized`]: instantiating container families over an element type
//! - [`coercion`]: ordered, first-match coercion chains
//! - [`registry`]: name → definition catalogs that extend one another
//! - [`foundation`]: the primitive types every registry builds on
//! - [`expr`]: `Base[Element]` type expressions
//!
//! # Validation vs. Coercion
//!
//! `validate` is a pure predicate and never converts anything. `coerce`
//! returns conforming values untouched, otherwise applies the first rule whose
//! source type accepts the value. Deciding when to coerce, and what to do
//! with a value that still does not conform, is up to the host.

pub mod coercion;
pub mod config;
pub mod constraint;
pub mod definition;
pub mod error;
pub mod expr;
pub mod foundation;
pub mod parameterized;
pub mod registry;

pub use coercion::{coerce_each, CoercionRule, Transform};
pub use config::{CoercionConfig, CoercionMode};
pub use constraint::{Constraint, Predicate};
pub use definition::{TypeBuilder, TypeDefinition};
pub use error::{CoercionError, RegistryError, ValidationFailure};
pub use expr::TypeExpr;
pub use foundation::foundation_registry;
pub use parameterized::{parameterize, parameterized_name};
pub use registry::TypeRegistry;
