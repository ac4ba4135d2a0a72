//! Foundational value model for the attr-types workspace.
//!
//! Every value an attribute can hold is a [`Value`], a tagged enum whose
//! variant says exactly what kind of thing it is. Membership tests in the
//! type layer are pattern matches on that tag rather than runtime
//! introspection.
//!
//! ## Value Types
//!
//! - [`OrderedList`] - the canonical ordered container
//! - [`FileHandle`] - a path-backed file handle (no I/O is performed)
//! - [`Value::Sequence`] - a bare sequence literal that has not been wrapped yet
//!
//! ## JSON Input
//!
//! The [`json`] module converts `serde_json::Value` into the value model so
//! loosely-typed configuration can be fed straight into coercion.

pub mod file;
pub mod json;
pub mod list;
pub mod value;

pub use file::FileHandle;
pub use list::OrderedList;
pub use value::{Value, ValueKind};
