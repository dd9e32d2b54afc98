//! Kind interfaces and value assignment.
//!
//! The following sub-traits of [`Reflect`] describe what a path segment can
//! step into:
//!
//! - [`Bean`]: named fields (e.g. `struct A { .. }` with `#[derive(Bean)]`).
//! - [`List`]: indexed items (e.g. `Vec<T>`, `[T; N]`).
//! - [`Map`]: string-keyed entries (e.g. `HashMap<String, V>`).
//!
//! [`assign`] builds a value of an exact slot type from a caller value,
//! handling null, `Option` wrapping and lossless numeric widening.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod assign;
mod bean;
mod kind;
mod list;
mod map;

// -----------------------------------------------------------------------------
// Exports

pub use assign::{AssignError, assign, widen};
pub use bean::{Bean, SetFieldError};
pub use kind::{ReflectMut, ReflectRef};
pub use list::List;
pub use map::Map;
