//! Type name resolution.
//!
//! [`TypeRegistry`] maps textual type names to [`TypeInfo`]. It is used when
//! a component is configured from text (for example an index definition
//! naming its element type), never on the hot get/set path.

// -----------------------------------------------------------------------------
// Modules

mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_registry::{AutoRegistration, TypeRegistry};
