//! Static type information.
//!
//! [`TypeInfo`] is the "class" of a reflected value: a cheap `Copy` handle
//! describing how a property path may walk into a value of that type.
//! Child types are referenced through `fn() -> TypeInfo` pointers, so the
//! information of nested types is only built when it is asked for.

// -----------------------------------------------------------------------------
// Modules

mod bean_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use bean_info::{BeanInfo, FieldAccess, FieldInfo};
pub use type_info::{ListInfo, MapInfo, OptionInfo, TypeInfo, TypeKind, Typed};
