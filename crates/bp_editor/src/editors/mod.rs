// -----------------------------------------------------------------------------
// Modules

mod boolean;
mod list;
mod map;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use boolean::BoolEditor;
pub use list::DelimitedListEditor;
pub use map::MapEditor;
pub use scalar::ScalarEditor;
