#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod editor;
mod editors;
mod error;
mod registry;
mod text;

// -----------------------------------------------------------------------------
// Top-level exports

pub use editor::ValueEditor;
pub use editors::{BoolEditor, DelimitedListEditor, MapEditor, ScalarEditor};
pub use error::EditorError;
pub use registry::EditorRegistry;
pub use text::{get_as_text, set_from_text};
