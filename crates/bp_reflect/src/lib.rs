#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::bp_reflect` paths; this alias lets them resolve
// inside the crate itself and in its unit tests.
extern crate self as bp_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;
mod value;

pub mod access;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use value::Value;
pub use bp_reflect_derive as derive;
