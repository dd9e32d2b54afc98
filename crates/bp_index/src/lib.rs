#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod concatenate;
mod error;
mod factory;
mod record;
mod substring;

// -----------------------------------------------------------------------------
// Top-level exports

pub use concatenate::ConcatenateKeyFactory;
pub use error::{ConfigError, IndexKeyError};
pub use factory::{BeanTableIndexKeyFactory, PropertyValues};
pub use record::{FactoryKind, IndexKeyFactoryRecord, RECORD_VERSION};
pub use substring::{SubstringBounds, SubstringKeyFactory};
