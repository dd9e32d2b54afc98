use alloc::string::String;
use alloc::vec::Vec;

use bp_editor::EditorError;
use bp_reflect::access::PropertyError;
use thiserror::Error;

/// An error of key derivation.
#[derive(Error, Debug)]
pub enum IndexKeyError {
    /// A constituent property could not be read from the element.
    #[error("cannot read `{property}` for an index key")]
    Access {
        property: String,
        #[source]
        source: PropertyError,
    },

    /// The input does not fit the factory.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A structurally invalid factory input.
///
/// Raised by construction, which never yields a partially built factory,
/// and by map-based key derivation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A property does not resolve on the element type.
    #[error("no readable property `{property}` on `{type_path}`")]
    NoSuchProperty {
        type_path: &'static str,
        property: String,
        #[source]
        source: PropertyError,
    },

    /// The value map lacks constituent properties and the alias.
    #[error("keys are insufficient, missing {missing:?}")]
    InsufficientKeys { missing: Vec<String> },

    /// A property or value has a type the factory cannot use.
    #[error("property `{property}` must be `{expected}`, found `{actual}`")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The substring bounds are inconsistent.
    #[error("invalid substring bounds: {reason}")]
    InvalidBounds { reason: &'static str },

    /// A factory needs at least one property.
    #[error("an index key factory needs at least one property")]
    NoProperties,

    /// The element type name is not registered, or is ambiguous.
    #[error("unknown element type `{name}`")]
    UnknownType { name: String },

    /// The record was written by an unknown format version.
    #[error("unsupported index key factory record version {version}")]
    UnsupportedVersion { version: u32 },

    /// The record does not describe a factory of its kind.
    #[error("invalid index key factory record: {reason}")]
    InvalidRecord { reason: &'static str },

    /// Raw configuration text failed to convert.
    #[error(transparent)]
    Editor(#[from] EditorError),
}
