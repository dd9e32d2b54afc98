use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::access::MalformedPathError;

/// An error raised while resolving or applying a property.
///
/// [`NoSuchIndexProperty`](PropertyError::NoSuchIndexProperty) is a
/// refinement of [`NoSuchProperty`](PropertyError::NoSuchProperty):
/// [`is_no_such_property`](PropertyError::is_no_such_property) is `true`
/// for both.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// The path text does not follow the path grammar.
    #[error(transparent)]
    MalformedPath(#[from] MalformedPathError),

    /// The type exposes no matching readable (or writable) member, or a
    /// strict lookup met a null intermediate.
    #[error("no property `{property}` on `{type_path}`")]
    NoSuchProperty {
        /// The type the member was looked up on.
        type_path: &'static str,
        /// The property path up to the failing segment.
        property: String,
    },

    /// The indexed element does not exist.
    #[error("no index {index} in property `{property}` on `{type_path}`")]
    NoSuchIndexProperty {
        /// The type holding the sequence.
        type_path: &'static str,
        /// The property path up to the failing segment.
        property: String,
        /// The requested index.
        index: usize,
    },

    /// A custom accessor of the member failed.
    #[error("property `{property}` on `{type_path}` rejected the value: {source}")]
    Invocation {
        /// The type the member belongs to.
        type_path: &'static str,
        /// The property path up to the failing segment.
        property: String,
        /// The accessor's own error.
        #[source]
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// The value cannot be stored in the member.
    #[error("property `{property}` on `{type_path}` expects `{expected}`, found `{actual}`")]
    TypeMismatch {
        /// The type the member belongs to.
        type_path: &'static str,
        /// The property path up to the failing segment.
        property: String,
        /// The declared type of the member.
        expected: &'static str,
        /// The type of the rejected value, `null` for null.
        actual: &'static str,
    },
}

impl PropertyError {
    #[inline]
    pub(crate) fn no_such(type_path: &'static str, property: &str) -> Self {
        Self::NoSuchProperty {
            type_path,
            property: property.into(),
        }
    }

    #[inline]
    pub(crate) fn no_such_index(type_path: &'static str, property: &str, index: usize) -> Self {
        Self::NoSuchIndexProperty {
            type_path,
            property: property.into(),
            index,
        }
    }

    #[inline]
    pub(crate) fn mismatch(
        type_path: &'static str,
        property: &str,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            type_path,
            property: property.into(),
            expected,
            actual,
        }
    }

    /// Returns `true` for a missing member or a missing index.
    #[inline]
    pub fn is_no_such_property(&self) -> bool {
        matches!(
            self,
            Self::NoSuchProperty { .. } | Self::NoSuchIndexProperty { .. }
        )
    }

    /// Returns the offending index of a missing indexed element.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NoSuchIndexProperty { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the property the error was raised for.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::MalformedPath(_) => None,
            Self::NoSuchProperty { property, .. }
            | Self::NoSuchIndexProperty { property, .. }
            | Self::Invocation { property, .. }
            | Self::TypeMismatch { property, .. } => Some(property),
        }
    }
}
