use alloc::string::String;

use bp_reflect::access::PropertyError;
use thiserror::Error;

/// An error of a text conversion.
#[derive(Error, Debug)]
pub enum EditorError {
    /// No editor exists for the type.
    #[error("no editor for type `{type_path}`")]
    Unsupported { type_path: &'static str },

    /// The text is not a valid value of the target type.
    #[error("cannot convert `{text}` to `{target}`: {reason}")]
    Format {
        text: String,
        target: &'static str,
        reason: String,
    },

    /// The editor was handed a value of another type.
    #[error("editor for `{expected}` cannot format a `{actual}`")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    /// The addressed property failed.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl EditorError {
    #[inline]
    pub(crate) fn format(
        text: &str,
        target: &'static str,
        reason: impl core::fmt::Display,
    ) -> Self {
        use alloc::string::ToString;

        Self::Format {
            text: text.into(),
            target,
            reason: reason.to_string(),
        }
    }
}
