//! Items used by the code `#[derive(Bean)]` generates.
//!
//! Not a public API.

pub use alloc::boxed::Box;
pub use core::option::Option;
pub use core::result::Result;

pub use crate::registry::AutoRegistration;

#[cfg(feature = "auto_register")]
pub use inventory;

use crate::ops::SetFieldError;

/// What a `#[bean(setter = "..")]` method may return.
pub trait SetterOutput {
    /// Converts the setter's return value.
    fn into_set_result(self) -> Result<(), SetFieldError>;
}

impl SetterOutput for () {
    #[inline]
    fn into_set_result(self) -> Result<(), SetFieldError> {
        Ok(())
    }
}

impl<E> SetterOutput for Result<(), E>
where
    E: Into<Box<dyn core::error::Error + Send + Sync>>,
{
    #[inline]
    fn into_set_result(self) -> Result<(), SetFieldError> {
        self.map_err(|err| SetFieldError::Rejected(err.into()))
    }
}
