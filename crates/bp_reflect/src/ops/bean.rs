use alloc::boxed::Box;
use core::error::Error;

use crate::Reflect;
use crate::info::BeanInfo;

// -----------------------------------------------------------------------------
// SetFieldError

/// The reason a [`Bean::set_field_at`] call failed.
#[derive(Debug)]
pub enum SetFieldError {
    /// There is no field at the index.
    Missing,
    /// The value is not of the field type; the value is returned back.
    Mismatch(Box<dyn Reflect>),
    /// The setter of the field rejected the value.
    Rejected(Box<dyn Error + Send + Sync>),
}

// -----------------------------------------------------------------------------
// Bean

/// A reflected struct with a table of named field descriptors.
///
/// Fields are addressed by their index in [`BeanInfo::fields`]. Name lookup
/// goes through [`BeanInfo::index_of`] and is cached by the property layer,
/// so implementations only deal with indices.
///
/// Use [`#[derive(Bean)]`](crate::derive::Bean) rather than implementing
/// this by hand.
pub trait Bean: Reflect {
    /// Returns the field descriptor table.
    fn bean_info(&self) -> &'static BeanInfo;

    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Writes the field at `index`.
    ///
    /// `value` is expected to be of the exact field type. The default
    /// implementation assigns through [`field_at_mut`](Bean::field_at_mut);
    /// beans with validating setters override it and report rejections as
    /// [`SetFieldError::Rejected`].
    fn set_field_at(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), SetFieldError> {
        match self.field_at_mut(index) {
            Some(field) => field.set(value).map_err(SetFieldError::Mismatch),
            None => Err(SetFieldError::Missing),
        }
    }
}
