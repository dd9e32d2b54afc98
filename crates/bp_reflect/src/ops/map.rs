use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;

/// A reflected map with string keys.
///
/// Implemented for `HashMap<String, V, S>` and `BTreeMap<String, V>`.
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns the value of `key`.
    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    /// Returns the value of `key` mutably.
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Inserts or replaces the value of `key`.
    ///
    /// The value must be of the exact value type, otherwise it is
    /// returned back in `Err`.
    fn insert_boxed(&mut self, key: String, value: Box<dyn Reflect>)
    -> Result<(), Box<dyn Reflect>>;

    /// Removes `key`, returning `true` if it was present.
    fn remove(&mut self, key: &str) -> bool;

    /// Returns `true` if the map has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
