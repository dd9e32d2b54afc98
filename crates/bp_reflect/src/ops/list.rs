use crate::Reflect;

/// A reflected ordered sequence, addressed by index.
///
/// Implemented for `Vec<T>`, `VecDeque<T>` and `[T; N]`.
///
/// # Examples
///
/// ```
/// use bp_reflect::{Reflect, ops::{List, ReflectRef}};
///
/// let items = [10_u16, 20, 30];
/// let ReflectRef::List(list) = items.reflect_ref() else { unreachable!() };
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(1).unwrap().downcast_ref::<u16>(), Some(&20));
/// assert!(list.get(3).is_none());
/// ```
pub trait List: Reflect {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns the item at `index`, or `None` if out of range.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the item at `index` mutably, or `None` if out of range.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns `true` if the sequence has no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
