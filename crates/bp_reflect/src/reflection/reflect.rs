use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Value;
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime access in [`bp_reflect`].
///
/// Every value a property path can read or write implements `Reflect`.
/// It is implemented for scalars, `String`, `Option<T>`, the supported
/// lists and maps, and for any struct through
/// [the derive macro for `Bean`](crate::derive::Bean).
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// use bp_reflect::Reflect;
/// use core::any::{Any, TypeId};
///
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// # Kinds
///
/// [`reflect_ref`] and [`reflect_mut`] expose the value as one of the
/// kinds a path segment can step into:
///
/// ```
/// use bp_reflect::{Reflect, ops::ReflectRef};
///
/// let list = vec![1_u8, 2, 3];
/// let ReflectRef::List(list) = list.reflect_ref() else { unreachable!() };
/// assert_eq!(list.len(), 3);
/// ```
///
/// [`bp_reflect`]: crate
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
pub trait Reflect: Send + Sync + Any {
    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [`TypeInfo`] of the runtime type of this value.
    fn reflect_type_info(&self) -> TypeInfo;

    /// Returns an immutable kind view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable kind view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// If `value` is not of the same type, it is returned back in `Err`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bp_reflect::Reflect;
    ///
    /// let mut x = 10_i32;
    /// x.set(Box::new(20_i32)).unwrap();
    /// assert_eq!(x, 20);
    ///
    /// let back = x.set(Box::new(String::from("no"))).unwrap_err();
    /// assert!(back.is::<String>());
    /// assert_eq!(x, 20);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns a scalar snapshot of this value.
    ///
    /// `None` for values that are not scalars, such as beans and lists.
    #[inline]
    fn to_value(&self) -> Option<Value> {
        None
    }
}

// -----------------------------------------------------------------------------
// Downcast helpers

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Reflect>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Downcasts a boxed value to type `T`, returning the box back on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use bp_reflect::Reflect;
    ///
    /// let value: Box<dyn Reflect> = Box::new(String::from("id"));
    /// let value = value.take::<u32>().unwrap_err();
    /// assert_eq!(value.take::<String>().unwrap(), "id");
    /// ```
    pub fn take<T: Reflect>(self: Box<Self>) -> Result<T, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id was checked before downcasting"),
        }
    }

    /// Returns the full type path of the underlying value.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_value() {
            Some(value) => write!(f, "{}({value:?})", self.reflect_type_info().type_name()),
            None => write!(f, "Reflect({})", self.type_path()),
        }
    }
}
