use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::BeanInfo;

// -----------------------------------------------------------------------------
// Typed

/// A reflected type with static [`TypeInfo`].
///
/// This is the declared side of reflection; [`Reflect::reflect_type_info`]
/// is the dynamic side.
///
/// # Examples
///
/// ```
/// use bp_reflect::info::{TypeKind, Typed};
///
/// let info = <Vec<u8>>::type_info();
/// let TypeKind::List(list) = info.kind() else { unreachable!() };
/// assert!(list.item().is::<u8>());
/// ```
pub trait Typed: Reflect {
    /// Returns the static [`TypeInfo`] of this type.
    fn type_info() -> TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Type information of a reflected type.
///
/// Two `TypeInfo` are equal if they describe the same [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    kind: TypeKind,
}

/// The shape of a reflected type, as seen by property paths.
#[derive(Clone, Copy, Debug)]
pub enum TypeKind {
    /// A scalar value with no addressable parts.
    Value,
    /// A struct with named field descriptors.
    Bean(&'static BeanInfo),
    /// An ordered sequence addressed by index.
    List(ListInfo),
    /// A string-keyed map.
    Map(MapInfo),
    /// A nullable slot.
    Option(OptionInfo),
}

impl TypeInfo {
    /// Creates the information of a scalar type.
    #[inline]
    pub fn value<T: Typed>() -> Self {
        Self::new::<T>(TypeKind::Value)
    }

    /// Creates the information of `T` with the given kind.
    #[inline]
    pub fn new<T: Typed>(kind: TypeKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            kind,
        }
    }

    /// Creates the information of a bean type.
    ///
    /// The type path comes from the [`BeanInfo`].
    #[inline]
    pub fn bean<T: Typed>(info: &'static BeanInfo) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: info.type_path(),
            kind: TypeKind::Bean(info),
        }
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the full path of the described type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the short name of the described type.
    ///
    /// For beans this is the struct name, for other types the last
    /// segment of the path outside of any generic arguments.
    pub fn type_name(&self) -> &'static str {
        if let TypeKind::Bean(info) = self.kind {
            return info.type_name();
        }
        let path = self.type_path;
        let head = match path.find('<') {
            Some(pos) => &path[..pos],
            None => path,
        };
        match head.rfind("::") {
            Some(pos) => &path[pos + 2..],
            None => path,
        }
    }

    /// Returns the kind of the described type.
    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns `true` if values of this type can hold null.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        matches!(self.kind, TypeKind::Option(_))
    }

    /// Returns the [`BeanInfo`] if this is a bean type.
    #[inline]
    pub const fn as_bean(&self) -> Option<&'static BeanInfo> {
        match self.kind {
            TypeKind::Bean(info) => Some(info),
            _ => None,
        }
    }

    /// Strips one level of `Option`, returning `self` for other kinds.
    #[inline]
    pub fn non_null(&self) -> TypeInfo {
        match &self.kind {
            TypeKind::Option(info) => info.inner(),
            _ => *self,
        }
    }
}

impl PartialEq for TypeInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeInfo").field(&self.type_path).finish()
    }
}

impl fmt::Display for TypeInfo {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

// -----------------------------------------------------------------------------
// Kind specific information

/// Information of a list-like type.
#[derive(Clone, Copy)]
pub struct ListInfo {
    item: fn() -> TypeInfo,
    capacity: Option<usize>,
}

impl ListInfo {
    /// Creates the information of a growable list of `T`.
    #[inline]
    pub const fn new<T: Typed>() -> Self {
        Self {
            item: T::type_info,
            capacity: None,
        }
    }

    /// Creates the information of a fixed-size array of `T`.
    #[inline]
    pub const fn fixed<T: Typed>(len: usize) -> Self {
        Self {
            item: T::type_info,
            capacity: Some(len),
        }
    }

    /// Returns the item type.
    #[inline]
    pub fn item(&self) -> TypeInfo {
        (self.item)()
    }

    /// Returns the length for fixed-size arrays.
    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.capacity
    }
}

impl fmt::Debug for ListInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListInfo")
            .field("item", &self.item())
            .field("fixed_len", &self.capacity)
            .finish()
    }
}

/// Information of a string-keyed map type.
#[derive(Clone, Copy)]
pub struct MapInfo {
    value: fn() -> TypeInfo,
}

impl MapInfo {
    /// Creates the information of a map with values of type `V`.
    #[inline]
    pub const fn new<V: Typed>() -> Self {
        Self {
            value: V::type_info,
        }
    }

    /// Returns the value type.
    #[inline]
    pub fn value(&self) -> TypeInfo {
        (self.value)()
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("value", &self.value())
            .finish()
    }
}

/// Information of a nullable slot, `Option<T>`.
///
/// Besides the inner type it carries the constructors needed to build a
/// value of the slot type from a null or from an inner value.
#[derive(Clone, Copy)]
pub struct OptionInfo {
    inner: fn() -> TypeInfo,
    none: fn() -> Box<dyn Reflect>,
    some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl OptionInfo {
    /// Creates the information of `Option<T>`.
    #[inline]
    pub const fn new<T: Typed>() -> Self {
        Self {
            inner: T::type_info,
            none: none_of::<T>,
            some: some_of::<T>,
        }
    }

    /// Returns the inner type.
    #[inline]
    pub fn inner(&self) -> TypeInfo {
        (self.inner)()
    }

    /// Returns a boxed `None` of the slot type.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Wraps an inner value into `Some`.
    ///
    /// Returns the value back if it is not of the inner type.
    #[inline]
    pub fn some(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.some)(value)
    }
}

impl fmt::Debug for OptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionInfo")
            .field("inner", &self.inner())
            .finish()
    }
}

fn none_of<T: Typed>() -> Box<dyn Reflect> {
    Box::new(Option::<T>::None)
}

fn some_of<T: Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    let value = value.take::<T>()?;
    Ok(Box::new(Some(value)))
}

#[cfg(test)]
mod tests {
    use super::{TypeKind, Typed};
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn type_name_strips_module_path() {
        assert_eq!(String::type_info().type_name(), "String");
        assert_eq!(u32::type_info().type_name(), "u32");
        assert_eq!(<Vec<u8>>::type_info().type_name(), "Vec<u8>");
    }

    #[test]
    fn option_info_builds_slot_values() {
        let info = <Option<u32>>::type_info();
        let TypeKind::Option(option) = info.kind() else {
            panic!("expected an option kind");
        };
        assert!(option.inner().is::<u32>());
        assert!(info.non_null().is::<u32>());

        let none = option.none();
        assert_eq!(none.downcast_ref::<Option<u32>>(), Some(&None));

        let some = option.some(alloc::boxed::Box::new(5_u32)).unwrap();
        assert_eq!(some.downcast_ref::<Option<u32>>(), Some(&Some(5)));

        let rejected = option.some(alloc::boxed::Box::new(5_i64)).unwrap_err();
        assert!(rejected.is::<i64>());
    }
}
