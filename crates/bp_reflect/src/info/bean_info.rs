use core::fmt;

use crate::info::{TypeInfo, TypeKind, Typed};

// -----------------------------------------------------------------------------
// FieldAccess

/// Which directions a bean field can be accessed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldAccess {
    /// Readable and writable.
    ReadWrite,
    /// Readable only, writes fail with `NoSuchProperty`.
    ReadOnly,
    /// Readable, writes go through a declared setter method.
    Setter,
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Descriptor of one exposed bean field.
///
/// # Examples
///
/// ```
/// use bp_reflect::{derive::Bean, info::Typed};
///
/// #[derive(Bean)]
/// struct Foo {
///     #[bean(rename = "label")]
///     name: String,
/// }
///
/// let info = Foo::type_info().as_bean().unwrap();
/// let field = info.field_at(0).unwrap();
///
/// assert_eq!(field.name(), "label");
/// assert!(field.type_info().is::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    // `TypeInfo` is built on first access; using a function pointer delays it.
    type_info: fn() -> TypeInfo,
    access: FieldAccess,
}

impl FieldInfo {
    /// Creates a readable and writable field of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            access: FieldAccess::ReadWrite,
        }
    }

    /// Sets the [`FieldAccess`] of this field.
    #[inline]
    pub const fn with_access(mut self, access: FieldAccess) -> Self {
        self.access = access;
        self
    }

    /// Returns the property name of the field.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared type of the field.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }

    /// Returns the [`FieldAccess`] of the field.
    #[inline]
    pub const fn access(&self) -> FieldAccess {
        self.access
    }

    /// Returns `true` if the field accepts writes.
    #[inline]
    pub const fn is_writable(&self) -> bool {
        matches!(self.access, FieldAccess::ReadWrite | FieldAccess::Setter)
    }

    /// Returns `true` if the field may be handed out mutably.
    ///
    /// Read-only fields and fields behind a setter are only written
    /// through [`Bean::set_field_at`](crate::ops::Bean::set_field_at).
    #[inline]
    pub const fn is_directly_writable(&self) -> bool {
        matches!(self.access, FieldAccess::ReadWrite)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("type_info", &self.type_info())
            .field("access", &self.access)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

/// The field descriptor table of a bean type.
///
/// Field indices are positions in this table, they are what
/// [`Bean::field_at`](crate::ops::Bean::field_at) takes.
#[derive(Debug)]
pub struct BeanInfo {
    type_path: &'static str,
    type_name: &'static str,
    fields: &'static [FieldInfo],
}

impl BeanInfo {
    /// Creates a descriptor table.
    #[inline]
    pub const fn new(
        type_path: &'static str,
        type_name: &'static str,
        fields: &'static [FieldInfo],
    ) -> Self {
        Self {
            type_path,
            type_name,
            fields,
        }
    }

    /// Returns the full path of the bean type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the struct name of the bean type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns all exposed fields, in declaration order.
    #[inline]
    pub const fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    /// Returns the field at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&'static FieldInfo> {
        self.fields.get(index)
    }

    /// Finds the index of the field addressed by `name`.
    ///
    /// An exact name match wins. Otherwise a `bool` field named `is_<name>`
    /// is accepted as the boolean alternate.
    ///
    /// # Examples
    ///
    /// ```
    /// use bp_reflect::{derive::Bean, info::Typed};
    ///
    /// #[derive(Bean)]
    /// struct Flags {
    ///     is_active: bool,
    ///     count: u32,
    /// }
    ///
    /// let info = Flags::type_info().as_bean().unwrap();
    /// assert_eq!(info.index_of("count"), Some(1));
    /// assert_eq!(info.index_of("active"), Some(0));
    /// assert_eq!(info.index_of("is_active"), Some(0));
    /// assert_eq!(info.index_of("missing"), None);
    /// ```
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if let Some(index) = self.fields.iter().position(|field| field.name == name) {
            return Some(index);
        }
        self.fields.iter().position(|field| {
            field
                .name
                .strip_prefix("is_")
                .is_some_and(|rest| rest == name)
                && matches!(field.type_info().kind(), TypeKind::Value)
                && field.type_info().is::<bool>()
        })
    }
}
