use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::Reflect;
use crate::access::{MalformedPathError, MalformedReason, PropertyError, PropertyPath, Segment};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Modules

mod indexed;
mod mapped;
mod nested;
mod simple;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub use indexed::IndexedProperty;
pub use mapped::MappedProperty;
pub use nested::NestedProperty;
pub use simple::SimpleProperty;

// -----------------------------------------------------------------------------
// NullPolicy

/// How a property treats a null it has to walk through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NullPolicy {
    /// Reads return null and writes do nothing.
    Ignore,
    /// The first null segment fails with `NoSuchProperty`.
    Strict,
}

// -----------------------------------------------------------------------------
// Property

/// A resolved accessor for one property path.
///
/// A property is bound to a path, not to a target or a type: the same
/// instance is applied to any number of targets of any type, and caches
/// per-type member lookups internally.
///
/// Reads flatten `Option` slots: `Ok(None)` is null.
pub trait Property: Send + Sync + fmt::Debug {
    /// Returns the canonical path text of this property.
    fn property_name(&self) -> &str;

    /// Returns how null intermediates are treated.
    fn null_policy(&self) -> NullPolicy;

    /// Returns the declared type of the addressed slot on type `ty`.
    fn property_type(&self, ty: TypeInfo) -> Result<TypeInfo, PropertyError>;

    /// Returns the runtime type of the addressed value on `target`.
    ///
    /// Falls back to the declared type when the value is null.
    fn property_type_of(&self, target: &dyn Reflect) -> Result<TypeInfo, PropertyError> {
        match self.get(target)? {
            Some(value) => Ok(value.reflect_type_info()),
            None => self.property_type(target.reflect_type_info()),
        }
    }

    /// Reads the addressed value.
    fn get<'a>(&self, target: &'a dyn Reflect) -> Result<Option<&'a dyn Reflect>, PropertyError>;

    /// Reads the addressed value mutably.
    ///
    /// Follows the write rules of [`set`](Property::set): a read-only or
    /// setter-backed bean field is not handed out.
    fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError>;

    /// Writes the addressed slot; `None` writes null.
    ///
    /// Numbers are widened to the slot type when that is lossless.
    fn set(&self, target: &mut dyn Reflect, value: Option<Box<dyn Reflect>>)
    -> Result<(), PropertyError>;

    /// Writes the addressed slot, which must be declared as `hint` or
    /// `Option<hint>`.
    fn set_as(
        &self,
        target: &mut dyn Reflect,
        hint: TypeInfo,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError>;

    /// Returns `true` if the property resolves on type `ty`.
    #[inline]
    fn is_readable(&self, ty: TypeInfo) -> bool {
        self.property_type(ty).is_ok()
    }

    /// Returns `true` if the property resolves to a writable slot on `ty`.
    fn is_writable(&self, ty: TypeInfo) -> bool;
}

// -----------------------------------------------------------------------------
// Construction

/// One segment of a path, as the variant its shape selects.
#[derive(Debug)]
pub(crate) enum Step {
    Simple(SimpleProperty),
    Indexed(IndexedProperty),
    Mapped(MappedProperty),
}

impl Step {
    pub(crate) fn new(segment: &Segment, policy: NullPolicy) -> Self {
        match segment {
            Segment::Simple { name } => Self::Simple(SimpleProperty::new(name.clone(), policy)),
            Segment::Indexed { name, index } => {
                Self::Indexed(IndexedProperty::new(name.clone(), *index, policy))
            }
            Segment::Mapped { name, key } => {
                Self::Mapped(MappedProperty::new(name.clone(), key.clone(), policy))
            }
        }
    }

    #[inline]
    pub(crate) fn as_property(&self) -> &dyn Property {
        match self {
            Self::Simple(simple) => simple,
            Self::Indexed(indexed) => indexed,
            Self::Mapped(mapped) => mapped,
        }
    }

    /// Reads the segment mutably to walk past it.
    ///
    /// Bean fields are handed out regardless of their access, so a
    /// read-only field can still be written below.
    pub(crate) fn traverse_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        match self {
            Self::Simple(simple) => simple.traverse_mut(target),
            Self::Indexed(indexed) => indexed.get_mut(target),
            Self::Mapped(mapped) => mapped.get_mut(target),
        }
    }

    fn into_shared(self) -> Arc<dyn Property> {
        match self {
            Self::Simple(simple) => Arc::new(simple),
            Self::Indexed(indexed) => Arc::new(indexed),
            Self::Mapped(mapped) => Arc::new(mapped),
        }
    }
}

/// Builds the property of a path, picking the variant from its shape.
///
/// # Examples
///
/// ```
/// use bp_reflect::access::{NullPolicy, Property, parse_property};
///
/// let property = parse_property("items[0].name", NullPolicy::Ignore).unwrap();
/// assert_eq!(property.property_name(), "items[0].name");
///
/// assert!(parse_property("items[", NullPolicy::Ignore).is_err());
/// ```
pub fn parse_property(
    text: &str,
    policy: NullPolicy,
) -> Result<Arc<dyn Property>, MalformedPathError> {
    let path = PropertyPath::parse(text)?;
    if path.is_nested() {
        return Ok(Arc::new(NestedProperty::new(path, policy)));
    }
    match path.segments().first() {
        Some(segment) => Ok(Step::new(segment, policy).into_shared()),
        None => Err(MalformedPathError::new(text, 0, MalformedReason::Empty)),
    }
}
