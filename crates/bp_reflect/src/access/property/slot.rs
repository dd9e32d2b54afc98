//! Member resolution and slot writes shared by the property variants.

use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use bp_utils::TypeIdMap;

use crate::Reflect;
use crate::access::PropertyError;
use crate::info::{BeanInfo, TypeInfo};
use crate::ops::{Bean, Map, ReflectMut, ReflectRef, SetFieldError, assign};

// -----------------------------------------------------------------------------
// FieldResolver

/// Resolves a member name to a bean field index, once per bean type.
///
/// The cache only grows: a type that was resolved (or found to lack the
/// member) is never looked up again.
pub(super) struct FieldResolver {
    name: Box<str>,
    cache: RwLock<TypeIdMap<Option<usize>>>,
}

impl FieldResolver {
    #[inline]
    pub fn new(name: Box<str>) -> Self {
        Self {
            name,
            cache: RwLock::new(TypeIdMap::new()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolve(&self, info: &'static BeanInfo, type_id: TypeId) -> Option<usize> {
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(index) = cached {
            return index;
        }

        let index = info.index_of(&self.name);
        log::trace!(
            "resolved property `{}` on `{}` to field {index:?}",
            self.name,
            info.type_path()
        );
        *self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || index)
    }
}

impl fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self.cache.read().map_or(0, |cache| cache.len());
        f.debug_struct("FieldResolver")
            .field("name", &self.name)
            .field("resolved_types", &resolved)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Null flattening

/// Reads through an `Option` slot; `None` is null.
#[inline]
pub(super) fn flatten(value: &dyn Reflect) -> Option<&dyn Reflect> {
    match value.reflect_ref() {
        ReflectRef::Option(inner) => inner,
        _ => Some(value),
    }
}

#[inline]
pub(super) fn flatten_mut(value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
    if !matches!(value.reflect_ref(), ReflectRef::Option(_)) {
        return Some(value);
    }
    match value.reflect_mut() {
        ReflectMut::Option(inner) => inner,
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Site

/// Where an error is raised: the holder type and the property.
pub(super) struct Site<'p> {
    pub type_path: &'static str,
    pub property: &'p str,
}

impl<'p> Site<'p> {
    #[inline]
    pub fn new(type_path: &'static str, property: &'p str) -> Self {
        Self {
            type_path,
            property,
        }
    }

    #[inline]
    pub fn no_such(&self) -> PropertyError {
        PropertyError::no_such(self.type_path, self.property)
    }

    #[inline]
    pub fn no_such_index(&self, index: usize) -> PropertyError {
        PropertyError::no_such_index(self.type_path, self.property, index)
    }

    #[inline]
    pub fn mismatch(&self, expected: TypeInfo, actual: &'static str) -> PropertyError {
        PropertyError::mismatch(self.type_path, self.property, expected.type_path(), actual)
    }

    /// A hint selects the member declared as `hint` or `Option<hint>`.
    pub fn check_hint(&self, slot: TypeInfo, hint: Option<TypeInfo>) -> Result<(), PropertyError> {
        match hint {
            Some(hint) if slot != hint && slot.non_null() != hint => Err(self.no_such()),
            _ => Ok(()),
        }
    }

    pub fn assign(
        &self,
        slot: TypeInfo,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, PropertyError> {
        assign(slot, value).map_err(|err| self.mismatch(err.expected(), err.actual()))
    }

    pub fn write_field(
        &self,
        bean: &mut dyn Bean,
        index: usize,
        slot: TypeInfo,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.check_hint(slot, hint)?;
        let value = self.assign(slot, value)?;
        bean.set_field_at(index, value).map_err(|err| match err {
            SetFieldError::Missing => self.no_such(),
            SetFieldError::Mismatch(value) => self.mismatch(slot, value.type_path()),
            SetFieldError::Rejected(source) => PropertyError::Invocation {
                type_path: self.type_path,
                property: self.property.into(),
                source,
            },
        })
    }

    /// Null on a map whose values are not nullable removes the key.
    pub fn write_entry(
        &self,
        map: &mut dyn Map,
        slot: TypeInfo,
        key: &str,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.check_hint(slot, hint)?;
        if value.is_none() && !slot.is_nullable() {
            map.remove(key);
            return Ok(());
        }
        let value = self.assign(slot, value)?;
        map.insert_boxed(key.into(), value)
            .map_err(|value| self.mismatch(slot, value.type_path()))
    }

    pub fn write_slot(
        &self,
        target: &mut dyn Reflect,
        slot: TypeInfo,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.check_hint(slot, hint)?;
        let value = self.assign(slot, value)?;
        target
            .set(value)
            .map_err(|value| self.mismatch(slot, value.type_path()))
    }
}
