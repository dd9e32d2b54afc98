use alloc::boxed::Box;
use alloc::format;

use crate::Reflect;
use crate::access::property::slot::{Site, flatten, flatten_mut};
use crate::access::{
    MalformedPathError, MalformedReason, NullPolicy, Property, PropertyError, PropertyPath,
    Segment, SimpleProperty,
};
use crate::info::{TypeInfo, TypeKind};
use crate::ops::{ReflectMut, ReflectRef};

/// An element of a sequence member, `name[index]`.
///
/// Works the same on `Vec<T>`, `VecDeque<T>` and `[T; N]`. An index past
/// the end, or a null sequence, fails with
/// [`NoSuchIndexProperty`](PropertyError::NoSuchIndexProperty).
///
/// # Examples
///
/// ```
/// use bp_reflect::access::{IndexedProperty, NullPolicy, Property};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Grid {
///     cells: [u8; 4],
/// }
///
/// let grid = Grid { cells: [1, 2, 3, 4] };
/// let cell = IndexedProperty::parse("cells[4]", NullPolicy::Ignore).unwrap();
///
/// assert_eq!(cell.get(&grid).unwrap_err().index(), Some(4));
/// ```
#[derive(Debug)]
pub struct IndexedProperty {
    name: Box<str>,
    collection: SimpleProperty,
    index: usize,
}

impl IndexedProperty {
    /// Creates the property of element `index` of member `name`.
    pub fn new(name: impl Into<Box<str>>, index: usize, policy: NullPolicy) -> Self {
        let collection = SimpleProperty::new(name, policy);
        Self {
            name: format!("{}[{index}]", collection.name()).into(),
            collection,
            index,
        }
    }

    /// Builds the property from path text, which must be a single
    /// indexed segment.
    pub fn parse(text: &str, policy: NullPolicy) -> Result<Self, MalformedPathError> {
        match &*PropertyPath::parse(text)?.into_segments() {
            [Segment::Indexed { name, index }] => Ok(Self::new(name.clone(), *index, policy)),
            _ => Err(MalformedPathError::new(
                text,
                0,
                MalformedReason::WrongShape("indexed"),
            )),
        }
    }

    /// Returns the element position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    fn write(
        &self,
        target: &mut dyn Reflect,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        let site = Site::new(target.type_path(), &self.name);

        let Some(collection) = self.collection.traverse_mut(target)? else {
            return Err(site.no_such_index(self.index));
        };
        let collection_type = collection.reflect_type_info();
        let TypeKind::List(list_info) = collection_type.kind() else {
            return Err(site.no_such());
        };
        let ReflectMut::List(list) = collection.reflect_mut() else {
            return Err(site.no_such());
        };

        let slot = list
            .get_mut(self.index)
            .ok_or_else(|| site.no_such_index(self.index))?;
        site.write_slot(slot, list_info.item(), hint, value)
    }
}

impl Property for IndexedProperty {
    #[inline]
    fn property_name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn null_policy(&self) -> NullPolicy {
        self.collection.null_policy()
    }

    fn property_type(&self, ty: TypeInfo) -> Result<TypeInfo, PropertyError> {
        let collection = self.collection.property_type(ty)?.non_null();
        match collection.kind() {
            TypeKind::List(info) => Ok(info.item()),
            _ => Err(PropertyError::no_such(ty.non_null().type_path(), &self.name)),
        }
    }

    fn get<'a>(&self, target: &'a dyn Reflect) -> Result<Option<&'a dyn Reflect>, PropertyError> {
        let Some(collection) = self.collection.get(target)? else {
            return Err(PropertyError::no_such_index(target.type_path(), &self.name, self.index));
        };
        match collection.reflect_ref() {
            ReflectRef::List(list) => list.get(self.index).map(flatten).ok_or_else(|| {
                PropertyError::no_such_index(target.type_path(), &self.name, self.index)
            }),
            _ => Err(PropertyError::no_such(target.type_path(), &self.name)),
        }
    }

    fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        let site = Site::new(target.type_path(), &self.name);

        let Some(collection) = self.collection.traverse_mut(target)? else {
            return Err(site.no_such_index(self.index));
        };
        match collection.reflect_mut() {
            ReflectMut::List(list) => list
                .get_mut(self.index)
                .map(flatten_mut)
                .ok_or_else(|| site.no_such_index(self.index)),
            _ => Err(site.no_such()),
        }
    }

    #[inline]
    fn set(
        &self,
        target: &mut dyn Reflect,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.write(target, None, value)
    }

    #[inline]
    fn set_as(
        &self,
        target: &mut dyn Reflect,
        hint: TypeInfo,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.write(target, Some(hint), value)
    }

    fn is_writable(&self, ty: TypeInfo) -> bool {
        self.collection
            .property_type(ty)
            .is_ok_and(|collection| matches!(collection.non_null().kind(), TypeKind::List(_)))
    }
}
