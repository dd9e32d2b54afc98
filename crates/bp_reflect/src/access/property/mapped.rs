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

/// An entry of a map member, `name(key)`.
///
/// A missing key reads as null. Writing null to a map whose values are not
/// `Option` removes the key. A null map follows the [`NullPolicy`].
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use bp_reflect::access::{MappedProperty, NullPolicy, Property};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Labels {
///     names: HashMap<String, String>,
/// }
///
/// let mut labels = Labels { names: HashMap::new() };
/// let english = MappedProperty::parse("names(en)", NullPolicy::Strict).unwrap();
///
/// assert!(english.get(&labels).unwrap().is_none());
/// english.set(&mut labels, Some(Box::new(String::from("hello")))).unwrap();
/// assert_eq!(labels.names["en"], "hello");
/// ```
#[derive(Debug)]
pub struct MappedProperty {
    name: Box<str>,
    collection: SimpleProperty,
    key: Box<str>,
}

impl MappedProperty {
    /// Creates the property of entry `key` of member `name`.
    pub fn new(name: impl Into<Box<str>>, key: impl Into<Box<str>>, policy: NullPolicy) -> Self {
        let collection = SimpleProperty::new(name, policy);
        let key = key.into();
        Self {
            name: format!("{}({key})", collection.name()).into(),
            collection,
            key,
        }
    }

    /// Builds the property from path text, which must be a single
    /// mapped segment.
    pub fn parse(text: &str, policy: NullPolicy) -> Result<Self, MalformedPathError> {
        match &*PropertyPath::parse(text)?.into_segments() {
            [Segment::Mapped { name, key }] => Ok(Self::new(name.clone(), key.clone(), policy)),
            _ => Err(MalformedPathError::new(
                text,
                0,
                MalformedReason::WrongShape("mapped"),
            )),
        }
    }

    /// Returns the entry key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    // A null map reads as null when ignoring nulls.
    fn null_map(&self, type_path: &'static str) -> Result<(), PropertyError> {
        match self.null_policy() {
            NullPolicy::Ignore => Ok(()),
            NullPolicy::Strict => Err(PropertyError::no_such(type_path, self.collection.name())),
        }
    }

    fn write(
        &self,
        target: &mut dyn Reflect,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        let site = Site::new(target.type_path(), &self.name);

        let Some(collection) = self.collection.traverse_mut(target)? else {
            return self.null_map(site.type_path);
        };
        let collection_type = collection.reflect_type_info();
        let TypeKind::Map(map_info) = collection_type.kind() else {
            return Err(site.no_such());
        };
        let ReflectMut::Map(map) = collection.reflect_mut() else {
            return Err(site.no_such());
        };
        site.write_entry(map, map_info.value(), &self.key, hint, value)
    }
}

impl Property for MappedProperty {
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
            TypeKind::Map(info) => Ok(info.value()),
            _ => Err(PropertyError::no_such(ty.non_null().type_path(), &self.name)),
        }
    }

    fn get<'a>(&self, target: &'a dyn Reflect) -> Result<Option<&'a dyn Reflect>, PropertyError> {
        let Some(collection) = self.collection.get(target)? else {
            return self.null_map(target.type_path()).map(|()| None);
        };
        match collection.reflect_ref() {
            ReflectRef::Map(map) => Ok(map.get(&self.key).and_then(flatten)),
            _ => Err(PropertyError::no_such(target.type_path(), &self.name)),
        }
    }

    fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        let site = Site::new(target.type_path(), &self.name);

        let Some(collection) = self.collection.traverse_mut(target)? else {
            return self.null_map(site.type_path).map(|()| None);
        };
        match collection.reflect_mut() {
            ReflectMut::Map(map) => Ok(map.get_mut(&self.key).and_then(flatten_mut)),
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
            .is_ok_and(|collection| matches!(collection.non_null().kind(), TypeKind::Map(_)))
    }
}

#[cfg(test)]
mod tests {
    use crate::access::{MappedProperty, NullPolicy, Property};
    use crate::derive::Bean;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    #[derive(Bean, Default)]
    struct Settings {
        limits: BTreeMap<String, u64>,
        aliases: BTreeMap<String, Option<String>>,
        extra: Option<BTreeMap<String, u64>>,
        name: String,
    }

    #[test]
    fn missing_key_reads_as_null() {
        let settings = Settings::default();
        let limit = MappedProperty::new("limits", "cpu", NullPolicy::Strict);
        assert_eq!(limit.property_name(), "limits(cpu)");
        assert!(limit.get(&settings).unwrap().is_none());
    }

    #[test]
    fn set_inserts_and_null_removes() {
        let mut settings = Settings::default();
        let limit = MappedProperty::new("limits", "cpu", NullPolicy::Strict);

        limit.set(&mut settings, Some(Box::new(4_u32))).unwrap();
        assert_eq!(settings.limits.get("cpu"), Some(&4));
        assert_eq!(limit.get(&settings).unwrap().unwrap().downcast_ref::<u64>(), Some(&4));

        limit.set(&mut settings, None).unwrap();
        assert!(settings.limits.is_empty());
    }

    #[test]
    fn null_is_stored_for_nullable_values() {
        let mut settings = Settings::default();
        let alias = MappedProperty::new("aliases", "x", NullPolicy::Strict);
        alias.set(&mut settings, None).unwrap();
        assert_eq!(settings.aliases.get("x"), Some(&None));
        assert!(alias.get(&settings).unwrap().is_none());
    }

    #[test]
    fn null_map_follows_the_policy() {
        let mut settings = Settings::default();

        let ignore = MappedProperty::new("extra", "a", NullPolicy::Ignore);
        assert!(ignore.get(&settings).unwrap().is_none());
        ignore.set(&mut settings, Some(Box::new(1_u64))).unwrap();
        assert!(settings.extra.is_none());

        let strict = MappedProperty::new("extra", "a", NullPolicy::Strict);
        assert!(strict.get(&settings).unwrap_err().is_no_such_property());
        assert!(strict.set(&mut settings, Some(Box::new(1_u64))).is_err());
    }

    #[test]
    fn declared_types() {
        let ty = Settings::type_info();
        let limit = MappedProperty::new("limits", "cpu", NullPolicy::Strict);
        assert!(limit.property_type(ty).unwrap().is::<u64>());
        assert!(MappedProperty::new("extra", "a", NullPolicy::Strict).is_writable(ty));
        assert!(!MappedProperty::new("name", "a", NullPolicy::Strict).is_readable(ty));
    }
}
