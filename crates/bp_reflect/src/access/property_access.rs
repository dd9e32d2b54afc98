use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::type_name;
use core::fmt;
use std::sync::OnceLock;

use bp_utils::hash::FixedHashState;
use dashmap::DashMap;

use crate::Reflect;
use crate::access::{NullPolicy, Property, PropertyError, parse_property};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// PropertyAccess

/// A cache of resolved properties, keyed by raw path text.
///
/// Each distinct path is parsed and built once, then shared. Lookups of
/// cached paths take a shard read lock only; a miss builds the property
/// without holding any lock and publishes it with an insert-if-absent, so
/// concurrent first lookups of one path may build it twice but all
/// callers get the instance that was stored first.
///
/// The [`NullPolicy`] is fixed at construction and applies to every
/// property the cache builds.
///
/// # Examples
///
/// ```
/// use bp_reflect::access::{NullPolicy, PropertyAccess};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let access = PropertyAccess::new(NullPolicy::Strict);
/// let mut point = Point { x: 1, y: 2 };
///
/// access.set(&mut point, "y", Box::new(5_i32)).unwrap();
/// assert_eq!(access.get_as::<i64>(&point, "y").unwrap(), Some(&5));
/// assert_eq!(access.len(), 1);
/// ```
pub struct PropertyAccess {
    policy: NullPolicy,
    cache: DashMap<Box<str>, Arc<dyn Property>, FixedHashState>,
}

impl PropertyAccess {
    /// Creates an empty cache.
    #[inline]
    pub fn new(policy: NullPolicy) -> Self {
        Self {
            policy,
            cache: DashMap::with_hasher(FixedHashState),
        }
    }

    /// Returns the process-wide instance for `policy`.
    ///
    /// Created on first request; later requests return the same instance.
    pub fn global(policy: NullPolicy) -> &'static PropertyAccess {
        static IGNORE: OnceLock<PropertyAccess> = OnceLock::new();
        static STRICT: OnceLock<PropertyAccess> = OnceLock::new();

        let cell = match policy {
            NullPolicy::Ignore => &IGNORE,
            NullPolicy::Strict => &STRICT,
        };
        cell.get_or_init(|| PropertyAccess::new(policy))
    }

    /// Returns the null policy of every property built by this cache.
    #[inline]
    pub fn null_policy(&self) -> NullPolicy {
        self.policy
    }

    /// Returns the property of `path`, building and caching it on a miss.
    pub fn property(&self, path: &str) -> Result<Arc<dyn Property>, PropertyError> {
        if let Some(property) = self.cache.get(path) {
            return Ok(Arc::clone(property.value()));
        }

        log::trace!("property cache miss for `{path}`");
        let property = parse_property(path, self.policy)?;
        let entry = self.cache.entry(path.into()).or_insert(property);
        Ok(Arc::clone(entry.value()))
    }

    /// Reads `path` on `target`; `Ok(None)` is null.
    #[inline]
    pub fn get<'a>(
        &self,
        target: &'a dyn Reflect,
        path: &str,
    ) -> Result<Option<&'a dyn Reflect>, PropertyError> {
        self.property(path)?.get(target)
    }

    /// Reads `path` on `target` as a `T`.
    ///
    /// A non-null value of another type is a
    /// [`TypeMismatch`](PropertyError::TypeMismatch).
    pub fn get_as<'a, T: Reflect>(
        &self,
        target: &'a dyn Reflect,
        path: &str,
    ) -> Result<Option<&'a T>, PropertyError> {
        let Some(value) = self.get(target, path)? else {
            return Ok(None);
        };
        match value.downcast_ref::<T>() {
            Some(value) => Ok(Some(value)),
            None => Err(PropertyError::mismatch(
                target.type_path(),
                path,
                type_name::<T>(),
                value.type_path(),
            )),
        }
    }

    /// Reads `path` on `target` mutably.
    ///
    /// A last segment naming a read-only or setter-backed field fails
    /// with [`NoSuchProperty`](PropertyError::NoSuchProperty).
    #[inline]
    pub fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
        path: &str,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        self.property(path)?.get_mut(target)
    }

    /// Writes `value` to `path` on `target`.
    #[inline]
    pub fn set(
        &self,
        target: &mut dyn Reflect,
        path: &str,
        value: Box<dyn Reflect>,
    ) -> Result<(), PropertyError> {
        self.property(path)?.set(target, Some(value))
    }

    /// Writes null to `path` on `target`.
    #[inline]
    pub fn set_null(&self, target: &mut dyn Reflect, path: &str) -> Result<(), PropertyError> {
        self.property(path)?.set(target, None)
    }

    /// Writes `value` to `path` on `target`, selecting the slot declared as
    /// `hint` or `Option<hint>`.
    #[inline]
    pub fn set_as(
        &self,
        target: &mut dyn Reflect,
        path: &str,
        hint: TypeInfo,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.property(path)?.set_as(target, hint, value)
    }

    /// Empties the cache.
    ///
    /// Properties already handed out stay usable.
    pub fn clear(&self) {
        log::debug!("clearing {} cached properties", self.cache.len());
        self.cache.clear();
    }

    /// Returns the number of cached paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no path is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl fmt::Debug for PropertyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccess")
            .field("policy", &self.policy)
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyAccess;
    use crate::access::{NullPolicy, Property, PropertyError};
    use crate::derive::Bean;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Bean, Default)]
    struct Address {
        city: String,
        zip: Option<u32>,
    }

    #[derive(Bean, Default)]
    struct Person {
        #[bean(read_only)]
        id: u64,
        name: String,
        age: u16,
        address: Option<Address>,
        scores: Vec<i32>,
    }

    #[test]
    fn cached_properties_are_shared() {
        let access = PropertyAccess::new(NullPolicy::Ignore);
        let first = access.property("address.city").unwrap();
        let second = access.property("address.city").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(access.len(), 1);

        access.clear();
        assert!(access.is_empty());
        let third = access.property("address.city").unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first.property_name(), "address.city");
    }

    #[test]
    fn malformed_paths_are_not_cached() {
        let access = PropertyAccess::new(NullPolicy::Ignore);
        let err = access.property("scores[x]").unwrap_err();
        assert!(matches!(err, PropertyError::MalformedPath(_)));
        assert!(access.is_empty());
    }

    #[test]
    fn simple_round_trip() {
        let access = PropertyAccess::new(NullPolicy::Strict);
        let mut person = Person::default();

        access.set(&mut person, "name", Box::new(String::from("Ada"))).unwrap();
        access.set(&mut person, "age", Box::new(36_u8)).unwrap();
        assert_eq!(access.get_as::<String>(&person, "name").unwrap().unwrap(), "Ada");
        assert_eq!(access.get_as::<u16>(&person, "age").unwrap(), Some(&36));

        let err = access.get_as::<u32>(&person, "age").unwrap_err();
        assert!(matches!(err, PropertyError::TypeMismatch { .. }));
    }

    #[test]
    fn nested_null_policies() {
        let person = Person::default();

        let lenient = PropertyAccess::new(NullPolicy::Ignore);
        assert!(lenient.get(&person, "address.city").unwrap().is_none());

        let strict = PropertyAccess::new(NullPolicy::Strict);
        assert!(strict.get(&person, "address.city").unwrap_err().is_no_such_property());
    }

    #[test]
    fn get_mut_refuses_read_only_fields() {
        let access = PropertyAccess::new(NullPolicy::Strict);
        let mut person = Person { id: 4, ..Default::default() };

        let err = access.get_mut(&mut person, "id").unwrap_err();
        assert!(err.is_no_such_property());
        assert_eq!(access.get_as::<u64>(&person, "id").unwrap(), Some(&4));

        let name = access.get_mut(&mut person, "name").unwrap().unwrap();
        name.downcast_mut::<String>().unwrap().push_str("Ada");
        assert_eq!(person.name, "Ada");
    }

    #[test]
    fn set_null_and_set_as() {
        let access = PropertyAccess::new(NullPolicy::Strict);
        let mut person = Person {
            address: Some(Address { zip: Some(1), ..Default::default() }),
            ..Default::default()
        };

        access.set_null(&mut person, "address.zip").unwrap();
        assert_eq!(person.address.as_ref().unwrap().zip, None);

        access
            .set_as(&mut person, "address.zip", u32::type_info(), Some(Box::new(8_u16)))
            .unwrap();
        assert_eq!(person.address.as_ref().unwrap().zip, Some(8));

        access.set_null(&mut person, "address").unwrap();
        assert!(person.address.is_none());
    }

    #[test]
    fn indexed_bounds() {
        let access = PropertyAccess::new(NullPolicy::Ignore);
        let person = Person {
            scores: vec![3, 5, 8],
            ..Default::default()
        };
        for i in 0..6 {
            let path = alloc::format!("scores[{i}]");
            match access.get_as::<i32>(&person, &path) {
                Ok(value) => assert!(i < 3 && value.is_some()),
                Err(err) => assert_eq!(err.index(), Some(i)),
            }
        }
    }

    #[test]
    fn global_instances_keep_their_policy() {
        let ignore = PropertyAccess::global(NullPolicy::Ignore);
        let strict = PropertyAccess::global(NullPolicy::Strict);
        assert!(core::ptr::eq(ignore, PropertyAccess::global(NullPolicy::Ignore)));
        assert_eq!(ignore.null_policy(), NullPolicy::Ignore);
        assert_eq!(strict.null_policy(), NullPolicy::Strict);
    }

    #[test]
    fn concurrent_first_access_converges() {
        let access = PropertyAccess::new(NullPolicy::Ignore);
        let person = Person {
            name: String::from("Grace"),
            ..Default::default()
        };

        let seen: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let property = access.property("name").unwrap();
                        let value = property.get(&person).unwrap().unwrap();
                        assert_eq!(value.downcast_ref::<String>().unwrap(), "Grace");
                        property
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let cached = access.property("name").unwrap();
        assert!(seen.iter().all(|property| Arc::ptr_eq(property, &cached)));
        assert_eq!(access.len(), 1);
    }
}
