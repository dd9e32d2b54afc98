use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;
use std::collections::HashMap;

use bp_reflect::access::{Property, PropertyAccess};
use bp_reflect::info::TypeInfo;
use bp_reflect::{Reflect, Value};

use crate::{ConfigError, IndexKeyError, IndexKeyFactoryRecord};

// -----------------------------------------------------------------------------
// BeanTableIndexKeyFactory

/// Derives the index key of a table element from some of its properties.
///
/// For any element `e` and map `m` holding the values of
/// [`property_names`](Self::property_names) read from `e`,
/// `create_index_key(e)` and `create_index_key_by_properties(m)` yield
/// equal keys.
pub trait BeanTableIndexKeyFactory: Send + Sync + fmt::Debug {
    /// Returns the element type the factory was built for.
    fn element_type(&self) -> TypeInfo;

    /// Returns the name the derived key is published under.
    fn alias(&self) -> &str;

    /// Returns the constituent property paths followed by the alias.
    ///
    /// A change to any of them invalidates the key.
    fn property_names(&self) -> Vec<&str>;

    /// Derives the key from a live element.
    fn create_index_key(&self, element: &dyn Reflect) -> Result<Value, IndexKeyError>;

    /// Derives the key from property values.
    ///
    /// A value stored under the alias is returned as is. Otherwise every
    /// constituent must be present, or the call fails with
    /// [`InsufficientKeys`](ConfigError::InsufficientKeys).
    fn create_index_key_by_properties(
        &self,
        values: &dyn PropertyValues,
    ) -> Result<Value, IndexKeyError>;

    /// Exports the construction parameters.
    fn to_record(&self) -> IndexKeyFactoryRecord;
}

// -----------------------------------------------------------------------------
// PropertyValues

/// Property values keyed by property path.
pub trait PropertyValues {
    /// Returns the value of `name`.
    fn value(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> PropertyValues for HashMap<String, Value, S> {
    #[inline]
    fn value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl PropertyValues for BTreeMap<String, Value> {
    #[inline]
    fn value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K: AsRef<str>, const N: usize> PropertyValues for [(K, Value); N] {
    #[inline]
    fn value(&self, name: &str) -> Option<&Value> {
        find_pair(self, name)
    }
}

impl<K: AsRef<str>> PropertyValues for Vec<(K, Value)> {
    #[inline]
    fn value(&self, name: &str) -> Option<&Value> {
        find_pair(self, name)
    }
}

fn find_pair<'a, K: AsRef<str>>(pairs: &'a [(K, Value)], name: &str) -> Option<&'a Value> {
    pairs
        .iter()
        .find(|(key, _)| key.as_ref() == name)
        .map(|(_, value)| value)
}

// -----------------------------------------------------------------------------
// Shared parts

/// One resolved constituent of a factory.
#[derive(Clone)]
pub(crate) struct Constituent {
    pub name: String,
    pub property: Arc<dyn Property>,
    /// Declared type of the property on the element type.
    pub declared: TypeInfo,
}

impl Constituent {
    /// Resolves `name` on `element`, failing if it is not readable.
    pub fn resolve(
        access: &PropertyAccess,
        element: TypeInfo,
        name: String,
    ) -> Result<Self, ConfigError> {
        let no_such = |source| ConfigError::NoSuchProperty {
            type_path: element.type_path(),
            property: name.clone(),
            source,
        };
        let property = access.property(&name).map_err(no_such)?;
        let declared = property.property_type(element).map_err(no_such)?;
        Ok(Self {
            name,
            property,
            declared,
        })
    }

    /// Reads the constituent from `element`.
    #[inline]
    pub fn read<'a>(
        &self,
        element: &'a dyn Reflect,
    ) -> Result<Option<&'a dyn Reflect>, IndexKeyError> {
        self.property.get(element).map_err(|source| IndexKeyError::Access {
            property: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for Constituent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constituent")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .finish()
    }
}

/// Collects the values of `constituents`, or the names that are missing.
pub(crate) fn collect_values<'a>(
    constituents: &[Constituent],
    values: &'a dyn PropertyValues,
) -> Result<Vec<&'a Value>, ConfigError> {
    let mut found = Vec::with_capacity(constituents.len());
    let mut missing = Vec::new();
    for constituent in constituents {
        match values.value(&constituent.name) {
            Some(value) => found.push(value),
            None => missing.push(constituent.name.clone()),
        }
    }
    if missing.is_empty() {
        Ok(found)
    } else {
        Err(ConfigError::InsufficientKeys { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyValues;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use bp_reflect::Value;

    #[test]
    fn value_sources() {
        let pairs = [("a", Value::Int(1)), ("b", Value::Null)];
        assert_eq!(pairs.value("b"), Some(&Value::Null));
        assert_eq!(pairs.value("c"), None);

        let map = BTreeMap::from([(String::from("a"), Value::from("x"))]);
        assert_eq!(map.value("a").and_then(Value::as_str), Some("x"));
    }
}
