use alloc::string::String;
use alloc::vec::Vec;

use bp_reflect::access::PropertyAccess;
use bp_reflect::info::TypeInfo;
use bp_reflect::{Reflect, Value};
use serde::{Deserialize, Serialize};

use crate::factory::{Constituent, collect_values};
use crate::{
    BeanTableIndexKeyFactory, ConfigError, FactoryKind, IndexKeyError, IndexKeyFactoryRecord,
    PropertyValues, RECORD_VERSION,
};

// -----------------------------------------------------------------------------
// SubstringBounds

/// A character range of a string.
///
/// Without `reverse` the range is `begin_index..end_index`. With `reverse`
/// both bounds count from the end of the string, so `begin_index = 2`
/// drops the last two characters. An absent `end_index` reaches the far
/// end. Bounds past the string clamp to it.
///
/// # Examples
///
/// ```
/// use bp_index::SubstringBounds;
///
/// assert_eq!(SubstringBounds::new(2, None, false).apply("HELLO"), "LLO");
/// assert_eq!(SubstringBounds::new(10, None, false).apply("HELLO"), "");
/// assert_eq!(SubstringBounds::new(2, None, true).apply("HELLO"), "HEL");
/// assert_eq!(SubstringBounds::new(1, Some(3), true).apply("HELLO"), "LL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstringBounds {
    pub begin_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
    #[serde(default)]
    pub reverse: bool,
}

impl SubstringBounds {
    /// Creates bounds without validating them.
    #[inline]
    pub const fn new(begin_index: usize, end_index: Option<usize>, reverse: bool) -> Self {
        Self {
            begin_index,
            end_index,
            reverse,
        }
    }

    /// Checks that `end_index` is not zero and exceeds `begin_index`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.end_index {
            Some(0) => Err(ConfigError::InvalidBounds {
                reason: "end index must not be zero",
            }),
            Some(end) if self.begin_index >= end => Err(ConfigError::InvalidBounds {
                reason: "begin index must be less than end index",
            }),
            _ => Ok(()),
        }
    }

    /// Extracts the range from `text`, in characters.
    pub fn apply(&self, text: &str) -> String {
        let len = text.chars().count();
        let (start, end) = if self.reverse {
            let start = self.end_index.map_or(0, |end| len.saturating_sub(end));
            (start, len.saturating_sub(self.begin_index))
        } else {
            let end = self.end_index.map_or(len, |end| end.min(len));
            (self.begin_index.min(len), end)
        };
        if start >= end {
            return String::new();
        }
        text.chars().skip(start).take(end - start).collect()
    }
}

// -----------------------------------------------------------------------------
// SubstringKeyFactory

/// Takes a character range of one string property.
///
/// A null property yields [`Value::Null`], any string yields a
/// [`Value::Str`].
///
/// # Examples
///
/// ```
/// use bp_index::{BeanTableIndexKeyFactory, SubstringBounds, SubstringKeyFactory};
/// use bp_reflect::Value;
/// use bp_reflect::access::{NullPolicy, PropertyAccess};
/// use bp_reflect::derive::Bean;
/// use bp_reflect::info::Typed;
///
/// #[derive(Bean)]
/// struct Phone {
///     number: String,
/// }
///
/// let access = PropertyAccess::new(NullPolicy::Ignore);
/// let bounds = SubstringBounds::new(0, Some(3), false);
/// let factory =
///     SubstringKeyFactory::new(Phone::type_info(), "prefix", "number", bounds, &access).unwrap();
///
/// let phone = Phone { number: "0471234567".into() };
/// assert_eq!(factory.create_index_key(&phone).unwrap(), Value::from("047"));
/// ```
#[derive(Debug, Clone)]
pub struct SubstringKeyFactory {
    element: TypeInfo,
    alias: String,
    source: [Constituent; 1],
    bounds: SubstringBounds,
}

impl SubstringKeyFactory {
    /// Creates a factory over `property` of `element`.
    ///
    /// The property must be declared as `String` or `Option<String>`.
    pub fn new(
        element: TypeInfo,
        alias: impl Into<String>,
        property: impl Into<String>,
        bounds: SubstringBounds,
        access: &PropertyAccess,
    ) -> Result<Self, ConfigError> {
        bounds.validate()?;

        let source = Constituent::resolve(access, element, property.into())?;
        let declared = source.declared.non_null();
        if !declared.is::<String>() {
            return Err(ConfigError::TypeMismatch {
                property: source.name,
                expected: "String",
                actual: declared.type_path(),
            });
        }

        Ok(Self {
            element,
            alias: alias.into(),
            source: [source],
            bounds,
        })
    }

    /// Returns the range taken from the property.
    #[inline]
    pub fn bounds(&self) -> SubstringBounds {
        self.bounds
    }

    #[inline]
    fn property_name(&self) -> &str {
        &self.source[0].name
    }

    fn mismatch(&self, actual: &'static str) -> IndexKeyError {
        IndexKeyError::Config(ConfigError::TypeMismatch {
            property: self.property_name().into(),
            expected: "String",
            actual,
        })
    }
}

impl BeanTableIndexKeyFactory for SubstringKeyFactory {
    #[inline]
    fn element_type(&self) -> TypeInfo {
        self.element
    }

    #[inline]
    fn alias(&self) -> &str {
        &self.alias
    }

    fn property_names(&self) -> Vec<&str> {
        Vec::from([self.property_name(), self.alias.as_str()])
    }

    fn create_index_key(&self, element: &dyn Reflect) -> Result<Value, IndexKeyError> {
        let Some(value) = self.source[0].read(element)? else {
            return Ok(Value::Null);
        };
        match value.downcast_ref::<String>() {
            Some(text) => Ok(Value::Str(self.bounds.apply(text))),
            None => Err(self.mismatch(value.type_path())),
        }
    }

    fn create_index_key_by_properties(
        &self,
        values: &dyn PropertyValues,
    ) -> Result<Value, IndexKeyError> {
        if let Some(key) = values.value(&self.alias) {
            return Ok(key.clone());
        }
        match collect_values(&self.source, values)?[0] {
            Value::Null => Ok(Value::Null),
            Value::Str(text) => Ok(Value::Str(self.bounds.apply(text))),
            other => Err(self.mismatch(other.kind_name())),
        }
    }

    fn to_record(&self) -> IndexKeyFactoryRecord {
        IndexKeyFactoryRecord {
            kind: FactoryKind::Substring,
            version: RECORD_VERSION,
            element: self.element.type_path().into(),
            alias: self.alias.clone(),
            properties: Vec::from([self.property_name().into()]),
            substring: Some(self.bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SubstringBounds, SubstringKeyFactory};
    use crate::{BeanTableIndexKeyFactory, ConfigError, IndexKeyError};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use bp_reflect::Value;
    use bp_reflect::access::{NullPolicy, PropertyAccess};
    use bp_reflect::derive::Bean;
    use bp_reflect::info::Typed;

    #[derive(Bean, Default)]
    struct Contact {
        email: String,
        alias: Option<String>,
        age: u32,
        tags: BTreeMap<String, String>,
    }

    fn factory(
        property: &str,
        bounds: SubstringBounds,
    ) -> Result<SubstringKeyFactory, ConfigError> {
        let access = PropertyAccess::new(NullPolicy::Ignore);
        SubstringKeyFactory::new(Contact::type_info(), "key", property, bounds, &access)
    }

    fn apply(begin: usize, end: Option<usize>, reverse: bool) -> String {
        SubstringBounds::new(begin, end, reverse).apply("HELLO")
    }

    #[test]
    fn forward_bounds() {
        assert_eq!(apply(2, None, false), "LLO");
        assert_eq!(apply(10, None, false), "");
        assert_eq!(apply(1, Some(3), false), "EL");
        assert_eq!(apply(0, Some(99), false), "HELLO");
        assert_eq!(apply(5, None, false), "");
    }

    #[test]
    fn reverse_bounds() {
        assert_eq!(apply(2, None, true), "HEL");
        assert_eq!(apply(0, Some(2), true), "LO");
        assert_eq!(apply(1, Some(3), true), "LL");
        assert_eq!(apply(0, Some(99), true), "HELLO");
        assert_eq!(apply(9, None, true), "");
    }

    #[test]
    fn counts_characters() {
        let bounds = SubstringBounds::new(1, Some(3), false);
        assert_eq!(bounds.apply("żółw"), "ół");
    }

    #[test]
    fn rejects_bad_bounds() {
        for bounds in [
            SubstringBounds::new(0, Some(0), false),
            SubstringBounds::new(3, Some(3), false),
            SubstringBounds::new(4, Some(2), true),
        ] {
            let err = factory("email", bounds).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidBounds { .. }), "{bounds:?}");
        }
    }

    #[test]
    fn requires_a_string_property() {
        let bounds = SubstringBounds::new(0, None, false);
        assert!(factory("alias", bounds).is_ok());
        assert!(factory("tags(home)", bounds).is_ok());

        let err = factory("age", bounds).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { actual: "u32", .. }));
        let err = factory("phone", bounds).unwrap_err();
        assert!(matches!(err, ConfigError::NoSuchProperty { .. }));
    }

    #[test]
    fn element_and_map_agree() {
        let factory = factory("email", SubstringBounds::new(0, Some(4), false)).unwrap();
        let contact = Contact {
            email: String::from("jane@example.org"),
            ..Contact::default()
        };
        let by_element = factory.create_index_key(&contact).unwrap();
        let by_values = factory
            .create_index_key_by_properties(&[("email", Value::from("jane@example.org"))])
            .unwrap();
        assert_eq!(by_element, Value::from("jane"));
        assert_eq!(by_element, by_values);
        assert_eq!(factory.property_names(), ["email", "key"]);
    }

    #[test]
    fn null_and_foreign_values() {
        let factory = factory("alias", SubstringBounds::new(1, None, false)).unwrap();
        assert_eq!(factory.create_index_key(&Contact::default()).unwrap(), Value::Null);
        let key = factory.create_index_key_by_properties(&[("alias", Value::Null)]).unwrap();
        assert_eq!(key, Value::Null);

        let err = factory
            .create_index_key_by_properties(&[("alias", Value::Int(4))])
            .unwrap_err();
        assert!(matches!(
            err,
            IndexKeyError::Config(ConfigError::TypeMismatch { actual: "int", .. })
        ));

        let err = factory
            .create_index_key_by_properties(&[("email", Value::from("x"))])
            .unwrap_err();
        assert!(matches!(
            err,
            IndexKeyError::Config(ConfigError::InsufficientKeys { .. })
        ));
    }
}
