use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use bp_editor::DelimitedListEditor;
use bp_reflect::access::PropertyAccess;
use bp_reflect::info::{TypeInfo, TypeKind};
use bp_reflect::registry::TypeRegistry;
use bp_reflect::{Reflect, Value};

use crate::factory::{Constituent, collect_values};
use crate::{
    BeanTableIndexKeyFactory, ConfigError, FactoryKind, IndexKeyError, IndexKeyFactoryRecord,
    PropertyValues, RECORD_VERSION,
};

/// Joins the text forms of several scalar properties, in order.
///
/// Null renders as `null`. The key is always a [`Value::Str`].
///
/// # Examples
///
/// ```
/// use bp_index::{BeanTableIndexKeyFactory, ConcatenateKeyFactory, ConfigError};
/// use bp_reflect::Value;
/// use bp_reflect::access::{NullPolicy, PropertyAccess};
/// use bp_reflect::derive::Bean;
/// use bp_reflect::info::Typed;
///
/// #[derive(Bean)]
/// struct Part {
///     family: String,
///     number: u32,
///     revision: Option<char>,
/// }
///
/// let access = PropertyAccess::new(NullPolicy::Ignore);
/// let factory = ConcatenateKeyFactory::new(
///     Part::type_info(),
///     "code",
///     ["family", "number", "revision"],
///     &access,
/// )
/// .unwrap();
///
/// let part = Part { family: "AX".into(), number: 12, revision: None };
/// assert_eq!(factory.create_index_key(&part).unwrap(), Value::from("AX12null"));
///
/// let err = ConcatenateKeyFactory::new(Part::type_info(), "x", ["weight"], &access);
/// assert!(matches!(err, Err(ConfigError::NoSuchProperty { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct ConcatenateKeyFactory {
    element: TypeInfo,
    alias: String,
    constituents: Vec<Constituent>,
}

impl ConcatenateKeyFactory {
    /// Creates a factory over `properties` of `element`.
    ///
    /// Every property must be readable on `element` and declared as a
    /// scalar or an optional scalar.
    pub fn new<I>(
        element: TypeInfo,
        alias: impl Into<String>,
        properties: I,
        access: &PropertyAccess,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let constituents = properties
            .into_iter()
            .map(|name| {
                let constituent = Constituent::resolve(access, element, name.into())?;
                let declared = constituent.declared.non_null();
                if matches!(declared.kind(), TypeKind::Value) {
                    Ok(constituent)
                } else {
                    Err(ConfigError::TypeMismatch {
                        property: constituent.name,
                        expected: "scalar",
                        actual: declared.type_path(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if constituents.is_empty() {
            return Err(ConfigError::NoProperties);
        }

        Ok(Self {
            element,
            alias: alias.into(),
            constituents,
        })
    }

    /// Creates a factory from raw configuration text.
    ///
    /// `type_name` is a full type path or an unambiguous short name known
    /// to `registry`. `properties` is a comma-separated list.
    ///
    /// # Examples
    ///
    /// ```
    /// use bp_index::{BeanTableIndexKeyFactory, ConcatenateKeyFactory};
    /// use bp_reflect::access::{NullPolicy, PropertyAccess};
    /// use bp_reflect::derive::Bean;
    /// use bp_reflect::registry::TypeRegistry;
    ///
    /// #[derive(Bean)]
    /// struct Flight {
    ///     carrier: String,
    ///     number: u16,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<Flight>();
    /// let access = PropertyAccess::new(NullPolicy::Ignore);
    ///
    /// let factory =
    ///     ConcatenateKeyFactory::from_config("Flight", "code", "carrier, number", &registry, &access)
    ///         .unwrap();
    /// assert_eq!(factory.property_names(), ["carrier", "number", "code"]);
    /// ```
    pub fn from_config(
        type_name: &str,
        alias: &str,
        properties: &str,
        registry: &TypeRegistry,
        access: &PropertyAccess,
    ) -> Result<Self, ConfigError> {
        let element = registry
            .resolve(type_name)
            .ok_or_else(|| ConfigError::UnknownType {
                name: type_name.into(),
            })?;
        let names = DelimitedListEditor::<String>::new(",").parse_items(properties)?;
        Self::new(element, alias, names, access)
    }

    fn concat<'a>(values: impl IntoIterator<Item = &'a Value>) -> Value {
        let mut key = String::new();
        for value in values {
            // Writing to a `String` cannot fail.
            let _ = write!(key, "{value}");
        }
        Value::Str(key)
    }
}

impl BeanTableIndexKeyFactory for ConcatenateKeyFactory {
    #[inline]
    fn element_type(&self) -> TypeInfo {
        self.element
    }

    #[inline]
    fn alias(&self) -> &str {
        &self.alias
    }

    fn property_names(&self) -> Vec<&str> {
        self.constituents
            .iter()
            .map(|c| c.name.as_str())
            .chain([self.alias.as_str()])
            .collect()
    }

    fn create_index_key(&self, element: &dyn Reflect) -> Result<Value, IndexKeyError> {
        let mut values = Vec::with_capacity(self.constituents.len());
        for constituent in &self.constituents {
            let value = match constituent.read(element)? {
                None => Value::Null,
                Some(value) => value.to_value().ok_or_else(|| ConfigError::TypeMismatch {
                    property: constituent.name.clone(),
                    expected: "scalar",
                    actual: value.type_path(),
                })?,
            };
            values.push(value);
        }
        Ok(Self::concat(&values))
    }

    fn create_index_key_by_properties(
        &self,
        values: &dyn PropertyValues,
    ) -> Result<Value, IndexKeyError> {
        if let Some(key) = values.value(&self.alias) {
            return Ok(key.clone());
        }
        let found = collect_values(&self.constituents, values)?;
        Ok(Self::concat(found))
    }

    fn to_record(&self) -> IndexKeyFactoryRecord {
        IndexKeyFactoryRecord {
            kind: FactoryKind::Concatenate,
            version: RECORD_VERSION,
            element: self.element.type_path().into(),
            alias: self.alias.clone(),
            properties: self.constituents.iter().map(|c| c.name.clone()).collect(),
            substring: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConcatenateKeyFactory;
    use crate::{BeanTableIndexKeyFactory, ConfigError, IndexKeyError};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use bp_reflect::Value;
    use bp_reflect::access::{NullPolicy, PropertyAccess, PropertyError};
    use bp_reflect::derive::Bean;
    use bp_reflect::info::Typed;
    use bp_reflect::registry::TypeRegistry;

    #[derive(Bean, Default)]
    struct Shipment {
        origin: String,
        weight: f64,
        grade: f32,
        priority: Option<u8>,
        stops: Vec<String>,
        route: Option<Route>,
    }

    #[derive(Bean, Default)]
    struct Route {
        code: String,
    }

    fn factory(properties: &[&str], policy: NullPolicy) -> ConcatenateKeyFactory {
        let access = PropertyAccess::new(policy);
        let properties = properties.iter().copied();
        ConcatenateKeyFactory::new(Shipment::type_info(), "key", properties, &access).unwrap()
    }

    fn shipment() -> Shipment {
        Shipment {
            origin: String::from("OSL"),
            weight: 2.5,
            grade: 0.1,
            priority: Some(3),
            stops: vec![String::from("CPH"), String::from("AMS")],
            route: Some(Route {
                code: String::from("R9"),
            }),
        }
    }

    #[test]
    fn joins_in_declared_order() {
        let properties = ["priority", "origin", "weight", "stops[1]", "route.code"];
        let factory = factory(&properties, NullPolicy::Ignore);
        let key = factory.create_index_key(&shipment()).unwrap();
        assert_eq!(key, Value::from("3OSL2.5AMSR9"));
    }

    #[test]
    fn single_precision_floats_render_short() {
        let factory = factory(&["origin", "grade"], NullPolicy::Ignore);
        let key = factory.create_index_key(&shipment()).unwrap();
        assert_eq!(key, Value::from("OSL0.1"));

        let values = [("origin", Value::from("OSL")), ("grade", Value::from(0.1_f32))];
        assert_eq!(factory.create_index_key_by_properties(&values).unwrap(), key);
    }

    #[test]
    fn map_route_matches_element_route() {
        let factory = factory(&["origin", "priority", "route.code"], NullPolicy::Ignore);
        let mut element = shipment();
        element.priority = None;
        element.route = None;

        let values = BTreeMap::from([
            (String::from("origin"), Value::from("OSL")),
            (String::from("priority"), Value::Null),
            (String::from("route.code"), Value::Null),
        ]);
        let by_element = factory.create_index_key(&element).unwrap();
        let by_values = factory.create_index_key_by_properties(&values).unwrap();
        assert_eq!(by_element, Value::from("OSLnullnull"));
        assert_eq!(by_element, by_values);

        let values = vec![("origin", Value::from("OSL")), ("priority", Value::UInt(3))];
        let err = factory.create_index_key_by_properties(&values).unwrap_err();
        let IndexKeyError::Config(ConfigError::InsufficientKeys { missing }) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(missing, ["route.code"]);
    }

    #[test]
    fn alias_short_circuits() {
        let factory = factory(&["origin", "weight"], NullPolicy::Ignore);
        let values = [("key", Value::from("cached"))];
        let key = factory.create_index_key_by_properties(&values).unwrap();
        assert_eq!(key, Value::from("cached"));
        assert_eq!(factory.property_names(), ["origin", "weight", "key"]);
    }

    #[test]
    fn construction_fails_fast() {
        let access = PropertyAccess::new(NullPolicy::Ignore);
        let ty = Shipment::type_info();

        let err = ConcatenateKeyFactory::new(ty, "k", ["origin", "destination"], &access);
        let Err(ConfigError::NoSuchProperty { property, .. }) = err else {
            panic!("unexpected result: {err:?}");
        };
        assert_eq!(property, "destination");

        let err = ConcatenateKeyFactory::new(ty, "k", ["stops"], &access);
        assert!(matches!(err, Err(ConfigError::TypeMismatch { expected: "scalar", .. })));

        let err = ConcatenateKeyFactory::new(ty, "k", ["origin["], &access);
        assert!(matches!(err, Err(ConfigError::NoSuchProperty { .. })));

        let err = ConcatenateKeyFactory::new(ty, "k", Vec::<String>::new(), &access);
        assert!(matches!(err, Err(ConfigError::NoProperties)));
    }

    #[test]
    fn strict_null_intermediate_is_an_access_error() {
        let factory = factory(&["route.code"], NullPolicy::Strict);
        let err = factory.create_index_key(&Shipment::default()).unwrap_err();
        let IndexKeyError::Access { property, source } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(property, "route.code");
        assert!(matches!(source, PropertyError::NoSuchProperty { .. }));
    }

    #[test]
    fn from_config_resolves_names() {
        let mut registry = TypeRegistry::new();
        registry.register::<Shipment>();
        let access = PropertyAccess::new(NullPolicy::Ignore);

        let properties = " origin ,weight";
        let factory =
            ConcatenateKeyFactory::from_config("Shipment", "k", properties, &registry, &access)
                .unwrap();
        assert_eq!(factory.property_names(), ["origin", "weight", "k"]);

        let err = ConcatenateKeyFactory::from_config("Parcel", "k", "origin", &registry, &access);
        assert!(matches!(err, Err(ConfigError::UnknownType { .. })));
    }
}
