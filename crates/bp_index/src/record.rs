use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use bp_reflect::access::PropertyAccess;
use bp_reflect::registry::TypeRegistry;
use serde::{Deserialize, Serialize};

use crate::{
    BeanTableIndexKeyFactory, ConcatenateKeyFactory, ConfigError, SubstringBounds,
    SubstringKeyFactory,
};

/// The record format version written by this crate.
pub const RECORD_VERSION: u32 = 1;

/// The strategy of an index key factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryKind {
    Concatenate,
    Substring,
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Concatenate => "concatenate",
            Self::Substring => "substring",
        })
    }
}

/// The exported construction parameters of an index key factory.
///
/// Rebuilding a factory from its record yields one that derives the same
/// keys.
///
/// # Examples
///
/// ```
/// use bp_index::{BeanTableIndexKeyFactory, SubstringBounds, SubstringKeyFactory};
/// use bp_reflect::access::{NullPolicy, PropertyAccess};
/// use bp_reflect::derive::Bean;
/// use bp_reflect::info::Typed;
/// use bp_reflect::registry::TypeRegistry;
///
/// #[derive(Bean)]
/// struct Host {
///     name: String,
/// }
///
/// let access = PropertyAccess::new(NullPolicy::Ignore);
/// let bounds = SubstringBounds::new(0, Some(2), false);
/// let factory =
///     SubstringKeyFactory::new(Host::type_info(), "rack", "name", bounds, &access).unwrap();
///
/// let record = factory.to_record();
/// let mut registry = TypeRegistry::new();
/// registry.register::<Host>();
/// let rebuilt = record.build(&registry, &access).unwrap();
///
/// let host = Host { name: "r7-node3".into() };
/// let key = factory.create_index_key(&host).unwrap();
/// assert_eq!(rebuilt.create_index_key(&host).unwrap(), key);
/// assert_eq!(rebuilt.to_record(), record);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexKeyFactoryRecord {
    pub kind: FactoryKind,
    pub version: u32,
    /// Full type path of the element type.
    pub element: String,
    pub alias: String,
    pub properties: Vec<String>,
    /// Present for [`FactoryKind::Substring`] only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substring: Option<SubstringBounds>,
}

impl IndexKeyFactoryRecord {
    /// Rebuilds the factory described by this record.
    ///
    /// The element type is resolved through `registry`.
    pub fn build(
        &self,
        registry: &TypeRegistry,
        access: &PropertyAccess,
    ) -> Result<Box<dyn BeanTableIndexKeyFactory>, ConfigError> {
        if self.version != RECORD_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                version: self.version,
            });
        }
        let element = registry
            .resolve(&self.element)
            .ok_or_else(|| ConfigError::UnknownType {
                name: self.element.clone(),
            })?;

        let factory: Box<dyn BeanTableIndexKeyFactory> = match self.kind {
            FactoryKind::Concatenate => {
                if self.substring.is_some() {
                    return Err(ConfigError::InvalidRecord {
                        reason: "a concatenate record has no substring bounds",
                    });
                }
                let properties = self.properties.iter().cloned();
                Box::new(ConcatenateKeyFactory::new(
                    element,
                    self.alias.as_str(),
                    properties,
                    access,
                )?)
            }
            FactoryKind::Substring => {
                let [property] = self.properties.as_slice() else {
                    return Err(ConfigError::InvalidRecord {
                        reason: "a substring record names exactly one property",
                    });
                };
                let Some(bounds) = self.substring else {
                    return Err(ConfigError::InvalidRecord {
                        reason: "a substring record needs substring bounds",
                    });
                };
                Box::new(SubstringKeyFactory::new(
                    element,
                    self.alias.as_str(),
                    property.as_str(),
                    bounds,
                    access,
                )?)
            }
        };

        log::debug!(
            "rebuilt {} index key factory `{}` on `{}`",
            self.kind,
            self.alias,
            element
        );
        Ok(factory)
    }
}

#[cfg(test)]
mod tests {
    use super::{FactoryKind, IndexKeyFactoryRecord, RECORD_VERSION};
    use crate::{
        BeanTableIndexKeyFactory, ConcatenateKeyFactory, ConfigError, SubstringBounds,
        SubstringKeyFactory,
    };
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use bp_reflect::access::{NullPolicy, PropertyAccess};
    use bp_reflect::derive::Bean;
    use bp_reflect::info::Typed;
    use bp_reflect::registry::TypeRegistry;

    #[derive(Bean)]
    struct Ticket {
        queue: String,
        number: u32,
        title: Option<String>,
    }

    fn ticket() -> Ticket {
        Ticket {
            queue: String::from("OPS"),
            number: 4021,
            title: Some(String::from("Disk full on db-2")),
        }
    }

    fn setup() -> (TypeRegistry, PropertyAccess) {
        let mut registry = TypeRegistry::new();
        registry.register::<Ticket>();
        (registry, PropertyAccess::new(NullPolicy::Ignore))
    }

    fn factories(access: &PropertyAccess) -> [Box<dyn BeanTableIndexKeyFactory>; 2] {
        let ty = Ticket::type_info();
        [
            Box::new(ConcatenateKeyFactory::new(ty, "ref", ["queue", "number"], access).unwrap()),
            Box::new(
                SubstringKeyFactory::new(
                    ty,
                    "suffix",
                    "title",
                    SubstringBounds::new(0, Some(4), true),
                    access,
                )
                .unwrap(),
            ),
        ]
    }

    #[test]
    fn json_round_trip_keeps_keys() {
        let (registry, access) = setup();
        for factory in factories(&access) {
            let text = serde_json::to_string(&factory.to_record()).unwrap();
            let record: IndexKeyFactoryRecord = serde_json::from_str(&text).unwrap();
            let rebuilt = record.build(&registry, &access).unwrap();

            assert_eq!(
                rebuilt.create_index_key(&ticket()).unwrap(),
                factory.create_index_key(&ticket()).unwrap(),
            );
            assert_eq!(rebuilt.property_names(), factory.property_names());
        }
    }

    #[test]
    fn ron_round_trip_keeps_keys() {
        let (registry, access) = setup();
        for factory in factories(&access) {
            let text = ron::to_string(&factory.to_record()).unwrap();
            let record: IndexKeyFactoryRecord = ron::from_str(&text).unwrap();
            let rebuilt = record.build(&registry, &access).unwrap();

            assert_eq!(
                rebuilt.create_index_key(&ticket()).unwrap(),
                factory.create_index_key(&ticket()).unwrap(),
            );
        }
    }

    #[test]
    fn json_shape() {
        let (_, access) = setup();
        let [concat, substring] = factories(&access);

        let value = serde_json::to_value(concat.to_record()).unwrap();
        assert_eq!(value["kind"], "concatenate");
        assert_eq!(value["version"], RECORD_VERSION);
        assert_eq!(value["properties"], serde_json::json!(["queue", "number"]));
        assert!(value.get("substring").is_none());

        let value = serde_json::to_value(substring.to_record()).unwrap();
        assert_eq!(value["kind"], "substring");
        assert_eq!(value["substring"]["end_index"], 4);
        assert_eq!(value["substring"]["reverse"], true);
    }

    #[test]
    fn rejects_bad_records() {
        let (registry, access) = setup();
        let record = IndexKeyFactoryRecord {
            kind: FactoryKind::Concatenate,
            version: RECORD_VERSION,
            element: String::from("Ticket"),
            alias: String::from("k"),
            properties: vec![String::from("queue")],
            substring: None,
        };
        assert!(record.build(&registry, &access).is_ok());

        let future = IndexKeyFactoryRecord {
            version: RECORD_VERSION + 1,
            ..record.clone()
        };
        let err = future.build(&registry, &access).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { version: 2 }));

        let unknown = IndexKeyFactoryRecord {
            element: String::from("Invoice"),
            ..record.clone()
        };
        let err = unknown.build(&registry, &access).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownType { .. }));

        let substring = IndexKeyFactoryRecord {
            kind: FactoryKind::Substring,
            ..record.clone()
        };
        let err = substring.build(&registry, &access).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRecord { .. }));

        let pair = IndexKeyFactoryRecord {
            kind: FactoryKind::Substring,
            properties: vec![String::from("queue"), String::from("title")],
            substring: Some(SubstringBounds::new(0, None, false)),
            ..record
        };
        let err = pair.build(&registry, &access).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRecord { .. }));
    }
}
