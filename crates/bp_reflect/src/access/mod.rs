//! Property-path access on reflected values.
//!
//! A property path addresses a slot in an object graph:
//!
//! - `name`: a bean field, or a map entry when the target is a map;
//! - `name[2]`: an element of a sequence member;
//! - `name(key)`: an entry of a map member;
//! - `a.b[0].c(k)`: a chain of the above, resolved left to right.
//!
//! [`PropertyPath`] parses the text, the [`Property`] variants
//! ([`SimpleProperty`], [`IndexedProperty`], [`MappedProperty`],
//! [`NestedProperty`]) read and write the slot, and [`PropertyAccess`]
//! caches built properties by path text.
//!
//! Null is `Option::None`. Reads flatten `Option` slots, and a
//! [`NullPolicy`] decides what a null in the middle of a path means.
//!
//! # Examples
//!
//! ```
//! use bp_reflect::access::{NullPolicy, PropertyAccess};
//! use bp_reflect::derive::Bean;
//!
//! #[derive(Bean, Default)]
//! struct Engine {
//!     cylinders: u8,
//! }
//!
//! #[derive(Bean, Default)]
//! struct Car {
//!     engine: Option<Engine>,
//!     wheels: [u16; 4],
//! }
//!
//! let access = PropertyAccess::new(NullPolicy::Ignore);
//! let mut car = Car::default();
//!
//! assert!(access.get(&car, "engine.cylinders").unwrap().is_none());
//!
//! access.set(&mut car, "engine", Box::new(Engine { cylinders: 6 })).unwrap();
//! assert_eq!(access.get_as::<u8>(&car, "engine.cylinders").unwrap(), Some(&6));
//!
//! access.set(&mut car, "wheels[3]", Box::new(17_u16)).unwrap();
//! assert_eq!(car.wheels, [0, 0, 0, 17]);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod error;
mod path;
mod property;
mod property_access;

// -----------------------------------------------------------------------------
// Exports

pub use error::PropertyError;
pub use path::{MalformedPathError, MalformedReason, PropertyPath, Segment};
pub use property::{
    IndexedProperty, MappedProperty, NestedProperty, NullPolicy, Property, SimpleProperty,
    parse_property,
};
pub use property_access::PropertyAccess;
