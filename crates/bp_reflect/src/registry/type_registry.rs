use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use bp_utils::TypeIdMap;
use bp_utils::hash::{HashMap, HashSet};

use crate::info::{TypeInfo, TypeKind, Typed};

// -----------------------------------------------------------------------------
// AutoRegistration

/// A type submitted for automatic registration.
///
/// `#[derive(Bean)]` submits one of these per bean when the
/// `auto_register` feature is enabled; [`TypeRegistry::auto_register`]
/// collects them.
pub struct AutoRegistration {
    type_info: fn() -> TypeInfo,
}

impl AutoRegistration {
    /// Creates a registration entry.
    #[inline]
    pub const fn new(type_info: fn() -> TypeInfo) -> Self {
        Self { type_info }
    }

    /// Returns the registered type.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types, searchable by name.
///
/// Registering a type also registers the types reachable from it (bean
/// fields, list items, map values, option contents).
///
/// Short names that are registered by two different types become
/// ambiguous and can then only be resolved by full path.
///
/// # Examples
///
/// ```
/// use bp_reflect::{derive::Bean, registry::TypeRegistry};
///
/// #[derive(Bean)]
/// struct Account {
///     owner: String,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Account>();
///
/// let info = registry.resolve("Account").unwrap();
/// assert!(info.is::<Account>());
/// assert!(registry.resolve("String").unwrap().is::<String>());
/// ```
pub struct TypeRegistry {
    types: TypeIdMap<TypeInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn empty() -> Self {
        Self {
            types: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Creates a registry with the scalar types registered.
    ///
    /// - `bool` `char` `String`
    /// - `i8 - i64` `isize`
    /// - `u8 - u64` `usize`
    /// - `f32` `f64`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<String>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry
    }

    /// Registers `T` and the types reachable from it.
    ///
    /// Returns `false` if `T` was already registered.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> bool {
        self.register_info(T::type_info())
    }

    /// Registers a type from its [`TypeInfo`] and the types reachable from it.
    ///
    /// Returns `false` if the type was already registered; its dependencies
    /// are not visited again in that case.
    pub fn register_info(&mut self, info: TypeInfo) -> bool {
        if !self.types.try_insert(info.type_id(), || info) {
            return false;
        }
        self.add_name_indices(info);

        match info.kind() {
            TypeKind::Value => {}
            TypeKind::Bean(bean) => {
                for field in bean.fields() {
                    self.register_info(field.type_info());
                }
            }
            TypeKind::List(list) => {
                self.register_info(list.item());
            }
            TypeKind::Map(map) => {
                self.register_info(map.value());
            }
            TypeKind::Option(option) => {
                self.register_info(option.inner());
            }
        }
        true
    }

    // # Validity
    // The type must **not** already exist.
    fn add_name_indices(&mut self, info: TypeInfo) {
        let type_name = info.type_name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.contains_key(type_name) {
                log::warn!(
                    "type name `{type_name}` is ambiguous, `{}` can only be resolved by full path",
                    info.type_path()
                );
                self.type_name_to_id.remove(type_name);
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, info.type_id());
            }
        }

        self.type_path_to_id.insert(info.type_path(), info.type_id());
    }

    /// Registers every type submitted through [`AutoRegistration`].
    ///
    /// Returns the number of newly registered root types.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> usize {
        let mut count = 0;
        for registration in inventory::iter::<AutoRegistration> {
            if self.register_info(registration.type_info()) {
                count += 1;
            }
        }
        log::debug!("auto registered {count} bean types");
        count
    }

    /// Returns the [`TypeInfo`] of a registered [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<TypeInfo> {
        self.types.get(&type_id).copied()
    }

    /// Returns the [`TypeInfo`] registered under a full type path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<TypeInfo> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.get(*id))
    }

    /// Returns the [`TypeInfo`] registered under an unambiguous short name.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<TypeInfo> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Resolves a textual type name, trying the full path first.
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<TypeInfo> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    /// Returns `true` if the short name is shared by several types.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns `true` if the type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains(&type_id)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns the full paths of all registered types, sorted.
    pub fn type_paths(&self) -> Vec<&'static str> {
        let mut paths: Vec<_> = self.types.values().map(TypeInfo::type_path).collect();
        paths.sort_unstable();
        paths
    }
}
