use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use bp_reflect::info::{TypeInfo, Typed};
use bp_utils::TypeIdMap;

use crate::{BoolEditor, DelimitedListEditor, MapEditor, ScalarEditor, ValueEditor};

/// Value editors keyed by target type.
///
/// # Examples
///
/// ```
/// use bp_editor::EditorRegistry;
/// use bp_reflect::info::Typed;
///
/// let editors = EditorRegistry::with_defaults();
/// let editor = editors.get(u8::type_info()).unwrap();
/// let value = editor.parse("7").unwrap();
/// assert_eq!(value.downcast_ref::<u8>(), Some(&7));
///
/// assert!(editors.get_type::<Vec<String>>().is_some());
/// assert!(editors.get_type::<Vec<Vec<u8>>>().is_none());
/// ```
pub struct EditorRegistry {
    editors: TypeIdMap<Box<dyn ValueEditor>>,
}

impl EditorRegistry {
    /// Creates a registry without editors.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            editors: TypeIdMap::new(),
        }
    }

    /// Creates a registry with editors for:
    ///
    /// - every primitive number, `char` and `String`,
    /// - `bool` (see [`BoolEditor`]),
    /// - comma-separated `Vec<T>` of `String`, `i32`, `i64`, `u32`, `u64`
    ///   and `f64`,
    /// - `HashMap<String, V>` of `String` and `i64`.
    ///
    /// `String` values are taken verbatim.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        macro_rules! scalars {
            ($($ty:ty),* $(,)?) => {
                $( registry.register(ScalarEditor::<$ty>::new()); )*
            };
        }
        scalars!(char, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

        macro_rules! lists {
            ($($ty:ty),* $(,)?) => {
                $( registry.register(DelimitedListEditor::<$ty>::new(",")); )*
            };
        }
        lists!(String, i32, i64, u32, u64, f64);

        registry.register(ScalarEditor::<String>::verbatim());
        registry.register(BoolEditor);
        registry.register(MapEditor::<String>::new());
        registry.register(MapEditor::<i64>::new());
        registry
    }

    /// Registers `editor` for its target type, returning the editor it
    /// replaces.
    pub fn register<E: ValueEditor + 'static>(
        &mut self,
        editor: E,
    ) -> Option<Box<dyn ValueEditor>> {
        let target = editor.target();
        let replaced = self.editors.insert(target.type_id(), Box::new(editor));
        if replaced.is_some() {
            log::debug!("replaced the editor of `{target}`");
        }
        replaced
    }

    /// Returns the editor of `ty`.
    #[inline]
    pub fn get(&self, ty: TypeInfo) -> Option<&dyn ValueEditor> {
        self.get_by_id(&ty.type_id())
    }

    /// Returns the editor of `T`.
    #[inline]
    pub fn get_type<T: Typed>(&self) -> Option<&dyn ValueEditor> {
        self.get_by_id(&TypeId::of::<T>())
    }

    #[inline]
    fn get_by_id(&self, type_id: &TypeId) -> Option<&dyn ValueEditor> {
        self.editors.get(type_id).map(|editor| &**editor)
    }

    /// Returns `true` if `ty` has an editor.
    #[inline]
    pub fn contains(&self, ty: TypeInfo) -> bool {
        self.editors.contains(&ty.type_id())
    }

    /// Returns the number of editors.
    #[inline]
    pub fn len(&self) -> usize {
        self.editors.len()
    }
}

impl Default for EditorRegistry {
    #[inline]
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut targets: Vec<String> = self
            .editors
            .values()
            .map(|editor| editor.target().type_path().into())
            .collect();
        targets.sort_unstable();
        f.debug_struct("EditorRegistry")
            .field("targets", &targets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::EditorRegistry;
    use crate::{ScalarEditor, ValueEditor};
    use alloc::string::String;
    use bp_reflect::info::Typed;

    #[test]
    fn defaults_cover_primitives() {
        let editors = EditorRegistry::with_defaults();
        assert_eq!(editors.len(), 23);
        assert!(editors.contains(bool::type_info()));
        assert!(editors.contains(usize::type_info()));
        assert!(!editors.contains(Option::<u8>::type_info()));
    }

    #[test]
    fn string_is_verbatim() {
        let editors = EditorRegistry::with_defaults();
        let editor = editors.get_type::<String>().unwrap();
        let value = editor.parse(" x ").unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), " x ");
    }

    #[test]
    fn register_replaces() {
        let mut editors = EditorRegistry::empty();
        assert!(editors.register(ScalarEditor::<String>::new()).is_none());
        let old = editors.register(ScalarEditor::<String>::verbatim()).unwrap();
        assert!(old.target().is::<String>());
        assert_eq!(editors.len(), 1);
    }
}
