use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display, Write};
use core::marker::PhantomData;
use core::str::FromStr;
use std::collections::HashMap;

use bp_reflect::Reflect;
use bp_reflect::info::{TypeInfo, Typed};

use crate::editor::expect_type;
use crate::{EditorError, ValueEditor};

/// Editor of `HashMap<String, V>` written as `k=v` pairs separated by
/// commas.
///
/// Keys and values are trimmed. A repeated key keeps its last value.
/// Formatting sorts the keys.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use bp_editor::{MapEditor, ValueEditor};
///
/// let editor = MapEditor::<u32>::new();
/// let map = editor.parse("b = 2, a=1").unwrap();
/// let map = map.downcast_ref::<HashMap<String, u32>>().unwrap();
/// assert_eq!(map["a"], 1);
/// assert_eq!(editor.format(map).unwrap(), "a=1,b=2");
/// ```
pub struct MapEditor<V> {
    marker: PhantomData<fn() -> V>,
}

impl<V> MapEditor<V>
where
    V: Typed + FromStr + Display,
    V::Err: Display,
{
    /// Creates the editor.
    #[inline]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }

    /// Parses `text` into a map.
    pub fn parse_entries(&self, text: &str) -> Result<HashMap<String, V>, EditorError> {
        let target = self.target().type_path();
        let mut map = HashMap::new();
        if text.trim().is_empty() {
            return Ok(map);
        }
        for pair in text.split(',') {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(EditorError::format(pair, target, "expected `key=value`"));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(EditorError::format(pair, target, "empty key"));
            }
            let value = value
                .trim()
                .parse::<V>()
                .map_err(|err| EditorError::format(value, V::type_info().type_path(), err))?;
            map.insert(key.into(), value);
        }
        Ok(map)
    }
}

impl<V> ValueEditor for MapEditor<V>
where
    V: Typed + FromStr + Display,
    V::Err: Display,
{
    #[inline]
    fn target(&self) -> TypeInfo {
        HashMap::<String, V>::type_info()
    }

    #[inline]
    fn parse(&self, text: &str) -> Result<Box<dyn Reflect>, EditorError> {
        Ok(Box::new(self.parse_entries(text)?))
    }

    fn format(&self, value: &dyn Reflect) -> Result<String, EditorError> {
        let map = expect_type::<HashMap<String, V>>(value, self.target())?;
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            // Writing to a `String` cannot fail.
            let _ = write!(out, "{key}={value}");
        }
        Ok(out)
    }
}

impl<V> fmt::Debug for MapEditor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapEditor")
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}
