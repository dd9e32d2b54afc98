use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display, Write};
use core::marker::PhantomData;
use core::str::FromStr;

use bp_reflect::Reflect;
use bp_reflect::info::{TypeInfo, Typed};

use crate::editor::expect_type;
use crate::{EditorError, ValueEditor};

/// Editor of `Vec<T>` written as separated items.
///
/// Items are trimmed before parsing. Text that is empty after trimming
/// is the empty list.
///
/// # Examples
///
/// ```
/// use bp_editor::{DelimitedListEditor, ValueEditor};
///
/// let editor = DelimitedListEditor::<String>::new(",");
/// let names = editor.parse("a, b ,c").unwrap();
/// let names = names.downcast_ref::<Vec<String>>().unwrap();
/// assert_eq!(names, &["a", "b", "c"]);
///
/// let empty = editor.parse("  ").unwrap();
/// assert!(empty.downcast_ref::<Vec<String>>().unwrap().is_empty());
/// ```
pub struct DelimitedListEditor<T> {
    separator: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> DelimitedListEditor<T>
where
    T: Typed + FromStr + Display,
    T::Err: Display,
{
    /// Creates an editor splitting on `separator`.
    #[inline]
    pub const fn new(separator: &'static str) -> Self {
        Self {
            separator,
            marker: PhantomData,
        }
    }

    /// Returns the item separator.
    #[inline]
    pub const fn separator(&self) -> &'static str {
        self.separator
    }

    /// Splits and parses `text` into items.
    pub fn parse_items(&self, text: &str) -> Result<Vec<T>, EditorError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        text.split(self.separator)
            .map(|item| {
                item.trim()
                    .parse::<T>()
                    .map_err(|err| EditorError::format(item, T::type_info().type_path(), err))
            })
            .collect()
    }
}

impl<T> ValueEditor for DelimitedListEditor<T>
where
    T: Typed + FromStr + Display,
    T::Err: Display,
{
    #[inline]
    fn target(&self) -> TypeInfo {
        Vec::<T>::type_info()
    }

    #[inline]
    fn parse(&self, text: &str) -> Result<Box<dyn Reflect>, EditorError> {
        Ok(Box::new(self.parse_items(text)?))
    }

    fn format(&self, value: &dyn Reflect) -> Result<String, EditorError> {
        let items = expect_type::<Vec<T>>(value, self.target())?;
        let mut out = String::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(self.separator);
            }
            // Writing to a `String` cannot fail.
            let _ = write!(out, "{item}");
        }
        Ok(out)
    }
}

impl<T> fmt::Debug for DelimitedListEditor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelimitedListEditor")
            .field("item", &core::any::type_name::<T>())
            .field("separator", &self.separator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::DelimitedListEditor;
    use crate::{EditorError, ValueEditor};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn round_trip() {
        let editor = DelimitedListEditor::<u32>::new(";");
        let value = editor.parse("1; 2 ;3").unwrap();
        assert_eq!(value.downcast_ref::<Vec<u32>>(), Some(&vec![1, 2, 3]));
        assert_eq!(editor.format(value.as_ref()).unwrap(), "1;2;3");
    }

    #[test]
    fn empty_items_are_kept() {
        let editor = DelimitedListEditor::<alloc::string::String>::new(",");
        assert_eq!(editor.parse_items("a,,b").unwrap(), ["a", "", "b"]);
    }

    #[test]
    fn bad_item_names_itself() {
        let editor = DelimitedListEditor::<u8>::new(",");
        let err = editor.parse_items("1, x").unwrap_err();
        let EditorError::Format { text, target, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(text, " x");
        assert_eq!(target, "u8");
    }
}
