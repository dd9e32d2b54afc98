use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::{self, Display};
use core::marker::PhantomData;
use core::str::FromStr;

use bp_reflect::Reflect;
use bp_reflect::info::{TypeInfo, Typed};

use crate::editor::expect_type;
use crate::{EditorError, ValueEditor};

/// Editor of a type with [`FromStr`] and [`Display`].
///
/// Surrounding whitespace is trimmed before parsing unless the editor is
/// built with [`verbatim`](ScalarEditor::verbatim).
///
/// # Examples
///
/// ```
/// use bp_editor::{ScalarEditor, ValueEditor};
///
/// let editor = ScalarEditor::<u16>::new();
/// let port = editor.parse(" 8080 ").unwrap();
/// assert_eq!(port.downcast_ref::<u16>(), Some(&8080));
///
/// assert!(editor.parse("70000").is_err());
/// ```
pub struct ScalarEditor<T> {
    trim: bool,
    marker: PhantomData<fn() -> T>,
}

impl<T> ScalarEditor<T>
where
    T: Typed + FromStr + Display,
    T::Err: Display,
{
    /// Creates an editor that trims its input.
    #[inline]
    pub const fn new() -> Self {
        Self {
            trim: true,
            marker: PhantomData,
        }
    }

    /// Creates an editor that parses its input as given.
    #[inline]
    pub const fn verbatim() -> Self {
        Self {
            trim: false,
            marker: PhantomData,
        }
    }
}

impl<T> ValueEditor for ScalarEditor<T>
where
    T: Typed + FromStr + Display,
    T::Err: Display,
{
    #[inline]
    fn target(&self) -> TypeInfo {
        T::type_info()
    }

    fn parse(&self, text: &str) -> Result<Box<dyn Reflect>, EditorError> {
        let input = if self.trim { text.trim() } else { text };
        match input.parse::<T>() {
            Ok(value) => Ok(Box::new(value)),
            Err(err) => Err(EditorError::format(text, self.target().type_path(), err)),
        }
    }

    fn format(&self, value: &dyn Reflect) -> Result<String, EditorError> {
        expect_type::<T>(value, self.target()).map(ToString::to_string)
    }
}

impl<T> fmt::Debug for ScalarEditor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarEditor")
            .field("target", &core::any::type_name::<T>())
            .field("trim", &self.trim)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarEditor;
    use crate::{EditorError, ValueEditor};
    use alloc::string::String;

    #[test]
    fn parses_and_formats() {
        let editor = ScalarEditor::<i32>::new();
        let value = editor.parse("\t-42\n").unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&-42));
        assert_eq!(editor.format(&-42_i32).unwrap(), "-42");

        let editor = ScalarEditor::<f64>::new();
        assert_eq!(editor.parse("2.5").unwrap().downcast_ref::<f64>(), Some(&2.5));
    }

    #[test]
    fn verbatim_keeps_whitespace() {
        let editor = ScalarEditor::<String>::verbatim();
        let value = editor.parse("  padded ").unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "  padded ");
    }

    #[test]
    fn reports_invalid_text() {
        let editor = ScalarEditor::<u8>::new();
        let err = editor.parse("-1").unwrap_err();
        let EditorError::Format { text, target, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(text, "-1");
        assert_eq!(target, "u8");
    }

    #[test]
    fn rejects_foreign_values() {
        let editor = ScalarEditor::<u8>::new();
        let err = editor.format(&String::from("x")).unwrap_err();
        assert!(matches!(err, EditorError::WrongType { expected: "u8", .. }));
    }
}
