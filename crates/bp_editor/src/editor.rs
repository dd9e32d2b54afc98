use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use bp_reflect::Reflect;
use bp_reflect::info::TypeInfo;

use crate::EditorError;

/// Converts between text and values of one target type.
///
/// Editors are stateless after construction and shared between threads.
///
/// # Examples
///
/// ```
/// use bp_editor::{BoolEditor, ValueEditor};
///
/// let editor = BoolEditor;
/// let value = editor.parse("yes").unwrap();
/// assert_eq!(value.downcast_ref::<bool>(), Some(&true));
/// assert_eq!(editor.format(&false).unwrap(), "false");
/// ```
pub trait ValueEditor: Send + Sync + fmt::Debug {
    /// Returns the type this editor produces and formats.
    fn target(&self) -> TypeInfo;

    /// Parses `text` into a value of the target type.
    fn parse(&self, text: &str) -> Result<Box<dyn Reflect>, EditorError>;

    /// Formats a value of the target type.
    ///
    /// Values of any other type fail with
    /// [`WrongType`](EditorError::WrongType).
    fn format(&self, value: &dyn Reflect) -> Result<String, EditorError>;
}

/// Downcasts `value` to the type an editor formats.
pub(crate) fn expect_type<T: Reflect>(
    value: &dyn Reflect,
    target: TypeInfo,
) -> Result<&T, EditorError> {
    value.downcast_ref::<T>().ok_or_else(|| EditorError::WrongType {
        expected: target.type_path(),
        actual: value.type_path(),
    })
}
