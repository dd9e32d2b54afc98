use alloc::boxed::Box;
use alloc::string::{String, ToString};

use bp_reflect::Reflect;
use bp_reflect::info::{TypeInfo, Typed};

use crate::editor::expect_type;
use crate::{EditorError, ValueEditor};

const TRUE_WORDS: [&str; 4] = ["true", "yes", "on", "1"];
const FALSE_WORDS: [&str; 4] = ["false", "no", "off", "0"];

/// Editor of `bool`.
///
/// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, ignoring
/// case and surrounding whitespace. Formats as `true` or `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolEditor;

impl ValueEditor for BoolEditor {
    #[inline]
    fn target(&self) -> TypeInfo {
        bool::type_info()
    }

    fn parse(&self, text: &str) -> Result<Box<dyn Reflect>, EditorError> {
        let word = text.trim();
        if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
            Ok(Box::new(true))
        } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
            Ok(Box::new(false))
        } else {
            Err(EditorError::format(text, "bool", "not a boolean word"))
        }
    }

    fn format(&self, value: &dyn Reflect) -> Result<String, EditorError> {
        expect_type::<bool>(value, self.target()).map(ToString::to_string)
    }
}
