use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// Value

/// An owned scalar snapshot of a reflected value.
///
/// Used wherever a value leaves the object graph: index keys, property
/// maps handed in by callers, diagnostics. Integers are widened to 64 bits;
/// floats keep their width so `0.1_f32` still renders as `0.1`.
///
/// The [`Display`](fmt::Display) form is the default string conversion:
/// `Null` renders as `null`, strings render without quotes.
///
/// # Examples
///
/// ```
/// use bp_reflect::{Reflect, Value};
///
/// assert_eq!(7_u8.to_value(), Some(Value::UInt(7)));
/// assert_eq!(Some(String::from("a")).to_value(), Some(Value::from("a")));
/// assert_eq!(None::<i32>.to_value(), Some(Value::Null));
/// assert_eq!(Value::Null.to_string(), "null");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A single precision float.
    F32(f32),
    /// A double precision float.
    Float(f64),
    /// A character.
    Char(char),
    /// A string.
    Str(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice of a [`Value::Str`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name of the variant, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::F32(_) | Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::UInt(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from!(Bool: bool);
impl_from!(Int: i8, i16, i32, i64);
impl_from!(UInt: u8, u16, u32, u64);
impl_from!(F32: f32);
impl_from!(Float: f64);
impl_from!(Char: char);
impl_from!(Str: String, &str);

impl From<isize> for Value {
    #[inline]
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
