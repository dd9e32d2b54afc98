use crate::Reflect;
use crate::ops::{Bean, List, Map};

/// An immutable view of a reflected value, by kind.
pub enum ReflectRef<'a> {
    /// A bean with named fields.
    Bean(&'a dyn Bean),
    /// An indexed sequence.
    List(&'a dyn List),
    /// A string-keyed map.
    Map(&'a dyn Map),
    /// A nullable slot; `None` is null.
    Option(Option<&'a dyn Reflect>),
    /// A scalar.
    Value(&'a dyn Reflect),
}

/// A mutable view of a reflected value, by kind.
pub enum ReflectMut<'a> {
    /// A bean with named fields.
    Bean(&'a mut dyn Bean),
    /// An indexed sequence.
    List(&'a mut dyn List),
    /// A string-keyed map.
    Map(&'a mut dyn Map),
    /// A nullable slot; `None` is null.
    Option(Option<&'a mut dyn Reflect>),
    /// A scalar.
    Value(&'a mut dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// Returns a short name of the kind, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bean(_) => "bean",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Option(_) => "option",
            Self::Value(_) => "value",
        }
    }
}
