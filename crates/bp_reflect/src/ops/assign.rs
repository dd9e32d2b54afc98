use alloc::boxed::Box;
use core::any::TypeId;

use crate::Reflect;
use crate::info::{TypeInfo, TypeKind};

// -----------------------------------------------------------------------------
// Error

/// A value that cannot be stored in a slot.
#[derive(Debug)]
pub enum AssignError {
    /// Null was given for a slot that is not an `Option`.
    Null {
        /// The slot type.
        expected: TypeInfo,
    },
    /// The value is neither the slot type nor widens to it.
    Mismatch {
        /// The slot type.
        expected: TypeInfo,
        /// The rejected value.
        value: Box<dyn Reflect>,
    },
}

impl AssignError {
    /// Returns the slot type.
    #[inline]
    pub fn expected(&self) -> TypeInfo {
        match self {
            Self::Null { expected } | Self::Mismatch { expected, .. } => *expected,
        }
    }

    /// Returns the type path of the rejected value, `"null"` for null.
    #[inline]
    pub fn actual(&self) -> &'static str {
        match self {
            Self::Null { .. } => "null",
            Self::Mismatch { value, .. } => value.type_path(),
        }
    }
}

// -----------------------------------------------------------------------------
// Assignment

/// Builds a value of exactly the `slot` type from a caller value.
///
/// - `None` (null) becomes `Option::None` of an `Option` slot.
/// - A value of the slot type is returned as is.
/// - For an `Option<T>` slot, a `T` (or a value widening to `T`) is wrapped
///   into `Some`.
/// - Otherwise the value goes through [`widen`].
///
/// # Examples
///
/// ```
/// use bp_reflect::{Reflect, info::Typed, ops::assign};
///
/// let value = assign(<Option<i64>>::type_info(), Some(Box::new(7_i32))).unwrap();
/// assert_eq!(value.downcast_ref::<Option<i64>>(), Some(&Some(7)));
///
/// let value = assign(<Option<i64>>::type_info(), None).unwrap();
/// assert_eq!(value.downcast_ref::<Option<i64>>(), Some(&None));
///
/// assert!(assign(u8::type_info(), Some(Box::new(300_u16))).is_err());
/// ```
pub fn assign(
    slot: TypeInfo,
    value: Option<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, AssignError> {
    let Some(value) = value else {
        return match slot.kind() {
            TypeKind::Option(info) => Ok(info.none()),
            _ => Err(AssignError::Null { expected: slot }),
        };
    };

    if value.ty_id() == slot.type_id() {
        return Ok(value);
    }

    if let TypeKind::Option(info) = slot.kind() {
        let inner = match assign(info.inner(), Some(value)) {
            Ok(inner) => inner,
            Err(AssignError::Mismatch { value, .. }) => {
                return Err(AssignError::Mismatch {
                    expected: slot,
                    value,
                });
            }
            Err(AssignError::Null { .. }) => return Ok(info.none()),
        };
        return info.some(inner).map_err(|value| AssignError::Mismatch {
            expected: slot,
            value,
        });
    }

    match widen(&*value, slot.type_id()) {
        Some(widened) => Ok(widened),
        None => Err(AssignError::Mismatch {
            expected: slot,
            value,
        }),
    }
}

macro_rules! widen_table {
    ($value:ident, $target:ident; $($from:ty => [$($to:ty),* $(,)?]),* $(,)?) => {
        $(
            if let Some(v) = $value.downcast_ref::<$from>() {
                $(
                    if $target == TypeId::of::<$to>() {
                        let widened: Box<dyn Reflect> = Box::new(<$to>::from(*v));
                        return Some(widened);
                    }
                )*
                return None;
            }
        )*
    };
}

/// Converts a numeric value to a wider numeric type without loss.
///
/// The table is conservative: it holds the conversions `core` provides as
/// `From` on every platform. `u16` and `i32` do not reach `isize`, which
/// may be 16 bits wide.
///
/// Returns `None` when `value` is not numeric or the conversion could lose
/// information (narrowing, signed to unsigned, wide integers to floats).
pub fn widen(value: &dyn Reflect, target: TypeId) -> Option<Box<dyn Reflect>> {
    widen_table! { value, target;
        i8 => [i16, i32, i64, isize, f32, f64],
        u8 => [u16, u32, u64, usize, i16, i32, i64, isize, f32, f64, char],
        i16 => [i32, i64, isize, f32, f64],
        u16 => [u32, u64, usize, i32, i64, f32, f64],
        i32 => [i64, f64],
        u32 => [u64, i64, f64],
        f32 => [f64],
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{AssignError, assign, widen};
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::any::TypeId;

    #[test]
    fn widen_accepts_lossless_conversions_only() {
        let wide = widen(&7_i32, TypeId::of::<i64>()).unwrap();
        assert_eq!(wide.downcast_ref::<i64>(), Some(&7));

        let wide = widen(&1.5_f32, TypeId::of::<f64>()).unwrap();
        assert_eq!(wide.downcast_ref::<f64>(), Some(&1.5));

        assert!(widen(&7_i64, TypeId::of::<i32>()).is_none());
        assert!(widen(&-1_i32, TypeId::of::<u64>()).is_none());
        assert!(widen(&String::from("7"), TypeId::of::<i64>()).is_none());

        assert!(widen(&7_i16, TypeId::of::<isize>()).is_some());
        assert!(widen(&7_u16, TypeId::of::<isize>()).is_none());
    }

    #[test]
    fn null_needs_an_option_slot() {
        let err = assign(u32::type_info(), None).unwrap_err();
        assert!(matches!(err, AssignError::Null { .. }));
        assert_eq!(err.actual(), "null");
        assert!(err.expected().is::<u32>());
    }

    #[test]
    fn mismatch_returns_the_value() {
        let err = assign(<Option<u32>>::type_info(), Some(Box::new(String::from("x")))).unwrap_err();
        assert!(err.expected().is::<Option<u32>>());
        let AssignError::Mismatch { value, .. } = err else {
            panic!("expected a mismatch");
        };
        assert_eq!(value.take::<String>().unwrap(), "x");
    }
}
