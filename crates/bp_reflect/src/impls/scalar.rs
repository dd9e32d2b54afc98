use alloc::boxed::Box;
use alloc::string::String;

use crate::info::{TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::{Reflect, Value};

macro_rules! impl_reflect_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn type_info() -> TypeInfo {
                    TypeInfo::value::<Self>()
                }
            }

            impl Reflect for $ty {
                #[inline]
                fn reflect_type_info(&self) -> TypeInfo {
                    <Self as Typed>::type_info()
                }

                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Value(self)
                }

                #[inline]
                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Value(self)
                }

                fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                    *self = value.take::<Self>()?;
                    Ok(())
                }

                #[inline]
                fn to_value(&self) -> Option<Value> {
                    Some(Value::from(self.clone()))
                }
            }
        )*
    };
}

impl_reflect_scalar!(
    bool, char, String, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize,
);

#[cfg(test)]
mod tests {
    use crate::info::{TypeKind, Typed};
    use crate::{Reflect, Value};
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn scalars_are_values() {
        assert!(matches!(u64::type_info().kind(), TypeKind::Value));
        assert_eq!(String::from("x").to_value(), Some(Value::from("x")));
        assert_eq!((-3_i16).to_value(), Some(Value::Int(-3)));
        assert_eq!(2.5_f64.to_value(), Some(Value::Float(2.5)));
        assert_eq!(0.1_f32.to_value(), Some(Value::F32(0.1)));
        assert_eq!(Value::from(0.1_f32).to_string(), "0.1");
    }

    #[test]
    fn set_is_type_strict() {
        let mut x = 1_u32;
        assert!(x.set(Box::new(2_u64)).is_err());
        x.set(Box::new(3_u32)).unwrap();
        assert_eq!(x, 3);
    }
}
