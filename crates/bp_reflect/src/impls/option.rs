use alloc::boxed::Box;

use crate::info::{OptionInfo, TypeInfo, TypeKind, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::{Reflect, Value};

impl<T: Typed> Typed for Option<T> {
    #[inline]
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Option(OptionInfo::new::<T>()))
    }
}

impl<T: Typed> Reflect for Option<T> {
    #[inline]
    fn reflect_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(|v| v as &dyn Reflect))
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Option(self.as_mut().map(|v| v as &mut dyn Reflect))
    }

    /// Accepts both `Option<T>` and a bare `T`.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        let value = match value.take::<Self>() {
            Ok(value) => {
                *self = value;
                return Ok(());
            }
            Err(value) => value,
        };
        *self = Some(value.take::<T>()?);
        Ok(())
    }

    fn to_value(&self) -> Option<Value> {
        match self {
            Some(value) => value.to_value(),
            None => Some(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::ops::ReflectRef;
    use alloc::boxed::Box;

    #[test]
    fn set_accepts_inner_and_option() {
        let mut slot: Option<u8> = None;
        slot.set(Box::new(4_u8)).unwrap();
        assert_eq!(slot, Some(4));
        slot.set(Box::new(None::<u8>)).unwrap();
        assert_eq!(slot, None);
        assert!(slot.set(Box::new(4_u16)).is_err());
    }

    #[test]
    fn reflect_ref_exposes_inner() {
        let slot = Some(9_i32);
        let ReflectRef::Option(Some(inner)) = slot.reflect_ref() else {
            panic!("expected a filled option");
        };
        assert_eq!(inner.downcast_ref::<i32>(), Some(&9));
    }
}
