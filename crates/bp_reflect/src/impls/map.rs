use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::BuildHasher;
use std::collections::HashMap;

use crate::Reflect;
use crate::info::{MapInfo, TypeInfo, TypeKind, Typed};
use crate::ops::{Map, ReflectMut, ReflectRef};

macro_rules! impl_reflect_map {
    ($ty:ty, [$($generics:tt)*]) => {
        impl<$($generics)*> Typed for $ty {
            #[inline]
            fn type_info() -> TypeInfo {
                TypeInfo::new::<Self>(TypeKind::Map(MapInfo::new::<V>()))
            }
        }

        impl<$($generics)*> Reflect for $ty {
            #[inline]
            fn reflect_type_info(&self) -> TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }

            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }
        }

        impl<$($generics)*> Map for $ty {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                <$ty>::get(self, key).map(|v| v as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
                <$ty>::get_mut(self, key).map(|v| v as &mut dyn Reflect)
            }

            fn insert_boxed(
                &mut self,
                key: String,
                value: Box<dyn Reflect>,
            ) -> Result<(), Box<dyn Reflect>> {
                let value = value.take::<V>()?;
                <$ty>::insert(self, key, value);
                Ok(())
            }

            #[inline]
            fn remove(&mut self, key: &str) -> bool {
                <$ty>::remove(self, key).is_some()
            }
        }
    };
}

impl_reflect_map!(
    HashMap<String, V, S>,
    [V: Typed, S: BuildHasher + Default + Send + Sync + 'static]
);
impl_reflect_map!(BTreeMap<String, V>, [V: Typed]);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::ops::ReflectMut;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    #[test]
    fn insert_checks_value_type() {
        let mut map: BTreeMap<String, u32> = BTreeMap::new();
        let ReflectMut::Map(reflected) = map.reflect_mut() else {
            panic!("expected a map");
        };
        reflected.insert_boxed("a".into(), Box::new(1_u32)).unwrap();
        assert!(reflected.insert_boxed("b".into(), Box::new(1_i32)).is_err());
        assert!(reflected.get("a").is_some());
        assert!(reflected.remove("a"));
        assert!(!reflected.remove("a"));
        assert!(map.is_empty());
    }
}
