use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::{ListInfo, TypeInfo, TypeKind, Typed};
use crate::ops::{List, ReflectMut, ReflectRef};

macro_rules! impl_reflect_list {
    ($ty:ty, [$($generics:tt)*], $info:expr) => {
        impl<$($generics)*> Typed for $ty {
            #[inline]
            fn type_info() -> TypeInfo {
                TypeInfo::new::<Self>(TypeKind::List($info))
            }
        }

        impl<$($generics)*> Reflect for $ty {
            #[inline]
            fn reflect_type_info(&self) -> TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::List(self)
            }

            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }
        }

        impl<$($generics)*> List for $ty {
            #[inline]
            fn len(&self) -> usize {
                self.as_slice().len()
            }

            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                self.as_slice().get(index).map(|v| v as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                self.as_mut_slice().get_mut(index).map(|v| v as &mut dyn Reflect)
            }
        }
    };
}

impl_reflect_list!(Vec<T>, [T: Typed], ListInfo::new::<T>());
impl_reflect_list!([T; N], [T: Typed, const N: usize], ListInfo::fixed::<T>(N));

impl<T: Typed> Typed for VecDeque<T> {
    #[inline]
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::List(ListInfo::new::<T>()))
    }
}

impl<T: Typed> Reflect for VecDeque<T> {
    #[inline]
    fn reflect_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }
}

impl<T: Typed> List for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|v| v as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(|v| v as &mut dyn Reflect)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypeKind, Typed};
    use crate::ops::ReflectMut;
    use alloc::collections::VecDeque;
    use alloc::vec;

    #[test]
    fn fixed_arrays_report_length() {
        let TypeKind::List(info) = <[u8; 4]>::type_info().kind().clone() else {
            panic!("expected a list kind");
        };
        assert_eq!(info.fixed_len(), Some(4));
        assert!(info.item().is::<u8>());
    }

    #[test]
    fn items_are_mutable() {
        let mut deque: VecDeque<i32> = VecDeque::from(vec![1, 2, 3]);
        let ReflectMut::List(list) = deque.reflect_mut() else {
            panic!("expected a list");
        };
        list.get_mut(2).unwrap().set(alloc::boxed::Box::new(30_i32)).unwrap();
        assert!(list.get_mut(3).is_none());
        assert_eq!(deque, [1, 2, 30]);
    }
}
