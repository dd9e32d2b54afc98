use alloc::boxed::Box;

use crate::Reflect;
use crate::access::property::slot::{FieldResolver, Site, flatten, flatten_mut};
use crate::access::{
    MalformedPathError, MalformedReason, NullPolicy, Property, PropertyError, PropertyPath,
    Segment,
};
use crate::info::{FieldInfo, TypeInfo, TypeKind};
use crate::ops::{ReflectMut, ReflectRef};

/// A named member: a bean field or a map entry.
///
/// On beans the name is matched exactly first, then against a `bool`
/// field named `is_<name>`. On maps the name is the key; a missing key
/// reads as null.
///
/// # Examples
///
/// ```
/// use bp_reflect::access::{NullPolicy, Property, SimpleProperty};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Switch {
///     is_on: bool,
/// }
///
/// let mut switch = Switch { is_on: false };
/// let on = SimpleProperty::parse("on", NullPolicy::Strict).unwrap();
///
/// on.set(&mut switch, Some(Box::new(true))).unwrap();
/// assert!(switch.is_on);
/// ```
#[derive(Debug)]
pub struct SimpleProperty {
    field: FieldResolver,
    policy: NullPolicy,
}

impl SimpleProperty {
    /// Creates the property of member `name`.
    #[inline]
    pub fn new(name: impl Into<Box<str>>, policy: NullPolicy) -> Self {
        Self {
            field: FieldResolver::new(name.into()),
            policy,
        }
    }

    /// Builds the property from path text, which must be a single
    /// simple segment.
    pub fn parse(text: &str, policy: NullPolicy) -> Result<Self, MalformedPathError> {
        match &*PropertyPath::parse(text)?.into_segments() {
            [Segment::Simple { name }] => Ok(Self::new(name.clone(), policy)),
            _ => Err(MalformedPathError::new(
                text,
                0,
                MalformedReason::WrongShape("simple"),
            )),
        }
    }

    /// Returns the member name.
    #[inline]
    pub fn name(&self) -> &str {
        self.field.name()
    }

    /// Reads the member mutably to walk past it.
    ///
    /// Unlike [`Property::get_mut`] this hands out read-only and
    /// setter-backed fields, so writes can reach below them.
    #[inline]
    pub(crate) fn traverse_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        self.member_mut(target, false)
    }

    // `leaf` rejects fields that must not be written in place.
    fn member_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
        leaf: bool,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        let type_id = target.ty_id();
        let type_path = target.type_path();

        match target.reflect_mut() {
            ReflectMut::Bean(bean) => {
                let info = bean.bean_info();
                let index = self
                    .field
                    .resolve(info, type_id)
                    .filter(|&index| {
                        !leaf || info.field_at(index).is_some_and(FieldInfo::is_directly_writable)
                    })
                    .ok_or_else(|| PropertyError::no_such(type_path, self.name()))?;
                bean.field_at_mut(index)
                    .map(flatten_mut)
                    .ok_or_else(|| PropertyError::no_such(type_path, self.name()))
            }
            ReflectMut::Map(map) => Ok(map.get_mut(self.name()).and_then(flatten_mut)),
            ReflectMut::Option(Some(inner)) => self.member_mut(inner, leaf),
            _ => Err(PropertyError::no_such(type_path, self.name())),
        }
    }

    fn write(
        &self,
        target: &mut dyn Reflect,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        let ty = target.reflect_type_info();
        let site = Site::new(ty.type_path(), self.name());

        match target.reflect_mut() {
            ReflectMut::Bean(bean) => {
                let info = bean.bean_info();
                let (index, field) = self
                    .field
                    .resolve(info, ty.type_id())
                    .and_then(|index| Some((index, info.field_at(index)?)))
                    .ok_or_else(|| site.no_such())?;
                if !field.is_writable() {
                    return Err(site.no_such());
                }
                site.write_field(bean, index, field.type_info(), hint, value)
            }
            ReflectMut::Map(map) => {
                let TypeKind::Map(map_info) = ty.kind() else {
                    return Err(site.no_such());
                };
                site.write_entry(map, map_info.value(), self.name(), hint, value)
            }
            ReflectMut::Option(Some(inner)) => self.write(inner, hint, value),
            _ => Err(site.no_such()),
        }
    }
}

impl Property for SimpleProperty {
    #[inline]
    fn property_name(&self) -> &str {
        self.name()
    }

    #[inline]
    fn null_policy(&self) -> NullPolicy {
        self.policy
    }

    fn property_type(&self, ty: TypeInfo) -> Result<TypeInfo, PropertyError> {
        let ty = ty.non_null();
        match ty.kind() {
            TypeKind::Bean(info) => self
                .field
                .resolve(info, ty.type_id())
                .and_then(|index| info.field_at(index))
                .map(|field| field.type_info())
                .ok_or_else(|| PropertyError::no_such(ty.type_path(), self.name())),
            TypeKind::Map(info) => Ok(info.value()),
            _ => Err(PropertyError::no_such(ty.type_path(), self.name())),
        }
    }

    fn get<'a>(&self, target: &'a dyn Reflect) -> Result<Option<&'a dyn Reflect>, PropertyError> {
        match target.reflect_ref() {
            ReflectRef::Bean(bean) => {
                let info = bean.bean_info();
                self.field
                    .resolve(info, target.ty_id())
                    .and_then(|index| bean.field_at(index))
                    .map(flatten)
                    .ok_or_else(|| PropertyError::no_such(info.type_path(), self.name()))
            }
            ReflectRef::Map(map) => Ok(map.get(self.name()).and_then(flatten)),
            ReflectRef::Option(Some(inner)) => self.get(inner),
            _ => Err(PropertyError::no_such(target.type_path(), self.name())),
        }
    }

    /// Read-only and setter-backed fields fail with
    /// [`NoSuchProperty`](PropertyError::NoSuchProperty), as `set` does.
    #[inline]
    fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        self.member_mut(target, true)
    }

    #[inline]
    fn set(
        &self,
        target: &mut dyn Reflect,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.write(target, None, value)
    }

    #[inline]
    fn set_as(
        &self,
        target: &mut dyn Reflect,
        hint: TypeInfo,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        self.write(target, Some(hint), value)
    }

    fn is_writable(&self, ty: TypeInfo) -> bool {
        let ty = ty.non_null();
        match ty.kind() {
            TypeKind::Bean(info) => self
                .field
                .resolve(info, ty.type_id())
                .and_then(|index| info.field_at(index))
                .is_some_and(|field| field.is_writable()),
            TypeKind::Map(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::access::{NullPolicy, Property, SimpleProperty};
    use crate::derive::Bean;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use core::fmt;

    #[derive(Debug)]
    struct Negative;

    impl fmt::Display for Negative {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("balance must not be negative")
        }
    }

    impl core::error::Error for Negative {}

    #[derive(Bean, Default)]
    struct Account {
        owner: String,
        nickname: Option<String>,
        is_frozen: bool,
        #[bean(read_only)]
        id: u64,
        #[bean(skip)]
        audit: u8,
        #[bean(getter = "balance", setter = "set_balance")]
        balance: i64,
        #[bean(rename = "meta")]
        metadata: BTreeMap<String, u32>,
    }

    impl Account {
        fn balance(&self) -> &i64 {
            &self.balance
        }

        fn set_balance(&mut self, balance: i64) -> Result<(), Negative> {
            if balance < 0 {
                return Err(Negative);
            }
            self.balance = balance;
            self.audit += 1;
            Ok(())
        }
    }

    fn simple(name: &str) -> SimpleProperty {
        SimpleProperty::new(name, NullPolicy::Strict)
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut account = Account::default();
        let owner = simple("owner");
        owner.set(&mut account, Some(Box::new(String::from("ada")))).unwrap();

        let value = owner.get(&account).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "ada");
    }

    #[test]
    fn option_slots_read_as_null_or_inner() {
        let mut account = Account::default();
        let nickname = simple("nickname");
        assert!(nickname.get(&account).unwrap().is_none());

        nickname.set(&mut account, Some(Box::new(String::from("a")))).unwrap();
        assert_eq!(account.nickname.as_deref(), Some("a"));
        let value = nickname.get(&account).unwrap().unwrap();
        assert!(value.is::<String>());

        nickname.set(&mut account, None).unwrap();
        assert_eq!(account.nickname, None);
    }

    #[test]
    fn null_on_a_plain_field_is_a_mismatch() {
        let mut account = Account::default();
        let err = simple("owner").set(&mut account, None).unwrap_err();
        assert!(matches!(err, crate::access::PropertyError::TypeMismatch { actual: "null", .. }));
    }

    #[test]
    fn boolean_alternate_name() {
        let mut account = Account::default();
        let frozen = simple("frozen");
        frozen.set(&mut account, Some(Box::new(true))).unwrap();
        assert!(account.is_frozen);
        assert!(frozen.get(&account).unwrap().unwrap().downcast_ref::<bool>() == Some(&true));
    }

    #[test]
    fn read_only_and_skipped_fields() {
        let mut account = Account { id: 9, ..Default::default() };
        let id = simple("id");
        assert_eq!(id.get(&account).unwrap().unwrap().downcast_ref::<u64>(), Some(&9));
        assert!(id.set(&mut account, Some(Box::new(1_u64))).unwrap_err().is_no_such_property());
        assert!(!id.is_writable(Account::type_info()));
        assert!(id.is_readable(Account::type_info()));

        assert!(simple("audit").get(&account).unwrap_err().is_no_such_property());
        assert!(!simple("audit").is_readable(Account::type_info()));
    }

    #[test]
    fn get_mut_respects_write_rules() {
        let mut account = Account { id: 9, ..Default::default() };

        let owner = simple("owner").get_mut(&mut account).unwrap().unwrap();
        *owner.downcast_mut::<String>().unwrap() = String::from("ada");
        assert_eq!(account.owner, "ada");

        assert!(simple("id").get_mut(&mut account).unwrap_err().is_no_such_property());
        assert!(simple("balance").get_mut(&mut account).unwrap_err().is_no_such_property());
        assert_eq!(account.id, 9);

        assert!(simple("id").traverse_mut(&mut account).unwrap().is_some());
    }

    #[test]
    fn setter_takes_precedence_and_rejections_surface() {
        let mut account = Account::default();
        let balance = simple("balance");

        balance.set(&mut account, Some(Box::new(15_i64))).unwrap();
        assert_eq!(account.balance, 15);
        assert_eq!(account.audit, 1);

        let err = balance.set(&mut account, Some(Box::new(-1_i64))).unwrap_err();
        let crate::access::PropertyError::Invocation { source, .. } = err else {
            panic!("expected an invocation error, got {err:?}");
        };
        assert!(source.is::<Negative>());
        assert_eq!(account.balance, 15);
    }

    #[test]
    fn set_widens_numbers() {
        let mut account = Account::default();
        simple("balance").set(&mut account, Some(Box::new(7_i32))).unwrap();
        assert_eq!(account.balance, 7);

        let err = simple("owner").set(&mut account, Some(Box::new(7_i32))).unwrap_err();
        assert!(matches!(err, crate::access::PropertyError::TypeMismatch { .. }));
    }

    #[test]
    fn set_as_selects_by_declared_type() {
        let mut account = Account::default();
        let nickname = simple("nickname");

        nickname
            .set_as(&mut account, String::type_info(), Some(Box::new(String::from("n"))))
            .unwrap();
        nickname.set_as(&mut account, String::type_info(), None).unwrap();
        assert_eq!(account.nickname, None);

        let err = nickname
            .set_as(&mut account, u32::type_info(), Some(Box::new(1_u32)))
            .unwrap_err();
        assert!(err.is_no_such_property());
    }

    #[test]
    fn map_members_are_keyed() {
        let mut account = Account::default();
        account.metadata.insert(String::from("visits"), 3);

        let meta = simple("meta");
        let ty = meta.property_type(Account::type_info()).unwrap();
        assert!(ty.is::<BTreeMap<String, u32>>());

        let map = meta.get(&account).unwrap().unwrap();
        let visits = simple("visits");
        assert_eq!(visits.get(map).unwrap().unwrap().downcast_ref::<u32>(), Some(&3));
        assert!(simple("missing").get(map).unwrap().is_none());

        let map = meta.get_mut(&mut account).unwrap().unwrap();
        visits.set(map, None).unwrap();
        assert!(account.metadata.is_empty());
    }

    #[test]
    fn declared_and_dynamic_types() {
        let account = Account::default();
        let nickname = simple("nickname");
        assert!(nickname.property_type(Account::type_info()).unwrap().is::<Option<String>>());
        assert!(nickname.property_type_of(&account).unwrap().is::<Option<String>>());

        let account = Account { nickname: Some(String::new()), ..Default::default() };
        assert!(nickname.property_type_of(&account).unwrap().is::<String>());
        assert!(simple("nope").property_type(Account::type_info()).is_err());
    }
}
