use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::access::property::Step;
use crate::access::{MalformedPathError, NullPolicy, Property, PropertyError, PropertyPath};
use crate::info::TypeInfo;

/// A `.`-chain of segments, resolved left to right.
///
/// When an intermediate segment is null, [`NullPolicy::Ignore`] makes reads
/// return null and writes do nothing, while [`NullPolicy::Strict`] fails
/// with [`NoSuchProperty`](PropertyError::NoSuchProperty) naming the path
/// up to the first null segment.
///
/// # Examples
///
/// ```
/// use bp_reflect::access::{NestedProperty, NullPolicy, Property};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Inner {
///     value: u8,
/// }
///
/// #[derive(Bean)]
/// struct Outer {
///     inner: Option<Inner>,
/// }
///
/// let outer = Outer { inner: None };
///
/// let lenient = NestedProperty::parse("inner.value", NullPolicy::Ignore).unwrap();
/// assert!(lenient.get(&outer).unwrap().is_none());
///
/// let strict = NestedProperty::parse("inner.value", NullPolicy::Strict).unwrap();
/// let err = strict.get(&outer).unwrap_err();
/// assert_eq!(err.property(), Some("inner"));
/// ```
#[derive(Debug)]
pub struct NestedProperty {
    name: Box<str>,
    path: PropertyPath,
    steps: Box<[Step]>,
    policy: NullPolicy,
}

impl NestedProperty {
    /// Creates the property of a parsed path.
    pub fn new(path: PropertyPath, policy: NullPolicy) -> Self {
        let steps: Vec<_> = path
            .segments()
            .iter()
            .map(|segment| Step::new(segment, policy))
            .collect();
        Self {
            name: path.to_string().into(),
            path,
            steps: steps.into_boxed_slice(),
            policy,
        }
    }

    /// Builds the property from path text.
    #[inline]
    pub fn parse(text: &str, policy: NullPolicy) -> Result<Self, MalformedPathError> {
        Ok(Self::new(PropertyPath::parse(text)?, policy))
    }

    /// Returns the parsed path.
    #[inline]
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Splits the chain into its intermediate steps and the last one.
    #[inline]
    fn split(&self, type_path: &'static str) -> Result<(&dyn Property, &[Step]), PropertyError> {
        match self.steps.split_last() {
            Some((last, init)) => Ok((last.as_property(), init)),
            None => Err(PropertyError::no_such(type_path, &self.name)),
        }
    }

    // Step `depth` of the chain produced null.
    fn null_intermediate(&self, type_path: &'static str, depth: usize) -> Result<(), PropertyError> {
        match self.policy {
            NullPolicy::Ignore => Ok(()),
            NullPolicy::Strict => Err(PropertyError::no_such(type_path, &self.path.prefix(depth + 1))),
        }
    }

    fn write(
        &self,
        target: &mut dyn Reflect,
        hint: Option<TypeInfo>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyError> {
        let (last, init) = self.split(target.type_path())?;

        let mut current = target;
        for (depth, step) in init.iter().enumerate() {
            let type_path = current.type_path();
            current = match step.traverse_mut(current)? {
                Some(next) => next,
                None => return self.null_intermediate(type_path, depth),
            };
        }

        match hint {
            Some(hint) => last.set_as(current, hint, value),
            None => last.set(current, value),
        }
    }
}

impl Property for NestedProperty {
    #[inline]
    fn property_name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn null_policy(&self) -> NullPolicy {
        self.policy
    }

    fn property_type(&self, ty: TypeInfo) -> Result<TypeInfo, PropertyError> {
        self.steps
            .iter()
            .try_fold(ty, |ty, step| step.as_property().property_type(ty))
    }

    /// Falls back to declared types from the first null segment on.
    fn property_type_of(&self, target: &dyn Reflect) -> Result<TypeInfo, PropertyError> {
        let (last, init) = self.split(target.type_path())?;

        let mut current = target;
        for (depth, step) in init.iter().enumerate() {
            match step.as_property().get(current)? {
                Some(next) => current = next,
                None => {
                    return self.steps[depth..]
                        .iter()
                        .try_fold(current.reflect_type_info(), |ty, step| step.as_property().property_type(ty));
                }
            }
        }
        last.property_type_of(current)
    }

    fn get<'a>(&self, target: &'a dyn Reflect) -> Result<Option<&'a dyn Reflect>, PropertyError> {
        let (last, init) = self.split(target.type_path())?;

        let mut current = target;
        for (depth, step) in init.iter().enumerate() {
            match step.as_property().get(current)? {
                Some(next) => current = next,
                None => return self.null_intermediate(current.type_path(), depth).map(|()| None),
            }
        }
        last.get(current)
    }

    fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyError> {
        let (last, init) = self.split(target.type_path())?;

        let mut current = target;
        for (depth, step) in init.iter().enumerate() {
            let type_path = current.type_path();
            current = match step.traverse_mut(current)? {
                Some(next) => next,
                None => return self.null_intermediate(type_path, depth).map(|()| None),
            };
        }
        last.get_mut(current)
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
        let Some((last, init)) = self.steps.split_last() else {
            return false;
        };
        init.iter()
            .try_fold(ty, |ty, step| step.as_property().property_type(ty))
            .is_ok_and(|ty| last.as_property().is_writable(ty))
    }
}

#[cfg(test)]
mod tests {
    use crate::access::{NestedProperty, NullPolicy, Property, PropertyError};
    use crate::derive::Bean;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Bean, Default)]
    struct Leaf {
        code: String,
    }

    #[derive(Bean, Default)]
    struct Branch {
        leaf: Option<Leaf>,
        leaves: Vec<Leaf>,
        tags: BTreeMap<String, Leaf>,
    }

    #[derive(Bean, Default)]
    struct Tree {
        branch: Option<Branch>,
    }

    #[derive(Bean, Default)]
    struct Orchard {
        #[bean(read_only)]
        tree: Tree,
    }

    fn nested(text: &str, policy: NullPolicy) -> NestedProperty {
        NestedProperty::parse(text, policy).unwrap()
    }

    fn grown() -> Tree {
        let mut tags = BTreeMap::new();
        tags.insert(String::from("x"), Leaf { code: String::from("tag") });
        Tree {
            branch: Some(Branch {
                leaf: Some(Leaf { code: String::from("one") }),
                leaves: vec![Leaf { code: String::from("first") }],
                tags,
            }),
        }
    }

    #[test]
    fn walks_all_segment_kinds() {
        let tree = grown();
        let read = |text: &str| {
            nested(text, NullPolicy::Strict)
                .get(&tree)
                .unwrap()
                .and_then(|value| value.downcast_ref::<String>().cloned())
        };
        assert_eq!(read("branch.leaf.code").as_deref(), Some("one"));
        assert_eq!(read("branch.leaves[0].code").as_deref(), Some("first"));
        assert_eq!(read("branch.tags(x).code").as_deref(), Some("tag"));
    }

    #[test]
    fn set_through_the_chain() {
        let mut tree = grown();
        nested("branch.leaves[0].code", NullPolicy::Strict)
            .set(&mut tree, Some(Box::new(String::from("changed"))))
            .unwrap();
        let branch = tree.branch.as_ref().unwrap();
        assert_eq!(branch.leaves[0].code, "changed");
    }

    #[test]
    fn null_intermediate_is_ignored() {
        let mut tree = Tree::default();
        let path = nested("branch.leaf.code", NullPolicy::Ignore);

        assert!(path.get(&tree).unwrap().is_none());
        path.set(&mut tree, Some(Box::new(String::from("x")))).unwrap();
        assert!(tree.branch.is_none());
    }

    #[test]
    fn null_intermediate_is_strict() {
        let mut tree = Tree { branch: Some(Branch::default()) };
        let path = nested("branch.leaf.code", NullPolicy::Strict);

        let err = path.get(&tree).unwrap_err();
        let PropertyError::NoSuchProperty { property, type_path } = &err else {
            panic!("expected a missing property, got {err:?}");
        };
        assert_eq!(property, "branch.leaf");
        assert_eq!(*type_path, Branch::type_info().type_path());

        assert!(path.set(&mut tree, Some(Box::new(String::new()))).unwrap_err().is_no_such_property());
    }

    #[test]
    fn types_fall_back_to_declared() {
        let tree = Tree::default();
        let path = nested("branch.leaf.code", NullPolicy::Strict);
        assert!(path.property_type(Tree::type_info()).unwrap().is::<String>());
        assert!(path.property_type_of(&tree).unwrap().is::<String>());
        assert!(path.is_writable(Tree::type_info()));
        assert!(!nested("branch.nope", NullPolicy::Strict).is_readable(Tree::type_info()));
    }

    #[test]
    fn read_only_fields_are_walked_but_not_handed_out() {
        let mut orchard = Orchard { tree: grown() };

        nested("tree.branch.leaf.code", NullPolicy::Strict)
            .set(&mut orchard, Some(Box::new(String::from("moved"))))
            .unwrap();
        let leaf = orchard.tree.branch.as_ref().unwrap().leaf.as_ref().unwrap();
        assert_eq!(leaf.code, "moved");

        let branch = nested("tree.branch", NullPolicy::Strict).get_mut(&mut orchard).unwrap();
        assert!(branch.unwrap().is::<Branch>());

        nested("tree.branch", NullPolicy::Strict).set(&mut orchard, None).unwrap();
        assert!(orchard.tree.branch.is_none());

        let tree = crate::access::SimpleProperty::new("tree", NullPolicy::Strict);
        assert!(tree.get_mut(&mut orchard).unwrap_err().is_no_such_property());
    }
}
