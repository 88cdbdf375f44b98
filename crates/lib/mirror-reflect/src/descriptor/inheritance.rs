use std::any::TypeId;
use std::collections::HashSet;

use crate::{attr::Bases, type_list::{Cons, Nil, TypeList}, Reflect, Typed};

use super::{MemberList, TypeDescriptor};

/// Names the base sub-object `B` embedded in `Self`.
///
/// Rust has no implementation inheritance, a derived type embeds its bases and
/// exposes them through this trait. Listing a base in `bases<..>` requires it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not inherit from `{B}`",
    label = "`{B}` is not a base of `{Self}`",
    note = "implement `Inherits<{B}>` for `{Self}`, for example with `inherits!`"
)]
pub trait Inherits<B> {
    fn base(&self) -> &B;
    fn base_mut(&mut self) -> &mut B;
}

/// Implements [`Inherits`] by naming the field holding the base.
///
/// ```
/// use mirror_reflect::inherits;
///
/// pub struct Base { pub id: u32 }
/// pub struct Derived { pub base: Base }
/// pub struct MoreDerived { pub derived: Derived }
///
/// inherits!(Derived => base: Base);
/// inherits!(MoreDerived => derived: Derived);
/// inherits!(MoreDerived => derived.base: Base);
/// ```
#[macro_export]
macro_rules! inherits {
    ($derived:ty => $($field:ident).+ : $base:ty) => {
        impl $crate::Inherits<$base> for $derived {
            #[inline]
            fn base(&self) -> &$base {
                &self.$($field).+
            }

            #[inline]
            fn base_mut(&mut self) -> &mut $base {
                &mut self.$($field).+
            }
        }
    };
}

type Upcast = for<'a> fn(&'a dyn Reflect) -> Option<&'a dyn Reflect>;
type UpcastMut = for<'a> fn(&'a mut dyn Reflect) -> Option<&'a mut dyn Reflect>;

/// A direct base of a reflected type, with the way to reach it from the derived value.
pub struct BaseDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    descriptor: fn() -> &'static TypeDescriptor,
    upcast: Upcast,
    upcast_mut: UpcastMut,
}

fn upcast_ref<D: Reflect + Inherits<B>, B: Reflect>(value: &dyn Reflect) -> Option<&dyn Reflect> {
    value
        .downcast_ref::<D>()
        .map(|derived| <D as Inherits<B>>::base(derived) as &dyn Reflect)
}

fn upcast_ref_mut<D: Reflect + Inherits<B>, B: Reflect>(value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
    value
        .downcast_mut::<D>()
        .map(|derived| <D as Inherits<B>>::base_mut(derived) as &mut dyn Reflect)
}

impl BaseDescriptor {
    pub fn new<D, B>() -> Self
    where
        D: Reflect + Inherits<B>,
        B: Typed + Reflect,
    {
        Self {
            type_id: TypeId::of::<B>(),
            type_name: std::any::type_name::<B>(),
            descriptor: B::type_descriptor,
            upcast: upcast_ref::<D, B>,
            upcast_mut: upcast_ref_mut::<D, B>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }

    /// The base sub-object of `derived`, `None` if `derived` is not of the declaring type.
    #[inline]
    pub fn upcast<'a>(&self, derived: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.upcast)(derived)
    }

    #[inline]
    pub fn upcast_mut<'a>(&self, derived: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        (self.upcast_mut)(derived)
    }
}

/// A list of base types of `D`.
pub trait BaseList<D>: TypeList {
    fn collect_bases(out: &mut Vec<BaseDescriptor>);
}

impl<D> BaseList<D> for Nil {
    #[inline]
    fn collect_bases(_out: &mut Vec<BaseDescriptor>) {}
}

impl<D, H, T> BaseList<D> for Cons<H, T>
where
    D: Reflect + Inherits<H>,
    H: Typed + Reflect,
    T: BaseList<D>,
{
    fn collect_bases(out: &mut Vec<BaseDescriptor>) {
        out.push(BaseDescriptor::new::<D, H>());
        T::collect_bases(out);
    }
}

impl TypeDescriptor {
    /// The direct bases declared with the `bases<..>` attribute.
    pub fn declared_bases(&'static self) -> &'static [BaseDescriptor] {
        self.attributes()
            .get::<Bases>()
            .map(Bases::as_slice)
            .unwrap_or_default()
    }

    pub fn declared_base_types(&'static self) -> Vec<&'static TypeDescriptor> {
        self.declared_bases()
            .iter()
            .map(BaseDescriptor::descriptor)
            .collect()
    }

    /// Every ancestor: the declared bases first, then the ancestors of each of them
    /// in declaration order. Each type appears once, at its first position.
    pub fn base_types(&'static self) -> &'static [&'static TypeDescriptor] {
        self.base_types.get_or_init(|| {
            let mut path = vec![self.type_id()];
            let ancestors = collect_base_types(self, &mut path);
            glog::trace!("resolved {} base types of `{}`", ancestors.len(), self.name());
            ancestors.into_boxed_slice()
        })
    }

    /// Whether `ancestor` is among [`base_types`](Self::base_types).
    pub fn derives_from(&'static self, ancestor: TypeId) -> bool {
        self.base_types().iter().any(|base| base.type_id() == ancestor)
    }

    pub fn is_or_derives_from(&'static self, ancestor: TypeId) -> bool {
        self.type_id() == ancestor || self.derives_from(ancestor)
    }

    /// The declared members of this type followed by those of every base type,
    /// in [`base_types`](Self::base_types) order, where a member whose name was
    /// already seen is shadowed and left out.
    pub fn member_types(&'static self) -> &'static MemberList {
        self.member_types.get_or_init(|| {
            let mut seen: HashSet<&'static str> = HashSet::new();
            let members: MemberList = std::iter::once(self)
                .chain(self.base_types().iter().copied())
                .flat_map(|descriptor| descriptor.declared_members().iter())
                .filter(|member| seen.insert(member.name()))
                .collect();

            glog::trace!(
                "flattened {} members of `{}` ({} declared)",
                members.len(),
                self.name(),
                self.declared_members().len()
            );
            members
        })
    }

    /// The chain of direct bases leading from this type to `ancestor`.
    pub(crate) fn base_path(&'static self, ancestor: TypeId) -> Option<Vec<&'static BaseDescriptor>> {
        fn search(
            descriptor: &'static TypeDescriptor,
            ancestor: TypeId,
            path: &mut Vec<&'static BaseDescriptor>,
            visited: &mut Vec<TypeId>,
        ) -> bool {
            for base in descriptor.declared_bases() {
                if visited.contains(&base.type_id()) {
                    continue;
                }
                path.push(base);
                if base.type_id() == ancestor {
                    return true;
                }
                visited.push(base.type_id());
                if search(base.descriptor(), ancestor, path, visited) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        let mut visited = vec![self.type_id()];
        search(self, ancestor, &mut path, &mut visited).then_some(path)
    }
}

fn collect_base_types(
    descriptor: &'static TypeDescriptor,
    path: &mut Vec<TypeId>,
) -> Vec<&'static TypeDescriptor> {
    let declared = descriptor.declared_base_types();
    let mut ancestors = declared.clone();

    for base in declared {
        if path.contains(&base.type_id()) {
            glog::warn!("`{}` inherits from itself through `{}`", base.name(), descriptor.name());
            continue;
        }
        path.push(base.type_id());
        ancestors.extend(collect_base_types(base, path));
        path.pop();
    }

    let mut unique: Vec<&'static TypeDescriptor> = Vec::with_capacity(ancestors.len());
    for ancestor in ancestors {
        let seen = unique.iter().any(|known| known.type_id() == ancestor.type_id());
        if !seen && !path.contains(&ancestor.type_id()) {
            unique.push(ancestor);
        }
    }
    unique
}

/// Views `value` as its sub-object of type `to`, walking the declared bases.
///
/// Returns `value` itself when it is a `to`.
pub fn upcast<'a>(value: &'a dyn Reflect, to: TypeId) -> Option<&'a dyn Reflect> {
    let descriptor = value.get_type_descriptor();
    if descriptor.type_id() == to {
        return Some(value);
    }

    descriptor
        .base_path(to)?
        .into_iter()
        .try_fold(value, |current, base| base.upcast(current))
}

pub fn upcast_mut<'a>(value: &'a mut dyn Reflect, to: TypeId) -> Option<&'a mut dyn Reflect> {
    let descriptor = value.get_type_descriptor();
    if descriptor.type_id() == to {
        return Some(value);
    }

    descriptor
        .base_path(to)?
        .into_iter()
        .try_fold(value, |current, base| base.upcast_mut(current))
}
