//! Compile-time heterogeneous lists.
//!
//! A list is a chain of [`Cons`] cells ended by [`Nil`]. The same types serve as
//! a list of types (`type_list![i32, f32]`, never instantiated) and as a list of
//! values (`value_list![1, 2.0]`). Structural operations ([`ConcatT`], [`SkipT`],
//! [`FilterT`], ...) are resolved by the type checker, queries on the element
//! types ([`TypeList::index_of`], [`TypeList::contains_instance`], ...) walk the
//! list without allocating, and every visitor runs strictly from left to right.

/// Builds a list type: `type_list![A, B]` is `Cons<A, Cons<B, Nil>>`.
#[macro_export]
macro_rules! type_list {
    () => { $crate::type_list::Nil };
    ($head:ty $(, $tail:ty)* $(,)?) => {
        $crate::type_list::Cons<$head, $crate::type_list![$($tail),*]>
    };
}

/// Builds a list value: `value_list![a, b]` is `Cons(a, Cons(b, Nil))`.
#[macro_export]
macro_rules! value_list {
    () => { $crate::type_list::Nil };
    ($head:expr $(, $tail:expr)* $(,)?) => {
        $crate::type_list::Cons($head, $crate::value_list![$($tail),*])
    };
}

mod index;
mod ops;
mod visit;
mod typed;

use std::any::TypeId;

pub use index::*;
pub use ops::*;
pub use visit::*;
pub use typed::*;

use crate::descriptor_cell::get_simple_name;

/// The empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

/// A list made of the element `H` followed by the list `T`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cons<H, T>(pub H, pub T);

impl<H, T> Cons<H, T> {
    #[inline]
    pub fn head(&self) -> &H {
        &self.0
    }

    #[inline]
    pub fn tail(&self) -> &T {
        &self.1
    }
}

/// Queries over the element types of a list.
pub trait TypeList: 'static {
    const SIZE: usize;

    fn type_id_at(index: usize) -> Option<TypeId>;

    fn type_name_at(index: usize) -> Option<&'static str>;

    /// Calls [`TypeVisitor::visit`] for every element type, indices starting at `start`.
    fn visit_from<V: TypeVisitor + ?Sized>(visitor: &mut V, start: usize);

    /// Threads `acc` through [`TypeFold::fold`] for every element type, indices starting at `start`.
    fn fold_from<Acc, F: TypeFold<Acc> + ?Sized>(folder: &mut F, acc: Acc, start: usize) -> Acc;

    #[inline]
    fn is_empty() -> bool {
        Self::SIZE == 0
    }

    fn index_of_id(type_id: TypeId) -> Option<usize> {
        (0..Self::SIZE).find(|&index| Self::type_id_at(index) == Some(type_id))
    }

    /// Index of the first element which is exactly `T`.
    fn index_of<T: ?Sized + 'static>() -> Option<usize> {
        Self::index_of_id(TypeId::of::<T>())
    }

    fn contains<T: ?Sized + 'static>() -> bool {
        Self::index_of::<T>().is_some()
    }

    /// Index of the first element which is an instantiation of the generic type `family`.
    ///
    /// `family` is matched against the simple name of the element type, so both
    /// `"Vec"` and `"alloc::vec::Vec"` find `Vec<u32>`. Non-generic types are never
    /// instances of a family.
    fn index_of_instance(family: &str) -> Option<usize> {
        let family = get_simple_name(family);
        (0..Self::SIZE).find(|&index| {
            Self::type_name_at(index)
                .map_or(false, |name| name.contains('<') && get_simple_name(name) == family)
        })
    }

    fn contains_instance(family: &str) -> bool {
        Self::index_of_instance(family).is_some()
    }

    /// Number of element types for which `pred` holds.
    fn count_if(mut pred: impl FnMut(TypeId, &'static str) -> bool) -> usize {
        (0..Self::SIZE)
            .filter(|&index| match (Self::type_id_at(index), Self::type_name_at(index)) {
                (Some(type_id), Some(name)) => pred(type_id, name),
                _ => false,
            })
            .count()
    }

    /// The element types with duplicates removed, keeping first occurrences.
    fn unique_ids() -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = Vec::with_capacity(Self::SIZE);
        for type_id in (0..Self::SIZE).filter_map(Self::type_id_at) {
            if !ids.contains(&type_id) {
                ids.push(type_id);
            }
        }
        ids
    }

    #[inline]
    fn for_each<V: TypeVisitor + ?Sized>(visitor: &mut V) {
        Self::visit_from(visitor, 0)
    }

    #[inline]
    fn accumulate<Acc, F: TypeFold<Acc> + ?Sized>(folder: &mut F, init: Acc) -> Acc {
        Self::fold_from(folder, init, 0)
    }
}

impl TypeList for Nil {
    const SIZE: usize = 0;

    #[inline]
    fn type_id_at(_index: usize) -> Option<TypeId> {
        None
    }

    #[inline]
    fn type_name_at(_index: usize) -> Option<&'static str> {
        None
    }

    #[inline]
    fn visit_from<V: TypeVisitor + ?Sized>(_visitor: &mut V, _start: usize) {}

    #[inline]
    fn fold_from<Acc, F: TypeFold<Acc> + ?Sized>(_folder: &mut F, acc: Acc, _start: usize) -> Acc {
        acc
    }
}

impl<H: 'static, T: TypeList> TypeList for Cons<H, T> {
    const SIZE: usize = 1 + T::SIZE;

    fn type_id_at(index: usize) -> Option<TypeId> {
        match index {
            0 => Some(TypeId::of::<H>()),
            _ => T::type_id_at(index - 1),
        }
    }

    fn type_name_at(index: usize) -> Option<&'static str> {
        match index {
            0 => Some(std::any::type_name::<H>()),
            _ => T::type_name_at(index - 1),
        }
    }

    fn visit_from<V: TypeVisitor + ?Sized>(visitor: &mut V, start: usize) {
        visitor.visit::<H>(start);
        T::visit_from(visitor, start + 1);
    }

    fn fold_from<Acc, F: TypeFold<Acc> + ?Sized>(folder: &mut F, acc: Acc, start: usize) -> Acc {
        let acc = folder.fold::<H>(acc, start);
        T::fold_from(folder, acc, start + 1)
    }
}
