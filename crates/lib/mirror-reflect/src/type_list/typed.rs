use std::any::TypeId;

use crate::{Typed, TypeDescriptor};

use super::{Cons, Nil, TypeList};

/// Queries over lists whose elements are all reflected types.
pub trait TypedList: TypeList {
    fn descriptor_at(index: usize) -> Option<&'static TypeDescriptor>;

    fn descriptors() -> Vec<&'static TypeDescriptor> {
        (0..Self::SIZE).filter_map(Self::descriptor_at).collect()
    }

    /// Index of the first element which is `B` or has `B` among its base types.
    fn index_of_base<B: Typed>() -> Option<usize> {
        let base = TypeId::of::<B>();
        (0..Self::SIZE).find(|&index| {
            Self::descriptor_at(index).map_or(false, |descriptor| descriptor.is_or_derives_from(base))
        })
    }

    fn contains_base<B: Typed>() -> bool {
        Self::index_of_base::<B>().is_some()
    }

    /// The element descriptors with duplicates removed, keeping first occurrences.
    fn unique() -> Vec<&'static TypeDescriptor> {
        let mut unique: Vec<&'static TypeDescriptor> = Vec::with_capacity(Self::SIZE);
        for descriptor in (0..Self::SIZE).filter_map(Self::descriptor_at) {
            if !unique.iter().any(|seen| seen.type_id() == descriptor.type_id()) {
                unique.push(descriptor);
            }
        }
        unique
    }
}

impl TypedList for Nil {
    #[inline]
    fn descriptor_at(_index: usize) -> Option<&'static TypeDescriptor> {
        None
    }
}

impl<H: Typed, T: TypedList> TypedList for Cons<H, T> {
    fn descriptor_at(index: usize) -> Option<&'static TypeDescriptor> {
        match index {
            0 => Some(H::type_descriptor()),
            _ => T::descriptor_at(index - 1),
        }
    }
}
