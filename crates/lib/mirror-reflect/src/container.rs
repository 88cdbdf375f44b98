use std::sync::Arc;

use crate::Reflect;

/// An ordered container of reflected elements, printed element by element.
///
/// Tuples are lists too, of heterogeneous elements.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn iter(&self) -> ListIter<'_>;
}

/// Iterator over the elements of a [`List`].
pub struct ListIter<'a> {
    elements: Box<dyn ExactSizeIterator<Item = &'a dyn Reflect> + 'a>,
}

impl<'a> ListIter<'a> {
    pub fn new<T, I>(elements: I) -> Self
    where
        T: Reflect,
        I: ExactSizeIterator<Item = &'a T> + 'a,
    {
        Self {
            elements: Box::new(elements.map(|element| element as &dyn Reflect)),
        }
    }

    /// Iterates over elements of different types, e.g. the fields of a tuple.
    pub fn from_refs<const N: usize>(elements: [&'a dyn Reflect; N]) -> Self {
        Self {
            elements: Box::new(elements.into_iter()),
        }
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl ExactSizeIterator for ListIter<'_> {}

/// A non-owning pointer, which may have expired.
pub trait WeakPointer: Reflect {
    /// The pointee, `None` once every owner is gone.
    fn upgrade(&self) -> Option<Arc<dyn Reflect>>;
}
