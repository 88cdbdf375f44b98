use super::{Cons, Nil, TypeList};

/// Called once per element type by [`TypeList::for_each`].
pub trait TypeVisitor {
    fn visit<T: 'static>(&mut self, index: usize);
}

/// Folds over element types with [`TypeList::accumulate`].
pub trait TypeFold<Acc> {
    fn fold<T: 'static>(&mut self, acc: Acc, index: usize) -> Acc;
}

/// Produces one value for the element type `T`, used by [`map_to_tuple`].
pub trait TypeFn<T> {
    type Output;

    fn call(&mut self, index: usize) -> Self::Output;
}

pub trait MapToTuple<F> {
    type Output;

    fn map_from(func: &mut F, start: usize) -> Self::Output;
}

impl<F> MapToTuple<F> for Nil {
    type Output = Nil;

    #[inline]
    fn map_from(_func: &mut F, _start: usize) -> Nil {
        Nil
    }
}

impl<F, H, T> MapToTuple<F> for Cons<H, T>
where
    F: TypeFn<H>,
    T: MapToTuple<F>,
{
    type Output = Cons<<F as TypeFn<H>>::Output, <T as MapToTuple<F>>::Output>;

    fn map_from(func: &mut F, start: usize) -> Self::Output {
        // the head is produced before the tail is visited
        let head = <F as TypeFn<H>>::call(func, start);
        let tail = <T as MapToTuple<F>>::map_from(func, start + 1);
        Cons(head, tail)
    }
}

/// Maps every element type of `L` to a value, collecting the results into a value list.
#[inline]
pub fn map_to_tuple<L: MapToTuple<F>, F>(func: &mut F) -> L::Output {
    L::map_from(func, 0)
}

/// Called once per element of a value list by [`VisitValues::for_each_value`].
pub trait ValueVisitor<T> {
    fn visit(&mut self, value: &T, index: usize);
}

pub trait VisitValues<V> {
    fn visit_values_from(&self, visitor: &mut V, start: usize);

    #[inline]
    fn for_each_value(&self, visitor: &mut V) {
        self.visit_values_from(visitor, 0)
    }
}

impl<V> VisitValues<V> for Nil {
    #[inline]
    fn visit_values_from(&self, _visitor: &mut V, _start: usize) {}
}

impl<V, H, T> VisitValues<V> for Cons<H, T>
where
    V: ValueVisitor<H>,
    T: VisitValues<V>,
{
    fn visit_values_from(&self, visitor: &mut V, start: usize) {
        <V as ValueVisitor<H>>::visit(visitor, &self.0, start);
        self.1.visit_values_from(visitor, start + 1);
    }
}

/// Visits every element type of `L` in order.
#[inline]
pub fn for_each<L: TypeList, V: TypeVisitor>(visitor: &mut V) {
    L::for_each(visitor)
}

/// Folds every element type of `L` in order, starting from `init`.
#[inline]
pub fn accumulate<L: TypeList, Acc, F: TypeFold<Acc>>(folder: &mut F, init: Acc) -> Acc {
    L::accumulate(folder, init)
}
