use super::{Cons, Nil};

/// Type-level `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct True;

/// Type-level `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct False;

pub trait Bool {
    const VALUE: bool;
}

impl Bool for True {
    const VALUE: bool = true;
}

impl Bool for False {
    const VALUE: bool = false;
}

pub trait First {
    type Output;
}

impl<H, T> First for Cons<H, T> {
    type Output = H;
}

pub type FirstT<L> = <L as First>::Output;

pub trait Last {
    type Output;
}

impl<H> Last for Cons<H, Nil> {
    type Output = H;
}

impl<H, H2, T> Last for Cons<H, Cons<H2, T>>
where
    Cons<H2, T>: Last,
{
    type Output = <Cons<H2, T> as Last>::Output;
}

pub type LastT<L> = <L as Last>::Output;

/// Every element but the first.
pub trait Tail {
    type Output;
}

impl<H, T> Tail for Cons<H, T> {
    type Output = T;
}

pub type TailT<L> = <L as Tail>::Output;

/// Every element but the last.
pub trait Init {
    type Output;
}

impl<H> Init for Cons<H, Nil> {
    type Output = Nil;
}

impl<H, H2, T> Init for Cons<H, Cons<H2, T>>
where
    Cons<H2, T>: Init,
{
    type Output = Cons<H, <Cons<H2, T> as Init>::Output>;
}

pub type InitT<L> = <L as Init>::Output;

/// The elements of `Self` followed by the elements of `R`.
pub trait Concat<R> {
    type Output;

    fn concat(self, rhs: R) -> Self::Output;
}

impl<R> Concat<R> for Nil {
    type Output = R;

    #[inline]
    fn concat(self, rhs: R) -> R {
        rhs
    }
}

impl<H, T: Concat<R>, R> Concat<R> for Cons<H, T> {
    type Output = Cons<H, <T as Concat<R>>::Output>;

    #[inline]
    fn concat(self, rhs: R) -> Self::Output {
        Cons(self.0, <T as Concat<R>>::concat(self.1, rhs))
    }
}

pub type ConcatT<L, R> = <L as Concat<R>>::Output;
pub type PrependT<X, L> = Cons<X, L>;
pub type AppendT<L, X> = ConcatT<L, Cons<X, Nil>>;

/// Reverses `Self` onto the accumulated list `Acc`.
pub trait ReverseOnto<Acc> {
    type Output;

    fn reverse_onto(self, acc: Acc) -> Self::Output;
}

impl<Acc> ReverseOnto<Acc> for Nil {
    type Output = Acc;

    #[inline]
    fn reverse_onto(self, acc: Acc) -> Acc {
        acc
    }
}

impl<H, T: ReverseOnto<Cons<H, Acc>>, Acc> ReverseOnto<Acc> for Cons<H, T> {
    type Output = <T as ReverseOnto<Cons<H, Acc>>>::Output;

    #[inline]
    fn reverse_onto(self, acc: Acc) -> Self::Output {
        <T as ReverseOnto<Cons<H, Acc>>>::reverse_onto(self.1, Cons(self.0, acc))
    }
}

pub type ReverseT<L> = <L as ReverseOnto<Nil>>::Output;

/// Reverses a list value.
#[inline]
pub fn reverse<L: ReverseOnto<Nil>>(list: L) -> ReverseT<L> {
    list.reverse_onto(Nil)
}

/// A type-level function applied by [`MapT`].
pub trait TypeMapper<T> {
    type Output;
}

pub trait Map<M> {
    type Output;
}

impl<M> Map<M> for Nil {
    type Output = Nil;
}

impl<M, H, T> Map<M> for Cons<H, T>
where
    M: TypeMapper<H>,
    T: Map<M>,
{
    type Output = Cons<<M as TypeMapper<H>>::Output, <T as Map<M>>::Output>;
}

pub type MapT<L, M> = <L as Map<M>>::Output;

/// A type-level predicate applied by [`FilterT`].
pub trait TypePredicate<T> {
    type Output: Bool;
}

/// Keeps `H` in front of `Rest` when `Self` is [`True`], drops it otherwise.
pub trait Select<H, Rest> {
    type Output;

    fn select(head: H, rest: Rest) -> Self::Output;
}

impl<H, Rest> Select<H, Rest> for True {
    type Output = Cons<H, Rest>;

    #[inline]
    fn select(head: H, rest: Rest) -> Self::Output {
        Cons(head, rest)
    }
}

impl<H, Rest> Select<H, Rest> for False {
    type Output = Rest;

    #[inline]
    fn select(_head: H, rest: Rest) -> Rest {
        rest
    }
}

pub trait Filter<P> {
    type Output;

    fn filter(self) -> Self::Output;
}

impl<P> Filter<P> for Nil {
    type Output = Nil;

    #[inline]
    fn filter(self) -> Nil {
        Nil
    }
}

impl<P, H, T> Filter<P> for Cons<H, T>
where
    P: TypePredicate<H>,
    T: Filter<P>,
    <P as TypePredicate<H>>::Output: Select<H, <T as Filter<P>>::Output>,
{
    type Output = <<P as TypePredicate<H>>::Output as Select<H, <T as Filter<P>>::Output>>::Output;

    #[inline]
    fn filter(self) -> Self::Output {
        let rest = <T as Filter<P>>::filter(self.1);
        <<P as TypePredicate<H>>::Output as Select<H, <T as Filter<P>>::Output>>::select(self.0, rest)
    }
}

pub type FilterT<L, P> = <L as Filter<P>>::Output;

#[cfg(test)]
mod tests {
    use std::marker::PhantomData;

    use super::*;

    struct Boxed;

    impl<T> TypeMapper<T> for Boxed {
        type Output = Box<T>;
    }

    struct IsFloat;

    impl TypePredicate<f32> for IsFloat {
        type Output = True;
    }

    impl TypePredicate<f64> for IsFloat {
        type Output = True;
    }

    impl TypePredicate<i32> for IsFloat {
        type Output = False;
    }

    #[test]
    fn structural_operations() {
        type L = type_list![i32, f32];

        let _: PhantomData<FirstT<L>> = PhantomData::<i32>;
        let _: PhantomData<LastT<L>> = PhantomData::<f32>;
        let _: PhantomData<TailT<L>> = PhantomData::<type_list![f32]>;
        let _: PhantomData<InitT<L>> = PhantomData::<type_list![i32]>;
        let _: PhantomData<AppendT<L, u8>> = PhantomData::<type_list![i32, f32, u8]>;
        let _: PhantomData<PrependT<u8, L>> = PhantomData::<type_list![u8, i32, f32]>;
        let _: PhantomData<ReverseT<L>> = PhantomData::<type_list![f32, i32]>;
        let _: PhantomData<ReverseT<type_list![]>> = PhantomData::<type_list![]>;
        let _: PhantomData<ConcatT<L, type_list![u8, u16]>> = PhantomData::<type_list![i32, f32, u8, u16]>;
        let _: PhantomData<ConcatT<type_list![], type_list![]>> = PhantomData::<type_list![]>;
    }

    #[test]
    fn map_and_filter() {
        let _: PhantomData<MapT<type_list![i32, f32], Boxed>> = PhantomData::<type_list![Box<i32>, Box<f32>]>;
        let _: PhantomData<FilterT<type_list![i32, f32, i32, f64], IsFloat>> = PhantomData::<type_list![f32, f64]>;
        let _: PhantomData<FilterT<type_list![i32], IsFloat>> = PhantomData::<type_list![]>;
    }

    #[test]
    fn value_operations() {
        let joined = value_list![1, 2.0f32].concat(value_list!["three"]);
        assert_eq!(joined, value_list![1, 2.0f32, "three"]);

        assert_eq!(reverse(joined), value_list!["three", 2.0f32, 1]);

        let floats = Filter::<IsFloat>::filter(value_list![1, 2.0f32, 3, 4.0f64]);
        assert_eq!(floats, value_list![2.0f32, 4.0f64]);
    }
}
