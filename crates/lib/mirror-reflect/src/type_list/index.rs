use std::marker::PhantomData;

use super::{Cons, Nil};

/// Type-level zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Z;

/// Type-level successor of `N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct S<N>(PhantomData<N>);

/// A type-level natural number.
pub trait Nat {
    const VALUE: usize;
}

impl Nat for Z {
    const VALUE: usize = 0;
}

impl<N: Nat> Nat for S<N> {
    const VALUE: usize = N::VALUE + 1;
}

pub type N0 = Z;
pub type N1 = S<N0>;
pub type N2 = S<N1>;
pub type N3 = S<N2>;
pub type N4 = S<N3>;
pub type N5 = S<N4>;
pub type N6 = S<N5>;
pub type N7 = S<N6>;
pub type N8 = S<N7>;
pub type N9 = S<N8>;
pub type N10 = S<N9>;
pub type N11 = S<N10>;
pub type N12 = S<N11>;
pub type N13 = S<N12>;
pub type N14 = S<N13>;
pub type N15 = S<N14>;

/// The element at index `N`. Indexing past the end does not type check.
pub trait Get<N> {
    type Output;

    fn get(&self) -> &Self::Output;
    fn get_mut(&mut self) -> &mut Self::Output;
}

impl<H, T> Get<Z> for Cons<H, T> {
    type Output = H;

    #[inline]
    fn get(&self) -> &H {
        &self.0
    }

    #[inline]
    fn get_mut(&mut self) -> &mut H {
        &mut self.0
    }
}

impl<H, T: Get<N>, N> Get<S<N>> for Cons<H, T> {
    type Output = <T as Get<N>>::Output;

    #[inline]
    fn get(&self) -> &Self::Output {
        <T as Get<N>>::get(&self.1)
    }

    #[inline]
    fn get_mut(&mut self) -> &mut Self::Output {
        <T as Get<N>>::get_mut(&mut self.1)
    }
}

pub type GetT<L, N> = <L as Get<N>>::Output;

/// The list without its first `N` elements.
pub trait Skip<N> {
    type Output;

    fn skip(self) -> Self::Output;
}

impl<L> Skip<Z> for L {
    type Output = L;

    #[inline]
    fn skip(self) -> L {
        self
    }
}

impl<H, T: Skip<N>, N> Skip<S<N>> for Cons<H, T> {
    type Output = <T as Skip<N>>::Output;

    #[inline]
    fn skip(self) -> Self::Output {
        <T as Skip<N>>::skip(self.1)
    }
}

pub type SkipT<L, N> = <L as Skip<N>>::Output;

/// The first `N` elements of the list.
pub trait Take<N> {
    type Output;

    fn take(self) -> Self::Output;
}

impl<L> Take<Z> for L {
    type Output = Nil;

    #[inline]
    fn take(self) -> Nil {
        Nil
    }
}

impl<H, T: Take<N>, N> Take<S<N>> for Cons<H, T> {
    type Output = Cons<H, <T as Take<N>>::Output>;

    #[inline]
    fn take(self) -> Self::Output {
        Cons(self.0, <T as Take<N>>::take(self.1))
    }
}

pub type TakeT<L, N> = <L as Take<N>>::Output;

#[cfg(test)]
mod tests {
    use std::marker::PhantomData;

    use super::*;

    #[test]
    fn indices() {
        assert_eq!(N0::VALUE, 0);
        assert_eq!(N3::VALUE, 3);
        assert_eq!(N15::VALUE, 15);
    }

    #[test]
    fn get_skip_take() {
        type L = type_list![i32, f32, u8];

        let _: PhantomData<GetT<L, N0>> = PhantomData::<i32>;
        let _: PhantomData<GetT<L, N2>> = PhantomData::<u8>;
        let _: PhantomData<SkipT<type_list![i32, f32], N0>> = PhantomData::<type_list![i32, f32]>;
        let _: PhantomData<SkipT<type_list![i32, f32], N1>> = PhantomData::<type_list![f32]>;
        let _: PhantomData<SkipT<type_list![i32, f32], N2>> = PhantomData::<type_list![]>;
        let _: PhantomData<TakeT<L, N2>> = PhantomData::<type_list![i32, f32]>;
        let _: PhantomData<TakeT<L, N0>> = PhantomData::<type_list![]>;
    }

    #[test]
    fn value_access() {
        let mut values = value_list![1u8, 'b', "c"];

        assert_eq!(*Get::<N1>::get(&values), 'b');
        *Get::<N0>::get_mut(&mut values) += 1;
        assert_eq!(values.0, 2);

        let rest = Skip::<N1>::skip(values);
        assert_eq!(rest, value_list!['b', "c"]);

        let front = Take::<N1>::take(rest);
        assert_eq!(front, value_list!['b']);
    }
}
