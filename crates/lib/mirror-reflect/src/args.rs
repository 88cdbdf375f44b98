use std::any::TypeId;
use std::collections::VecDeque;

use crate::{type_list::{Cons, Nil}, Reflect, ReflectError};

/// Type erased arguments of a dynamic call, consumed from the front.
#[derive(Default)]
pub struct ArgList {
    values: VecDeque<Box<dyn Reflect>>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push<T: Reflect>(&mut self, value: T) {
        self.values.push_back(Box::new(value));
    }

    pub fn push_boxed(&mut self, value: Box<dyn Reflect>) {
        self.values.push_back(value);
    }

    /// Builder flavored [`push`](Self::push).
    pub fn with<T: Reflect>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.values.get(index).map(|value| value.as_ref())
    }

    /// Concrete types of the remaining arguments, in order.
    pub fn type_ids(&self) -> Vec<TypeId> {
        self.values.iter().map(|value| value.reflect_type_id()).collect()
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.values.iter().map(|value| value.type_name()).collect()
    }

    /// Removes the next argument.
    pub fn take_boxed(&mut self) -> Option<Box<dyn Reflect>> {
        self.values.pop_front()
    }

    /// Removes the next argument, which must be a `T`.
    pub fn take<T: Reflect>(&mut self) -> Result<T, ReflectError> {
        let value = self.take_boxed().ok_or(ReflectError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: "<no argument>",
        })?;
        value.take_as::<T>()
    }
}

impl std::fmt::Debug for ArgList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl FromIterator<Box<dyn Reflect>> for ArgList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Reflect>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Values usable as the arguments of a dynamic call.
pub trait IntoArgs {
    fn into_args(self) -> ArgList;
}

impl IntoArgs for ArgList {
    #[inline]
    fn into_args(self) -> ArgList {
        self
    }
}

impl IntoArgs for Vec<Box<dyn Reflect>> {
    fn into_args(self) -> ArgList {
        self.into_iter().collect()
    }
}

impl IntoArgs for Nil {
    #[inline]
    fn into_args(self) -> ArgList {
        ArgList::new()
    }
}

impl<H: Reflect, T: IntoArgs> IntoArgs for Cons<H, T> {
    fn into_args(self) -> ArgList {
        let mut args = ArgList::new().with(self.0);
        args.values.extend(self.1.into_args().values);
        args
    }
}

impl IntoArgs for () {
    #[inline]
    fn into_args(self) -> ArgList {
        ArgList::new()
    }
}

macro_rules! impl_into_args_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Reflect),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> ArgList {
                let ($($name,)+) = self;
                let mut args = ArgList::new();
                $(args.push($name);)+
                args
            }
        }
    };
}

impl_into_args_for_tuple!(A0);
impl_into_args_for_tuple!(A0, A1);
impl_into_args_for_tuple!(A0, A1, A2);
impl_into_args_for_tuple!(A0, A1, A2, A3);
impl_into_args_for_tuple!(A0, A1, A2, A3, A4);
impl_into_args_for_tuple!(A0, A1, A2, A3, A4, A5);
impl_into_args_for_tuple!(A0, A1, A2, A3, A4, A5, A6);
impl_into_args_for_tuple!(A0, A1, A2, A3, A4, A5, A6, A7);
