use std::any::TypeId;
use std::fmt;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::{container::{List, WeakPointer}, runtime, ReflectError, TypeDescriptor};

/// Wrapper enum to get a immutable reference of reflected data conveniently.
/// This helper class classify reflected data for user.
pub enum ReflectRef<'a> {
    /// A value described by the members of its descriptor.
    Struct(&'a dyn Reflect),
    /// An ordered container of reflected elements.
    List(&'a dyn List),
    /// A fixed sequence of values of different types, its elements in order.
    Tuple(&'a dyn List),
    /// A (possibly null) owning pointer to another reflected value.
    Pointer(Option<&'a dyn Reflect>),
    /// A non-owning pointer, null once it expired.
    Weak(&'a dyn WeakPointer),
    /// A value without reflected structure, printed natively if it can be.
    Value(&'a dyn Reflect),
}

/// A reflected type whose descriptor can be retrieved without an instance.
pub trait Typed: 'static {
    fn type_descriptor() -> &'static TypeDescriptor;
}

pub trait Reflect: DowncastSync {
    fn type_name(&self) -> &'static str;

    fn get_type_descriptor(&self) -> &'static TypeDescriptor;

    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;
    fn as_reflect(&self) -> &dyn Reflect;
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Clones the value as a `Reflect` trait object.
    ///
    /// Returns `None` for types which were not registered as clonable,
    /// reading such a value by copy (e.g. through [`runtime::invoke`]) fails.
    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        None
    }

    /// Writes the value with its native formatting, if the type has one.
    ///
    /// Returns `None` when the type is not natively printable.
    fn display(&self, _out: &mut dyn fmt::Write) -> Option<fmt::Result> {
        None
    }
}

impl_downcast!(sync Reflect);

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:#?}` asks for the detailed multi-line layout
        let compact = !f.alternate();
        runtime::debug(f, self, compact)
    }
}

impl dyn Reflect {
    /// Try to downcast dyn Reflect to concrete type T.
    /// If failed, return origin Box<dyn Reflect>
    pub fn take<T: Reflect>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|v| *v)
    }

    /// Same as [`take`](Self::take), but failing with a type mismatch error.
    pub fn take_as<T: Reflect>(self: Box<dyn Reflect>) -> Result<T, ReflectError> {
        self.take::<T>().map_err(|value| ReflectError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: value.type_name(),
        })
    }

    /// The [`TypeId`] of the concrete type behind this trait object.
    pub fn reflect_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }
}

/// Returns the descriptor of `T`.
#[inline]
pub fn reflect<T: Typed>() -> &'static TypeDescriptor {
    T::type_descriptor()
}

/// Whether `T` carries reflected members, as opposed to a plain value or container.
pub fn is_reflectable<T: Typed>() -> bool {
    T::type_descriptor().kind().is_struct()
}
