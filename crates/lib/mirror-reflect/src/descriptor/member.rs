use std::any::TypeId;
use std::fmt;
use std::ops::Deref;

use crate::{attr::{Attribute, Attributes}, args::ArgList, Reflect, ReflectError};

use super::{FieldDescriptor, FunctionDescriptor, Receiver, ReceiverKind, TypeDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Function,
}

/// One reflected member of a type.
pub enum MemberDescriptor {
    Field(FieldDescriptor),
    Function(FunctionDescriptor),
}

impl MemberDescriptor {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            MemberDescriptor::Field(field) => field.name(),
            MemberDescriptor::Function(function) => function.name(),
        }
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberDescriptor::Field(_) => MemberKind::Field,
            MemberDescriptor::Function(_) => MemberKind::Function,
        }
    }

    #[inline]
    pub fn is_field(&self) -> bool {
        self.kind() == MemberKind::Field
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        self.kind() == MemberKind::Function
    }

    pub fn as_field(&self) -> Option<&FieldDescriptor> {
        match self {
            MemberDescriptor::Field(field) => Some(field),
            MemberDescriptor::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDescriptor> {
        match self {
            MemberDescriptor::Function(function) => Some(function),
            MemberDescriptor::Field(_) => None,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            MemberDescriptor::Field(field) => field.attributes(),
            MemberDescriptor::Function(function) => function.attributes(),
        }
    }

    /// The type which declared the member, a base of the inspected type for inherited members.
    pub fn declaring_type(&self) -> &'static TypeDescriptor {
        match self {
            MemberDescriptor::Field(field) => field.declaring_type(),
            MemberDescriptor::Function(function) => function.declaring_type(),
        }
    }

    pub fn declaring_type_id(&self) -> TypeId {
        match self {
            MemberDescriptor::Field(field) => field.declaring_type_id(),
            MemberDescriptor::Function(function) => function.declaring_type_id(),
        }
    }

    #[inline]
    pub fn has_attribute<A: Attribute>(&self) -> bool {
        self.attributes().has::<A>()
    }

    #[inline]
    pub fn get_attribute<A: Attribute>(&self) -> Option<&A> {
        self.attributes().get::<A>()
    }

    /// Whether [`invoke`](Self::invoke) accepts this receiver and these argument types.
    pub fn is_invocable(&self, receiver: ReceiverKind, args: &[TypeId]) -> bool {
        match self {
            MemberDescriptor::Field(field) => field.accepts_args(receiver, args),
            MemberDescriptor::Function(function) => function.is_invocable(receiver, args),
        }
    }

    /// [`is_invocable`](Self::is_invocable), with the result required to be a `ret`.
    pub fn is_invocable_r(&self, receiver: ReceiverKind, args: &[TypeId], ret: TypeId) -> bool {
        match self {
            MemberDescriptor::Field(field) => field.accepts(receiver, args, ret),
            MemberDescriptor::Function(function) => function.is_invocable_r(receiver, args, ret),
        }
    }

    /// Reads or assigns a field, or calls a function.
    pub fn invoke(&self, receiver: Receiver<'_>, args: ArgList) -> Result<Box<dyn Reflect>, ReflectError> {
        match self {
            MemberDescriptor::Field(field) => field.invoke(receiver, args),
            MemberDescriptor::Function(function) => function.invoke(receiver, args),
        }
    }

    /// The value of a field or the result of a zero argument function, on `target`.
    pub fn read<'a>(&self, target: &'a dyn Reflect) -> Result<MemberValue<'a>, ReflectError> {
        match self {
            MemberDescriptor::Field(field) => field.get(target).map(MemberValue::Borrowed),
            MemberDescriptor::Function(function) => function
                .invoke(Receiver::Ref(target), ArgList::new())
                .map(MemberValue::Owned),
        }
    }

    /// Assigns a field, or calls a one argument function, on `target`.
    pub fn write(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        match self {
            MemberDescriptor::Field(field) => field.set(target, value),
            MemberDescriptor::Function(function) => {
                let mut args = ArgList::with_capacity(1);
                args.push_boxed(value);
                function.invoke(Receiver::Mut(target), args).map(|_| ())
            }
        }
    }
}

impl PartialEq for MemberDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.declaring_type_id() == other.declaring_type_id() && self.name() == other.name()
    }
}

impl Eq for MemberDescriptor {}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberDescriptor::Field(field) => fmt::Debug::fmt(field, f),
            MemberDescriptor::Function(function) => fmt::Debug::fmt(function, f),
        }
    }
}

/// A value read from a member: borrowed from a field, or returned by a getter.
pub enum MemberValue<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl Deref for MemberValue<'_> {
    type Target = dyn Reflect;

    fn deref(&self) -> &Self::Target {
        match self {
            MemberValue::Borrowed(value) => *value,
            MemberValue::Owned(value) => value.as_ref(),
        }
    }
}

impl fmt::Debug for MemberValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
