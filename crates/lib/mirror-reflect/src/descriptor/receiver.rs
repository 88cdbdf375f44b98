use std::any::TypeId;

use crate::{Reflect, ReflectError};

use super::inheritance::{upcast, upcast_mut};

/// How a reflected function takes its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverKind {
    /// `&self`
    Ref,
    /// `&mut self`
    Mut,
    /// no receiver
    Static,
}

impl ReceiverKind {
    /// Whether a function taking its receiver as `self` can be called with a `provided` one.
    pub fn accepts(self, provided: ReceiverKind) -> bool {
        match self {
            ReceiverKind::Ref => matches!(provided, ReceiverKind::Ref | ReceiverKind::Mut),
            ReceiverKind::Mut => provided == ReceiverKind::Mut,
            ReceiverKind::Static => true,
        }
    }
}

/// The instance a dynamic call operates on.
pub enum Receiver<'a> {
    Ref(&'a dyn Reflect),
    Mut(&'a mut dyn Reflect),
    Static,
}

impl<'a> Receiver<'a> {
    pub fn kind(&self) -> ReceiverKind {
        match self {
            Receiver::Ref(_) => ReceiverKind::Ref,
            Receiver::Mut(_) => ReceiverKind::Mut,
            Receiver::Static => ReceiverKind::Static,
        }
    }

    /// Shorter lived copy of this receiver, so it can be used more than once.
    pub fn reborrow(&mut self) -> Receiver<'_> {
        match self {
            Receiver::Ref(value) => Receiver::Ref(*value),
            Receiver::Mut(value) => Receiver::Mut(&mut **value),
            Receiver::Static => Receiver::Static,
        }
    }

    pub fn as_reflect(&self) -> Option<&dyn Reflect> {
        match self {
            Receiver::Ref(value) => Some(*value),
            Receiver::Mut(value) => Some(&**value),
            Receiver::Static => None,
        }
    }

    pub fn downcast_ref<T: Reflect>(self) -> Result<&'a T, ReflectError> {
        let value: &'a dyn Reflect = match self {
            Receiver::Ref(value) => value,
            Receiver::Mut(value) => value,
            Receiver::Static => {
                return Err(ReflectError::MissingReceiver(std::any::type_name::<T>().to_string()))
            }
        };
        value.downcast_ref::<T>().ok_or(ReflectError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: value.type_name(),
        })
    }

    pub fn downcast_mut<T: Reflect>(self) -> Result<&'a mut T, ReflectError> {
        match self {
            Receiver::Mut(value) => {
                let found = value.type_name();
                value.downcast_mut::<T>().ok_or(ReflectError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found,
                })
            }
            Receiver::Ref(_) => Err(ReflectError::NeedsMutableReceiver(std::any::type_name::<T>().to_string())),
            Receiver::Static => Err(ReflectError::MissingReceiver(std::any::type_name::<T>().to_string())),
        }
    }

    /// Views the receiver as its base sub-object of type `to`.
    pub fn upcast(self, to: TypeId, to_name: &'static str) -> Result<Receiver<'a>, ReflectError> {
        let not_a_base = |derived: &dyn Reflect| ReflectError::NotABase {
            derived: derived.type_name(),
            base: to_name,
        };

        match self {
            Receiver::Ref(value) => upcast(value, to).map(Receiver::Ref).ok_or_else(|| not_a_base(value)),
            Receiver::Mut(value) => {
                let derived = value.type_name();
                upcast_mut(value, to).map(Receiver::Mut).ok_or(ReflectError::NotABase {
                    derived,
                    base: to_name,
                })
            }
            Receiver::Static => Ok(Receiver::Static),
        }
    }
}

impl<'a> From<&'a dyn Reflect> for Receiver<'a> {
    fn from(value: &'a dyn Reflect) -> Self {
        Receiver::Ref(value)
    }
}

impl<'a> From<&'a mut dyn Reflect> for Receiver<'a> {
    fn from(value: &'a mut dyn Reflect) -> Self {
        Receiver::Mut(value)
    }
}
