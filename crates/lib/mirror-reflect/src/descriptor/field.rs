use std::any::TypeId;

use crate::{attr::Attributes, args::ArgList, Reflect, ReflectError, Typed};

use super::{upcast, upcast_mut, Receiver, ReceiverKind, TypeDescriptor};

/// Type erased access to the storage of a field.
trait FieldAccessor: Send + Sync {
    fn get<'a>(&self, target: &'a dyn Reflect) -> Option<&'a dyn Reflect>;
    fn get_mut<'a>(&self, target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect>;
    fn get_static(&self) -> Option<&'static dyn Reflect>;
    fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), ReflectError>;
}

struct InstanceField<T, V> {
    get: fn(&T) -> &V,
    get_mut: Option<fn(&mut T) -> &mut V>,
}

impl<T: Reflect, V: Reflect> FieldAccessor for InstanceField<T, V> {
    fn get<'a>(&self, target: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        target.downcast_ref::<T>().map(|target| (self.get)(target) as &dyn Reflect)
    }

    fn get_mut<'a>(&self, target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        let get_mut = self.get_mut?;
        target.downcast_mut::<T>().map(|target| get_mut(target) as &mut dyn Reflect)
    }

    fn get_static(&self) -> Option<&'static dyn Reflect> {
        None
    }

    fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        let found = target.type_name();
        let (target, get_mut) = match (target.downcast_mut::<T>(), self.get_mut) {
            (Some(target), Some(get_mut)) => (target, get_mut),
            (None, _) => {
                return Err(ReflectError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found,
                })
            }
            (_, None) => return Err(ReflectError::NotWritable(std::any::type_name::<V>().to_string())),
        };
        *get_mut(target) = value.take_as::<V>()?;
        Ok(())
    }
}

struct StaticField<V: 'static> {
    get: fn() -> &'static V,
}

impl<V: Reflect> FieldAccessor for StaticField<V> {
    fn get<'a>(&self, _target: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        Some((self.get)())
    }

    fn get_mut<'a>(&self, _target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        None
    }

    fn get_static(&self) -> Option<&'static dyn Reflect> {
        Some((self.get)())
    }

    fn set(&self, _target: &mut dyn Reflect, _value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        Err(ReflectError::NotWritable(std::any::type_name::<V>().to_string()))
    }
}

/// A reflected data member.
pub struct FieldDescriptor {
    name: &'static str,
    declaring_type: fn() -> &'static TypeDescriptor,
    declaring_type_id: TypeId,
    declaring_type_name: &'static str,
    value_type: TypeId,
    value_type_name: &'static str,
    is_static: bool,
    is_writable: bool,
    attributes: Attributes,
    accessor: Box<dyn FieldAccessor>,
}

impl FieldDescriptor {
    fn build<T: Typed + Reflect, V: Reflect>(
        name: &'static str,
        is_static: bool,
        is_writable: bool,
        attributes: Attributes,
        accessor: Box<dyn FieldAccessor>,
    ) -> Self {
        Self {
            name,
            declaring_type: T::type_descriptor,
            declaring_type_id: TypeId::of::<T>(),
            declaring_type_name: std::any::type_name::<T>(),
            value_type: TypeId::of::<V>(),
            value_type_name: std::any::type_name::<V>(),
            is_static,
            is_writable,
            attributes,
            accessor,
        }
    }

    /// A writable instance field of `T`.
    pub fn new<T: Typed + Reflect, V: Reflect>(
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
        attributes: Attributes,
    ) -> Self {
        let accessor = InstanceField { get, get_mut: Some(get_mut) };
        Self::build::<T, V>(name, false, true, attributes, Box::new(accessor))
    }

    /// An instance field of `T` which can only be read.
    pub fn new_readonly<T: Typed + Reflect, V: Reflect>(
        name: &'static str,
        get: fn(&T) -> &V,
        attributes: Attributes,
    ) -> Self {
        let accessor = InstanceField { get, get_mut: None };
        Self::build::<T, V>(name, false, false, attributes, Box::new(accessor))
    }

    /// A member of `T` with static storage, never writable.
    pub fn new_static<T: Typed + Reflect, V: Reflect>(
        name: &'static str,
        get: fn() -> &'static V,
        attributes: Attributes,
    ) -> Self {
        let accessor: StaticField<V> = StaticField { get };
        Self::build::<T, V>(name, true, false, attributes, Box::new(accessor))
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn declaring_type(&self) -> &'static TypeDescriptor {
        (self.declaring_type)()
    }

    #[inline]
    pub fn declaring_type_id(&self) -> TypeId {
        self.declaring_type_id
    }

    #[inline]
    pub fn value_type(&self) -> TypeId {
        self.value_type
    }

    #[inline]
    pub fn value_type_name(&self) -> &'static str {
        self.value_type_name
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.is_writable
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn not_a_base(&self, target: &dyn Reflect) -> ReflectError {
        ReflectError::NotABase {
            derived: target.type_name(),
            base: self.declaring_type_name,
        }
    }

    /// Reads the field of `target`, or of its base sub-object declaring the field.
    pub fn get<'a>(&self, target: &'a dyn Reflect) -> Result<&'a dyn Reflect, ReflectError> {
        let declaring = upcast(target, self.declaring_type_id).ok_or_else(|| self.not_a_base(target))?;
        self.accessor.get(declaring).ok_or_else(|| self.not_a_base(target))
    }

    pub fn get_mut<'a>(&self, target: &'a mut dyn Reflect) -> Result<&'a mut dyn Reflect, ReflectError> {
        if !self.is_writable {
            return Err(ReflectError::NotWritable(self.name.to_string()));
        }

        let derived = target.type_name();
        let declaring = upcast_mut(target, self.declaring_type_id).ok_or(ReflectError::NotABase {
            derived,
            base: self.declaring_type_name,
        })?;
        self.accessor.get_mut(declaring).ok_or(ReflectError::NotABase {
            derived,
            base: self.declaring_type_name,
        })
    }

    /// The storage of a static member, `None` for instance fields.
    #[inline]
    pub fn get_static(&self) -> Option<&'static dyn Reflect> {
        self.accessor.get_static()
    }

    /// Typed flavor of [`get`](Self::get).
    pub fn get_as<'a, V: Reflect>(&self, target: &'a dyn Reflect) -> Result<&'a V, ReflectError> {
        let value = self.get(target)?;
        value.downcast_ref::<V>().ok_or(ReflectError::TypeMismatch {
            expected: std::any::type_name::<V>(),
            found: value.type_name(),
        })
    }

    /// Assigns `value` to the field of `target`.
    pub fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        if !self.is_writable {
            return Err(ReflectError::NotWritable(self.name.to_string()));
        }

        let derived = target.type_name();
        let declaring = upcast_mut(target, self.declaring_type_id).ok_or(ReflectError::NotABase {
            derived,
            base: self.declaring_type_name,
        })?;
        self.accessor.set(declaring, value)
    }

    #[inline]
    pub fn set_value<V: Reflect>(&self, target: &mut dyn Reflect, value: V) -> Result<(), ReflectError> {
        self.set(target, Box::new(value))
    }

    /// Whether [`invoke`](Self::invoke) accepts these arguments and yields a `ret`.
    ///
    /// No argument reads the field, one argument of the value type assigns it
    /// through a mutable receiver.
    pub fn accepts(&self, receiver: ReceiverKind, args: &[TypeId], ret: TypeId) -> bool {
        ret == self.value_type && self.accepts_args(receiver, args)
    }

    /// [`accepts`](Self::accepts) without constraint on the result.
    pub fn accepts_args(&self, receiver: ReceiverKind, args: &[TypeId]) -> bool {
        match args {
            [] => self.is_static || receiver != ReceiverKind::Static,
            [value] => self.is_writable && receiver == ReceiverKind::Mut && *value == self.value_type,
            _ => false,
        }
    }

    /// Reads (no argument) or assigns (one argument) the field, returning its value.
    ///
    /// The value is returned as a clone, which requires the value type to be
    /// registered as clonable. An assignment of a value which cannot be cloned
    /// fails before the field is written.
    pub fn invoke(&self, receiver: Receiver<'_>, mut args: ArgList) -> Result<Box<dyn Reflect>, ReflectError> {
        let value = match args.len() {
            0 => match (&receiver, self.get_static()) {
                (_, Some(value)) => value.clone_value(),
                (Receiver::Static, None) => return Err(ReflectError::MissingReceiver(self.name.to_string())),
                _ => {
                    let target = receiver.as_reflect().ok_or_else(|| ReflectError::MissingReceiver(self.name.to_string()))?;
                    self.get(target)?.clone_value()
                }
            },
            1 => {
                let Receiver::Mut(target) = receiver else {
                    return Err(ReflectError::NeedsMutableReceiver(self.name.to_string()));
                };
                let value = args.take_boxed().ok_or(ReflectError::ArgumentCount {
                    member: self.name.to_string(),
                    expected: 1,
                    found: 0,
                })?;
                if !self.is_writable {
                    return Err(ReflectError::NotWritable(self.name.to_string()));
                }
                // the target is left untouched when the result cannot be produced
                let assigned = value.clone_value().ok_or(ReflectError::NotCloneable(self.value_type_name))?;
                self.set(target, value)?;
                Some(assigned)
            }
            found => {
                return Err(ReflectError::ArgumentCount {
                    member: self.name.to_string(),
                    expected: 1,
                    found,
                })
            }
        };

        value.ok_or(ReflectError::NotCloneable(self.value_type_name))
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type_name)
            .field("is_static", &self.is_static)
            .field("is_writable", &self.is_writable)
            .field("attributes", &self.attributes)
            .finish()
    }
}
