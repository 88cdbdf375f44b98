//! Type and member descriptors.
//!
//! Every reflected type owns one [`TypeDescriptor`], built lazily the first time
//! it is requested and kept for the rest of the program. The descriptor lists the
//! members the type declares itself, the base types are reached through the
//! [`Bases`](crate::attr::Bases) attribute.

mod field;
mod function;
mod inheritance;
mod member;
mod member_list;
mod receiver;

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

use once_cell::sync::OnceCell;

pub use field::*;
pub use function::*;
pub use inheritance::*;
pub use member::*;
pub use member_list::*;
pub use receiver::*;

use crate::{attr::Attributes, descriptor_cell, Reflect};

/// How a reflected value is laid out, which picks the way it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A type with reflected members.
    Struct,
    /// A primitive or opaque value.
    Value,
    /// An ordered container.
    List,
    /// A fixed sequence of values of different types.
    Tuple,
    /// A nullable pointer, owning or weak.
    Pointer,
}

impl TypeKind {
    #[inline]
    pub fn is_struct(self) -> bool {
        self == TypeKind::Struct
    }
}

/// The metadata of one reflected type.
pub struct TypeDescriptor {
    /// Display name, usually the collapsed type name (`Vec<Point>`).
    name: Cow<'static, str>,
    type_name: &'static str,
    type_id: TypeId,
    kind: TypeKind,
    attributes: Attributes,
    /// Members declared by this type, bases excluded.
    members: Box<[MemberDescriptor]>,
    base_types: OnceCell<Box<[&'static TypeDescriptor]>>,
    member_types: OnceCell<MemberList>,
}

impl TypeDescriptor {
    /// Describes a type with reflected members.
    pub fn new<T: Reflect>(
        name: impl Into<Cow<'static, str>>,
        attributes: Attributes,
        members: Vec<MemberDescriptor>,
    ) -> Self {
        let descriptor = Self {
            members: members.into_boxed_slice(),
            attributes,
            ..Self::with_kind::<T>(TypeKind::Struct)
        }
        .with_name(name);

        glog::trace!(
            "built descriptor of `{}` with {} members and {} attributes",
            descriptor.name,
            descriptor.members.len(),
            descriptor.attributes.len()
        );
        descriptor
    }

    /// Describes a value type without members.
    pub fn value<T: Reflect>() -> Self {
        Self::with_kind::<T>(TypeKind::Value)
    }

    pub fn list<T: Reflect>() -> Self {
        Self::with_kind::<T>(TypeKind::List)
    }

    pub fn tuple<T: Reflect>() -> Self {
        Self::with_kind::<T>(TypeKind::Tuple)
    }

    pub fn pointer<T: Reflect>() -> Self {
        Self::with_kind::<T>(TypeKind::Pointer)
    }

    pub fn with_kind<T: Reflect>(kind: TypeKind) -> Self {
        let type_name = std::any::type_name::<T>();
        Self {
            name: Cow::Owned(descriptor_cell::get_type_collapsed_name(type_name)),
            type_name,
            type_id: TypeId::of::<T>(),
            kind,
            attributes: Attributes::empty(),
            members: Box::default(),
            base_types: OnceCell::new(),
            member_types: OnceCell::new(),
        }
    }

    /// Replaces the display name.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full type name as returned by [`std::any::type_name`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The name with generic arguments and leading paths stripped: `Vec` for `Vec<Point>`.
    pub fn get_simple_name(&self) -> &str {
        descriptor_cell::get_simple_name(&self.name)
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Members declared by this type, in declaration order.
    #[inline]
    pub fn declared_members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// A member declared by this type or inherited from a base.
    pub fn member(&'static self, name: &str) -> Option<&'static MemberDescriptor> {
        self.member_types().iter().find(|member| member.name() == name)
    }

    #[inline]
    pub fn is<T: std::any::Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("members", &self.members.iter().map(MemberDescriptor::name).collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeDescriptor {}
