//! Typed attributes attached to reflected types and members.
//!
//! An attribute is any `'static` value whose type implements [`Attribute`]. The
//! attribute type names the declarations it may decorate through its `Usage`
//! and the family it belongs to through its `KIND`. The usage is checked when
//! an attribute list is built with [`make_attributes`]:
//!
//! ```compile_fail
//! use mirror_reflect::{attr::{self, usage, Property}, value_list};
//!
//! // a property decorates members, never types
//! let _ = attr::make_attributes::<usage::Type, _>(value_list![Property::new()]);
//! ```
//!
//! A declaration carries at most one attribute of each type. The declaration
//! macros reject a repeated attribute when they expand:
//!
//! ```compile_fail
//! use mirror_reflect::{impl_attribute, reflect};
//!
//! pub struct Serializable;
//! impl_attribute!(Serializable: Member);
//!
//! pub struct Point { x: f32 }
//!
//! reflect! {
//!     type(Point),
//!     field(x, Serializable, Serializable),
//! }
//!
//! fn main() {}
//! ```
//!
//! and [`make_attributes`] asserts it for lists built by hand.

mod builtin;

use std::fmt;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::type_list::{Cons, Nil, TypeList};

pub use builtin::*;

/// Declaration sites and the usage tags that cover them.
pub mod usage {
    /// Decorates type declarations.
    pub struct Type;
    /// Decorates field declarations.
    pub struct Field;
    /// Decorates function declarations.
    pub struct Function;
    /// Decorates fields and functions.
    pub struct Member;
    /// Decorates anything.
    pub struct Any;

    pub trait Usage: 'static {}

    impl Usage for Type {}
    impl Usage for Field {}
    impl Usage for Function {}
    impl Usage for Member {}
    impl Usage for Any {}

    /// Implemented when attributes of usage `Self` may decorate a `Site` declaration.
    #[diagnostic::on_unimplemented(
        message = "an attribute of usage `{Self}` cannot decorate a `{Site}` declaration",
        label = "attribute not allowed here"
    )]
    pub trait Covers<Site> {}

    impl Covers<Type> for Type {}
    impl Covers<Type> for Any {}

    impl Covers<Field> for Field {}
    impl Covers<Field> for Member {}
    impl Covers<Field> for Any {}

    impl Covers<Function> for Function {}
    impl Covers<Function> for Member {}
    impl Covers<Function> for Any {}
}

/// A value that can decorate reflected declarations.
pub trait Attribute: Send + Sync + 'static {
    /// Which declarations this attribute may decorate, one of the [`usage`] tags.
    type Usage: usage::Usage;
    /// Name of the attribute family, shared by every instantiation of a generic attribute.
    ///
    /// Only used for lookups by family, two attributes of one family but of
    /// different types may decorate the same declaration.
    const KIND: &'static str;
}

/// Object safe view of an [`Attribute`].
pub trait DynAttribute: DowncastSync {
    fn kind(&self) -> &'static str;
}

impl<A: Attribute> DynAttribute for A {
    #[inline]
    fn kind(&self) -> &'static str {
        A::KIND
    }
}

impl_downcast!(sync DynAttribute);

/// Declares a user attribute type.
///
/// The family defaults to the path of the type, so equally named attributes
/// of different modules stay apart.
///
/// ```
/// use mirror_reflect::impl_attribute;
///
/// pub struct Serializable;
/// impl_attribute!(Serializable: Member);
///
/// pub struct Range(pub f32, pub f32);
/// impl_attribute!(Range: Field, "range");
/// ```
#[macro_export]
macro_rules! impl_attribute {
    ($ty:ty : $usage:ident) => {
        $crate::impl_attribute!($ty: $usage, concat!(module_path!(), "::", stringify!($ty)));
    };
    ($ty:ty : $usage:ident, $kind:expr) => {
        impl $crate::attr::Attribute for $ty {
            type Usage = $crate::attr::usage::$usage;
            const KIND: &'static str = $kind;
        }
    };
}

/// The attributes of one declaration, type erased.
#[derive(Default)]
pub struct Attributes {
    entries: Box<[Box<dyn DynAttribute>]>,
}

impl Attributes {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DynAttribute> + '_ {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    /// The attribute of exact type `A`, if present.
    pub fn get<A: Attribute>(&self) -> Option<&A> {
        self.entries.iter().find_map(|entry| entry.downcast_ref::<A>())
    }

    pub fn has<A: Attribute>(&self) -> bool {
        self.get::<A>().is_some()
    }

    /// Position of the first attribute belonging to the family `kind`.
    ///
    /// `kind` may omit the leading module path of the family: `"Serializable"`
    /// finds `my_crate::Serializable`.
    pub fn index_of_instance(&self, kind: &str) -> Option<usize> {
        self.entries.iter().position(|entry| is_of_family(entry.kind(), kind))
    }

    /// The attribute belonging to the family `kind`, whatever its exact type.
    pub fn get_instance(&self, kind: &str) -> Option<&dyn DynAttribute> {
        self.index_of_instance(kind).map(|index| self.entries[index].as_ref())
    }

    pub fn contains_instance(&self, kind: &str) -> bool {
        self.index_of_instance(kind).is_some()
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.kind()))
            .finish()
    }
}

fn is_of_family(family: &str, kind: &str) -> bool {
    family
        .strip_suffix(kind)
        .map_or(false, |prefix| prefix.is_empty() || prefix.ends_with("::"))
}

/// A value list made of attributes.
pub trait AttributeList: TypeList {
    fn collect_into(self, out: &mut Vec<Box<dyn DynAttribute>>);
}

impl AttributeList for Nil {
    #[inline]
    fn collect_into(self, _out: &mut Vec<Box<dyn DynAttribute>>) {}
}

impl<H: Attribute, T: AttributeList> AttributeList for Cons<H, T> {
    fn collect_into(self, out: &mut Vec<Box<dyn DynAttribute>>) {
        out.push(Box::new(self.0));
        self.1.collect_into(out);
    }
}

/// Every attribute of the list may decorate a `Site` declaration.
pub trait ApplicableTo<Site> {}

impl<Site> ApplicableTo<Site> for Nil {}

impl<Site, H, T> ApplicableTo<Site> for Cons<H, T>
where
    H: Attribute,
    H::Usage: usage::Covers<Site>,
    T: ApplicableTo<Site>,
{}

/// Validates an attribute list for a `Site` declaration and stores it type erased.
///
/// # Panics
/// When the list holds two attributes of the same type.
pub fn make_attributes<Site, L>(list: L) -> Attributes
where
    L: AttributeList + ApplicableTo<Site>,
{
    assert!(
        L::unique_ids().len() == L::SIZE,
        "an attribute type may decorate a declaration at most once: {:?}",
        (0..L::SIZE).filter_map(L::type_name_at).collect::<Vec<_>>()
    );

    let mut entries = Vec::with_capacity(L::SIZE);
    list.collect_into(&mut entries);
    Attributes {
        entries: entries.into_boxed_slice(),
    }
}
