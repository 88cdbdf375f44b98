use std::fmt;

use crate::{Reflect, descriptor::{BaseDescriptor, BaseList}};

use super::{usage, Attribute};

/// Marks a field or an accessor function as a property.
///
/// Properties take part in accessor pairing: a getter and a setter with the same
/// display name (see [`crate::property::get_display_name`]) form one property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Property {
    /// Replaces the name normalized from the member name.
    pub friendly_name: Option<&'static str>,
}

impl Property {
    pub const fn new() -> Self {
        Self { friendly_name: None }
    }

    pub const fn named(friendly_name: &'static str) -> Self {
        Self { friendly_name: Some(friendly_name) }
    }
}

impl Attribute for Property {
    type Usage = usage::Member;
    const KIND: &'static str = "property";
}

type ErasedPrinter = dyn Fn(&mut dyn fmt::Write, &dyn Reflect) -> fmt::Result + Send + Sync;

/// Replaces the default debug printing of a value.
///
/// On a type, the printer receives values of that type. On a member, it receives
/// the value read from the member.
pub struct Debug {
    value_type: &'static str,
    printer: Box<ErasedPrinter>,
}

impl Debug {
    pub fn new<V, F>(printer: F) -> Self
    where
        V: Reflect,
        F: Fn(&mut dyn fmt::Write, &V) -> fmt::Result + Send + Sync + 'static,
    {
        Self {
            value_type: std::any::type_name::<V>(),
            printer: Box::new(move |out: &mut dyn fmt::Write, value: &dyn Reflect| {
                match value.downcast_ref::<V>() {
                    Some(value) => printer(out, value),
                    None => Err(fmt::Error),
                }
            }),
        }
    }

    /// Type name of the values the printer accepts.
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    /// Prints `value`, or returns `None` if the printer does not accept its type.
    pub fn write(&self, out: &mut dyn fmt::Write, value: &dyn Reflect) -> Option<fmt::Result> {
        (value.type_name() == self.value_type).then(|| (self.printer)(out, value))
    }
}

impl fmt::Debug for Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debug")
            .field("value_type", &self.value_type)
            .finish()
    }
}

impl Attribute for Debug {
    type Usage = usage::Any;
    const KIND: &'static str = "debug";
}

/// Declares the direct base types of a reflected type.
///
/// Every listed base must be reachable from the derived type through
/// [`Inherits`](crate::Inherits), otherwise the list is rejected at compile time:
///
/// ```compile_fail
/// use mirror_reflect::{attr::Bases, type_list, reflect};
///
/// pub struct Base;
/// pub struct Unrelated;
///
/// reflect! { type(Base) }
/// reflect! { type(Unrelated) }
///
/// fn main() {
///     let _ = Bases::of::<Unrelated, type_list![Base]>();
/// }
/// ```
pub struct Bases {
    bases: Box<[BaseDescriptor]>,
}

impl Bases {
    pub fn of<D: Reflect, L: BaseList<D>>() -> Self {
        let mut bases = Vec::with_capacity(L::SIZE);
        L::collect_bases(&mut bases);
        Self {
            bases: bases.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BaseDescriptor> {
        self.bases.iter()
    }

    pub fn as_slice(&self) -> &[BaseDescriptor] {
        &self.bases
    }
}

impl fmt::Debug for Bases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bases.iter().map(|base| base.type_name()))
            .finish()
    }
}

impl Attribute for Bases {
    type Usage = usage::Type;
    const KIND: &'static str = "bases";
}
