//! Property heuristics over member descriptors.
//!
//! A property is a field or accessor function carrying the [`Property`]
//! attribute. A getter and a setter whose display names agree form one
//! property, e.g. `get_width` and `set_width` both display as `width`.

use std::borrow::Cow;

use mirror_core::naming::normalize_accessor_name;

use crate::{attr::Property, AccessorRole, MemberDescriptor, ReceiverKind, ReflectError};

#[inline]
pub fn is_property(member: &MemberDescriptor) -> bool {
    member.has_attribute::<Property>()
}

#[inline]
pub fn get_property(member: &MemberDescriptor) -> Option<&Property> {
    member.get_attribute::<Property>()
}

/// Fields are always readable. Functions are readable when they are properties
/// with an overload taking no argument besides a shared receiver and returning a value.
pub fn is_readable(member: &MemberDescriptor) -> bool {
    match member {
        MemberDescriptor::Field(_) => true,
        MemberDescriptor::Function(_) if !is_property(member) => false,
        MemberDescriptor::Function(function) => function.overloads().iter().any(|candidate| {
            matches!(candidate.receiver_kind(), ReceiverKind::Ref | ReceiverKind::Static)
                && candidate.arity() == 0
                && !candidate.return_info().is_unit()
        }),
    }
}

/// Writable fields, and property functions with an overload taking exactly
/// one argument on an instance.
pub fn is_writable(member: &MemberDescriptor) -> bool {
    match member {
        MemberDescriptor::Field(field) => field.is_writable(),
        MemberDescriptor::Function(_) if !is_property(member) => false,
        MemberDescriptor::Function(function) => function
            .overloads()
            .iter()
            .any(|candidate| candidate.receiver_kind() != ReceiverKind::Static && candidate.arity() == 1),
    }
}

/// The friendly name of the property, else the accessor name with its
/// `get`/`set` prefix normalized away, else the member name.
pub fn get_display_name(member: &MemberDescriptor) -> Cow<'static, str> {
    match get_property(member) {
        Some(Property { friendly_name: Some(name) }) => Cow::Borrowed(*name),
        Some(_) => normalize_accessor_name(member.name(), is_readable(member), is_writable(member)),
        None => Cow::Borrowed(member.name()),
    }
}

/// `Type::member`, naming the type which declared the member.
pub fn get_debug_name(member: &MemberDescriptor) -> String {
    format!("{}::{}", member.declaring_type().name(), member.name())
}

pub fn has_reader(member: &'static MemberDescriptor) -> bool {
    get_reader(member).is_ok()
}

pub fn has_writer(member: &'static MemberDescriptor) -> bool {
    get_writer(member).is_ok()
}

/// The member reading the property `member` belongs to.
///
/// A readable member is its own reader, otherwise the reader is the readable
/// property of the declaring type with the same display name.
pub fn get_reader(member: &'static MemberDescriptor) -> Result<&'static MemberDescriptor, ReflectError> {
    if is_readable(member) {
        return Ok(member);
    }
    find_counterpart(member, AccessorRole::Reader, is_readable)
}

/// The member assigning the property `member` belongs to.
pub fn get_writer(member: &'static MemberDescriptor) -> Result<&'static MemberDescriptor, ReflectError> {
    if is_writable(member) {
        return Ok(member);
    }
    find_counterpart(member, AccessorRole::Writer, is_writable)
}

fn find_counterpart(
    member: &'static MemberDescriptor,
    role: AccessorRole,
    fulfills: fn(&MemberDescriptor) -> bool,
) -> Result<&'static MemberDescriptor, ReflectError> {
    if !is_property(member) {
        return Err(ReflectError::NotAProperty(get_debug_name(member)));
    }

    let display_name = get_display_name(member);
    let candidates = member.declaring_type().member_types().filter(|candidate| {
        candidate != member && is_property(candidate) && fulfills(candidate) && get_display_name(candidate) == display_name
    });

    match candidates.as_slice() {
        [counterpart] => Ok(*counterpart),
        [] => Err(ReflectError::NoAccessor {
            role,
            display_name: display_name.into_owned(),
        }),
        several => Err(ReflectError::AmbiguousAccessor {
            role,
            display_name: display_name.into_owned(),
            count: several.len(),
        }),
    }
}
