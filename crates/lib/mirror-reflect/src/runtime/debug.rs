use std::fmt::{self, Write};

use crate::{attr, container::List, property, MemberDescriptor, Reflect, ReflectRef};

/// Nesting level past which values are printed compactly.
const MAX_DEPTH: i32 = 8;

/// Depth `-1` means compact: no newlines and no indentation.
fn next_depth(depth: i32) -> i32 {
    if depth == -1 || depth > MAX_DEPTH {
        -1
    } else {
        depth + 1
    }
}

fn indent(out: &mut dyn Write, depth: i32) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("    ")?;
    }
    Ok(())
}

/// Writes the debug representation of `value`.
///
/// A `debug` attribute on the type of the value wins, then the native
/// formatting of the type. Types with members print as
/// `Name { member = value, ... }`, lists and sets as `[a, b]`, tuples as `(a, b)`
/// and pointers as `&pointee` or `nullptr`, an expired weak pointer included.
/// The compact form holds on one line, the detailed form puts every member and
/// list element on its own indented line.
pub fn debug(out: &mut dyn Write, value: &dyn Reflect, compact: bool) -> fmt::Result {
    debug_impl(out, value, if compact { -1 } else { 0 })
}

/// [`debug`] into a new string.
pub fn debug_str(value: &dyn Reflect, compact: bool) -> String {
    let mut out = String::new();
    // writing into a `String` does not fail, only a printer can
    if debug(&mut out, value, compact).is_err() {
        glog::warn!("a debug printer of `{}` failed", value.type_name());
    }
    out
}

/// Writes the compact representation of every value as a tuple: `(a, b)`.
pub fn debug_all(out: &mut dyn Write, values: &[&dyn Reflect]) -> fmt::Result {
    out.write_char('(')?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.write_str(", ")?;
        }
        debug_impl(out, *value, -1)?;
    }
    out.write_char(')')
}

/// [`debug_all`] into a new string.
pub fn debug_all_str(values: &[&dyn Reflect]) -> String {
    let mut out = String::new();
    if debug_all(&mut out, values).is_err() {
        glog::warn!("a debug printer failed while printing {} values", values.len());
    }
    out
}

fn debug_impl(out: &mut dyn Write, value: &dyn Reflect, depth: i32) -> fmt::Result {
    match value.reflect_ref() {
        ReflectRef::Pointer(pointee) => return debug_pointee(out, pointee),
        ReflectRef::Weak(weak) => return debug_pointee(out, weak.upgrade().as_deref()),
        _ => {}
    }

    if let Some(printer) = value.get_type_descriptor().attributes().get::<attr::Debug>() {
        if let Some(result) = printer.write(out, value) {
            return result;
        }
    }

    if let Some(result) = value.display(out) {
        return result;
    }

    match value.reflect_ref() {
        ReflectRef::Struct(value) => debug_detailed(out, value, depth),
        ReflectRef::List(list) => debug_list(out, list, depth),
        ReflectRef::Tuple(tuple) => debug_tuple(out, tuple, depth),
        _ => out.write_str("(not printable)"),
    }
}

fn debug_pointee(out: &mut dyn Write, pointee: Option<&dyn Reflect>) -> fmt::Result {
    match pointee {
        Some(pointee) => {
            out.write_char('&')?;
            debug_impl(out, pointee, -1)
        }
        None => out.write_str("nullptr"),
    }
}

fn debug_member(out: &mut dyn Write, member: &MemberDescriptor, target: &dyn Reflect, depth: i32) -> fmt::Result {
    let value = match member.read(target) {
        Ok(value) => value,
        Err(error) => {
            glog::debug!("cannot read `{}`: {}", property::get_debug_name(member), error);
            return out.write_str("(not printable)");
        }
    };

    if let Some(printer) = member.get_attribute::<attr::Debug>() {
        if let Some(result) = printer.write(out, &*value) {
            return result;
        }
    }
    debug_impl(out, &*value, depth)
}

fn debug_detailed(out: &mut dyn Write, value: &dyn Reflect, depth: i32) -> fmt::Result {
    let descriptor = value.get_type_descriptor();
    let compact = depth == -1;

    write!(out, "{} {{ ", descriptor.name())?;
    if !compact {
        out.write_char('\n')?;
    }

    let readable = descriptor.member_types().filter(property::is_readable);
    for (index, member) in readable.iter().enumerate() {
        let new_depth = next_depth(depth);

        indent(out, new_depth)?;
        write!(out, "{} = ", property::get_display_name(member))?;
        debug_member(out, member, value, new_depth)?;

        if !compact || index + 1 != readable.len() {
            out.write_str(", ")?;
        }
        if !compact {
            indent(out, depth)?;
            out.write_char('\n')?;
        }
    }

    if compact {
        out.write_char(' ')?;
    }
    indent(out, depth)?;
    out.write_char('}')
}

fn debug_list(out: &mut dyn Write, list: &dyn List, depth: i32) -> fmt::Result {
    let compact = depth == -1;
    out.write_char('[')?;

    let len = list.len();
    for (index, element) in list.iter().enumerate() {
        if !compact {
            out.write_char('\n')?;
        }
        indent(out, next_depth(depth))?;
        debug_impl(out, element, next_depth(depth))?;

        if index + 1 != len {
            out.write_str(", ")?;
        } else if !compact {
            out.write_char('\n')?;
        }
    }

    indent(out, depth)?;
    out.write_char(']')
}

/// Tuples stay on one line, their elements at the depth of the tuple.
fn debug_tuple(out: &mut dyn Write, tuple: &dyn List, depth: i32) -> fmt::Result {
    out.write_char('(')?;
    for (index, element) in tuple.iter().enumerate() {
        if index > 0 {
            out.write_str(", ")?;
        }
        debug_impl(out, element, depth)?;
    }
    out.write_char(')')
}
