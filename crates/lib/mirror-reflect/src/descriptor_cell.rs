use std::{collections::HashMap, any::{TypeId, Any}};

use once_cell::race::OnceBox;
use parking_lot::RwLock;

use crate::TypeDescriptor;

/// Storage for the descriptor of a non-generic reflected type.
///
/// The macros place one of these in a `static` inside `Typed::type_descriptor`,
/// which gives the descriptor a `'static` lifetime and builds it on first use only.
pub struct NonGenericDescriptorCell(OnceBox<TypeDescriptor>);

impl NonGenericDescriptorCell {
    pub const fn new() -> Self {
        Self(OnceBox::new())
    }

    pub fn get_or_set<F>(&self, func: F) -> &TypeDescriptor
    where
        F: FnOnce() -> TypeDescriptor,
    {
        self.0.get_or_init(|| Box::new(func()))
    }
}

impl Default for NonGenericDescriptorCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for the descriptors of every instantiation of a generic reflected type.
///
/// A `static` inside a generic function is shared by all of its instantiations,
/// so descriptors are keyed by the [`TypeId`] of the instantiated type.
pub struct GenericDescriptorCell(OnceBox<RwLock<HashMap<TypeId, &'static TypeDescriptor>>>);

impl GenericDescriptorCell {
    pub const fn new() -> Self {
        Self(OnceBox::new())
    }

    pub fn get_or_insert<T, F>(&self, func: F) -> &'static TypeDescriptor
    where
        F: FnOnce() -> TypeDescriptor,
        T: Any + ?Sized
    {
        let type_id = TypeId::of::<T>();
        let map = self.0.get_or_init(Box::default);
        // already cached for this generic type, return it.
        if let Some(descriptor) = map.read().get(&type_id).copied() {
            return descriptor;
        }

        // Built outside of the lock: building may need descriptors of other
        // instantiations of the same generic type (e.g. `Vec<Vec<u32>>`).
        let built: &'static TypeDescriptor = Box::leak(Box::new(func()));
        *map.write().entry(type_id).or_insert(built)
    }
}

impl Default for GenericDescriptorCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The display name of a reflected type: its [`std::any::type_name`] with every
/// path collapsed to its last segment, `alloc::vec::Vec<demo::Point>` is shown
/// as `Vec<Point>`.
pub fn get_type_collapsed_name(full_name: &str) -> String {
    let mut collapsed = String::with_capacity(full_name.len());
    let mut rest = full_name;

    // paths sit between delimiters, the delimiters are kept as is
    while let Some(at) = rest.find(is_delimiter) {
        let (path, tail) = rest.split_at(at);
        let delimiter_len = tail.chars().next().map_or(0, char::len_utf8);

        collapsed += collapse_type_name(path);
        collapsed += &tail[..delimiter_len];
        rest = &tail[delimiter_len..];
    }
    collapsed += collapse_type_name(rest);
    collapsed
}

/// Strips the module path and the generic arguments of a type name.
///
/// `my_crate::Wrapper<my_crate::Point>` and `Wrapper<Point>` both become `Wrapper`.
/// This is also the name of the generic "family" a type belongs to.
pub fn get_simple_name(name: &str) -> &str {
    let without_args = match name.find('<') {
        Some(index) => &name[..index],
        None => name,
    };
    collapse_type_name(without_args.trim_end())
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '<' | '>' | '(' | ')' | '[' | ']' | ',' | ';' | '&' | '*')
}

#[inline(always)]
fn collapse_type_name(string: &str) -> &str {
    string.rsplit("::").next().unwrap_or(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_names() {
        assert_eq!(get_type_collapsed_name("alloc::vec::Vec<core::option::Option<u32>>"), "Vec<Option<u32>>");
        assert_eq!(get_type_collapsed_name("(a::A, b::B)"), "(A, B)");
        assert_eq!(get_type_collapsed_name("[a::A; 3]"), "[A; 3]");
        assert_eq!(get_type_collapsed_name("&a::A"), "&A");
    }

    #[test]
    fn simple_names() {
        assert_eq!(get_simple_name("my_crate::Wrapper<my_crate::Point>"), "Wrapper");
        assert_eq!(get_simple_name("Wrapper<Point>"), "Wrapper");
        assert_eq!(get_simple_name("Point"), "Point");
        assert_eq!(get_simple_name("alloc::string::String"), "String");
    }
}
