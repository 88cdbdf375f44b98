//! Naming rules shared by the declaration macros and the reflection runtime.

use std::borrow::Cow;

const GETTER_PREFIXES: [&str; 2] = ["get", "Get"];
const SETTER_PREFIXES: [&str; 2] = ["set", "Set"];

/// Strips a `get`/`set` accessor prefix from `name` and normalizes the case
/// of what remains, so that a getter and a setter of the same property end up
/// with the same display name.
///
/// Lowercase prefixes accept snake case (`get_foo`) and camel case (`getFoo`),
/// capitalized prefixes only accept pascal case (`GetFoo`). Getter prefixes are
/// only considered when the accessor can read, setter prefixes when it can write.
///
/// ```
/// use mirror_core::naming::normalize_accessor_name;
///
/// assert_eq!(normalize_accessor_name("get_foo", true, false), "foo");
/// assert_eq!(normalize_accessor_name("getFoo", true, false), "foo");
/// assert_eq!(normalize_accessor_name("GetFoo", true, false), "Foo");
/// assert_eq!(normalize_accessor_name("get_Foo", true, false), "get_Foo");
/// assert_eq!(normalize_accessor_name("set_foo", true, false), "set_foo");
/// ```
pub fn normalize_accessor_name(name: &str, readable: bool, writable: bool) -> Cow<'_, str> {
    let bytes = name.as_bytes();
    if bytes.len() <= 3 {
        return Cow::Borrowed(name);
    }

    let continues_snake_or_camel = (bytes.len() > 4 && bytes[3] == b'_' && !bytes[4].is_ascii_uppercase())
        || bytes[3].is_ascii_uppercase();
    let continues_pascal = bytes[3].is_ascii_uppercase();

    let prefix_matches = |prefixes: &[&str; 2]| {
        let [lower, upper] = prefixes;
        (bytes.starts_with(upper.as_bytes()) && continues_pascal)
            || (bytes.starts_with(lower.as_bytes()) && continues_snake_or_camel)
    };

    let strip = (readable && prefix_matches(&GETTER_PREFIXES))
        || (writable && prefix_matches(&SETTER_PREFIXES));
    if !strip {
        return Cow::Borrowed(name);
    }

    let prefers_upper = bytes[0].is_ascii_uppercase();
    let rest = &name[3..];

    if let Some(stripped) = rest.strip_prefix('_') {
        return Cow::Borrowed(stripped);
    }

    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Cow::Borrowed(rest);
    };

    if !prefers_upper && first.is_ascii_uppercase() {
        Cow::Owned(first.to_ascii_lowercase().to_string() + chars.as_str())
    } else if prefers_upper && !first.is_ascii_uppercase() {
        Cow::Owned(first.to_ascii_uppercase().to_string() + chars.as_str())
    } else {
        Cow::Borrowed(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getter_fixtures() {
        let fixtures = [
            ("getfoo", "getfoo"),
            ("Getfoo", "Getfoo"),
            ("Get_foo", "Get_foo"),
            ("Get_Foo", "Get_Foo"),
            ("get_Foo", "get_Foo"),
            ("get_foo", "foo"),
            ("getFoo", "foo"),
            ("GetFoo", "Foo"),
        ];

        for (raw, expected) in fixtures {
            assert_eq!(normalize_accessor_name(raw, true, false), expected, "normalizing `{raw}`");
        }
    }

    #[test]
    fn setter_prefix_needs_writable() {
        assert_eq!(normalize_accessor_name("set_foo", false, true), "foo");
        assert_eq!(normalize_accessor_name("SetFoo", false, true), "Foo");
        assert_eq!(normalize_accessor_name("set_foo", true, false), "set_foo");
        assert_eq!(normalize_accessor_name("get_foo", false, true), "get_foo");
    }

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(normalize_accessor_name("get", true, true), "get");
        assert_eq!(normalize_accessor_name("x", true, true), "x");
        assert_eq!(normalize_accessor_name("get_", true, false), "get_");
    }
}
