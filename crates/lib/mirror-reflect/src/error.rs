use thiserror::Error;

/// Errors raised while accessing reflected members at runtime.
#[derive(Debug, Error)]
pub enum ReflectError {
    #[error("The member {type_name}::{member} is not compatible with the provided parameters or return type, is not reflected or does not exist!")]
    NoMatchingMember {
        type_name: String,
        member: String,
    },
    #[error("expected a value of type `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{member}` expects {expected} argument(s), {found} provided")]
    ArgumentCount {
        member: String,
        expected: usize,
        found: usize,
    },
    #[error("no overload of `{0}` accepts the provided receiver and arguments")]
    NoMatchingOverload(String),
    #[error("`{0}` is overloaded and cannot be used before it is resolved")]
    Unresolved(String),
    #[error("`{0}` is not writable")]
    NotWritable(String),
    #[error("`{0}` needs a mutable receiver")]
    NeedsMutableReceiver(String),
    #[error("`{0}` needs an instance to operate on")]
    MissingReceiver(String),
    #[error("value of type `{0}` cannot be cloned through reflection")]
    NotCloneable(&'static str),
    #[error("`{derived}` does not have `{base}` among its base types")]
    NotABase {
        derived: &'static str,
        base: &'static str,
    },
    #[error("`{0}` is neither a property nor a field")]
    NotAProperty(String),
    #[error("no {role} found for property `{display_name}`")]
    NoAccessor {
        role: AccessorRole,
        display_name: String,
    },
    #[error("property `{display_name}` has {count} candidate {role}s")]
    AmbiguousAccessor {
        role: AccessorRole,
        display_name: String,
        count: usize,
    },
    #[error("expected exactly one matching member, found {0}")]
    NotExactlyOne(usize),
}

/// Which half of a property pair is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorRole {
    Reader,
    Writer,
}

impl std::fmt::Display for AccessorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessorRole::Reader => f.write_str("reader"),
            AccessorRole::Writer => f.write_str("writer"),
        }
    }
}
