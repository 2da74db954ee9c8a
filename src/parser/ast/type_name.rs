use std::fmt::Display;

use crate::lexer::Span;

/// An opaque type spelling, assembled by the parser from the literal token
/// sequence (e.g. `result[string,FileError]`). Later stages interpret the
/// string by prefix match and never re-parse it into a type tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub name: String,
    pub position: Span,
}

/// Whether `name` is exactly `prefix` or a bracketed application of it.
/// A plain `starts_with` would confuse a user type `resultat` with
/// `result[..]`.
pub fn has_type_prefix(name: &str, prefix: &str) -> bool {
    name == prefix || name.starts_with(&format!("{prefix}["))
}

impl TypeName {
    pub fn new(name: impl ToString, position: Span) -> Self {
        TypeName {
            name: name.to_string(),
            position,
        }
    }

    pub fn is_result(&self) -> bool {
        has_type_prefix(&self.name, "result")
    }

    pub fn is_maybe(&self) -> bool {
        has_type_prefix(&self.name, "maybe")
    }

    pub fn is_future(&self) -> bool {
        has_type_prefix(&self.name, "future")
    }

    pub fn is_chan(&self) -> bool {
        has_type_prefix(&self.name, "chan")
    }

    pub fn is_null(&self) -> bool {
        self.name == "null"
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
