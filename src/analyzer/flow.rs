use std::fmt::Display;

use crate::parser::ast::{has_type_prefix, TypeName};

/// Function-level flow classification. A function's mode comes from its
/// return type; every parameter or local with a `maybe`/`result` type
/// contributes its own mode, and all contributions must agree. `None` is
/// absorbed by either of the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowMode {
    #[default]
    None,
    Maybe,
    Result,
}

impl FlowMode {
    pub fn of(type_name: &TypeName) -> FlowMode {
        Self::of_name(&type_name.name)
    }

    pub fn of_name(name: &str) -> FlowMode {
        if has_type_prefix(name, "result") {
            FlowMode::Result
        } else if has_type_prefix(name, "maybe") {
            FlowMode::Maybe
        } else {
            FlowMode::None
        }
    }

    /// Combine two contributions; `None` if they conflict.
    pub fn unify(self, other: FlowMode) -> Option<FlowMode> {
        match (self, other) {
            (FlowMode::None, other) => Some(other),
            (mode, FlowMode::None) => Some(mode),
            (mode, other) if mode == other => Some(mode),
            _ => None,
        }
    }
}

impl Display for FlowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlowMode::None => "plain",
            FlowMode::Maybe => "maybe",
            FlowMode::Result => "result",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lexer::Span;

    #[test]
    fn test_mode_from_type_prefix() {
        assert_eq!(
            FlowMode::of(&TypeName::new("result[int,int]", Span::default())),
            FlowMode::Result
        );
        assert_eq!(
            FlowMode::of(&TypeName::new("maybe[User]", Span::default())),
            FlowMode::Maybe
        );
        assert_eq!(
            FlowMode::of(&TypeName::new("int", Span::default())),
            FlowMode::None
        );
    }

    #[test]
    fn test_none_is_absorbed() {
        assert_eq!(
            FlowMode::None.unify(FlowMode::Result),
            Some(FlowMode::Result)
        );
        assert_eq!(
            FlowMode::Maybe.unify(FlowMode::None),
            Some(FlowMode::Maybe)
        );
    }

    #[test]
    fn test_equal_modes_unify() {
        assert_eq!(
            FlowMode::Result.unify(FlowMode::Result),
            Some(FlowMode::Result)
        );
    }

    #[test]
    fn test_mixing_maybe_and_result_conflicts() {
        assert_eq!(FlowMode::Maybe.unify(FlowMode::Result), None);
        assert_eq!(FlowMode::Result.unify(FlowMode::Maybe), None);
    }
}
