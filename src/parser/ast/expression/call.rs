use crate::lexer::Span;

use super::Expression;

/// A call expression with its arguments in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub callee: Expression,
    pub arguments: Vec<Expression>,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Expression, Id};
    use crate::parser::test_helpers::*;

    #[test]
    fn test_call_without_arguments() {
        let Expression::Call(call) = parse_expression("f()").unwrap() else {
            panic!("expected a call");
        };

        assert!(matches!(call.callee, Expression::Id(Id { ref name, .. }) if name == "f"));
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_call_arguments_keep_order() {
        let Expression::Call(call) = parse_expression("f(1, x, \"s\")").unwrap() else {
            panic!("expected a call");
        };

        assert_eq!(call.arguments.len(), 3);
        assert!(matches!(call.arguments[0], Expression::Num(_)));
        assert!(matches!(call.arguments[1], Expression::Id(_)));
        assert!(matches!(call.arguments[2], Expression::StringLiteral(_)));
    }

    #[test]
    fn test_chained_calls() {
        let Expression::Call(outer) = parse_expression("f(1)(2)").unwrap() else {
            panic!("expected a call");
        };

        assert!(matches!(outer.callee, Expression::Call(_)));
    }
}
