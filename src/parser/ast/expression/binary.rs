use std::fmt::Display;

use crate::lexer::Span;

use super::Expression;

/// The binary operators, lowest to highest precedence level: equality,
/// comparison, additive, multiplicative. The parser builds left-associative
/// trees directly, so no rebalancing pass is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for BinaryOperator {
    /// The surface spelling, which is also the C spelling.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpression {
    pub left: Expression,
    pub operator: BinaryOperator,
    pub right: Expression,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{BinaryOperator, Expression};
    use crate::parser::test_helpers::*;

    fn as_binary(expression: Expression) -> (Expression, BinaryOperator, Expression) {
        let Expression::Binary(binary) = expression else {
            panic!("expected a binary expression, got {expression:?}");
        };
        (binary.left, binary.operator, binary.right)
    }

    #[test]
    fn test_factor_binds_tighter_than_term() {
        let (left, operator, _) = as_binary(parse_expression("1 + 2 * 3").unwrap());

        assert_eq!(operator, BinaryOperator::Add);
        assert!(matches!(left, Expression::Num(_)));
    }

    #[test]
    fn test_comparison_binds_tighter_than_equality() {
        let (_, operator, _) = as_binary(parse_expression("a < b == c < d").unwrap());

        assert_eq!(operator, BinaryOperator::Equal);
    }

    #[test]
    fn test_left_associativity() {
        let (left, operator, _) = as_binary(parse_expression("1 - 2 - 3").unwrap());

        assert_eq!(operator, BinaryOperator::Subtract);
        let (_, inner_operator, _) = as_binary(left);
        assert_eq!(inner_operator, BinaryOperator::Subtract);
    }

    #[test]
    fn test_parenthesized_grouping() {
        let (left, operator, _) = as_binary(parse_expression("(1 + 2) * 3").unwrap());

        assert_eq!(operator, BinaryOperator::Multiply);
        assert!(matches!(left, Expression::Binary(_)));
    }
}
