use crate::lexer::Span;

use crate::parser::ast::Expression;

/// A `return` statement with an optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub value: Option<Expression>,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Statement;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_return_with_value() {
        let Statement::Return(return_statement) = parse_statement("return 42").unwrap() else {
            panic!("expected a return statement");
        };

        assert!(return_statement.value.is_some());
    }

    #[test]
    fn test_bare_return() {
        let Statement::Return(return_statement) = parse_statement("return").unwrap() else {
            panic!("expected a return statement");
        };

        assert!(return_statement.value.is_none());
    }
}
