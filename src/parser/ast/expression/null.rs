use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Null {
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expression;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_null_literal() {
        assert!(matches!(
            parse_expression("null").unwrap(),
            Expression::Null(_)
        ));
    }
}
