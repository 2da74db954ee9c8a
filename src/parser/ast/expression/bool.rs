use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bool {
    pub value: bool,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expression;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_bool_literals() {
        let Expression::Bool(yes) = parse_expression("true").unwrap() else {
            panic!("expected a bool literal");
        };
        let Expression::Bool(no) = parse_expression("false").unwrap() else {
            panic!("expected a bool literal");
        };

        assert!(yes.value);
        assert!(!no.value);
    }
}
