use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id {
    pub name: String,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expression;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_identifier() {
        let Expression::Id(id) = parse_expression("foo").unwrap() else {
            panic!("expected an identifier");
        };

        assert_eq!(id.name, "foo");
    }
}
