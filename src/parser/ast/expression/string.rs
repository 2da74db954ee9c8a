use crate::lexer::Span;

/// A string literal, stored without the surrounding quotes and without any
/// escape processing. Escaping (in the C direction) happens in codegen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expression;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_string_literal() {
        let Expression::StringLiteral(string) = parse_expression("\"Hello\"").unwrap() else {
            panic!("expected a string literal");
        };

        assert_eq!(string.value, "Hello");
    }
}
