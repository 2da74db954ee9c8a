use crate::lexer::Span;

use crate::parser::ast::{Expression, TypeName};

/// A variable declaration `[mut] name: type = value`. The type annotation
/// and the initializer are both mandatory in the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub mutable: bool,
    pub name: String,
    pub type_name: TypeName,
    pub value: Expression,
    pub position: Span,
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Expression, Num, Statement};
    use crate::parser::test_helpers::*;

    #[test]
    fn test_simple_declaration() {
        let Statement::VariableDeclaration(declaration) = parse_statement("x: int = 42").unwrap()
        else {
            panic!("expected a variable declaration");
        };

        assert_eq!(declaration.name, "x");
        assert!(!declaration.mutable);
        assert_eq!(declaration.type_name.name, "int");
        assert!(matches!(
            declaration.value,
            Expression::Num(Num::Integer(ref value, _)) if value == "42"
        ));
    }

    #[test]
    fn test_mutable_declaration() {
        let Statement::VariableDeclaration(declaration) =
            parse_statement("mut counter: int = 0").unwrap()
        else {
            panic!("expected a variable declaration");
        };

        assert!(declaration.mutable);
        assert_eq!(declaration.name, "counter");
    }

    #[test]
    fn test_compound_type_declaration() {
        let Statement::VariableDeclaration(declaration) =
            parse_statement("r: result[string,FileError] = f()").unwrap()
        else {
            panic!("expected a variable declaration");
        };

        assert_eq!(declaration.type_name.name, "result[string,FileError]");
    }

    #[test]
    fn test_string_declaration() {
        let Statement::VariableDeclaration(declaration) =
            parse_statement("message: string = \"hello\"").unwrap()
        else {
            panic!("expected a variable declaration");
        };

        assert!(matches!(declaration.value, Expression::StringLiteral(_)));
    }

    #[test]
    fn test_declaration_without_initializer_is_rejected() {
        let result = parse_statement("x: int");

        assert!(result.is_err());
    }
}
