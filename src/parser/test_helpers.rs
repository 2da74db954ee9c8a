//! Helpers for parsing isolated constructs in tests. Statements and
//! expressions only exist inside a function body, so the helpers wrap the
//! snippet in a minimal function and pull the interesting node back out.

use crate::lexer::Lexer;
use crate::parser::ast::{
    Declaration, Expression, Function, Program, Statement, StructDeclaration, TypeName,
};
use crate::parser::{ParseError, Parser};

pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).lex().expect("lexing should succeed");
    Parser::new(tokens).parse_program()
}

pub fn parse_function(source: &str) -> Result<Function, ParseError> {
    let program = parse_source(source)?;
    match program.declarations.into_iter().next() {
        Some(Declaration::Function(function)) => Ok(function),
        other => panic!("expected a function declaration, got {other:?}"),
    }
}

pub fn parse_struct(source: &str) -> Result<StructDeclaration, ParseError> {
    let program = parse_source(source)?;
    match program.declarations.into_iter().next() {
        Some(Declaration::Struct(declaration)) => Ok(declaration),
        other => panic!("expected a struct declaration, got {other:?}"),
    }
}

pub fn parse_statement(source: &str) -> Result<Statement, ParseError> {
    let mut wrapped = String::from("main: () -> null = ()\n");
    for line in source.lines() {
        wrapped.push_str("    ");
        wrapped.push_str(line);
        wrapped.push('\n');
    }

    let function = parse_function(&wrapped)?;
    Ok(function
        .body
        .statements
        .into_iter()
        .next()
        .expect("expected at least one statement"))
}

pub fn parse_expression(source: &str) -> Result<Expression, ParseError> {
    match parse_statement(source)? {
        Statement::Expression(expression) => Ok(expression),
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[allow(dead_code)]
pub fn parse_type_name(source: &str) -> Result<TypeName, ParseError> {
    match parse_statement(&format!("x: {source} = 0"))? {
        Statement::VariableDeclaration(declaration) => Ok(declaration.type_name),
        other => panic!("expected a variable declaration, got {other:?}"),
    }
}
