use std::{error::Error, fmt::Display};

use crate::lexer::Span;

use super::flow::FlowMode;

/// All rule violations the analyzer can report. Each variant wraps a
/// dedicated error struct plus the offending source location; the first
/// violation aborts the analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticError {
    RedeclaredVariable(RedeclaredVariable, Span),
    RedeclaredFunction(RedeclaredFunction, Span),
    UndeclaredIdentifier(UndeclaredIdentifier, Span),
    AssignmentToUndeclared(AssignmentToUndeclared, Span),
    ImmutableReassign(ImmutableReassign, Span),
    ReturnOutsideFunction(ReturnOutsideFunction, Span),
    FlowModeMismatch(FlowModeMismatch, Span),
    UnusedResult(UnusedResult, Span),
    UnsupportedType(UnsupportedType, Span),
    UnsupportedIdentifier(UnsupportedIdentifier, Span),
    DuplicateStructField(DuplicateStructField, Span),
    InvalidFieldType(InvalidFieldType, Span),
    InvalidMainSignature(InvalidMainSignature, Span),
    BuiltinArity(BuiltinArity, Span),
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::RedeclaredVariable(_, span) => *span,
            SemanticError::RedeclaredFunction(_, span) => *span,
            SemanticError::UndeclaredIdentifier(_, span) => *span,
            SemanticError::AssignmentToUndeclared(_, span) => *span,
            SemanticError::ImmutableReassign(_, span) => *span,
            SemanticError::ReturnOutsideFunction(_, span) => *span,
            SemanticError::FlowModeMismatch(_, span) => *span,
            SemanticError::UnusedResult(_, span) => *span,
            SemanticError::UnsupportedType(_, span) => *span,
            SemanticError::UnsupportedIdentifier(_, span) => *span,
            SemanticError::DuplicateStructField(_, span) => *span,
            SemanticError::InvalidFieldType(_, span) => *span,
            SemanticError::InvalidMainSignature(_, span) => *span,
            SemanticError::BuiltinArity(_, span) => *span,
        }
    }

    fn err(&self) -> Box<dyn Error> {
        match self {
            SemanticError::RedeclaredVariable(e, _) => Box::new(e.clone()),
            SemanticError::RedeclaredFunction(e, _) => Box::new(e.clone()),
            SemanticError::UndeclaredIdentifier(e, _) => Box::new(e.clone()),
            SemanticError::AssignmentToUndeclared(e, _) => Box::new(e.clone()),
            SemanticError::ImmutableReassign(e, _) => Box::new(e.clone()),
            SemanticError::ReturnOutsideFunction(e, _) => Box::new(e.clone()),
            SemanticError::FlowModeMismatch(e, _) => Box::new(e.clone()),
            SemanticError::UnusedResult(e, _) => Box::new(e.clone()),
            SemanticError::UnsupportedType(e, _) => Box::new(e.clone()),
            SemanticError::UnsupportedIdentifier(e, _) => Box::new(e.clone()),
            SemanticError::DuplicateStructField(e, _) => Box::new(e.clone()),
            SemanticError::InvalidFieldType(e, _) => Box::new(e.clone()),
            SemanticError::InvalidMainSignature(e, _) => Box::new(e.clone()),
            SemanticError::BuiltinArity(e, _) => Box::new(e.clone()),
        }
    }
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = self.span();
        write!(
            f,
            "[line {}:{}] Semantic error: {}",
            span.line,
            span.col,
            self.err()
        )
    }
}

impl Error for SemanticError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeclaredVariable {
    pub name: String,
}

impl Display for RedeclaredVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "variable '{}' is already declared in this scope",
            self.name
        )
    }
}

impl Error for RedeclaredVariable {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeclaredFunction {
    pub name: String,
}

impl Display for RedeclaredFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "function '{}' is already declared", self.name)
    }
}

impl Error for RedeclaredFunction {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndeclaredIdentifier {
    pub name: String,
}

impl Display for UndeclaredIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "undeclared identifier '{}'", self.name)
    }
}

impl Error for UndeclaredIdentifier {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentToUndeclared {
    pub name: String,
}

impl Display for AssignmentToUndeclared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot assign to undeclared variable '{}'", self.name)
    }
}

impl Error for AssignmentToUndeclared {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImmutableReassign {
    pub name: String,
}

impl Display for ImmutableReassign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot assign to immutable variable '{}'", self.name)
    }
}

impl Error for ImmutableReassign {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnOutsideFunction;

impl Display for ReturnOutsideFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("'return' is only allowed inside a function")
    }
}

impl Error for ReturnOutsideFunction {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowModeMismatch {
    pub existing: FlowMode,
    pub incoming: FlowMode,
}

impl Display for FlowModeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot mix {} and {} flows within one function",
            self.existing, self.incoming
        )
    }
}

impl Error for FlowModeMismatch {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnusedResult {
    pub name: String,
}

impl Display for UnusedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("result-returning function must not be ignored")
    }
}

impl Error for UnusedResult {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedType {
    pub type_name: String,
}

impl Display for UnsupportedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "type '{}' is not supported by the current backend",
            self.type_name
        )
    }
}

impl Error for UnsupportedType {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedIdentifier {
    pub name: String,
}

impl Display for UnsupportedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not supported by the current backend",
            self.name
        )
    }
}

impl Error for UnsupportedIdentifier {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateStructField {
    pub struct_name: String,
    pub field: String,
}

impl Display for DuplicateStructField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duplicate field '{}' in struct '{}'",
            self.field, self.struct_name
        )
    }
}

impl Error for DuplicateStructField {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidFieldType {
    pub struct_name: String,
    pub field: String,
    pub type_name: String,
}

impl Display for InvalidFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "field '{}' of struct '{}' must have a primitive type, found '{}'",
            self.field, self.struct_name, self.type_name
        )
    }
}

impl Error for InvalidFieldType {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidMainSignature;

impl Display for InvalidMainSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("'main' may not return a result type")
    }
}

impl Error for InvalidMainSignature {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinArity {
    pub name: String,
    pub expected: usize,
    pub found: usize,
}

impl Display for BuiltinArity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "built-in '{}' expects exactly {} argument(s), found {}",
            self.name, self.expected, self.found
        )
    }
}

impl Error for BuiltinArity {}
