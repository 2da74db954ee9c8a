use crate::lexer::Span;

use super::Statement;

/// An indented run of statements, delimited by INDENT/DEDENT in the token
/// stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: Span,
}
