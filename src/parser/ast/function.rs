use crate::lexer::Span;

use super::{Block, TypeName};

/// A function declaration of the form
/// `name: (t1, t2) -> ret = (p1, p2)` followed by an indented body.
/// Parameter types and names are written as two separate parenthesized
/// lists and matched positionally by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub public: bool,
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: TypeName,
    pub body: Block,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: TypeName,
    pub position: Span,
}
