use crate::lexer::Span;

use crate::parser::ast::{Block, Expression};

/// An `if` statement with an optional `else` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub condition: Expression,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub position: Span,
}
