use crate::lexer::Span;

use crate::parser::ast::{Block, Expression};

/// A `for <iterator> in <iterable>` loop. Parsed and analyzed like any
/// other statement; the C backend refuses to lower it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForLoop {
    pub iterator: String,
    pub iterable: Expression,
    pub body: Block,
    pub position: Span,
}
