mod binary;
mod bool;
mod call;
mod id;
mod null;
mod num;
mod string;

pub use self::binary::*;
pub use self::bool::*;
pub use self::call::*;
pub use self::id::*;
pub use self::null::*;
pub use self::num::*;
pub use self::string::*;

use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Num(Num),
    StringLiteral(StringLiteral),
    Bool(Bool),
    Null(Null),
    Id(Id),
    Call(Box<Call>),
    Binary(Box<BinaryExpression>),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Num(num) => num.position(),
            Expression::StringLiteral(string) => string.position,
            Expression::Bool(bool) => bool.position,
            Expression::Null(null) => null.position,
            Expression::Id(id) => id.position,
            Expression::Call(call) => call.position,
            Expression::Binary(binary) => binary.position,
        }
    }
}
