use crate::lexer::Span;

use super::TypeName;

/// A `struct` declaration with its fields in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    pub public: bool,
    pub name: String,
    pub fields: Vec<StructFieldDeclaration>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructFieldDeclaration {
    pub name: String,
    pub type_name: TypeName,
    pub position: Span,
}
