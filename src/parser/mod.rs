//! Recursive-descent parser for Lazylang.
//!
//! Consumes the token stream produced by the lexer and builds the AST. The
//! grammar is LL(1) apart from statement disambiguation, which needs one
//! token of lookahead beyond the current one (`x:` starts a variable
//! declaration, `x =` an assignment, anything else an expression
//! statement); the parser therefore keeps a cursor with `current` and
//! `peek`. Types are not parsed into a tree: a character-fragment loop
//! concatenates the token spellings of a type expression into an opaque
//! string, stopping at a context-dependent terminator.

pub mod ast;

#[cfg(test)]
pub mod test_helpers;

use std::{error::Error, fmt::Display};

use crate::lexer::{Span, Token};

use self::ast::{
    Assignment, BinaryExpression, BinaryOperator, Block, Bool, Call, Declaration, Expression,
    ForLoop, Function, Id, If, Import, Null, Num, Parameter, Program, Return, Statement,
    StringLiteral, StructDeclaration, StructFieldDeclaration, TypeName, VariableDeclaration,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Option<Span>,
}

impl ParseError {
    pub fn eof(item: &str) -> ParseError {
        ParseError {
            message: format!("hit end of file while parsing {item}"),
            position: None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            write!(
                f,
                "[line {}:{}] Syntax error: {}",
                position.line, position.col, self.message
            )
        } else {
            write!(f, "Syntax error: {}", self.message)
        }
    }
}

impl Error for ParseError {}

macro_rules! expect {
    ($parser:expr, $variant:ident, $expected:expr) => {
        match $parser.advance() {
            Token::$variant { .. } => Ok(()),
            token => Err(ParseError {
                message: format!("expected {}, found {token}", $expected),
                position: Some(token.position()),
            }),
        }
    };
}

/// Context-dependent stop condition for the type-fragment collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeTerminator {
    /// Entry in a parameter type list: stops at `,` or `)`.
    ParameterList,
    /// Return type or variable declaration type: stops at `=`.
    Equals,
    /// Struct field type: stops at end of line (or end of block).
    FieldEnd,
}

/// Struct for iterating over the token vector with one token of lookahead.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof { .. })) {
            tokens.push(Token::Eof {
                position: Span::default(),
            });
        }

        Self { tokens, index: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.tokens[(self.index + 1).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
        token
    }

    fn skip_newlines(&mut self) {
        while matches!(self.current(), Token::Newline { .. }) {
            self.advance();
        }
    }

    fn eat_newline(&mut self, context: &str) -> Result<(), ParseError> {
        match self.advance() {
            Token::Newline { .. } => Ok(()),
            token => Err(ParseError {
                message: format!("expected end of line {context}, found {token}"),
                position: Some(token.position()),
            }),
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(String, Span), ParseError> {
        match self.advance() {
            Token::Id { value, position } => Ok((value, position)),
            token => Err(ParseError {
                message: format!("expected {expected}, found {token}"),
                position: Some(token.position()),
            }),
        }
    }

    /// Parse a whole program: leading blank lines, imports, declarations.
    /// All imports must precede the first declaration.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let position = self.current().position();
        let mut imports = vec![];
        let mut declarations: Vec<Declaration> = vec![];

        self.skip_newlines();

        loop {
            match self.current() {
                Token::Eof { .. } => break,
                Token::ImportKeyword { .. } => {
                    if !declarations.is_empty() {
                        return Err(ParseError {
                            message: "imports must appear before declarations".into(),
                            position: Some(self.current().position()),
                        });
                    }
                    imports.push(self.parse_import()?);
                    self.eat_newline("after an import")?;
                    self.skip_newlines();
                }
                _ => {
                    declarations.push(self.parse_declaration()?);
                    self.skip_newlines();
                }
            }
        }

        Ok(Program {
            imports,
            declarations,
            position,
        })
    }

    fn parse_import(&mut self) -> Result<Import, ParseError> {
        let position = self.advance().position();
        let mut segments = vec![self.expect_ident("a module name")?.0];

        while matches!(self.current(), Token::Dot { .. }) {
            self.advance();
            segments.push(self.expect_ident("a module name")?.0);
        }

        Ok(Import { segments, position })
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let public = if matches!(self.current(), Token::Pub { .. }) {
            self.advance();
            true
        } else {
            false
        };

        match self.current() {
            Token::StructKeyword { .. } => Ok(Declaration::Struct(self.parse_struct(public)?)),
            Token::Id { .. } => Ok(Declaration::Function(self.parse_function(public)?)),
            token => Err(ParseError {
                message: format!("expected a function or struct declaration, found {token}"),
                position: Some(token.position()),
            }),
        }
    }

    /// Parse `name: (t1, t2) -> ret = (p1, p2)` followed by a block. The
    /// type list and the name list are matched positionally.
    fn parse_function(&mut self, public: bool) -> Result<Function, ParseError> {
        let (name, position) = self.expect_ident("a function name")?;
        expect!(self, Colon, "':'")?;

        expect!(self, LParen, "'('")?;
        let mut types = vec![];
        if !matches!(self.current(), Token::RParen { .. }) {
            loop {
                types.push(self.collect_type(TypeTerminator::ParameterList)?);
                if matches!(self.current(), Token::Comma { .. }) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        expect!(self, RParen, "')'")?;

        expect!(self, SmallRightArrow, "'->'")?;
        let return_type = self.collect_type(TypeTerminator::Equals)?;
        expect!(self, Assign, "'='")?;

        expect!(self, LParen, "'('")?;
        let mut names = vec![];
        if !matches!(self.current(), Token::RParen { .. }) {
            loop {
                names.push(self.expect_ident("a parameter name")?);
                if matches!(self.current(), Token::Comma { .. }) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        expect!(self, RParen, "')'")?;

        if names.len() != types.len() {
            return Err(ParseError {
                message: format!(
                    "function '{name}' declares {} parameter type(s) but {} parameter name(s)",
                    types.len(),
                    names.len()
                ),
                position: Some(position),
            });
        }

        let params = names
            .into_iter()
            .zip(types)
            .map(|((name, position), type_name)| Parameter {
                name,
                type_name,
                position,
            })
            .collect();

        let body = self.parse_block()?;

        Ok(Function {
            public,
            name,
            params,
            return_type,
            body,
            position,
        })
    }

    fn parse_struct(&mut self, public: bool) -> Result<StructDeclaration, ParseError> {
        let position = self.advance().position();
        let (name, _) = self.expect_ident("a struct name")?;
        self.eat_newline("after a struct name")?;
        self.skip_newlines();
        expect!(self, Indent, "an indented field list")?;

        let mut fields = vec![];
        loop {
            self.skip_newlines();
            match self.current() {
                Token::Dedent { .. } => {
                    self.advance();
                    break;
                }
                Token::Eof { .. } => return Err(ParseError::eof("a struct declaration")),
                _ => fields.push(self.parse_struct_field()?),
            }
        }

        Ok(StructDeclaration {
            public,
            name,
            fields,
            position,
        })
    }

    fn parse_struct_field(&mut self) -> Result<StructFieldDeclaration, ParseError> {
        let (name, position) = self.expect_ident("a field name")?;
        expect!(self, Colon, "':'")?;
        let type_name = self.collect_type(TypeTerminator::FieldEnd)?;
        if matches!(self.current(), Token::Newline { .. }) {
            self.advance();
        }

        Ok(StructFieldDeclaration {
            name,
            type_name,
            position,
        })
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.eat_newline("before an indented block")?;
        self.skip_newlines();
        let position = self.current().position();
        expect!(self, Indent, "an indented block")?;

        let mut statements = vec![];
        loop {
            self.skip_newlines();
            match self.current() {
                Token::Dedent { .. } => {
                    self.advance();
                    break;
                }
                Token::Eof { .. } => return Err(ParseError::eof("a block")),
                _ => statements.push(self.parse_statement()?),
            }
        }

        Ok(Block {
            statements,
            position,
        })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current() {
            Token::IfKeyword { .. } => self.parse_if().map(Statement::If),
            Token::ForKeyword { .. } => self.parse_for().map(Statement::For),
            Token::ReturnKeyword { .. } => self.parse_return().map(Statement::Return),
            Token::Mut { .. } => {
                self.advance();
                self.parse_variable_declaration(true)
                    .map(Statement::VariableDeclaration)
            }
            Token::Id { .. } => match self.peek() {
                Token::Colon { .. } => self
                    .parse_variable_declaration(false)
                    .map(Statement::VariableDeclaration),
                Token::Assign { .. } => self.parse_assignment().map(Statement::Assignment),
                _ => self.parse_expression_statement(),
            },
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_if(&mut self) -> Result<If, ParseError> {
        let position = self.advance().position();
        let condition = self.parse_expression()?;
        let then_block = self.parse_block()?;

        let else_block = if matches!(self.current(), Token::ElseKeyword { .. }) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(If {
            condition,
            then_block,
            else_block,
            position,
        })
    }

    fn parse_for(&mut self) -> Result<ForLoop, ParseError> {
        let position = self.advance().position();
        let (iterator, _) = self.expect_ident("an iterator name")?;
        expect!(self, InKeyword, "'in'")?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(ForLoop {
            iterator,
            iterable,
            body,
            position,
        })
    }

    fn parse_variable_declaration(
        &mut self,
        mutable: bool,
    ) -> Result<VariableDeclaration, ParseError> {
        let (name, position) = self.expect_ident("a variable name")?;
        expect!(self, Colon, "':'")?;
        let type_name = self.collect_type(TypeTerminator::Equals)?;
        expect!(self, Assign, "'='")?;
        let value = self.parse_expression()?;
        self.eat_newline("after a variable declaration")?;

        Ok(VariableDeclaration {
            mutable,
            name,
            type_name,
            value,
            position,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let (name, position) = self.expect_ident("a variable name")?;
        expect!(self, Assign, "'='")?;
        let value = self.parse_expression()?;
        self.eat_newline("after an assignment")?;

        Ok(Assignment {
            name,
            value,
            position,
        })
    }

    fn parse_return(&mut self) -> Result<Return, ParseError> {
        let position = self.advance().position();
        let value = if matches!(self.current(), Token::Newline { .. }) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.eat_newline("after a return statement")?;

        Ok(Return { value, position })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let expression = self.parse_expression()?;
        self.eat_newline("after an expression")?;
        Ok(Statement::Expression(expression))
    }

    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_comparison()?;

        loop {
            let operator = match self.current() {
                Token::Equal { .. } => BinaryOperator::Equal,
                Token::NotEqual { .. } => BinaryOperator::NotEqual,
                _ => break,
            };
            let position = self.advance().position();
            let right = self.parse_comparison()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                left,
                operator,
                right,
                position,
            }));
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let operator = match self.current() {
                Token::LessThan { .. } => BinaryOperator::LessThan,
                Token::LessOrEqual { .. } => BinaryOperator::LessOrEqual,
                Token::GreaterThan { .. } => BinaryOperator::GreaterThan,
                Token::GreaterOrEqual { .. } => BinaryOperator::GreaterOrEqual,
                _ => break,
            };
            let position = self.advance().position();
            let right = self.parse_term()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                left,
                operator,
                right,
                position,
            }));
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let operator = match self.current() {
                Token::Plus { .. } => BinaryOperator::Add,
                Token::Minus { .. } => BinaryOperator::Subtract,
                _ => break,
            };
            let position = self.advance().position();
            let right = self.parse_factor()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                left,
                operator,
                right,
                position,
            }));
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_call()?;

        loop {
            let operator = match self.current() {
                Token::Times { .. } => BinaryOperator::Multiply,
                Token::Slash { .. } => BinaryOperator::Divide,
                _ => break,
            };
            let position = self.advance().position();
            let right = self.parse_call()?;
            left = Expression::Binary(Box::new(BinaryExpression {
                left,
                operator,
                right,
                position,
            }));
        }

        Ok(left)
    }

    fn parse_call(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_primary()?;

        while matches!(self.current(), Token::LParen { .. }) {
            self.advance();
            let mut arguments = vec![];
            if !matches!(self.current(), Token::RParen { .. }) {
                loop {
                    arguments.push(self.parse_expression()?);
                    if matches!(self.current(), Token::Comma { .. }) {
                        self.advance();
                        continue;
                    }
                    break;
                }
            }
            expect!(self, RParen, "')'")?;

            let position = expression.position();
            expression = Expression::Call(Box::new(Call {
                callee: expression,
                arguments,
                position,
            }));
        }

        Ok(expression)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.advance() {
            Token::Integer { value, position } => Ok(Expression::Num(Num::Integer(value, position))),
            Token::FloatingPoint { value, position } => {
                Ok(Expression::Num(Num::FloatingPoint(value, position)))
            }
            Token::StringLiteral { value, position } => {
                Ok(Expression::StringLiteral(StringLiteral { value, position }))
            }
            Token::True { position } => Ok(Expression::Bool(Bool {
                value: true,
                position,
            })),
            Token::False { position } => Ok(Expression::Bool(Bool {
                value: false,
                position,
            })),
            Token::Null { position } => Ok(Expression::Null(Null { position })),
            Token::Id { value, position } => Ok(Expression::Id(Id {
                name: value,
                position,
            })),
            Token::LParen { .. } => {
                let expression = self.parse_expression()?;
                expect!(self, RParen, "')'")?;
                Ok(expression)
            }
            token => Err(ParseError {
                message: format!("expected an expression, found {token}"),
                position: Some(token.position()),
            }),
        }
    }

    /// Assemble a type fragment by concatenating token spellings until a
    /// terminator token shows up at bracket depth zero. `[`/`]` nest;
    /// anything not allowed inside a type is a located error.
    fn collect_type(&mut self, terminator: TypeTerminator) -> Result<TypeName, ParseError> {
        let position = self.current().position();
        let mut fragment = String::new();
        let mut depth = 0usize;

        loop {
            let token = self.current();
            let terminated = depth == 0
                && match terminator {
                    TypeTerminator::ParameterList => {
                        matches!(token, Token::Comma { .. } | Token::RParen { .. })
                    }
                    TypeTerminator::Equals => matches!(token, Token::Assign { .. }),
                    TypeTerminator::FieldEnd => {
                        matches!(token, Token::Newline { .. } | Token::Dedent { .. })
                    }
                };
            if terminated {
                break;
            }

            match token {
                Token::Id { value, .. } => fragment.push_str(value),
                Token::Null { .. } => fragment.push_str("null"),
                Token::Comma { .. } => fragment.push(','),
                Token::Dot { .. } => fragment.push('.'),
                Token::LBracket { .. } => {
                    depth += 1;
                    fragment.push('[');
                }
                Token::RBracket { .. } => {
                    if depth == 0 {
                        return Err(ParseError {
                            message: "unmatched ']' in type".into(),
                            position: Some(token.position()),
                        });
                    }
                    depth -= 1;
                    fragment.push(']');
                }
                Token::Newline { .. } => {
                    return Err(ParseError {
                        message: "a type may not span multiple lines".into(),
                        position: Some(token.position()),
                    });
                }
                token => {
                    return Err(ParseError {
                        message: format!("expected a type, found {token}"),
                        position: Some(token.position()),
                    });
                }
            }

            self.advance();
        }

        if fragment.is_empty() {
            return Err(ParseError {
                message: "expected a type".into(),
                position: Some(position),
            });
        }

        Ok(TypeName::new(fragment, position))
    }
}
