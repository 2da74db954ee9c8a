use std::fmt::Display;

use colored::Colorize;

/// Source location of a token, 1-based in both coordinates.
///
/// Spans are positional metadata only. They deliberately compare equal to
/// any other span so expected tokens and AST nodes in tests can be written
/// with `Span::default()`.
#[derive(Debug, Clone, Copy, Default, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl PartialEq for Span {
    fn eq(&self, _other: &Span) -> bool {
        true
    }
}

impl Span {
    pub fn new(line: usize, col: usize) -> Self {
        Span { line, col }
    }

    /// Render the source line this span points into, with a marker under the
    /// offending column. Used by the driver to annotate diagnostics.
    pub fn annotate(&self, source: &str) -> String {
        let Some(line_str) = source.lines().nth(self.line.saturating_sub(1)) else {
            return String::new();
        };

        let gutter = format!("{}", self.line);
        let gutter_fill = " ".repeat(gutter.len());
        let caret_fill = " ".repeat(self.col.saturating_sub(1));

        format!(
            "{gutter_fill} |\n{gutter} | {line_str}\n{gutter_fill} | {caret_fill}{}",
            "^---".red()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Eof { position: Span },
    Newline { position: Span },
    Indent { position: Span },
    Dedent { position: Span },
    Id { value: String, position: Span },
    Integer { value: String, position: Span },
    FloatingPoint { value: String, position: Span },
    StringLiteral { value: String, position: Span },
    IfKeyword { position: Span },
    ElseKeyword { position: Span },
    ForKeyword { position: Span },
    InKeyword { position: Span },
    StructKeyword { position: Span },
    Mut { position: Span },
    Pub { position: Span },
    ImportKeyword { position: Span },
    TaskKeyword { position: Span },
    ReturnKeyword { position: Span },
    True { position: Span },
    False { position: Span },
    Null { position: Span },
    Colon { position: Span },
    Comma { position: Span },
    Assign { position: Span },
    SmallRightArrow { position: Span },
    LParen { position: Span },
    RParen { position: Span },
    Dot { position: Span },
    LBracket { position: Span },
    RBracket { position: Span },
    Plus { position: Span },
    Minus { position: Span },
    Times { position: Span },
    Slash { position: Span },
    Equal { position: Span },
    NotEqual { position: Span },
    LessThan { position: Span },
    LessOrEqual { position: Span },
    GreaterThan { position: Span },
    GreaterOrEqual { position: Span },
}

impl Token {
    pub fn position(&self) -> Span {
        use Token::*;

        match self {
            Eof { position }
            | Newline { position }
            | Indent { position }
            | Dedent { position }
            | Id { position, .. }
            | Integer { position, .. }
            | FloatingPoint { position, .. }
            | StringLiteral { position, .. }
            | IfKeyword { position }
            | ElseKeyword { position }
            | ForKeyword { position }
            | InKeyword { position }
            | StructKeyword { position }
            | Mut { position }
            | Pub { position }
            | ImportKeyword { position }
            | TaskKeyword { position }
            | ReturnKeyword { position }
            | True { position }
            | False { position }
            | Null { position }
            | Colon { position }
            | Comma { position }
            | Assign { position }
            | SmallRightArrow { position }
            | LParen { position }
            | RParen { position }
            | Dot { position }
            | LBracket { position }
            | RBracket { position }
            | Plus { position }
            | Minus { position }
            | Times { position }
            | Slash { position }
            | Equal { position }
            | NotEqual { position }
            | LessThan { position }
            | LessOrEqual { position }
            | GreaterThan { position }
            | GreaterOrEqual { position } => *position,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Token::*;

        match self {
            Eof { .. } => f.write_str("end of file"),
            Newline { .. } => f.write_str("end of line"),
            Indent { .. } => f.write_str("indentation"),
            Dedent { .. } => f.write_str("end of block"),
            Id { value, .. } => write!(f, "identifier '{value}'"),
            Integer { value, .. } => write!(f, "integer literal '{value}'"),
            FloatingPoint { value, .. } => write!(f, "float literal '{value}'"),
            StringLiteral { value, .. } => write!(f, "string literal \"{value}\""),
            IfKeyword { .. } => f.write_str("'if'"),
            ElseKeyword { .. } => f.write_str("'else'"),
            ForKeyword { .. } => f.write_str("'for'"),
            InKeyword { .. } => f.write_str("'in'"),
            StructKeyword { .. } => f.write_str("'struct'"),
            Mut { .. } => f.write_str("'mut'"),
            Pub { .. } => f.write_str("'pub'"),
            ImportKeyword { .. } => f.write_str("'import'"),
            TaskKeyword { .. } => f.write_str("'task'"),
            ReturnKeyword { .. } => f.write_str("'return'"),
            True { .. } => f.write_str("'true'"),
            False { .. } => f.write_str("'false'"),
            Null { .. } => f.write_str("'null'"),
            Colon { .. } => f.write_str("':'"),
            Comma { .. } => f.write_str("','"),
            Assign { .. } => f.write_str("'='"),
            SmallRightArrow { .. } => f.write_str("'->'"),
            LParen { .. } => f.write_str("'('"),
            RParen { .. } => f.write_str("')'"),
            Dot { .. } => f.write_str("'.'"),
            LBracket { .. } => f.write_str("'['"),
            RBracket { .. } => f.write_str("']'"),
            Plus { .. } => f.write_str("'+'"),
            Minus { .. } => f.write_str("'-'"),
            Times { .. } => f.write_str("'*'"),
            Slash { .. } => f.write_str("'/'"),
            Equal { .. } => f.write_str("'=='"),
            NotEqual { .. } => f.write_str("'!='"),
            LessThan { .. } => f.write_str("'<'"),
            LessOrEqual { .. } => f.write_str("'<='"),
            GreaterThan { .. } => f.write_str("'>'"),
            GreaterOrEqual { .. } => f.write_str("'>='"),
        }
    }
}

/// Terminal symbols with a fixed spelling (keywords and operators).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    IfKeyword,
    ElseKeyword,
    ForKeyword,
    InKeyword,
    StructKeyword,
    Mut,
    Pub,
    ImportKeyword,
    TaskKeyword,
    ReturnKeyword,
    True,
    False,
    Null,
    Colon,
    Comma,
    Assign,
    SmallRightArrow,
    LParen,
    RParen,
    Dot,
    LBracket,
    RBracket,
    Plus,
    Minus,
    Times,
    Slash,
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl Terminal {
    pub fn to_token(self, position: Span) -> Token {
        match self {
            Terminal::IfKeyword => Token::IfKeyword { position },
            Terminal::ElseKeyword => Token::ElseKeyword { position },
            Terminal::ForKeyword => Token::ForKeyword { position },
            Terminal::InKeyword => Token::InKeyword { position },
            Terminal::StructKeyword => Token::StructKeyword { position },
            Terminal::Mut => Token::Mut { position },
            Terminal::Pub => Token::Pub { position },
            Terminal::ImportKeyword => Token::ImportKeyword { position },
            Terminal::TaskKeyword => Token::TaskKeyword { position },
            Terminal::ReturnKeyword => Token::ReturnKeyword { position },
            Terminal::True => Token::True { position },
            Terminal::False => Token::False { position },
            Terminal::Null => Token::Null { position },
            Terminal::Colon => Token::Colon { position },
            Terminal::Comma => Token::Comma { position },
            Terminal::Assign => Token::Assign { position },
            Terminal::SmallRightArrow => Token::SmallRightArrow { position },
            Terminal::LParen => Token::LParen { position },
            Terminal::RParen => Token::RParen { position },
            Terminal::Dot => Token::Dot { position },
            Terminal::LBracket => Token::LBracket { position },
            Terminal::RBracket => Token::RBracket { position },
            Terminal::Plus => Token::Plus { position },
            Terminal::Minus => Token::Minus { position },
            Terminal::Times => Token::Times { position },
            Terminal::Slash => Token::Slash { position },
            Terminal::Equal => Token::Equal { position },
            Terminal::NotEqual => Token::NotEqual { position },
            Terminal::LessThan => Token::LessThan { position },
            Terminal::LessOrEqual => Token::LessOrEqual { position },
            Terminal::GreaterThan => Token::GreaterThan { position },
            Terminal::GreaterOrEqual => Token::GreaterOrEqual { position },
        }
    }
}
