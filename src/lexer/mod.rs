//! Lexer for Lazylang.
//!
//! Turns raw source text into a flat token stream. Block structure is made
//! explicit here: the lexer is the sole producer of the virtual NEWLINE,
//! INDENT and DEDENT tokens the parser treats as terminals. Indentation is
//! measured in whitespace units (spaces and tabs both count as one) against
//! a stack of open indent widths.

mod lexmap;
mod token;

pub use lexmap::*;
pub use token::*;

use std::{error::Error, fmt::Display, iter::Peekable, str::Chars};

use once_cell::sync::Lazy;

#[macro_export]
macro_rules! terminal {
    ($map:ident, $name:ident, $value:expr) => {
        $map.insert($value, Terminal::$name);
    };
}

static LEX_MAP: Lazy<LexMap> = Lazy::new(|| {
    let mut m = LexMap::default();

    terminal!(m, IfKeyword, "if");
    terminal!(m, ElseKeyword, "else");
    terminal!(m, ForKeyword, "for");
    terminal!(m, InKeyword, "in");
    terminal!(m, StructKeyword, "struct");
    terminal!(m, Mut, "mut");
    terminal!(m, Pub, "pub");
    terminal!(m, ImportKeyword, "import");
    terminal!(m, TaskKeyword, "task");
    terminal!(m, ReturnKeyword, "return");
    terminal!(m, True, "true");
    terminal!(m, False, "false");
    terminal!(m, Null, "null");
    terminal!(m, Colon, ":");
    terminal!(m, Comma, ",");
    terminal!(m, Assign, "=");
    terminal!(m, SmallRightArrow, "->");
    terminal!(m, LParen, "(");
    terminal!(m, RParen, ")");
    terminal!(m, Dot, ".");
    terminal!(m, LBracket, "[");
    terminal!(m, RBracket, "]");
    terminal!(m, Plus, "+");
    terminal!(m, Minus, "-");
    terminal!(m, Times, "*");
    terminal!(m, Slash, "/");
    terminal!(m, Equal, "==");
    terminal!(m, NotEqual, "!=");
    terminal!(m, LessThan, "<");
    terminal!(m, LessOrEqual, "<=");
    terminal!(m, GreaterThan, ">");
    terminal!(m, GreaterOrEqual, ">=");

    m
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    message: String,
    position: Span,
}

pub type LexResult<T> = Result<T, LexError>;

impl LexError {
    fn new(message: impl ToString, position: Span) -> Self {
        LexError {
            message: message.to_string(),
            position,
        }
    }

    pub fn position(&self) -> Span {
        self.position
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[line {}:{}] Lexical error: {}",
            self.position.line, self.position.col, self.message
        )
    }
}

impl Error for LexError {}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
    indent_stack: Vec<usize>,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: vec![],
            iterator: input.chars().peekable(),
            line: 1,
            col: 1,
            indent_stack: vec![0],
            at_line_start: true,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn next(&mut self) -> Option<char> {
        let next = self.iterator.next();
        if next.is_some() {
            self.col += 1;
        }
        next
    }

    fn next_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        let next = self.iterator.next_if(func);
        if next.is_some() {
            self.col += 1;
        }
        next
    }

    fn here(&self) -> Span {
        Span::new(self.line, self.col)
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        loop {
            if self.at_line_start {
                self.handle_line_start()?;
            }

            self.eat_spacing();

            let Some(next) = self.peek() else {
                break;
            };

            match next {
                '\n' => {
                    let position = self.here();
                    self.next();
                    self.tokens.push(Token::Newline { position });
                    self.line += 1;
                    self.col = 1;
                    self.at_line_start = true;
                }
                'a'..='z' | 'A'..='Z' | '_' => self.lex_alphanumeric(),
                '0'..='9' => self.lex_numeric(),
                '"' => self.lex_string(),
                _ => self.lex_special()?,
            }
        }

        self.finish();

        Ok(self.tokens)
    }

    /// Measure the leading whitespace of a fresh line and adjust the indent
    /// stack. Blank lines and comment-only lines are skipped over; they do
    /// not open or close blocks.
    fn handle_line_start(&mut self) -> LexResult<()> {
        let mut width = 0;
        while let Some(next) = self.next_if(|c| *c == ' ' || *c == '\t' || *c == '\r') {
            if next != '\r' {
                width += 1;
            }
        }

        match self.peek() {
            None | Some('\n') | Some('#') => return Ok(()),
            _ => {}
        }

        self.at_line_start = false;
        self.apply_indentation(width)
    }

    fn apply_indentation(&mut self, width: usize) -> LexResult<()> {
        let position = self.here();
        let top = self.indent_stack.last().copied().unwrap_or(0);

        if width > top {
            self.indent_stack.push(width);
            self.tokens.push(Token::Indent { position });
            return Ok(());
        }

        while width < self.indent_stack.last().copied().unwrap_or(0) {
            self.indent_stack.pop();
            self.tokens.push(Token::Dedent { position });
        }

        if width != self.indent_stack.last().copied().unwrap_or(0) {
            return Err(LexError::new(
                format!("Indentation error at line {}", self.line),
                position,
            ));
        }

        Ok(())
    }

    /// Skip spaces, tabs, carriage returns and `#` comments between tokens
    /// on the same line. Stops in front of `\n` so the newline itself still
    /// produces a token.
    fn eat_spacing(&mut self) {
        loop {
            if self.next_if(|c| *c == ' ' || *c == '\t' || *c == '\r').is_some() {
                continue;
            }

            if let Some('#') = self.peek() {
                while self.next_if(|c| *c != '\n').is_some() {}
                continue;
            }

            return;
        }
    }

    fn lex_alphanumeric(&mut self) {
        let position = self.here();
        let mut stack = vec![];

        while let Some(next) = self.next_if(|c| c.is_alphanumeric() || *c == '_') {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();

        if let Some(terminal) = LEX_MAP.get(read.as_str()) {
            self.tokens.push(terminal.to_token(position));
        } else {
            self.tokens.push(Token::Id {
                value: read,
                position,
            });
        }
    }

    fn lex_numeric(&mut self) {
        let position = self.here();
        let mut stack = vec![];

        while let Some(next) = self.next_if(|c| c.is_ascii_digit()) {
            stack.push(next);
        }

        let mut is_float = false;
        if let Some('.') = self.peek() {
            let mut lookahead = self.iterator.clone();
            lookahead.next();
            if lookahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                stack.push('.');
                self.next();
                while let Some(next) = self.next_if(|c| c.is_ascii_digit()) {
                    stack.push(next);
                }
            }
        }

        let value = stack.iter().collect::<String>();

        if is_float {
            self.tokens.push(Token::FloatingPoint { value, position });
        } else {
            self.tokens.push(Token::Integer { value, position });
        }
    }

    /// Read a string literal. The lexeme excludes the quotes; the literal
    /// ends at the next `"` or at the end of input.
    fn lex_string(&mut self) {
        let position = self.here();
        let mut stack = vec![];

        self.next();

        while let Some(next) = self.next() {
            if next == '"' {
                break;
            }

            if next == '\n' {
                self.line += 1;
                self.col = 1;
            }

            stack.push(next);
        }

        self.tokens.push(Token::StringLiteral {
            value: stack.iter().collect(),
            position,
        });
    }

    fn lex_special(&mut self) -> LexResult<()> {
        let position = self.here();
        let mut stack = vec![];

        while let Some(next) = self.next() {
            stack.push(next);

            let read = stack.iter().collect::<String>();

            let can_read_next = self
                .peek()
                .map(|item| {
                    let mut extended = stack.clone();
                    extended.push(item);
                    let extended = extended.iter().collect::<String>();
                    LEX_MAP.can_match(extended.as_str())
                })
                .unwrap_or(false);

            if can_read_next {
                continue;
            }

            let Some(current_match) = LEX_MAP.get(read.as_str()) else {
                return Err(LexError::new(
                    format!("unexpected character '{read}'"),
                    position,
                ));
            };

            self.tokens.push(current_match.to_token(position));
            break;
        }

        Ok(())
    }

    /// Close the stream: synthesize a trailing NEWLINE for files that end
    /// mid-line, drain every open indent level, then emit EOF.
    fn finish(&mut self) {
        let position = self.here();

        match self.tokens.last() {
            None | Some(Token::Newline { .. }) => {}
            Some(_) => self.tokens.push(Token::Newline { position }),
        }

        while self.indent_stack.last().copied().unwrap_or(0) > 0 {
            self.indent_stack.pop();
            self.tokens.push(Token::Dedent { position });
        }

        self.tokens.push(Token::Eof { position });
    }
}
