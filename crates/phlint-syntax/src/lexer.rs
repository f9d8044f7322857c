//! Lexer for the PHP subset phlint parses

use std::iter::Peekable;
use std::str::Chars;

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<?php`
    OpenTag,
    /// `$name`, stored without the sigil
    Variable(String),
    /// Identifier or keyword, possibly qualified (`Foo\Bar`)
    Identifier(String),
    Int(i64),
    Str(String),
    /// `#[`
    AttributeStart,
    /// `->`
    Arrow,
    /// `::`
    DoubleColon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Equals,
    Colon,
    Question,
    Ampersand,
    Pipe,
    Eof,
}

impl TokenKind {
    /// Keyword check; PHP keywords are case-insensitive.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(keyword))
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if let Some(c) = ch {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            let line = self.line;
            let column = self.column;
            let Some(ch) = self.advance() else {
                tokens.push(Token::new(TokenKind::Eof, line, column));
                return Ok(tokens);
            };

            let kind = match ch {
                '<' if self.eat('?') => {
                    // <?php opening tag; the marker after `?` is optional
                    while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '=') {
                        self.advance();
                    }
                    TokenKind::OpenTag
                }
                '?' if self.peek() == Some('>') => {
                    // closing tag ends the script
                    tokens.push(Token::new(TokenKind::Eof, line, column));
                    return Ok(tokens);
                }
                '?' => TokenKind::Question,
                '$' => TokenKind::Variable(self.lex_name(None)),
                '-' if self.eat('>') => TokenKind::Arrow,
                ':' if self.eat(':') => TokenKind::DoubleColon,
                ':' => TokenKind::Colon,
                '#' if self.eat('[') => TokenKind::AttributeStart,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '=' => TokenKind::Equals,
                '&' => TokenKind::Ampersand,
                '|' => TokenKind::Pipe,
                '\'' | '"' => TokenKind::Str(self.lex_string(ch)?),
                c if c.is_ascii_digit() => self.lex_number(c),
                c if is_name_start(c) || c == '\\' => {
                    TokenKind::Identifier(self.lex_qualified_name(c))
                }
                c => {
                    return Err(ParseError::UnexpectedChar {
                        ch: c,
                        line,
                        column,
                    })
                }
            };
            tokens.push(Token::new(kind, line, column));
        }
    }

    /// Skip whitespace and comments. `#` starts a line comment unless it is
    /// the `#[` attribute opener.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.peek().copied() {
                        Some('/') => self.skip_line_comment(),
                        Some('*') => self.skip_block_comment(),
                        _ => return,
                    }
                }
                Some('#') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if lookahead.peek() == Some(&'[') {
                        return;
                    }
                    self.skip_line_comment();
                }
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                return;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // '/'
        self.advance(); // '*'
        while let Some(c) = self.advance() {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                return;
            }
        }
    }

    fn lex_name(&mut self, first: Option<char>) -> String {
        let mut name = String::new();
        if let Some(c) = first {
            name.push(c);
        }
        while matches!(self.peek(), Some(c) if is_name_continue(c)) {
            name.push(self.advance().unwrap());
        }
        name
    }

    /// Lex an identifier allowing `\` namespace separators.
    fn lex_qualified_name(&mut self, first: char) -> String {
        let mut name = String::new();
        name.push(first);
        loop {
            match self.peek() {
                Some(c) if is_name_continue(c) => {
                    name.push(self.advance().unwrap());
                }
                Some('\\') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some(&c) if is_name_start(c) => {
                            name.push(self.advance().unwrap());
                        }
                        _ => return name,
                    }
                }
                _ => return name,
            }
        }
    }

    fn lex_number(&mut self, first: char) -> TokenKind {
        let mut digits = String::new();
        digits.push(first);
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
            let c = self.advance().unwrap();
            if c != '_' {
                digits.push(c);
            }
        }
        TokenKind::Int(digits.parse().unwrap_or(0))
    }

    fn lex_string(&mut self, quote: char) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            let line = self.line;
            let column = self.column;
            match self.advance() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    // keep escapes verbatim; rules only compare raw text
                    if let Some(next) = self.advance() {
                        value.push(next);
                    }
                }
                Some(c) => value.push(c),
                None => {
                    return Err(ParseError::UnterminatedString { line, column });
                }
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}
