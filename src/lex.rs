use std::fmt::Display;

use miette::SourceSpan;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
    /// Byte offset of `literal` within the whole input.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

impl Token<'_> {
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from(self.offset..self.offset + self.literal.len())
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.literal;
        match self.kind {
            TokenKind::Number => write!(f, "NUMBER {lit}"),
            TokenKind::Plus => write!(f, "PLUS {lit}"),
            TokenKind::Minus => write!(f, "MINUS {lit}"),
            TokenKind::Star => write!(f, "STAR {lit}"),
            TokenKind::Slash => write!(f, "SLASH {lit}"),
            TokenKind::LeftParen => write!(f, "LEFT_PAREN {lit}"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN {lit}"),
        }
    }
}

pub struct Lexer<'de> {
    rest: &'de str,
    pub byte: usize,
}

impl<'de> Lexer<'de> {
    pub fn new(input: &'de str) -> Self {
        Lexer {
            rest: input,
            byte: 0,
        }
    }
}

impl<'de> Iterator for Lexer<'de> {
    type Item = Result<Token<'de>, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let literal = &self.rest[..c.len_utf8()];
            let cur = self.rest;
            let offset = self.byte;
            self.rest = chars.as_str();
            self.byte += c.len_utf8();

            let process = |kind: TokenKind| {
                Some(Ok(Token {
                    kind,
                    literal,
                    offset,
                }))
            };

            match c {
                '(' => return process(TokenKind::LeftParen),
                ')' => return process(TokenKind::RightParen),
                '+' => return process(TokenKind::Plus),
                '-' => return process(TokenKind::Minus),
                '*' => return process(TokenKind::Star),
                '/' => return process(TokenKind::Slash),
                '0'..='9' | '.' => {
                    // the whole run of digits and points, even "1.2.3"; the
                    // literal is only validated when it is converted to f64
                    let end = cur
                        .find(|c| !matches!(c, '0'..='9' | '.'))
                        .unwrap_or(cur.len());
                    let literal = &cur[..end];

                    let extra_bytes = literal.len() - c.len_utf8();
                    self.byte += extra_bytes;
                    self.rest = &self.rest[extra_bytes..];

                    return Some(Ok(Token {
                        kind: TokenKind::Number,
                        literal,
                        offset,
                    }));
                }
                ' ' | '\r' | '\t' | '\n' => continue,
                c => {
                    tracing::debug!(offset, %c, "rejecting character");
                    return Some(Err(CalcError::InvalidCharacter {
                        token: c,
                        span: SourceSpan::from(offset..self.byte),
                    }));
                }
            }
        }
    }
}

/// Collects every token of `input`, stopping at the first bad character.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, CalcError> {
    Lexer::new(input).collect()
}
