use std::fmt::Display;

use crate::{
    Lexer,
    error::CalcError,
    lex::{Token, TokenKind},
};

/// A binary arithmetic operator. All of them are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn from_kind(kind: TokenKind) -> Option<Op> {
        match kind {
            TokenKind::Plus => Some(Op::Add),
            TokenKind::Minus => Some(Op::Sub),
            TokenKind::Star => Some(Op::Mul),
            TokenKind::Slash => Some(Op::Div),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    /// Computes `lhs op rhs`, or `None` when dividing by exactly zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Op::Add => Some(lhs + rhs),
            Op::Sub => Some(lhs - rhs),
            Op::Mul => Some(lhs * rhs),
            Op::Div if rhs == 0.0 => None,
            Op::Div => Some(lhs / rhs),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Tokens in postfix order. Never contains parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct RpnExpr<'de>(pub Vec<Token<'de>>);

impl Display for RpnExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.literal)?;
        }
        Ok(())
    }
}

pub struct Parser;

impl Parser {
    pub fn parse_str(input: &str) -> Result<RpnExpr<'_>, CalcError> {
        Self::parse(Lexer::new(input))
    }

    pub fn parse<'de>(
        tokens: impl IntoIterator<Item = Result<Token<'de>, CalcError>>,
    ) -> Result<RpnExpr<'de>, CalcError> {
        let mut out = Vec::new();
        let mut stack: Vec<Token<'de>> = Vec::new();

        for token in tokens {
            let token = token?;
            match token.kind {
                TokenKind::Number => out.push(token),
                TokenKind::LeftParen => stack.push(token),
                TokenKind::RightParen => loop {
                    match stack.pop() {
                        Some(Token {
                            kind: TokenKind::LeftParen,
                            ..
                        }) => break,
                        Some(top) => out.push(top),
                        None => {
                            return Err(CalcError::MissingOpenParen { span: token.span() });
                        }
                    }
                },
                TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash => {
                    let prec = precedence(&token);
                    while let Some(top) = stack.last() {
                        if top.kind == TokenKind::LeftParen || precedence(top) < prec {
                            break;
                        }
                        // equal precedence pops too: left-associative
                        out.extend(stack.pop());
                    }
                    stack.push(token);
                }
            }
        }

        while let Some(top) = stack.pop() {
            if top.kind == TokenKind::LeftParen {
                return Err(CalcError::MissingCloseParen { span: top.span() });
            }
            out.push(top);
        }

        let rpn = RpnExpr(out);
        tracing::trace!(%rpn, "converted to postfix");
        Ok(rpn)
    }
}

fn precedence(token: &Token<'_>) -> u8 {
    Op::from_kind(token.kind).map_or(0, Op::precedence)
}
