use std::fmt::Display;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// The closed set of ways an evaluation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    UnbalancedParentheses,
    MalformedExpression,
    DivisionByZero,
    InvalidNumber,
}

impl ErrorKind {
    /// Short text suitable for a calculator display.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::InvalidCharacter => "Invalid character",
            ErrorKind::UnbalancedParentheses => "Mismatched parentheses",
            ErrorKind::MalformedExpression => "Malformed expression",
            ErrorKind::DivisionByZero => "Cannot divide by zero",
            ErrorKind::InvalidNumber => "Invalid number",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum CalcError {
    #[error("Unexpected character '{token}'")]
    #[diagnostic(
        code(calculon::invalid_character),
        help("only digits, `.`, `+ - * /`, parentheses and whitespace are allowed")
    )]
    InvalidCharacter {
        token: char,
        #[label("this character")]
        span: SourceSpan,
    },

    #[error("Unmatched closing parenthesis")]
    #[diagnostic(
        code(calculon::unbalanced_parentheses),
        help("remove this `)` or add a matching `(` before it")
    )]
    MissingOpenParen {
        #[label("no `(` for this")]
        span: SourceSpan,
    },

    #[error("Unclosed parenthesis")]
    #[diagnostic(
        code(calculon::unbalanced_parentheses),
        help("add a matching `)` after this group")
    )]
    MissingCloseParen {
        #[label("opened here")]
        span: SourceSpan,
    },

    #[error("Operator '{op}' is missing an operand")]
    #[diagnostic(code(calculon::malformed_expression))]
    MissingOperand {
        op: char,
        #[label("needs two operands")]
        span: SourceSpan,
    },

    #[error("Expected a single result, found {count} values")]
    #[diagnostic(
        code(calculon::malformed_expression),
        help("put an operator between adjacent numbers")
    )]
    LeftoverOperands {
        count: usize,
        #[label("expression")]
        span: SourceSpan,
    },

    #[error("Unexpected '{literal}' in postfix expression")]
    #[diagnostic(
        code(calculon::malformed_expression),
        help("postfix expressions contain only numbers and operators")
    )]
    UnexpectedToken {
        literal: String,
        #[label("not an operand or operator")]
        span: SourceSpan,
    },

    #[error("Nothing to evaluate")]
    #[diagnostic(code(calculon::malformed_expression))]
    Empty {
        #[label("empty input")]
        span: SourceSpan,
    },

    #[error("Division by zero")]
    #[diagnostic(code(calculon::division_by_zero))]
    DivisionByZero {
        #[label("the divisor of this evaluates to zero")]
        span: SourceSpan,
    },

    #[error("Invalid numeric literal `{literal}`")]
    #[diagnostic(
        code(calculon::invalid_number),
        help("a number has digits and at most one decimal point")
    )]
    InvalidNumber {
        literal: String,
        #[label("this numeric literal")]
        span: SourceSpan,
    },
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            CalcError::MissingOpenParen { .. } | CalcError::MissingCloseParen { .. } => {
                ErrorKind::UnbalancedParentheses
            }
            CalcError::MissingOperand { .. }
            | CalcError::LeftoverOperands { .. }
            | CalcError::UnexpectedToken { .. }
            | CalcError::Empty { .. } => ErrorKind::MalformedExpression,
            CalcError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            CalcError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            CalcError::InvalidCharacter { span, .. }
            | CalcError::MissingOpenParen { span }
            | CalcError::MissingCloseParen { span }
            | CalcError::MissingOperand { span, .. }
            | CalcError::LeftoverOperands { span, .. }
            | CalcError::UnexpectedToken { span, .. }
            | CalcError::Empty { span }
            | CalcError::DivisionByZero { span }
            | CalcError::InvalidNumber { span, .. } => *span,
        }
    }
}
