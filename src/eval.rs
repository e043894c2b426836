use miette::SourceSpan;

use crate::{
    Parser,
    error::CalcError,
    lex::{Token, TokenKind},
    parse::{Op, RpnExpr},
};

/// Evaluates an infix expression: tokenize, convert to postfix, reduce.
///
/// The first stage to fail decides the error. Every call is independent.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let rpn = Parser::parse_str(input).inspect_err(|e| {
        tracing::debug!(input, error = %e, "parsing failed");
    })?;
    let value = eval_rpn(&rpn).inspect_err(|e| {
        tracing::debug!(input, error = %e, "evaluation failed");
    })?;
    tracing::debug!(input, value, "evaluated");
    Ok(value)
}

/// Reduces a postfix sequence to a single number.
pub fn eval_rpn(rpn: &RpnExpr<'_>) -> Result<f64, CalcError> {
    let mut operands: Vec<(f64, SourceSpan)> = Vec::new();

    for token in rpn.0.iter() {
        match token.kind {
            TokenKind::Number => operands.push((parse_number(token)?, token.span())),
            kind => {
                // the parser never emits parentheses, but an RpnExpr can be
                // built by hand
                let Some(op) = Op::from_kind(kind) else {
                    return Err(CalcError::UnexpectedToken {
                        literal: token.literal.to_string(),
                        span: token.span(),
                    });
                };
                let missing = || CalcError::MissingOperand {
                    op: op.symbol(),
                    span: token.span(),
                };
                let (rhs, rhs_span) = operands.pop().ok_or_else(missing)?;
                let (lhs, lhs_span) = operands.pop().ok_or_else(missing)?;
                let span = cover(lhs_span, rhs_span);
                let value = op
                    .apply(lhs, rhs)
                    .ok_or(CalcError::DivisionByZero { span })?;
                operands.push((value, span));
            }
        }
    }

    match operands.as_slice() {
        [(value, _)] => Ok(*value),
        [] => Err(CalcError::Empty {
            span: SourceSpan::from(0..0),
        }),
        [(_, first), .., (_, last)] => Err(CalcError::LeftoverOperands {
            count: operands.len(),
            span: cover(*first, *last),
        }),
    }
}

fn parse_number(token: &Token<'_>) -> Result<f64, CalcError> {
    token.literal.parse().map_err(|_| CalcError::InvalidNumber {
        literal: token.literal.to_string(),
        span: token.span(),
    })
}

fn cover(lhs: SourceSpan, rhs: SourceSpan) -> SourceSpan {
    let start = lhs.offset().min(rhs.offset());
    let end = (lhs.offset() + lhs.len()).max(rhs.offset() + rhs.len());
    SourceSpan::from(start..end)
}
