use chalk_error::Error;
use crate::{
    parser::{
        ast::expr::{Expr, Primary},
        token::op::UnaryOp,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
///
/// Negation binds tighter than every binary operator, so `-a*b` is `(-a)*b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let is_neg = input.peek_token().map_or(false, |token| token.kind == TokenKind::Sub);
        if !is_neg {
            return input.try_parse::<Primary>().map(Expr::from);
        }

        let op = input.try_parse::<UnaryOp>()?;
        let operand = Self::parse_or_lower(input)?;
        let span = op.span.start..operand.span().end;
        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}
