use chalk_error::Error;
use crate::{
    parser::{
        ast::{expr::Expr, unary::Unary},
        token::op::{BinOp, BinOpKind},
        Parser,
        Precedence,
    },
};
use std::{fmt, ops::Range};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

/// Peeks at the operator following the current expression, without consuming it.
///
/// If the next token can start an expression by itself (`2x`, `3(a+b)`), the operator is an
/// implicit multiplication.
fn peek_op(input: &Parser) -> Option<BinOp> {
    let token = input.peek_token()?;
    match BinOpKind::from_token(token.kind) {
        Some(kind) => Some(BinOp { kind, implicit: false, span: token.span.clone() }),
        None if token.kind.starts_primary() => Some(BinOp {
            kind: BinOpKind::Mul,
            implicit: true,
            span: token.span.start..token.span.start,
        }),
        None => None,
    }
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there are binary operators and right-hand-sides with at least the given precedence.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we first parse `1`, then the operator `+`,
    /// then the right-hand-side `2`. Before building the `1 + 2` node, we check whether the
    /// operator after `2` has a higher precedence than `+`. It does, so the expression starting
    /// with `2` is parsed first, and `2 * 3` becomes the right-hand-side of `+`.
    ///
    /// Every operator is left-associative, so an operator of equal precedence ends the
    /// right-hand-side: `1 - 2 + 3` is `(1 - 2) + 3`.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        while let Some(mut op) = peek_op(input).filter(|op| op.precedence() >= precedence) {
            if !op.implicit {
                input.next_token()?;
            }

            let mut rhs = Unary::parse_or_lower(input)?;
            while let Some(next_op) = peek_op(input).filter(|next| next.precedence() > op.precedence()) {
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
            }

            if op.implicit {
                op.span = lhs.span().end..rhs.span().start;
            }

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Add | BinOpKind::Sub => write!(f, "{} {} {}", self.lhs, self.op, self.rhs),
            BinOpKind::Mul | BinOpKind::Div => write!(f, "{}{}{}", self.lhs, self.op, self.rhs),
        }
    }
}
