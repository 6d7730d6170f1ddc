use chalk_error::Error;
use crate::{
    parser::{ast::expr::Expr, error, token::Assign, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// An equation: two expressions separated by a single `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The left-hand side.
    pub lhs: Expr,

    /// The right-hand side.
    pub rhs: Expr,

    /// The span of the `=` token.
    pub eq_span: Range<usize>,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for Equation {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;
        let assign = input.try_parse::<Assign>().map_err(|err| {
            match input.peek_token() {
                None => Error::new(vec![lhs.span()], error::MissingEquals),
                Some(token) if token.kind == TokenKind::CloseParen => Error::new(
                    vec![token.span.clone()],
                    error::UnclosedParenthesis { opening: false },
                ),
                Some(_) => err,
            }
        })?;
        let rhs = input.try_parse::<Expr>()?;

        if let Some(token) = input.peek_token() {
            if token.kind == TokenKind::Assign {
                return Err(Error::new(
                    vec![assign.span, token.span.clone()],
                    error::RepeatedEquals,
                ));
            }
        }

        Ok(Self {
            span: lhs.span().start..rhs.span().end,
            eq_span: assign.span,
            lhs,
            rhs,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}
