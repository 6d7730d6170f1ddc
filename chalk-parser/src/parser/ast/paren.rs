use chalk_error::Error;
use crate::{
    parser::{
        ast::expr::Expr,
        error,
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Parses the `)` matching the given `(`, pointing at the `(` if it is missing.
pub(crate) fn close<'source>(
    input: &mut Parser<'source>,
    open: &OpenParen<'source>,
) -> Result<CloseParen<'source>, Error> {
    input.try_parse::<CloseParen>().map_err(|_| Error::new(
        vec![open.span.clone()],
        error::UnclosedParenthesis { opening: true },
    ))
}

/// A parenthesized expression, such as `(a+b)`. In the equation tree, parentheses always become a
/// nested operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    pub expr: Box<Expr>,

    /// Covers both parentheses.
    pub span: Range<usize>,
}

impl Paren {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Strips redundant parentheses: `((a))` gives `a`.
    pub fn innermost(&self) -> &Expr {
        match self.expr.as_ref() {
            Expr::Paren(inner) => inner.innermost(),
            expr => expr,
        }
    }
}

impl<'source> Parse<'source> for Paren {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;

        match input.peek_token() {
            Some(token) if token.kind == TokenKind::CloseParen => Err(Error::new(
                vec![open.span.start..token.span.end],
                error::EmptyParenthesis,
            )),
            _ => {
                let expr = input.try_parse::<Expr>()?;
                let end = close(input, &open)?;
                Ok(Self { expr: Box::new(expr), span: open.span.start..end.span.end })
            },
        }
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
