use chalk_error::Error;
use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym, paren},
        token::OpenParen,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A function call, such as `f(x, -40)`.
///
/// The name must be directly followed by the opening parenthesis; `f (x)`, with a space, is the
/// product of `f` and `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if the next tokens are a name immediately followed by an opening
    /// parenthesis.
    pub fn is_next(input: &Parser) -> bool {
        let mut input_ahead = input.clone();
        if input_ahead.try_parse::<LitSym>().is_err() {
            return false;
        }

        input_ahead
            .current_token()
            .map_or(false, |token| token.kind == TokenKind::OpenParen)
    }
}

impl<'source> Parse<'source> for Call {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        let args = match input.peek_token() {
            Some(token) if token.kind == TokenKind::CloseParen => Vec::new(),
            _ => input.try_parse_delimited::<Expr>(TokenKind::Comma)?,
        };

        let close_paren = paren::close(input, &open_paren)?;

        Ok(Self {
            span: name.span.start..close_paren.span.end,
            paren_span: open_paren.span.start..close_paren.span.end,
            name,
            args,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                write!(f, "{}, ", arg)?;
            }
            write!(f, "{}", last)?;
        }
        write!(f, ")")
    }
}
