pub mod op;

use chalk_error::Error;
use crate::{
    parser::{error, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a struct for each of the given token kinds, holding the lexeme and span of the token,
/// with a [`Parse`] implementation that accepts only that kind. The parser can then request a
/// specific token by type, as in `input.try_parse::<OpenParen>()`.
macro_rules! token_kinds {
    ($($name:ident)*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub(crate) struct $name<'source> {
                pub(crate) lexeme: &'source str,
                pub(crate) span: Range<usize>,
            }

            impl<'source> Parse<'source> for $name<'source> {
                fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
                    let token = input.next_token()?;

                    if token.kind == TokenKind::$name {
                        Ok(Self {
                            lexeme: token.lexeme,
                            span: token.span,
                        })
                    } else {
                        Err(Error::new(vec![token.span], error::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }))
                    }
                }
            }
        )*
    };
}

token_kinds!(
    Assign
    Name
    OpenParen
    CloseParen
);
