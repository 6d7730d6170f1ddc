use chalk_error::Error;
use crate::{
    parser::{error, token::Name, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A numeric literal. Integers and decimals are both stored as an [`f64`].
#[derive(Debug, Clone, PartialEq)]
pub struct LitNum {
    /// The value of the literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, such as `x` or `total`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A double-quoted string literal, such as `"label"`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitStr {
    /// The contents of the string, without the quotes.
    pub value: String,

    /// The region of the source code that this literal was parsed from, including the quotes.
    pub span: Range<usize>,
}

impl fmt::Display for LitStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
    Str(LitStr),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
            Literal::Str(s) => s.span.clone(),
        }
    }
}

impl<'source> Parse<'source> for LitSym {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let Name { lexeme, span } = input.try_parse::<Name>()?;
        Ok(Self { name: lexeme.to_owned(), span })
    }
}

impl<'source> Parse<'source> for Literal {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => {
                match token.lexeme.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Literal::Number(LitNum {
                        value,
                        span: token.span,
                    })),
                    _ => Err(Error::new(vec![token.span], error::InvalidNumber {
                        lexeme: token.lexeme.to_owned(),
                    })),
                }
            },
            TokenKind::Name => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            })),
            TokenKind::Quote => Ok(Literal::Str(LitStr {
                value: token.lexeme.trim_matches('"').to_owned(),
                span: token.span,
            })),
            _ => Err(Error::new(vec![token.span], error::ExpectedExpr {
                expected: "a literal",
            })),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
            Literal::Str(s) => s.fmt(f),
        }
    }
}
