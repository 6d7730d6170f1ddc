//! Operator tokens of the notation.

use chalk_error::Error;
use crate::{
    parser::{error, Parse, Parser, Precedence},
    tokenizer::{Token, TokenKind},
};
use std::{fmt, ops::Range};

/// Builds the error for a token that is not one of the given operators.
fn not_an_operator(token: Token, expected: &'static [TokenKind]) -> Error {
    Error::new(vec![token.span], error::UnexpectedToken { expected, found: token.kind })
}

/// The only unary operator: negation, written `-x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOpKind {
    Neg,
}

/// A unary operator, with where it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }
}

impl<'source> Parse<'source> for UnaryOp {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Sub => Ok(Self { kind: UnaryOpKind::Neg, span: token.span }),
            _ => Err(not_an_operator(token, &[TokenKind::Sub])),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-")
    }
}

/// The operator separating two terms (`+`, `-`) or two factors (`*`, `/`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOpKind {
    /// The token of every binary operator.
    const TOKENS: &'static [TokenKind] = &[TokenKind::Add, TokenKind::Sub, TokenKind::Mul, TokenKind::Div];

    /// Returns the operator written with the given token, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// A binary operator. Both terms and factors associate to the left.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub kind: BinOpKind,

    /// True for the multiplication the parser inserts between adjacent factors, as in `2x`. Such
    /// an operator has an empty span.
    pub implicit: bool,

    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl<'source> Parse<'source> for BinOp {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let token = input.next_token()?;
        match BinOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, implicit: false, span: token.span }),
            None => Err(not_an_operator(token, BinOpKind::TOKENS)),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.implicit {
            write!(f, "{}", self.kind.symbol())?;
        }
        Ok(())
    }
}
