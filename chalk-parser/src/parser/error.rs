//! The kinds of errors that can occur while parsing an equation.

use ariadne::Fmt;
use chalk_attrs::ErrorKind;
use chalk_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of equation",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of equation",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// Expected to see a certain kind of expression here.
///
/// The `expected` field should also contain the word "a" or "an" at the beginning to make the
/// error grammatically correct.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}", expected),
    labels = [format!("I expected to see {} here", expected)],
)]
pub struct ExpectedExpr {
    /// The kind of expression that was expected.
    pub expected: &'static str,
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("found {:?}", found)],
    help = format!(
        "expected {}",
        expected.iter().map(|kind| format!("{:?}", kind)).collect::<Vec<_>>().join(" or "),
    ),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A numeric literal could not be represented as a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid number",
    labels = [format!("`{}` is not a finite number", lexeme)],
)]
pub struct InvalidNumber {
    /// The lexeme of the literal.
    pub lexeme: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// Parentheses with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty parentheses",
    labels = [format!("I expected an {} inside these parentheses", "expression".fg(EXPR))],
)]
pub struct EmptyParenthesis;

/// The source code is an expression, not an equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `=` in equation",
    labels = ["this expression has no other side"],
    help = format!("write both sides of the equation, such as {}", "2*x + 3 = 7".fg(EXPR)),
)]
pub struct MissingEquals;

/// More than one `=` was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "too many `=` in equation",
    labels = ["the first `=` is here", "this `=` starts a third side"],
    help = "an equation has exactly two sides",
)]
pub struct RepeatedEquals;
