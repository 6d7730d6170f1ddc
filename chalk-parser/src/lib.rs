//! Parser for the textual notation of equations.
//!
//! An equation is written as two expressions separated by a single `=`, for example
//! `2*x + 3 = 7` or `a*x + a*y = 0`. Expressions support the binary operators `+`, `-`, `*` and
//! `/`, unary negation, parentheses, implicit multiplication (`2x`), numeric literals, symbols,
//! double-quoted strings and function-call notation (`f(a, b)`).
//!
//! Use [`parse_equation`] to turn source text into an [`Equation`] syntax tree.

pub mod parser;
pub mod tokenizer;

pub use parser::{ast::Equation, parse_equation, Parse, Parser};
