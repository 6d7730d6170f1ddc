pub mod ast;
pub mod error;
pub mod token;

use chalk_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the equation notation. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.current_token() {
            if token.is_whitespace() {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the next non-whitespace token without consuming it.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(error::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse<'source>>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            match self.peek_token() {
                Some(token) if token.kind == delimiter => {
                    self.next_token()?;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The stream is left unchanged if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens (except trailing
    /// whitespace) must be consumed by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();
        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(error::UnclosedParenthesis { opening: false }))
            },
            Some(_) => Err(self.error(error::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse<'source>: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error>;
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// Parses a complete equation from the given source.
pub fn parse_equation(source: &str) -> Result<ast::Equation, Error> {
    Parser::new(source).try_parse_full::<ast::Equation>()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{Literal, LitNum, LitStr, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit: false, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, num(16.0, 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.25");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, num(3.25, 0..4));
    }

    #[test]
    fn literal_str() {
        let mut parser = Parser::new("\"hello world\"");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Literal(Literal::Str(LitStr {
            value: "hello world".to_string(),
            span: 0..13,
        })));
    }

    #[test]
    fn binary_left_associative() {
        let mut parser = Parser::new("a - b + c");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            bin(sym("a", 0..1), BinOpKind::Sub, 2..3, sym("b", 4..5)),
            BinOpKind::Add,
            6..7,
            sym("c", 8..9),
        ));
    }

    #[test]
    fn binary_precedence() {
        let mut parser = Parser::new("1+2*x");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num(1.0, 0..1),
            BinOpKind::Add,
            1..2,
            bin(num(2.0, 2..3), BinOpKind::Mul, 3..4, sym("x", 4..5)),
        ));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("1 + 2x");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num(1.0, 0..1),
            BinOpKind::Add,
            2..3,
            Expr::Binary(Binary {
                lhs: Box::new(num(2.0, 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 5..5 },
                rhs: Box::new(sym("x", 5..6)),
                span: 4..6,
            }),
        ));
    }

    #[test]
    fn unary_binds_tighter_than_product() {
        let mut parser = Parser::new("-a*b");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            Expr::Unary(Unary {
                operand: Box::new(sym("a", 1..2)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
                span: 0..2,
            }),
            BinOpKind::Mul,
            2..3,
            sym("b", 3..4),
        ));
    }

    #[test]
    fn parenthesized() {
        let mut parser = Parser::new("(a+b)/c");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            Expr::Paren(Paren {
                expr: Box::new(bin(sym("a", 1..2), BinOpKind::Add, 2..3, sym("b", 3..4))),
                span: 0..5,
            }),
            BinOpKind::Div,
            5..6,
            sym("c", 6..7),
        ));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("f(x, 2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "f".to_string(), span: 0..1 },
            args: vec![sym("x", 2..3), num(2.0, 5..6)],
            span: 0..7,
            paren_span: 1..7,
        }));
    }

    #[test]
    fn function_call_without_args() {
        let mut parser = Parser::new("g()");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "g".to_string(), span: 0..1 },
            args: Vec::new(),
            span: 0..3,
            paren_span: 1..3,
        }));
    }

    #[test]
    fn equation_sides() {
        let equation = parse_equation("2*x + 3 = 7").unwrap();
        assert_eq!(equation.lhs, bin(
            bin(num(2.0, 0..1), BinOpKind::Mul, 1..2, sym("x", 2..3)),
            BinOpKind::Add,
            4..5,
            num(3.0, 6..7),
        ));
        assert_eq!(equation.rhs, num(7.0, 10..11));
        assert_eq!(equation.span, 0..11);
        assert_eq!(equation.to_string(), "2*x + 3 = 7");
    }

    #[test]
    fn missing_equals() {
        let err = parse_equation("a + b").unwrap_err();
        assert!(err.is::<error::MissingEquals>());
    }

    #[test]
    fn repeated_equals() {
        let err = parse_equation("a = b = c").unwrap_err();
        assert!(err.is::<error::RepeatedEquals>());
        assert_eq!(err.spans, vec![2..3, 6..7]);
    }

    #[test]
    fn unclosed_paren() {
        let err = parse_equation("(a + b = c").unwrap_err();
        assert!(err.is::<error::UnclosedParenthesis>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unopened_paren() {
        let err = parse_equation("a + b) = c").unwrap_err();
        let kind = err.downcast_ref::<error::UnclosedParenthesis>().unwrap();
        assert!(!kind.opening);
    }

    #[test]
    fn empty_paren() {
        let err = parse_equation("() = 1").unwrap_err();
        assert!(err.is::<error::EmptyParenthesis>());
    }

    #[test]
    fn empty_side() {
        assert!(parse_equation("= 1").is_err());
        assert!(parse_equation("x =").is_err());
        assert!(parse_equation("").is_err());
    }

    #[test]
    fn unknown_symbol() {
        assert!(parse_equation("x = $").is_err());
    }
}
