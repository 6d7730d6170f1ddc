pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Every character is matched by some token kind (unknown characters become
/// [`TokenKind::Symbol`]), so the whole input is always consumed.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_equation() {
        compare_tokens(
            "2 + x = 5",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "5"),
            ],
        );
    }

    #[test]
    fn compact_equation() {
        compare_tokens(
            "a*x-1.5/y=f(b,\"s t\")",
            [
                (TokenKind::Name, "a"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "x"),
                (TokenKind::Sub, "-"),
                (TokenKind::Float, "1.5"),
                (TokenKind::Div, "/"),
                (TokenKind::Name, "y"),
                (TokenKind::Assign, "="),
                (TokenKind::Name, "f"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "b"),
                (TokenKind::Comma, ","),
                (TokenKind::Quote, "\"s t\""),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_and_symbols() {
        compare_tokens(
            "3x2 $",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Name, "x2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn complete_spans() {
        let tokens = tokenize_complete("ab = 10");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..2, 2..3, 3..4, 4..5, 5..7]);
    }
}
