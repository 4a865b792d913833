/// Source-level rules.
///
/// Parses the top of the grammar: a source file is any number of `VAL`,
/// `VAR`, and `LIST` globals and `FUN` definitions, in any order. This module
/// owns the [`parse`] entry point.
pub mod source;
/// Statement rules.
///
/// Parses everything that can appear inside a `DO ... END` block: `LET`
/// declarations, `IF`, `SWITCH`, `WHILE`, `RETURN`, assignments, and bare
/// expression statements, each terminated by `;` where the grammar says so.
pub mod statement;
/// Expression rules.
///
/// Parses the precedence ladder, lowest tier first: logical, relational,
/// additive, multiplicative, then primaries. Each tier folds its operators
/// left-associatively over the tier above it.
pub mod expression;

pub use source::parse;

use crate::{
    error::ParseError,
    lexer::{Token, TokenKind},
};

/// The result of one parsing rule.
pub type ParseResult<T> = Result<T, ParseError>;

/// A cursor over the token sequence.
///
/// Rules look ahead with [`peek`](Self::peek) and friends and consume with
/// [`advance`](Self::advance); nothing else about parser state lives outside
/// the call stack. The cursor remembers the end offset of the last token so
/// end-of-input errors still point somewhere useful.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index: usize,
    end: usize,
}

impl TokenStream {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |token| token.offset + token.literal.len());
        Self { tokens, index: 0, end }
    }

    /// Whether any tokens remain.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// The next token, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Whether the next token's literal text is exactly `literal`.
    ///
    /// Keywords are matched this way; a string token's literal keeps its
    /// quotes, so `"VAL"` in the source never collides with the keyword.
    #[must_use]
    pub fn is_literal(&self, literal: &str) -> bool {
        self.peek().is_some_and(|token| token.literal == literal)
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Consumes the next token when its literal is exactly `literal`.
    pub fn take_literal(&mut self, literal: &str) -> bool {
        if self.is_literal(literal) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the next token, which must have the given literal text.
    ///
    /// # Errors
    /// Returns the error produced by [`unexpected`](Self::unexpected) when
    /// the next token differs or the input is exhausted.
    pub fn expect_literal(&mut self, literal: &str, expected: &'static str) -> ParseResult<()> {
        if self.take_literal(literal) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consumes the next token, which must be an identifier, and returns its
    /// text.
    ///
    /// # Errors
    /// Returns the error produced by [`unexpected`](Self::unexpected) when
    /// the next token is not an identifier or the input is exhausted.
    pub fn expect_identifier(&mut self, expected: &'static str) -> ParseResult<String> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.literal.clone();
                self.index += 1;
                Ok(name)
            },
            _ => Err(self.unexpected(expected)),
        }
    }

    /// The offset the next error should point at: the next token's start, or
    /// the end of input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.peek().map_or(self.end, |token| token.offset)
    }

    /// Builds the error for a token that does not fit the current rule.
    #[must_use]
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected,
                found: token.literal.clone(),
                offset: token.offset,
            },
            None => ParseError::UnexpectedEndOfInput { expected, offset: self.end },
        }
    }
}
