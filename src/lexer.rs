use logos::Logos;

use crate::error::{LexError, LexErrorKind};

/// The kind of one token, without its text.
///
/// Keywords are not distinguished here: `IF`, `VAL`, `TRUE`, and friends all
/// lex as `Identifier`, and the parser matches them by literal text. The `@`
/// start character and `-` continuation exist so identifiers can name things
/// like `@native` hooks and `list-items` without extra token kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \x08\n\r\t]+")]
pub enum TokenKind {
    /// A name: `[A-Za-z@] [A-Za-z0-9_-]*`.
    #[regex(r"[A-Za-z@][A-Za-z0-9_-]*")]
    Identifier,
    /// An integer literal. Multi-digit literals may not start with `0`.
    #[regex(r"[0-9]+", validate_integer)]
    Integer,
    /// A decimal literal with at least one digit on each side of the point.
    #[regex(r"[0-9]+\.[0-9]+", validate_decimal)]
    #[regex(r"[0-9]+\.", reject_trailing_point)]
    Decimal,
    /// A quoted character: one non-whitespace character or one escape.
    #[regex(r#"'([^'\\ \x08\n\r\t]|\\[bnrt'"\\])'"#)]
    #[regex(r"'", reject_character)]
    Character,
    /// A quoted string; escapes are `\b \n \r \t \' \" \\`.
    #[regex(r#""([^"\\\x08\n\r\t]|\\[bnrt'"\\])*""#)]
    #[regex(r#""([^"\\\x08\n\r\t]|\\[bnrt'"\\])*"#, reject_string)]
    String,
    /// `&&`, `||`, `==`, `!=`, or any single character no other rule claims.
    #[token("&&")]
    #[token("||")]
    #[token("==")]
    #[token("!=")]
    #[regex(r#"[^A-Za-z0-9@'" \x08\n\r\t]"#)]
    Operator,
}

/// One token: its kind, its exact source text, and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The literal text, exactly as it appears in the source. Character and
    /// string literals keep their quotes and escapes.
    pub literal: String,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// Splits source text into tokens, skipping whitespace.
///
/// # Errors
/// Returns a [`LexError`] at the first offset where no token can be formed:
/// an unrecognized character, a number with a leading zero or a dangling
/// decimal point, or a malformed character or string literal.
///
/// # Examples
/// ```
/// use quill::lexer::{lex, TokenKind};
///
/// let tokens = lex("VAL x = 5;").unwrap();
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(tokens[3].kind, TokenKind::Integer);
/// assert_eq!(tokens[3].literal, "5");
/// assert_eq!(tokens[3].offset, 8);
/// ```
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                literal: lexer.slice().to_string(),
                offset: span.start,
            }),
            Err(kind) => return Err(LexError { kind, offset: span.start }),
        }
    }
    Ok(tokens)
}

fn validate_integer(lexer: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexErrorKind> {
    let slice = lexer.slice();
    if slice.len() > 1 && slice.starts_with('0') {
        Err(LexErrorKind::LeadingZero)
    } else {
        Ok(())
    }
}

fn validate_decimal(lexer: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexErrorKind> {
    let slice = lexer.slice();
    let integer_part = slice.split_once('.').map_or(slice, |(integer, _)| integer);
    if integer_part.len() > 1 && integer_part.starts_with('0') {
        Err(LexErrorKind::LeadingZero)
    } else {
        Ok(())
    }
}

fn reject_trailing_point(_: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::TrailingDecimalPoint)
}

fn reject_character(_: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::MalformedCharacter)
}

fn reject_string(_: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::MalformedString)
}
