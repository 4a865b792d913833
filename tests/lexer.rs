use quill::{
    error::LexErrorKind,
    lexer::{lex, Token, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().into_iter().map(|token| token.kind).collect()
}

fn literals(source: &str) -> Vec<String> {
    lex(source).unwrap().into_iter().map(|token| token.literal).collect()
}

fn failure(source: &str, kind: LexErrorKind, offset: usize) {
    let error = lex(source).unwrap_err();
    assert_eq!(error.kind, kind, "wrong error kind for {source:?}");
    assert_eq!(error.offset, offset, "wrong offset for {source:?}");
}

#[test]
fn declaration_tokens() {
    let tokens = lex("VAL x = 5;").unwrap();
    let expected = [
        (TokenKind::Identifier, "VAL", 0),
        (TokenKind::Identifier, "x", 4),
        (TokenKind::Operator, "=", 6),
        (TokenKind::Integer, "5", 8),
        (TokenKind::Operator, ";", 9),
    ];
    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, literal, offset)) in tokens.iter().zip(expected) {
        assert_eq!(token, &Token { kind, literal: literal.to_string(), offset });
    }
}

#[test]
fn identifiers_allow_at_underscore_and_hyphen() {
    assert_eq!(literals("@native list-items snake_case x2"), vec![
        "@native",
        "list-items",
        "snake_case",
        "x2"
    ]);
    assert_eq!(kinds("@native list-items snake_case x2"), vec![
        TokenKind::Identifier;
        4
    ]);
}

#[test]
fn identifiers_may_not_start_with_digits_or_underscore() {
    // "1abc" splits instead of erroring: an integer, then an identifier.
    assert_eq!(kinds("1abc"), vec![TokenKind::Integer, TokenKind::Identifier]);
    // A leading underscore is an operator character.
    assert_eq!(kinds("_x"), vec![TokenKind::Operator, TokenKind::Identifier]);
}

#[test]
fn numbers() {
    assert_eq!(kinds("0 7 123"), vec![TokenKind::Integer; 3]);
    assert_eq!(kinds("0.5 12.25"), vec![TokenKind::Decimal; 2]);
}

#[test]
fn leading_zero_is_rejected() {
    failure("01", LexErrorKind::LeadingZero, 0);
    failure("x = 007;", LexErrorKind::LeadingZero, 4);
    failure("05.2", LexErrorKind::LeadingZero, 0);
}

#[test]
fn trailing_decimal_point_is_rejected() {
    failure("1.", LexErrorKind::TrailingDecimalPoint, 0);
    failure("VAL x = 25.;", LexErrorKind::TrailingDecimalPoint, 8);
}

#[test]
fn character_literals() {
    assert_eq!(kinds("'a' '0' '\\n' '\\''"), vec![TokenKind::Character; 4]);
    // The literal text keeps its quotes and escapes.
    assert_eq!(literals("'\\t'"), vec!["'\\t'"]);
}

#[test]
fn malformed_character_literals() {
    failure("''", LexErrorKind::MalformedCharacter, 0);
    failure("'ab'", LexErrorKind::MalformedCharacter, 0);
    failure("' '", LexErrorKind::MalformedCharacter, 0);
    failure("'x", LexErrorKind::MalformedCharacter, 0);
    failure("'\\z'", LexErrorKind::MalformedCharacter, 0);
}

#[test]
fn string_literals() {
    assert_eq!(kinds("\"\" \"hello\" \"a\\\"b\""), vec![TokenKind::String; 3]);
    assert_eq!(literals("\"tab\\t\""), vec!["\"tab\\t\""]);
}

#[test]
fn malformed_string_literals() {
    failure("\"unterminated", LexErrorKind::MalformedString, 0);
    failure("x = \"bad\\escape\";", LexErrorKind::MalformedString, 4);
}

#[test]
fn two_character_operators_match_greedily() {
    assert_eq!(literals("&& || == != = ! & |"), vec![
        "&&", "||", "==", "!=", "=", "!", "&", "|"
    ]);
    // Three in a row: the pair first, then the leftover single.
    assert_eq!(literals("&&&"), vec!["&&", "&"]);
    assert_eq!(literals("1==2"), vec!["1", "==", "2"]);
}

#[test]
fn whitespace_only_offsets() {
    let tokens = lex("  \t\n x").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].offset, 5);
}

#[test]
fn empty_input_lexes_to_nothing() {
    assert!(lex("").unwrap().is_empty());
    assert!(lex(" \n\t ").unwrap().is_empty());
}
