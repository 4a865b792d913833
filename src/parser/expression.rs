use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::{BinaryOperator, Expression, LiteralValue},
    error::ParseError,
    lexer::{Token, TokenKind},
    parser::{ParseResult, TokenStream},
};

/// Parses one expression, starting at the lowest precedence tier.
///
/// The ladder is: logical (`&&` `||`) < relational (`<` `>` `==` `!=`) <
/// additive (`+` `-`) < multiplicative (`*` `/` `^`), all left-associative.
pub fn parse_expression(stream: &mut TokenStream) -> ParseResult<Expression> {
    parse_logical(stream)
}

/// Parses logical expressions.
///
/// The rule is: `logical := relational (('&&' | '||') relational)*`
fn parse_logical(stream: &mut TokenStream) -> ParseResult<Expression> {
    let mut left = parse_relational(stream)?;
    loop {
        let operator = match peek_operator(stream) {
            Some(operator @ (BinaryOperator::And | BinaryOperator::Or)) => operator,
            _ => break,
        };
        stream.advance();
        let right = parse_relational(stream)?;
        left = binary(operator, left, right);
    }
    Ok(left)
}

/// Parses relational expressions.
///
/// The rule is: `relational := additive (('<' | '>' | '==' | '!=') additive)*`
fn parse_relational(stream: &mut TokenStream) -> ParseResult<Expression> {
    let mut left = parse_additive(stream)?;
    loop {
        let operator = match peek_operator(stream) {
            Some(
                operator @ (BinaryOperator::Less
                | BinaryOperator::Greater
                | BinaryOperator::Equal
                | BinaryOperator::NotEqual),
            ) => operator,
            _ => break,
        };
        stream.advance();
        let right = parse_additive(stream)?;
        left = binary(operator, left, right);
    }
    Ok(left)
}

/// Parses addition and subtraction.
///
/// The rule is: `additive := multiplicative (('+' | '-') multiplicative)*`
fn parse_additive(stream: &mut TokenStream) -> ParseResult<Expression> {
    let mut left = parse_multiplicative(stream)?;
    loop {
        let operator = match peek_operator(stream) {
            Some(operator @ (BinaryOperator::Add | BinaryOperator::Subtract)) => operator,
            _ => break,
        };
        stream.advance();
        let right = parse_multiplicative(stream)?;
        left = binary(operator, left, right);
    }
    Ok(left)
}

/// Parses multiplication, division, and exponentiation.
///
/// The rule is: `multiplicative := primary (('*' | '/' | '^') primary)*`
fn parse_multiplicative(stream: &mut TokenStream) -> ParseResult<Expression> {
    let mut left = parse_primary(stream)?;
    loop {
        let operator = match peek_operator(stream) {
            Some(
                operator @ (BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Power),
            ) => operator,
            _ => break,
        };
        stream.advance();
        let right = parse_primary(stream)?;
        left = binary(operator, left, right);
    }
    Ok(left)
}

fn peek_operator(stream: &TokenStream) -> Option<BinaryOperator> {
    match stream.peek() {
        Some(token) if token.kind == TokenKind::Operator => {
            BinaryOperator::from_symbol(&token.literal)
        },
        _ => None,
    }
}

fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary { operator, left: Box::new(left), right: Box::new(right), ty: None }
}

/// Parses a primary expression: a literal, a group, a list literal, a call,
/// or a variable or list access. `TRUE`, `FALSE`, and `NIL` are literal
/// keywords matched here.
fn parse_primary(stream: &mut TokenStream) -> ParseResult<Expression> {
    let Some(token) = stream.peek().cloned() else {
        return Err(stream.unexpected("an expression"));
    };
    match token.kind {
        TokenKind::Identifier => match token.literal.as_str() {
            "TRUE" => literal_keyword(stream, LiteralValue::Boolean(true)),
            "FALSE" => literal_keyword(stream, LiteralValue::Boolean(false)),
            "NIL" => literal_keyword(stream, LiteralValue::Nil),
            _ => parse_access_or_call(stream, token),
        },
        TokenKind::Integer => {
            stream.advance();
            let value = parse_number::<BigInt>(&token, "an integer literal")?;
            Ok(Expression::Literal { value: LiteralValue::Integer(value), ty: None })
        },
        TokenKind::Decimal => {
            stream.advance();
            let value = parse_number::<BigDecimal>(&token, "a decimal literal")?;
            Ok(Expression::Literal { value: LiteralValue::Decimal(value), ty: None })
        },
        TokenKind::Character => {
            stream.advance();
            let value = decode_character(&token)?;
            Ok(Expression::Literal { value: LiteralValue::Character(value), ty: None })
        },
        TokenKind::String => {
            stream.advance();
            let inner = &token.literal[1..token.literal.len() - 1];
            Ok(Expression::Literal { value: LiteralValue::String(decode_escapes(inner)), ty: None })
        },
        TokenKind::Operator => match token.literal.as_str() {
            "(" => {
                stream.advance();
                let inner = parse_expression(stream)?;
                stream.expect_literal(")", "')'")?;
                Ok(Expression::Group { inner: Box::new(inner), ty: None })
            },
            "[" => parse_list_literal(stream),
            _ => Err(stream.unexpected("an expression")),
        },
    }
}

fn literal_keyword(stream: &mut TokenStream, value: LiteralValue) -> ParseResult<Expression> {
    stream.advance();
    Ok(Expression::Literal { value, ty: None })
}

/// Parses `name`, `name[index]`, or `name(arguments)` after peeking an
/// identifier.
fn parse_access_or_call(stream: &mut TokenStream, token: Token) -> ParseResult<Expression> {
    stream.advance();
    let name = token.literal;
    if stream.take_literal("(") {
        let mut arguments = Vec::new();
        if !stream.take_literal(")") {
            arguments.push(parse_expression(stream)?);
            while stream.take_literal(",") {
                arguments.push(parse_expression(stream)?);
            }
            stream.expect_literal(")", "')' or ','")?;
        }
        return Ok(Expression::Call { name, arguments, signature: None });
    }
    if stream.take_literal("[") {
        let index = parse_expression(stream)?;
        stream.expect_literal("]", "']'")?;
        return Ok(Expression::Access { name, index: Some(Box::new(index)), variable: None });
    }
    Ok(Expression::Access { name, index: None, variable: None })
}

/// Parses a bracketed list literal in expression position. As with `LIST`
/// initializers, it may not be empty.
fn parse_list_literal(stream: &mut TokenStream) -> ParseResult<Expression> {
    stream.advance();
    if stream.is_literal("]") {
        return Err(ParseError::EmptyList { offset: stream.offset() });
    }
    let mut elements = vec![parse_expression(stream)?];
    while stream.take_literal(",") {
        elements.push(parse_expression(stream)?);
    }
    stream.expect_literal("]", "']' or ','")?;
    Ok(Expression::ListLiteral { elements, ty: None })
}

fn parse_number<T: std::str::FromStr>(token: &Token, expected: &'static str) -> ParseResult<T> {
    token.literal.parse().map_err(|_| ParseError::UnexpectedToken {
        expected,
        found: token.literal.clone(),
        offset: token.offset,
    })
}

fn decode_character(token: &Token) -> ParseResult<char> {
    let inner = &token.literal[1..token.literal.len() - 1];
    let decoded = decode_escapes(inner);
    decoded.chars().next().ok_or_else(|| ParseError::UnexpectedToken {
        expected: "a character literal",
        found: token.literal.clone(),
        offset: token.offset,
    })
}

/// Resolves the escape sequences the lexer admitted: `\b \n \r \t \' \" \\`.
fn decode_escapes(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(character) = chars.next() {
        if character != '\\' {
            decoded.push(character);
            continue;
        }
        match chars.next() {
            Some('b') => decoded.push('\u{8}'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }
    decoded
}
