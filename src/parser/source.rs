use crate::{
    ast::{Expression, Function, Global, Source},
    error::ParseError,
    lexer::Token,
    parser::{expression::parse_expression, statement::parse_block, ParseResult, TokenStream},
};

/// Parses a whole source file.
///
/// The rule is: `source := (global | function)*` where a global starts with
/// `VAL`, `VAR`, or `LIST` and a function with `FUN`.
///
/// # Errors
/// Returns a `ParseError` at the first token that fits no rule.
///
/// # Examples
/// ```
/// use quill::{lexer::lex, parser::parse};
///
/// let tokens = lex("VAL x = 5; FUN main(): Integer DO RETURN x; END").unwrap();
/// let source = parse(tokens).unwrap();
/// assert_eq!(source.globals.len(), 1);
/// assert_eq!(source.functions.len(), 1);
/// ```
pub fn parse(tokens: Vec<Token>) -> ParseResult<Source> {
    let mut stream = TokenStream::new(tokens);
    let mut globals = Vec::new();
    let mut functions = Vec::new();
    while stream.has_next() {
        if stream.take_literal("VAL") {
            globals.push(parse_immutable(&mut stream)?);
        } else if stream.take_literal("VAR") {
            globals.push(parse_mutable(&mut stream)?);
        } else if stream.take_literal("LIST") {
            globals.push(parse_list(&mut stream)?);
        } else if stream.take_literal("FUN") {
            functions.push(parse_function(&mut stream)?);
        } else {
            return Err(stream.unexpected("a global declaration or a function definition"));
        }
    }
    Ok(Source { globals, functions })
}

/// Parses a `VAL` global. The initializer is required.
///
/// The rule is: `immutable := 'VAL' identifier (':' identifier)? '=' expression ';'`
fn parse_immutable(stream: &mut TokenStream) -> ParseResult<Global> {
    let name = stream.expect_identifier("a variable name")?;
    let type_name = parse_type_annotation(stream)?;
    stream.expect_literal("=", "'=' and an initializer")?;
    let value = parse_expression(stream)?;
    stream.expect_literal(";", "';'")?;
    Ok(Global { name, type_name, mutable: false, value: Some(value), variable: None })
}

/// Parses a `VAR` global. The initializer is optional; without one the
/// variable starts out Nil.
///
/// The rule is: `mutable := 'VAR' identifier (':' identifier)? ('=' expression)? ';'`
fn parse_mutable(stream: &mut TokenStream) -> ParseResult<Global> {
    let name = stream.expect_identifier("a variable name")?;
    let type_name = parse_type_annotation(stream)?;
    let value = if stream.take_literal("=") {
        Some(parse_expression(stream)?)
    } else {
        None
    };
    stream.expect_literal(";", "';'")?;
    Ok(Global { name, type_name, mutable: true, value, variable: None })
}

/// Parses a `LIST` global. The bracketed initializer is required and may not
/// be empty.
///
/// The rule is: `list := 'LIST' identifier (':' identifier)? '=' '[' expression (',' expression)* ']' ';'`
fn parse_list(stream: &mut TokenStream) -> ParseResult<Global> {
    let name = stream.expect_identifier("a list name")?;
    let type_name = parse_type_annotation(stream)?;
    stream.expect_literal("=", "'=' and a bracketed initializer")?;
    stream.expect_literal("[", "'['")?;
    if stream.is_literal("]") {
        return Err(ParseError::EmptyList { offset: stream.offset() });
    }
    let mut elements = vec![parse_expression(stream)?];
    while stream.take_literal(",") {
        elements.push(parse_expression(stream)?);
    }
    stream.expect_literal("]", "']' or ','")?;
    stream.expect_literal(";", "';'")?;
    let value = Expression::ListLiteral { elements, ty: None };
    Ok(Global { name, type_name, mutable: true, value: Some(value), variable: None })
}

/// Parses a `FUN` definition.
///
/// The rule is: `function := 'FUN' identifier '(' (identifier ':' identifier (',' identifier ':' identifier)*)? ')' (':' identifier)? 'DO' block 'END'`
fn parse_function(stream: &mut TokenStream) -> ParseResult<Function> {
    let name = stream.expect_identifier("a function name")?;
    stream.expect_literal("(", "'('")?;
    let mut parameters = Vec::new();
    let mut parameter_type_names = Vec::new();
    if !stream.take_literal(")") {
        loop {
            parameters.push(stream.expect_identifier("a parameter name")?);
            stream.expect_literal(":", "':' and a parameter type")?;
            parameter_type_names.push(stream.expect_identifier("a parameter type")?);
            if !stream.take_literal(",") {
                break;
            }
        }
        stream.expect_literal(")", "')' or ','")?;
    }
    let return_type_name = parse_type_annotation(stream)?;
    stream.expect_literal("DO", "'DO'")?;
    let statements = parse_block(stream)?;
    stream.expect_literal("END", "'END'")?;
    Ok(Function {
        name,
        parameters,
        parameter_type_names,
        return_type_name,
        statements,
        signature: None,
    })
}

/// Parses an optional `: Type` annotation, returning the type name.
pub(super) fn parse_type_annotation(stream: &mut TokenStream) -> ParseResult<Option<String>> {
    if stream.take_literal(":") {
        Ok(Some(stream.expect_identifier("a type name")?))
    } else {
        Ok(None)
    }
}
