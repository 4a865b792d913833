use crate::{
    ast::{Case, Expression, Statement},
    error::ParseError,
    parser::{expression::parse_expression, source::parse_type_annotation, ParseResult, TokenStream},
};

/// Parses statements up to a block-closing keyword.
///
/// A block ends at `END`, `ELSE`, `CASE`, or `DEFAULT`; the caller consumes
/// whichever of those it expects. Running out of input here is fine, the
/// caller's expectation reports it.
pub fn parse_block(stream: &mut TokenStream) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();
    while stream.has_next() && !closes_block(stream) {
        statements.push(parse_statement(stream)?);
    }
    Ok(statements)
}

fn closes_block(stream: &TokenStream) -> bool {
    stream.is_literal("END")
        || stream.is_literal("ELSE")
        || stream.is_literal("CASE")
        || stream.is_literal("DEFAULT")
}

/// Parses a single statement.
///
/// The rule is: `statement := declaration | if | switch | while | return |
/// expression ('=' expression)? ';'`
pub fn parse_statement(stream: &mut TokenStream) -> ParseResult<Statement> {
    if stream.take_literal("LET") {
        parse_declaration(stream)
    } else if stream.take_literal("IF") {
        parse_if(stream)
    } else if stream.take_literal("SWITCH") {
        parse_switch(stream)
    } else if stream.take_literal("WHILE") {
        parse_while(stream)
    } else if stream.take_literal("RETURN") {
        let value = parse_expression(stream)?;
        stream.expect_literal(";", "';'")?;
        Ok(Statement::Return { value })
    } else {
        parse_expression_or_assignment(stream)
    }
}

/// Parses a `LET` declaration.
///
/// The rule is: `declaration := 'LET' identifier (':' identifier)? ('=' expression)? ';'`
fn parse_declaration(stream: &mut TokenStream) -> ParseResult<Statement> {
    let name = stream.expect_identifier("a variable name")?;
    let type_name = parse_type_annotation(stream)?;
    let value = if stream.take_literal("=") {
        Some(parse_expression(stream)?)
    } else {
        None
    };
    stream.expect_literal(";", "';'")?;
    Ok(Statement::Declaration { name, type_name, value, variable: None })
}

/// Parses an `IF` statement. The `ELSE` block is optional.
///
/// The rule is: `if := 'IF' expression 'DO' block ('ELSE' block)? 'END'`
fn parse_if(stream: &mut TokenStream) -> ParseResult<Statement> {
    let condition = parse_expression(stream)?;
    stream.expect_literal("DO", "'DO'")?;
    let then_statements = parse_block(stream)?;
    let else_statements = if stream.take_literal("ELSE") {
        parse_block(stream)?
    } else {
        Vec::new()
    };
    stream.expect_literal("END", "'END'")?;
    Ok(Statement::If { condition, then_statements, else_statements })
}

/// Parses a `SWITCH` statement. The trailing `DEFAULT` arm is required and
/// becomes the case without a value.
///
/// The rule is: `switch := 'SWITCH' expression ('CASE' expression ':' block)* 'DEFAULT' block 'END'`
fn parse_switch(stream: &mut TokenStream) -> ParseResult<Statement> {
    let condition = parse_expression(stream)?;
    let mut cases = Vec::new();
    while stream.take_literal("CASE") {
        let value = parse_expression(stream)?;
        stream.expect_literal(":", "':'")?;
        let statements = parse_block(stream)?;
        cases.push(Case { value: Some(value), statements });
    }
    stream.expect_literal("DEFAULT", "'CASE' or 'DEFAULT'")?;
    let statements = parse_block(stream)?;
    cases.push(Case { value: None, statements });
    stream.expect_literal("END", "'END'")?;
    Ok(Statement::Switch { condition, cases })
}

/// Parses a `WHILE` loop.
///
/// The rule is: `while := 'WHILE' expression 'DO' block 'END'`
fn parse_while(stream: &mut TokenStream) -> ParseResult<Statement> {
    let condition = parse_expression(stream)?;
    stream.expect_literal("DO", "'DO'")?;
    let statements = parse_block(stream)?;
    stream.expect_literal("END", "'END'")?;
    Ok(Statement::While { condition, statements })
}

/// Parses a bare expression statement, or an assignment when the expression
/// is followed by `=`. Only an access expression can be assigned to.
fn parse_expression_or_assignment(stream: &mut TokenStream) -> ParseResult<Statement> {
    let offset = stream.offset();
    let expression = parse_expression(stream)?;
    if stream.take_literal("=") {
        if !matches!(expression, Expression::Access { .. }) {
            return Err(ParseError::InvalidAssignmentTarget { offset });
        }
        let value = parse_expression(stream)?;
        stream.expect_literal(";", "';'")?;
        return Ok(Statement::Assignment { receiver: expression, value });
    }
    stream.expect_literal(";", "';'")?;
    Ok(Statement::Expression { expression })
}
