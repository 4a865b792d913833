use num_bigint::BigInt;
use quill::{
    ast::{BinaryOperator, Expression, LiteralValue, Source, Statement},
    error::ParseError,
    lexer::lex,
    parser::parse,
};

fn parse_source(source: &str) -> Source {
    let tokens = lex(source).unwrap_or_else(|error| panic!("{source:?} did not lex: {error}"));
    parse(tokens).unwrap_or_else(|error| panic!("{source:?} did not parse: {error}"))
}

fn parse_failure(source: &str) -> ParseError {
    let tokens = lex(source).unwrap_or_else(|error| panic!("{source:?} did not lex: {error}"));
    match parse(tokens) {
        Ok(_) => panic!("{source:?} parsed but should not have"),
        Err(error) => error,
    }
}

/// The single expression of a `FUN main() DO <expression>; END` wrapper.
fn parse_expression(expression: &str) -> Expression {
    let source = parse_source(&format!("FUN main() DO {expression}; END"));
    match source.functions.into_iter().next().map(|f| f.statements.into_iter().next()) {
        Some(Some(Statement::Expression { expression })) => expression,
        other => panic!("expected one expression statement, got {other:?}"),
    }
}

fn integer(value: i64) -> Expression {
    Expression::Literal { value: LiteralValue::Integer(BigInt::from(value)), ty: None }
}

fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary { operator, left: Box::new(left), right: Box::new(right), ty: None }
}

#[test]
fn immutable_global() {
    let source = parse_source("VAL x = 5;");
    assert_eq!(source.globals.len(), 1);
    let global = &source.globals[0];
    assert_eq!(global.name, "x");
    assert!(!global.mutable);
    assert_eq!(global.type_name, None);
    assert_eq!(global.value, Some(integer(5)));
}

#[test]
fn immutable_global_requires_an_initializer() {
    // The error points at the token that should have been the expression.
    let error = parse_failure("VAL x = ;");
    assert_eq!(error.offset(), 8);
    assert!(matches!(error, ParseError::UnexpectedToken { found, .. } if found == ";"));

    let error = parse_failure("VAL x;");
    assert!(matches!(error, ParseError::UnexpectedToken { .. }));
}

#[test]
fn mutable_global_initializer_is_optional() {
    let source = parse_source("VAR x: Integer; VAR y = 1;");
    assert_eq!(source.globals.len(), 2);
    assert!(source.globals[0].value.is_none());
    assert_eq!(source.globals[0].type_name.as_deref(), Some("Integer"));
    assert!(source.globals[1].value.is_some());
}

#[test]
fn list_global() {
    let source = parse_source("LIST nums: Integer = [1, 2, 3];");
    let global = &source.globals[0];
    assert!(global.mutable);
    match &global.value {
        Some(Expression::ListLiteral { elements, .. }) => assert_eq!(elements.len(), 3),
        other => panic!("expected a list literal, got {other:?}"),
    }
}

#[test]
fn empty_list_is_rejected() {
    let error = parse_failure("LIST nums: Integer = [];");
    assert!(matches!(error, ParseError::EmptyList { offset: 22 }));
}

#[test]
fn function_with_parameters_and_return_type() {
    let source = parse_source("FUN area(w: Integer, h: Integer): Integer DO RETURN w * h; END");
    let function = &source.functions[0];
    assert_eq!(function.name, "area");
    assert_eq!(function.parameters, vec!["w", "h"]);
    assert_eq!(function.parameter_type_names, vec!["Integer", "Integer"]);
    assert_eq!(function.return_type_name.as_deref(), Some("Integer"));
    assert_eq!(function.statements.len(), 1);
}

#[test]
fn parameter_type_is_required() {
    let error = parse_failure("FUN f(x) DO END");
    assert!(matches!(error, ParseError::UnexpectedToken { .. }));
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    let expression = parse_expression("1 + 2 * 3");
    assert_eq!(
        expression,
        binary(
            BinaryOperator::Add,
            integer(1),
            binary(BinaryOperator::Multiply, integer(2), integer(3)),
        )
    );
}

#[test]
fn additive_binds_tighter_than_relational() {
    let expression = parse_expression("1 + 2 == 3");
    assert_eq!(
        expression,
        binary(
            BinaryOperator::Equal,
            binary(BinaryOperator::Add, integer(1), integer(2)),
            integer(3),
        )
    );
}

#[test]
fn relational_binds_tighter_than_logical() {
    let expression = parse_expression("1 < 2 && 3 < 4");
    assert_eq!(
        expression,
        binary(
            BinaryOperator::And,
            binary(BinaryOperator::Less, integer(1), integer(2)),
            binary(BinaryOperator::Less, integer(3), integer(4)),
        )
    );
}

#[test]
fn operators_fold_left() {
    let expression = parse_expression("1 - 2 - 3");
    assert_eq!(
        expression,
        binary(
            BinaryOperator::Subtract,
            binary(BinaryOperator::Subtract, integer(1), integer(2)),
            integer(3),
        )
    );
}

#[test]
fn groups_override_precedence() {
    let expression = parse_expression("(1 + 2) * 3");
    match expression {
        Expression::Binary { operator: BinaryOperator::Multiply, left, .. } => {
            assert!(matches!(*left, Expression::Group { .. }));
        },
        other => panic!("expected a multiplication, got {other:?}"),
    }
}

#[test]
fn calls_and_accesses() {
    assert!(matches!(
        parse_expression("f(1, 2)"),
        Expression::Call { name, arguments, .. } if name == "f" && arguments.len() == 2
    ));
    assert!(matches!(
        parse_expression("nums[0]"),
        Expression::Access { name, index: Some(_), .. } if name == "nums"
    ));
    assert!(matches!(
        parse_expression("x"),
        Expression::Access { name, index: None, .. } if name == "x"
    ));
}

#[test]
fn literal_keywords() {
    assert_eq!(
        parse_expression("TRUE"),
        Expression::Literal { value: LiteralValue::Boolean(true), ty: None }
    );
    assert_eq!(
        parse_expression("NIL"),
        Expression::Literal { value: LiteralValue::Nil, ty: None }
    );
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(
        parse_expression("\"a\\n\\\"b\\\"\""),
        Expression::Literal { value: LiteralValue::String("a\n\"b\"".to_string()), ty: None }
    );
    assert_eq!(
        parse_expression("'\\t'"),
        Expression::Literal { value: LiteralValue::Character('\t'), ty: None }
    );
}

#[test]
fn statements_inside_a_block() {
    let source = parse_source(
        "FUN main() DO \
         LET x: Integer = 1; \
         x = 2; \
         IF x == 2 DO print(x); ELSE print(0); END \
         WHILE x < 5 DO x = x + 1; END \
         RETURN x; \
         END",
    );
    let statements = &source.functions[0].statements;
    assert_eq!(statements.len(), 5);
    assert!(matches!(statements[0], Statement::Declaration { .. }));
    assert!(matches!(statements[1], Statement::Assignment { .. }));
    assert!(matches!(statements[2], Statement::If { .. }));
    assert!(matches!(statements[3], Statement::While { .. }));
    assert!(matches!(statements[4], Statement::Return { .. }));
}

#[test]
fn switch_cases_end_with_the_default() {
    let source = parse_source(
        "FUN main() DO SWITCH 2 CASE 1: print(1); CASE 2: print(2); DEFAULT print(0); END END",
    );
    match &source.functions[0].statements[0] {
        Statement::Switch { cases, .. } => {
            assert_eq!(cases.len(), 3);
            assert!(cases[0].value.is_some());
            assert!(cases[1].value.is_some());
            assert!(cases[2].value.is_none());
        },
        other => panic!("expected a switch, got {other:?}"),
    }
}

#[test]
fn switch_requires_a_default() {
    let error = parse_failure("FUN main() DO SWITCH 1 CASE 1: print(1); END END");
    assert!(matches!(error, ParseError::UnexpectedToken { expected, .. } if expected.contains("DEFAULT")));
}

#[test]
fn only_accesses_can_be_assigned_to() {
    let error = parse_failure("FUN main() DO 1 = 2; END");
    assert!(matches!(error, ParseError::InvalidAssignmentTarget { offset: 14 }));
}

#[test]
fn missing_end_reports_end_of_input() {
    let error = parse_failure("FUN main() DO RETURN 1;");
    assert!(matches!(error, ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn stray_top_level_token_is_rejected() {
    let error = parse_failure("VAL x = 5; ;");
    assert!(matches!(error, ParseError::UnexpectedToken { offset: 11, .. }));
}
