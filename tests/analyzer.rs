use num_bigint::BigInt;
use quill::{
    analyzer::analyze,
    ast::{Case, Expression, Function, LiteralValue, Source, Statement},
    error::TypeError,
    lexer::lex,
    parser::parse,
    types::Type,
};

fn analyzed(source: &str) -> Source {
    let tokens = lex(source).unwrap_or_else(|error| panic!("{source:?} did not lex: {error}"));
    let mut tree = parse(tokens).unwrap_or_else(|error| panic!("{source:?} did not parse: {error}"));
    analyze(&mut tree).unwrap_or_else(|error| panic!("{source:?} did not analyze: {error}"));
    tree
}

fn analyze_failure(source: &str) -> TypeError {
    let tokens = lex(source).unwrap_or_else(|error| panic!("{source:?} did not lex: {error}"));
    let mut tree = parse(tokens).unwrap_or_else(|error| panic!("{source:?} did not parse: {error}"));
    match analyze(&mut tree) {
        Ok(()) => panic!("{source:?} analyzed but should not have"),
        Err(error) => error,
    }
}

#[test]
fn globals_satisfy_matching_return_positions() {
    // An untyped global takes its initializer's type, so `x` is an Integer
    // here, not an Any that would fail the exact-match rule.
    analyzed("VAL x = 1; FUN main(): Integer DO RETURN x; END");
}

#[test]
fn annotations_are_written_into_the_tree() {
    let tree = analyzed("VAL x = 1; FUN main(): Integer DO RETURN x; END");
    let global = &tree.globals[0];
    assert_eq!(global.variable.as_ref().map(|variable| variable.ty), Some(Type::Integer));
    assert!(!global.variable.as_ref().is_some_and(|variable| variable.mutable));

    let function = &tree.functions[0];
    assert_eq!(function.signature.as_ref().map(|s| s.return_type), Some(Type::Integer));
    match &function.statements[0] {
        Statement::Return { value } => assert_eq!(value.static_type(), Some(Type::Integer)),
        other => panic!("expected a return, got {other:?}"),
    }
}

#[test]
fn declared_type_must_accept_the_initializer() {
    let error = analyze_failure("FUN main() DO LET x: Integer = 1.0; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::Decimal });
}

#[test]
fn there_is_no_numeric_widening() {
    let error = analyze_failure("FUN main() DO LET x: Decimal = 1; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Decimal, actual: Type::Integer });
}

#[test]
fn any_and_comparable_accept_everything_ordered() {
    analyzed("FUN main() DO LET x: Any = 1.0; LET y: Comparable = 'c'; END");
}

#[test]
fn let_needs_a_type_or_an_initializer() {
    let error = analyze_failure("FUN main() DO LET x; END");
    assert!(matches!(error, TypeError::MissingType { name } if name == "x"));
}

#[test]
fn unknown_names_are_fatal() {
    assert!(matches!(
        analyze_failure("FUN main() DO RETURN y; END"),
        TypeError::UnknownVariable { name } if name == "y"
    ));
    assert!(matches!(
        analyze_failure("FUN main() DO missing(1); END"),
        TypeError::UnknownFunction { name, arity: 1 } if name == "missing"
    ));
    assert!(matches!(
        analyze_failure("FUN main() DO LET x: Number = 1; END"),
        TypeError::UnknownType { name } if name == "Number"
    ));
}

#[test]
fn arity_distinguishes_functions() {
    // print takes one argument; a two-argument call matches nothing.
    let error = analyze_failure("FUN main() DO print(1, 2); END");
    assert!(matches!(error, TypeError::UnknownFunction { arity: 2, .. }));
}

#[test]
fn duplicate_definitions_are_rejected() {
    assert!(matches!(
        analyze_failure("VAL x = 1; VAR x = 2;"),
        TypeError::DuplicateVariable { name } if name == "x"
    ));
    assert!(matches!(
        analyze_failure("FUN f(): Integer DO RETURN 1; END FUN f(): Integer DO RETURN 2; END"),
        TypeError::DuplicateFunction { name, arity: 0 } if name == "f"
    ));
}

#[test]
fn user_main_shadows_the_builtin() {
    analyzed("FUN main(): Integer DO RETURN 1; END");
}

#[test]
fn conditions_must_be_boolean() {
    let error = analyze_failure("FUN main() DO IF 1 DO print(1); END END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Boolean, actual: Type::Integer });
    let error = analyze_failure("FUN main() DO WHILE \"x\" DO print(1); END END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Boolean, actual: Type::String });
}

#[test]
fn logical_operands_must_be_boolean() {
    let error = analyze_failure("FUN main() DO RETURN 1 && TRUE; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Boolean, actual: Type::Integer });
}

#[test]
fn relational_results_are_boolean() {
    analyzed("FUN main() DO LET b: Boolean = 1 < 2 && 3 == 3; END");
}

#[test]
fn concatenation_takes_either_side() {
    analyzed("FUN main(): String DO RETURN \"n = \" + 1; END");
    analyzed("FUN main(): String DO RETURN 1.5 + \"!\"; END");
}

#[test]
fn mixed_arithmetic_is_rejected() {
    let error = analyze_failure("FUN main() DO RETURN 1 + 2.0; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::Decimal });
}

#[test]
fn return_values_must_match_the_declared_type() {
    let error = analyze_failure("FUN main(): Integer DO RETURN \"s\"; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::String });
    // No declared type means Any, which accepts anything.
    analyzed("FUN main() DO RETURN \"s\"; END");
}

#[test]
fn assigning_to_an_immutable_passes_analysis() {
    // Mutability is the interpreter's check, not the analyzer's.
    analyzed("VAL x = 1; FUN main() DO x = 2; END");
}

#[test]
fn assigned_values_must_match_the_receiver_type() {
    let error = analyze_failure("VAR x = 1; FUN main() DO x = \"s\"; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::String });
}

#[test]
fn recursion_and_forward_references_resolve() {
    analyzed(
        "FUN fact(n: Integer): Integer DO \
         IF n < 2 DO RETURN 1; END \
         RETURN n * fact(n - 1); \
         END",
    );
    analyzed(
        "FUN first(): Integer DO RETURN second(); END \
         FUN second(): Integer DO RETURN 1; END",
    );
}

#[test]
fn block_scopes_do_not_leak() {
    let error = analyze_failure(
        "FUN main() DO IF TRUE DO LET x: Integer = 1; END RETURN x; END",
    );
    assert!(matches!(error, TypeError::UnknownVariable { name } if name == "x"));
}

#[test]
fn callees_cannot_see_caller_locals() {
    let error = analyze_failure(
        "FUN f(): Integer DO RETURN y; END \
         FUN main(): Integer DO LET y: Integer = 1; RETURN f(); END",
    );
    assert!(matches!(error, TypeError::UnknownVariable { name } if name == "y"));
}

#[test]
fn shadowing_in_an_inner_scope_is_allowed() {
    analyzed("VAL x = 1; FUN main() DO LET x: String = \"s\"; print(x); END");
}

#[test]
fn list_elements_must_share_a_type() {
    let error = analyze_failure("LIST xs = [1, \"a\"];");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::String });
    let tree = analyzed("LIST xs = [1, 2, 3];");
    assert_eq!(tree.globals[0].variable.as_ref().map(|variable| variable.ty), Some(Type::Integer));
}

#[test]
fn list_indices_must_be_integers() {
    let error = analyze_failure("LIST xs = [1, 2]; FUN main(): Integer DO RETURN xs[\"0\"]; END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::String });
}

#[test]
fn a_switch_needs_its_default_case_last() {
    // The grammar guarantees this shape, so the degenerate trees have to be
    // built by hand.
    let integer = |value: i64| Expression::Literal {
        value: LiteralValue::Integer(BigInt::from(value)),
        ty: None,
    };
    let switch_main = |cases: Vec<Case>| Source {
        globals: Vec::new(),
        functions: vec![Function {
            name: "main".to_string(),
            parameters: Vec::new(),
            parameter_type_names: Vec::new(),
            return_type_name: None,
            statements: vec![Statement::Switch { condition: integer(1), cases }],
            signature: None,
        }],
    };

    let mut no_default = switch_main(vec![Case {
        value: Some(integer(1)),
        statements: Vec::new(),
    }]);
    assert_eq!(analyze(&mut no_default), Err(TypeError::MissingDefaultCase));

    let mut default_first = switch_main(vec![
        Case { value: None, statements: Vec::new() },
        Case { value: Some(integer(1)), statements: Vec::new() },
    ]);
    assert_eq!(analyze(&mut default_first), Err(TypeError::MissingDefaultCase));

    let mut empty = switch_main(Vec::new());
    assert_eq!(analyze(&mut empty), Err(TypeError::MissingDefaultCase));
}

#[test]
fn switch_cases_must_match_the_condition_type() {
    let error = analyze_failure(
        "FUN main() DO SWITCH 1 CASE \"a\": print(1); DEFAULT print(0); END END",
    );
    assert_eq!(error, TypeError::Unassignable { expected: Type::Integer, actual: Type::String });
}

#[test]
fn builtin_signatures_are_enforced() {
    let error = analyze_failure("FUN main() DO logarithm(1); END");
    assert_eq!(error, TypeError::Unassignable { expected: Type::Decimal, actual: Type::Integer });
    analyzed("FUN main(): String DO RETURN converter(255, 16); END");
}

#[test]
fn call_arguments_are_annotated_against_parameters() {
    let tree = analyzed("FUN twice(n: Integer): Integer DO RETURN n * 2; END \
                         FUN main(): Integer DO RETURN twice(21); END");
    match &tree.functions[1].statements[0] {
        Statement::Return { value } => match value {
            Expression::Call { signature, .. } => {
                let signature = signature.as_ref().expect("call should be annotated");
                assert_eq!(signature.parameter_types, vec![Type::Integer]);
                assert_eq!(signature.return_type, Type::Integer);
            },
            other => panic!("expected a call, got {other:?}"),
        },
        other => panic!("expected a return, got {other:?}"),
    }
}
