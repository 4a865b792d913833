use quill::transpile;

fn java(source: &str) -> String {
    transpile(source).unwrap_or_else(|error| panic!("{source:?} did not transpile: {error}"))
}

#[test]
fn a_whole_unit_renders_exactly() {
    let rendered = java("VAL x = 5; FUN main(): Integer DO RETURN x; END");
    let expected = "\
public class Main {

    final int x = 5;

    public static void main(String[] args) {
        System.exit(new Main().main());
    }

    int main() {
        return x;
    }

}
";
    assert_eq!(rendered, expected);
}

#[test]
fn generation_is_idempotent() {
    let source = "LIST nums: Integer = [1, 2, 3]; \
                  FUN main(): Integer DO \
                  LET total: Integer = 0; \
                  WHILE total < 10 DO total = total + nums[0]; END \
                  RETURN total; \
                  END";
    assert_eq!(java(source), java(source));
}

#[test]
fn immutables_are_final_and_mutables_are_not() {
    let rendered = java("VAL x = 1; VAR y = 2; FUN main(): Integer DO RETURN 0; END");
    assert!(rendered.contains("final int x = 1;"));
    assert!(rendered.contains("\n    int y = 2;"));
}

#[test]
fn lists_render_as_array_initializers() {
    let rendered = java("LIST nums: Integer = [1, 2, 3];");
    assert!(rendered.contains("int[] nums = {1, 2, 3};"));
}

#[test]
fn uninitialized_mutables_render_without_a_value() {
    let rendered = java("VAR flag: Boolean;");
    assert!(rendered.contains("boolean flag;"));
}

#[test]
fn builtins_render_under_their_java_names() {
    let rendered = java(
        "FUN main(): Integer DO \
         print(converter(255, 16)); \
         print(logarithm(1.0)); \
         RETURN 0; \
         END",
    );
    assert!(rendered.contains("System.out.println(Integer.toString(255, 16));"));
    assert!(rendered.contains("System.out.println(Math.log(1.0));"));
}

#[test]
fn user_functions_render_under_their_own_names() {
    let rendered = java(
        "FUN twice(n: Integer): Integer DO RETURN n * 2; END \
         FUN main(): Integer DO RETURN twice(21); END",
    );
    assert!(rendered.contains("int twice(int n) {"));
    assert!(rendered.contains("return twice(21);"));
}

#[test]
fn power_renders_as_math_pow() {
    let rendered = java("FUN main(): Integer DO RETURN 2 ^ 10 + 1; END");
    assert!(rendered.contains("return Math.pow(2, 10) + 1;"));
}

#[test]
fn if_else_renders_with_braced_blocks() {
    let rendered = java(
        "FUN main(): Integer DO \
         IF 1 < 2 DO RETURN 1; ELSE RETURN 2; END \
         END",
    );
    assert!(rendered.contains("if (1 < 2) {"));
    assert!(rendered.contains("} else {"));
}

#[test]
fn switch_cases_break_and_the_default_does_not() {
    let rendered = java(
        "FUN main(): Integer DO \
         LET x: Integer = 1; \
         SWITCH x \
         CASE 1: print(\"one\"); \
         DEFAULT print(\"other\"); \
         END \
         RETURN 0; \
         END",
    );
    let expected = "\
        switch (x) {
            case 1:
                System.out.println(\"one\");
                break;
            default:
                System.out.println(\"other\");
        }";
    assert!(rendered.contains(expected), "rendered:\n{rendered}");
}

#[test]
fn declarations_use_jvm_type_names() {
    let rendered = java(
        "FUN main(): Integer DO \
         LET d: Decimal = 1.5; \
         LET c: Character = 'q'; \
         LET s: String = \"text\"; \
         LET a: Any = NIL; \
         RETURN 0; \
         END",
    );
    assert!(rendered.contains("double d = 1.5;"));
    assert!(rendered.contains("char c = 'q';"));
    assert!(rendered.contains("String s = \"text\";"));
    assert!(rendered.contains("Object a = null;"));
}

#[test]
fn literal_escapes_are_rendered_back() {
    let rendered = java("FUN main(): Integer DO print(\"line\\n\\\"quoted\\\"\"); RETURN 0; END");
    assert!(rendered.contains("System.out.println(\"line\\n\\\"quoted\\\"\");"));
    let rendered = java("FUN main(): Integer DO print('\\t'); RETURN 0; END");
    assert!(rendered.contains("System.out.println('\\t');"));
}

#[test]
fn booleans_and_groups_render_plainly() {
    let rendered = java("FUN main(): Boolean DO RETURN (TRUE || FALSE) && 1 != 2; END");
    assert!(rendered.contains("return (true || false) && 1 != 2;"));
}

#[test]
fn transpiling_never_runs_the_program() {
    // A guaranteed runtime fault still transpiles cleanly.
    let rendered = java("FUN main(): Integer DO RETURN 1 / 0; END");
    assert!(rendered.contains("return 1 / 0;"));
}
