use crate::{
    ast::{BinaryOperator, Case, Expression, Function, Global, LiteralValue, Source, Statement},
    types::Type,
};

/// Renders an analyzed tree as a Java compilation unit.
///
/// The unit is a `public class Main`: globals become fields (`final` for
/// immutables, array initializers for lists), a static `main(String[] args)`
/// trampoline calls `System.exit(new Main().main());`, and each function
/// becomes a method. Builtins render under their Java names (`print` as
/// `System.out.println`, `logarithm` as `Math.log`, `converter` as
/// `Integer.toString`) and `^` renders as `Math.pow`. Nothing is evaluated
/// and the tree is not changed: generating twice yields identical text.
///
/// # Examples
/// ```
/// use quill::{analyzer::analyze, generator::generate, lexer::lex, parser::parse};
///
/// let tokens = lex("FUN main(): Integer DO RETURN 0; END").unwrap();
/// let mut source = parse(tokens).unwrap();
/// analyze(&mut source).unwrap();
/// let java = generate(&source);
/// assert!(java.contains("int main() {"));
/// assert!(java.contains("return 0;"));
/// ```
#[must_use]
pub fn generate(source: &Source) -> String {
    let mut generator = Generator::new();
    generator.render_source(source);
    generator.output
}

struct Generator {
    output: String,
    indent: usize,
}

impl Generator {
    const fn new() -> Self {
        Self { output: String::new(), indent: 0 }
    }

    fn emit(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Starts a new line at the current indent.
    fn newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    fn blank_line(&mut self) {
        self.output.push('\n');
    }

    fn render_source(&mut self, source: &Source) {
        self.emit("public class Main {");
        self.indent = 1;
        for global in &source.globals {
            self.blank_line();
            self.newline();
            self.render_global(global);
        }
        self.blank_line();
        self.newline();
        self.emit("public static void main(String[] args) {");
        self.indent = 2;
        self.newline();
        self.emit("System.exit(new Main().main());");
        self.indent = 1;
        self.newline();
        self.emit("}");
        for function in &source.functions {
            self.blank_line();
            self.newline();
            self.render_function(function);
        }
        self.indent = 0;
        self.blank_line();
        self.newline();
        self.emit("}");
        self.output.push('\n');
    }

    fn render_global(&mut self, global: &Global) {
        let ty = global.variable.as_ref().map_or(Type::Any, |variable| variable.ty);
        if !global.mutable {
            self.emit("final ");
        }
        match &global.value {
            Some(Expression::ListLiteral { elements, .. }) => {
                self.emit(&format!("{}[] {} = {{", ty.jvm_name(), global.name));
                self.render_arguments(elements);
                self.emit("};");
            },
            Some(value) => {
                self.emit(&format!("{} {} = ", ty.jvm_name(), global.name));
                self.render_expression(value);
                self.emit(";");
            },
            None => {
                self.emit(&format!("{} {};", ty.jvm_name(), global.name));
            },
        }
    }

    fn render_function(&mut self, function: &Function) {
        let (return_type, parameter_types) = match &function.signature {
            Some(signature) => (signature.return_type, signature.parameter_types.clone()),
            None => (Type::Any, vec![Type::Any; function.parameters.len()]),
        };
        self.emit(&format!("{} {}(", return_type.jvm_name(), function.name));
        for (i, (name, ty)) in function.parameters.iter().zip(&parameter_types).enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.emit(&format!("{} {}", ty.jvm_name(), name));
        }
        self.emit(") {");
        self.render_block(&function.statements);
        self.newline();
        self.emit("}");
    }

    /// Renders a statement list indented one level deeper, without the
    /// surrounding braces.
    fn render_block(&mut self, statements: &[Statement]) {
        self.indent += 1;
        for statement in statements {
            self.newline();
            self.render_statement(statement);
        }
        self.indent -= 1;
    }

    fn render_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expression { expression } => {
                self.render_expression(expression);
                self.emit(";");
            },
            Statement::Declaration { name, value, variable, .. } => {
                let ty = variable.as_ref().map_or(Type::Any, |variable| variable.ty);
                self.emit(&format!("{} {}", ty.jvm_name(), name));
                if let Some(value) = value {
                    self.emit(" = ");
                    self.render_expression(value);
                }
                self.emit(";");
            },
            Statement::Assignment { receiver, value } => {
                self.render_expression(receiver);
                self.emit(" = ");
                self.render_expression(value);
                self.emit(";");
            },
            Statement::If { condition, then_statements, else_statements } => {
                self.emit("if (");
                self.render_expression(condition);
                self.emit(") {");
                self.render_block(then_statements);
                self.newline();
                self.emit("}");
                if !else_statements.is_empty() {
                    self.emit(" else {");
                    self.render_block(else_statements);
                    self.newline();
                    self.emit("}");
                }
            },
            Statement::Switch { condition, cases } => {
                self.emit("switch (");
                self.render_expression(condition);
                self.emit(") {");
                self.indent += 1;
                for case in cases {
                    self.newline();
                    self.render_case(case);
                }
                self.indent -= 1;
                self.newline();
                self.emit("}");
            },
            Statement::While { condition, statements } => {
                self.emit("while (");
                self.render_expression(condition);
                self.emit(") {");
                self.render_block(statements);
                self.newline();
                self.emit("}");
            },
            Statement::Return { value } => {
                self.emit("return ");
                self.render_expression(value);
                self.emit(";");
            },
        }
    }

    fn render_case(&mut self, case: &Case) {
        match &case.value {
            Some(value) => {
                self.emit("case ");
                self.render_expression(value);
                self.emit(":");
            },
            None => self.emit("default:"),
        }
        self.render_block(&case.statements);
        // Java falls through; the source language does not.
        if case.value.is_some() {
            self.indent += 1;
            self.newline();
            self.emit("break;");
            self.indent -= 1;
        }
    }

    fn render_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Literal { value, .. } => self.render_literal(value),
            Expression::Group { inner, .. } => {
                self.emit("(");
                self.render_expression(inner);
                self.emit(")");
            },
            Expression::Binary { operator, left, right, .. } => {
                if *operator == BinaryOperator::Power {
                    self.emit("Math.pow(");
                    self.render_expression(left);
                    self.emit(", ");
                    self.render_expression(right);
                    self.emit(")");
                } else {
                    self.render_expression(left);
                    self.emit(&format!(" {operator} "));
                    self.render_expression(right);
                }
            },
            Expression::Access { name, index, .. } => {
                self.emit(name);
                if let Some(index) = index {
                    self.emit("[");
                    self.render_expression(index);
                    self.emit("]");
                }
            },
            Expression::Call { name, arguments, signature } => {
                let jvm_name = signature.as_ref().map_or(name.as_str(), |s| s.jvm_name.as_str());
                self.emit(&format!("{jvm_name}("));
                self.render_arguments(arguments);
                self.emit(")");
            },
            Expression::ListLiteral { elements, .. } => {
                self.emit("{");
                self.render_arguments(elements);
                self.emit("}");
            },
        }
    }

    fn render_arguments(&mut self, expressions: &[Expression]) {
        for (i, expression) in expressions.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.render_expression(expression);
        }
    }

    fn render_literal(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::Nil => self.emit("null"),
            LiteralValue::Boolean(value) => self.emit(&format!("{value}")),
            LiteralValue::Integer(value) => self.emit(&format!("{value}")),
            LiteralValue::Decimal(value) => self.emit(&format!("{value}")),
            LiteralValue::Character(value) => {
                self.emit(&format!("'{}'", escape_character(*value)))
            },
            LiteralValue::String(text) => {
                let escaped: String = text.chars().map(escape_character).collect();
                self.emit(&format!("\"{escaped}\""));
            },
        }
    }
}

/// Re-escapes one character for a Java literal.
fn escape_character(character: char) -> String {
    match character {
        '\u{8}' => "\\b".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\'' => "\\'".to_string(),
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        other => other.to_string(),
    }
}
