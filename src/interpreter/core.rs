use std::io::Write;

use crate::{
    ast::{BinaryOperator, Case, Expression, Function, Global, Source, Statement},
    error::RuntimeError,
    interpreter::{
        binary,
        builtin::{self, Builtin},
    },
    scope::{ScopeId, Scopes},
    value::Value,
};

/// The result of one evaluation step.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// What executing a statement did to control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues; the statement produced this value.
    Normal(Value),
    /// A `RETURN` is unwinding to the enclosing call with this value.
    Return(Value),
}

/// A runtime variable cell.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The current value.
    pub value: Value,
    /// Whether assignment may replace the value.
    pub mutable: bool,
}

/// What a function name is bound to at run time.
#[derive(Debug, Clone, Copy)]
pub enum Callable<'src> {
    /// A builtin function.
    Native(Builtin),
    /// A `FUN` definition.
    Defined {
        /// The definition, borrowed from the tree being run.
        function: &'src Function,
        /// The scope the definition was evaluated in. Call scopes parent to
        /// this, never to the caller's scope.
        scope: ScopeId,
    },
}

/// Walks an analyzed tree and executes it.
///
/// The interpreter dispatches on runtime value tags, independent of the
/// analyzer's verdicts: an `Any`-typed program that adds a Boolean to an
/// Integer passes analysis and fails here. `print` output goes to the `out`
/// sink, one line per call.
pub struct Interpreter<'src, W: Write> {
    scopes: Scopes<Binding, Callable<'src>>,
    out: W,
}

impl<'src, W: Write> Interpreter<'src, W> {
    /// Creates an interpreter with only the builtins bound.
    pub fn new(out: W) -> Self {
        let mut scopes = Scopes::new();
        scopes.define_function("print", 1, Callable::Native(Builtin::Print));
        scopes.define_function("main", 0, Callable::Native(Builtin::Main));
        scopes.define_function("logarithm", 1, Callable::Native(Builtin::Logarithm));
        scopes.define_function("converter", 2, Callable::Native(Builtin::Converter));
        Self { scopes, out }
    }

    /// Runs a source: evaluates the globals in order, binds the functions,
    /// then calls `main()` and returns its value.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised; evaluation stops there.
    pub fn interpret(&mut self, source: &'src Source) -> EvalResult<Value> {
        // Program definitions live in a child of the builtin scope, so a
        // user-defined main() shadows the fallback.
        self.scopes.enter();
        let program = self.scopes.current();
        for global in &source.globals {
            self.define_global(global)?;
        }
        for function in &source.functions {
            let callable = Callable::Defined { function, scope: program };
            let arity = function.parameters.len();
            if !self.scopes.define_function(&function.name, arity, callable) {
                return Err(RuntimeError::Redefined { name: function.name.clone() });
            }
        }
        self.invoke("main", Vec::new())
    }

    fn define_global(&mut self, global: &'src Global) -> EvalResult<()> {
        let value = match &global.value {
            Some(value) => self.eval(value)?,
            None => Value::Nil,
        };
        let binding = Binding { value, mutable: global.mutable };
        if self.scopes.define_variable(&global.name, binding) {
            Ok(())
        } else {
            Err(RuntimeError::Redefined { name: global.name.clone() })
        }
    }

    /// Calls a function by name with already-evaluated arguments.
    fn invoke(&mut self, name: &str, arguments: Vec<Value>) -> EvalResult<Value> {
        let callable = match self.scopes.lookup_function(name, arguments.len()) {
            Some(callable) => *callable,
            None => {
                return Err(RuntimeError::UnknownFunction {
                    name: name.to_string(),
                    arity: arguments.len(),
                });
            },
        };
        match callable {
            Callable::Native(builtin) => self.call_builtin(builtin, &arguments),
            Callable::Defined { function, scope } => {
                let caller = self.scopes.current();
                self.scopes.enter_at(scope);
                let result = self.run_function(function, arguments);
                self.scopes.exit_to(caller);
                result
            },
        }
    }

    /// Runs a defined function's body in the current (fresh) call scope.
    ///
    /// Without a `RETURN`, the function's value is the value of the last
    /// statement its body executed, or Nil for an empty body.
    fn run_function(&mut self, function: &'src Function, arguments: Vec<Value>) -> EvalResult<Value> {
        for (name, value) in function.parameters.iter().zip(arguments) {
            let binding = Binding { value, mutable: true };
            if !self.scopes.define_variable(name, binding) {
                return Err(RuntimeError::Redefined { name: name.clone() });
            }
        }
        let mut last = Value::Nil;
        for statement in &function.statements {
            match self.exec_statement(statement)? {
                Flow::Normal(value) => last = value,
                Flow::Return(value) => return Ok(value),
            }
        }
        Ok(last)
    }

    fn call_builtin(&mut self, builtin: Builtin, arguments: &[Value]) -> EvalResult<Value> {
        match builtin {
            Builtin::Print => {
                writeln!(self.out, "{}", arguments[0])
                    .map_err(|error| RuntimeError::Output { message: error.to_string() })?;
                Ok(Value::Nil)
            },
            Builtin::Main => Ok(Value::from(0)),
            Builtin::Logarithm => builtin::logarithm(&arguments[0]),
            Builtin::Converter => builtin::converter(&arguments[0], &arguments[1]),
        }
    }

    fn exec_statement(&mut self, statement: &'src Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expression } => Ok(Flow::Normal(self.eval(expression)?)),
            Statement::Declaration { name, value, .. } => {
                let value = match value {
                    Some(value) => self.eval(value)?,
                    None => Value::Nil,
                };
                if self.scopes.define_variable(name, Binding { value, mutable: true }) {
                    Ok(Flow::Normal(Value::Nil))
                } else {
                    Err(RuntimeError::Redefined { name: name.clone() })
                }
            },
            Statement::Assignment { receiver, value } => {
                let value = self.eval(value)?;
                self.assign(receiver, value)?;
                Ok(Flow::Normal(Value::Nil))
            },
            Statement::If { condition, then_statements, else_statements } => {
                if self.eval(condition)?.as_boolean()? {
                    self.exec_block(then_statements)
                } else {
                    self.exec_block(else_statements)
                }
            },
            Statement::Switch { condition, cases } => self.exec_switch(condition, cases),
            Statement::While { condition, statements } => {
                while self.eval(condition)?.as_boolean()? {
                    if let Flow::Return(value) = self.exec_block(statements)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal(Value::Nil))
            },
            Statement::Return { value } => Ok(Flow::Return(self.eval(value)?)),
        }
    }

    /// Runs the first case whose value equals the condition, or the default.
    /// Cases never fall through.
    fn exec_switch(&mut self, condition: &'src Expression, cases: &'src [Case]) -> EvalResult<Flow> {
        let condition = self.eval(condition)?;
        for case in cases {
            let chosen = match &case.value {
                Some(value) => {
                    let value = self.eval(value)?;
                    binary::equals(BinaryOperator::Equal, &condition, &value)?
                },
                None => true,
            };
            if chosen {
                return self.exec_block(&case.statements);
            }
        }
        Ok(Flow::Normal(Value::Nil))
    }

    /// Runs statements in a fresh child scope; the block's value is Nil.
    fn exec_block(&mut self, statements: &'src [Statement]) -> EvalResult<Flow> {
        self.scopes.enter();
        let flow = self.exec_statements(statements);
        self.scopes.exit();
        flow
    }

    fn exec_statements(&mut self, statements: &'src [Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.exec_statement(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal(Value::Nil))
    }

    fn assign(&mut self, receiver: &'src Expression, value: Value) -> EvalResult<()> {
        let Expression::Access { name, index, .. } = receiver else {
            return Err(RuntimeError::InvalidArgument {
                details: "Only a variable or a list element can be assigned to.".to_string(),
            });
        };
        match index {
            Some(index) => {
                let index = self.eval(index)?;
                let Some(binding) = self.scopes.lookup_variable(name) else {
                    return Err(RuntimeError::UnknownVariable { name: name.clone() });
                };
                if !binding.mutable {
                    return Err(RuntimeError::NotMutable { name: name.clone() });
                }
                let Value::List(list) = binding.value.clone() else {
                    return Err(RuntimeError::ExpectedList { found: binding.value.tag() });
                };
                let position = list_position(&index, list.borrow().len())?;
                list.borrow_mut()[position] = value;
                Ok(())
            },
            None => {
                let Some(binding) = self.scopes.lookup_variable_mut(name) else {
                    return Err(RuntimeError::UnknownVariable { name: name.clone() });
                };
                if !binding.mutable {
                    return Err(RuntimeError::NotMutable { name: name.clone() });
                }
                binding.value = value;
                Ok(())
            },
        }
    }

    fn eval(&mut self, expression: &'src Expression) -> EvalResult<Value> {
        match expression {
            Expression::Literal { value, .. } => Ok(Value::from(value)),
            Expression::Group { inner, .. } => self.eval(inner),
            Expression::Binary { operator, left, right, .. } => {
                match operator {
                    // The right operand must not run once the result is known.
                    BinaryOperator::And => {
                        if self.eval(left)?.as_boolean()? {
                            Ok(Value::Boolean(self.eval(right)?.as_boolean()?))
                        } else {
                            Ok(Value::Boolean(false))
                        }
                    },
                    BinaryOperator::Or => {
                        if self.eval(left)?.as_boolean()? {
                            Ok(Value::Boolean(true))
                        } else {
                            Ok(Value::Boolean(self.eval(right)?.as_boolean()?))
                        }
                    },
                    _ => {
                        let left = self.eval(left)?;
                        let right = self.eval(right)?;
                        binary::apply(*operator, left, right)
                    },
                }
            },
            Expression::Access { name, index, .. } => {
                let Some(binding) = self.scopes.lookup_variable(name) else {
                    return Err(RuntimeError::UnknownVariable { name: name.clone() });
                };
                let value = binding.value.clone();
                match index {
                    Some(index) => {
                        let Value::List(list) = value else {
                            return Err(RuntimeError::ExpectedList { found: value.tag() });
                        };
                        let index = self.eval(index)?;
                        let elements = list.borrow();
                        let position = list_position(&index, elements.len())?;
                        Ok(elements[position].clone())
                    },
                    None => Ok(value),
                }
            },
            Expression::Call { name, arguments, .. } => {
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.eval(argument)?);
                }
                self.invoke(name, values)
            },
            Expression::ListLiteral { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element)?);
                }
                Ok(Value::from(values))
            },
        }
    }
}

/// Converts an index value into a position inside a list of length `len`.
///
/// Negative and past-the-end indices are fatal; there is no clamping and no
/// wraparound.
fn list_position(index: &Value, len: usize) -> EvalResult<usize> {
    use num_traits::ToPrimitive;

    let Value::Integer(index) = index else {
        return Err(RuntimeError::ExpectedInteger { found: index.tag() });
    };
    index
        .to_usize()
        .filter(|position| *position < len)
        .ok_or_else(|| RuntimeError::IndexOutOfBounds { index: index.clone(), len })
}
