use crate::{
    ast::{
        BinaryOperator, Case, Expression, Function, FunctionSignature, Global, Source, Statement,
        Variable,
    },
    error::TypeError,
    scope::Scopes,
    types::Type,
};

/// Checks a parsed source and annotates it, in one post-order pass.
///
/// Every expression node gets its static type, every access its variable
/// binding, and every call its function signature; the interpreter and the
/// generator both read those annotations instead of re-resolving names.
/// Analysis rejects unknown and duplicate names outright; whether a binding
/// may actually be written to is the interpreter's concern, so assigning to a
/// `VAL` passes here and fails at run time.
///
/// # Errors
/// Returns the first [`TypeError`] found, leaving the tree partially
/// annotated.
///
/// # Examples
/// ```
/// use quill::{analyzer::analyze, lexer::lex, parser::parse};
///
/// let tokens = lex("VAL x = 1; FUN main(): Integer DO RETURN x; END").unwrap();
/// let mut source = parse(tokens).unwrap();
/// assert!(analyze(&mut source).is_ok());
/// ```
pub fn analyze(source: &mut Source) -> Result<(), TypeError> {
    Analyzer::new().visit_source(source)
}

struct Analyzer {
    scopes: Scopes<Variable, FunctionSignature>,
    return_type: Type,
}

impl Analyzer {
    fn new() -> Self {
        let mut scopes = Scopes::new();
        for (name, jvm_name, parameter_types, return_type) in builtin_signatures() {
            scopes.define_function(name, parameter_types.len(), FunctionSignature {
                name: name.to_string(),
                jvm_name: jvm_name.to_string(),
                parameter_types,
                return_type,
            });
        }
        Self { scopes, return_type: Type::Any }
    }

    fn visit_source(&mut self, source: &mut Source) -> Result<(), TypeError> {
        // User definitions live in a child of the builtin scope, so a user
        // `main` shadows the fallback instead of colliding with it.
        self.scopes.enter();
        for global in &mut source.globals {
            self.visit_global(global)?;
        }
        // Signatures are bound before any body is visited; recursion and
        // forward references resolve without special cases.
        let mut signatures = Vec::with_capacity(source.functions.len());
        for function in &mut source.functions {
            signatures.push(self.declare_function(function)?);
        }
        for (function, signature) in source.functions.iter_mut().zip(signatures) {
            self.visit_function(function, &signature)?;
        }
        Ok(())
    }

    fn visit_global(&mut self, global: &mut Global) -> Result<(), TypeError> {
        let declared = resolve_annotation(global.type_name.as_deref())?;
        let ty = match &mut global.value {
            Some(value) => {
                let value_type = self.visit_expression(value)?;
                match declared {
                    Some(declared) => {
                        require_assignable(declared, value_type)?;
                        declared
                    },
                    None => value_type,
                }
            },
            None => declared.unwrap_or(Type::Any),
        };
        let variable = Variable { name: global.name.clone(), ty, mutable: global.mutable };
        if !self.scopes.define_variable(&global.name, variable.clone()) {
            return Err(TypeError::DuplicateVariable { name: global.name.clone() });
        }
        global.variable = Some(variable);
        Ok(())
    }

    fn declare_function(&mut self, function: &mut Function) -> Result<FunctionSignature, TypeError> {
        let mut parameter_types = Vec::with_capacity(function.parameter_type_names.len());
        for name in &function.parameter_type_names {
            parameter_types.push(Type::resolve(name)?);
        }
        let return_type = resolve_annotation(function.return_type_name.as_deref())?
            .unwrap_or(Type::Any);
        let signature = FunctionSignature {
            name: function.name.clone(),
            jvm_name: function.name.clone(),
            parameter_types,
            return_type,
        };
        let arity = function.parameters.len();
        if !self.scopes.define_function(&function.name, arity, signature.clone()) {
            return Err(TypeError::DuplicateFunction { name: function.name.clone(), arity });
        }
        function.signature = Some(signature.clone());
        Ok(signature)
    }

    fn visit_function(
        &mut self,
        function: &mut Function,
        signature: &FunctionSignature,
    ) -> Result<(), TypeError> {
        self.scopes.enter();
        self.return_type = signature.return_type;
        for (name, ty) in function.parameters.iter().zip(&signature.parameter_types) {
            let parameter = Variable { name: name.clone(), ty: *ty, mutable: true };
            if !self.scopes.define_variable(name, parameter) {
                self.scopes.exit();
                return Err(TypeError::DuplicateVariable { name: name.clone() });
            }
        }
        let outcome = self.visit_statements(&mut function.statements);
        self.scopes.exit();
        self.return_type = Type::Any;
        outcome
    }

    fn visit_statements(&mut self, statements: &mut [Statement]) -> Result<(), TypeError> {
        for statement in statements {
            self.visit_statement(statement)?;
        }
        Ok(())
    }

    fn visit_block(&mut self, statements: &mut [Statement]) -> Result<(), TypeError> {
        self.scopes.enter();
        let outcome = self.visit_statements(statements);
        self.scopes.exit();
        outcome
    }

    fn visit_statement(&mut self, statement: &mut Statement) -> Result<(), TypeError> {
        match statement {
            Statement::Expression { expression } => {
                self.visit_expression(expression)?;
                Ok(())
            },
            Statement::Declaration { name, type_name, value, variable } => {
                let declared = resolve_annotation(type_name.as_deref())?;
                let value_type = match value {
                    Some(value) => Some(self.visit_expression(value)?),
                    None => None,
                };
                let ty = match (declared, value_type) {
                    (Some(declared), Some(value_type)) => {
                        require_assignable(declared, value_type)?;
                        declared
                    },
                    (Some(declared), None) => declared,
                    (None, Some(value_type)) => value_type,
                    (None, None) => return Err(TypeError::MissingType { name: name.clone() }),
                };
                let binding = Variable { name: name.clone(), ty, mutable: true };
                if !self.scopes.define_variable(name, binding.clone()) {
                    return Err(TypeError::DuplicateVariable { name: name.clone() });
                }
                *variable = Some(binding);
                Ok(())
            },
            Statement::Assignment { receiver, value } => {
                if !matches!(receiver, Expression::Access { .. }) {
                    return Err(TypeError::InvalidReceiver);
                }
                let receiver_type = self.visit_expression(receiver)?;
                let value_type = self.visit_expression(value)?;
                require_assignable(receiver_type, value_type)
            },
            Statement::If { condition, then_statements, else_statements } => {
                let condition_type = self.visit_expression(condition)?;
                require_assignable(Type::Boolean, condition_type)?;
                self.visit_block(then_statements)?;
                self.visit_block(else_statements)
            },
            Statement::Switch { condition, cases } => {
                let condition_type = self.visit_expression(condition)?;
                // The parser always puts the single default last; a hand-built
                // tree gets the same shape enforced here.
                let default_is_last = cases.last().is_some_and(|case| case.value.is_none())
                    && cases.iter().rev().skip(1).all(|case| case.value.is_some());
                if !default_is_last {
                    return Err(TypeError::MissingDefaultCase);
                }
                for Case { value, statements } in cases {
                    if let Some(value) = value {
                        let value_type = self.visit_expression(value)?;
                        require_assignable(condition_type, value_type)?;
                    }
                    self.visit_block(statements)?;
                }
                Ok(())
            },
            Statement::While { condition, statements } => {
                let condition_type = self.visit_expression(condition)?;
                require_assignable(Type::Boolean, condition_type)?;
                self.visit_block(statements)
            },
            Statement::Return { value } => {
                let value_type = self.visit_expression(value)?;
                require_assignable(self.return_type, value_type)
            },
        }
    }

    fn visit_expression(&mut self, expression: &mut Expression) -> Result<Type, TypeError> {
        match expression {
            Expression::Literal { value, ty } => {
                let literal_type = value.static_type();
                *ty = Some(literal_type);
                Ok(literal_type)
            },
            Expression::Group { inner, ty } => {
                let inner_type = self.visit_expression(inner)?;
                *ty = Some(inner_type);
                Ok(inner_type)
            },
            Expression::Binary { operator, left, right, ty } => {
                let left_type = self.visit_expression(left)?;
                let right_type = self.visit_expression(right)?;
                let result = binary_type(*operator, left_type, right_type)?;
                *ty = Some(result);
                Ok(result)
            },
            Expression::Access { name, index, variable } => {
                let binding = self
                    .scopes
                    .lookup_variable(name)
                    .cloned()
                    .ok_or_else(|| TypeError::UnknownVariable { name: name.clone() })?;
                if let Some(index) = index {
                    let index_type = self.visit_expression(index)?;
                    require_assignable(Type::Integer, index_type)?;
                }
                let ty = binding.ty;
                *variable = Some(binding);
                Ok(ty)
            },
            Expression::Call { name, arguments, signature } => {
                let resolved = self
                    .scopes
                    .lookup_function(name, arguments.len())
                    .cloned()
                    .ok_or_else(|| TypeError::UnknownFunction {
                        name: name.clone(),
                        arity: arguments.len(),
                    })?;
                for (argument, parameter_type) in arguments.iter_mut().zip(&resolved.parameter_types) {
                    let argument_type = self.visit_expression(argument)?;
                    require_assignable(*parameter_type, argument_type)?;
                }
                let return_type = resolved.return_type;
                *signature = Some(resolved);
                Ok(return_type)
            },
            Expression::ListLiteral { elements, ty } => {
                let mut element_type = None;
                for element in elements.iter_mut() {
                    let visited = self.visit_expression(element)?;
                    match element_type {
                        None => element_type = Some(visited),
                        Some(first) => require_assignable(first, visited)?,
                    }
                }
                let result = element_type.unwrap_or(Type::Any);
                *ty = Some(result);
                Ok(result)
            },
        }
    }
}

/// The result type of a binary operation, with operand checks.
///
/// Logical operands must be Boolean; relational and equality operands must
/// agree and yield Boolean; arithmetic operands must agree and keep their
/// type, except that `+` concatenates when either side is a String.
fn binary_type(operator: BinaryOperator, left: Type, right: Type) -> Result<Type, TypeError> {
    match operator {
        BinaryOperator::And | BinaryOperator::Or => {
            require_assignable(Type::Boolean, left)?;
            require_assignable(Type::Boolean, right)?;
            Ok(Type::Boolean)
        },
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::Equal
        | BinaryOperator::NotEqual => {
            require_assignable(left, right)?;
            Ok(Type::Boolean)
        },
        BinaryOperator::Add if left == Type::String || right == Type::String => Ok(Type::String),
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Power => {
            require_assignable(left, right)?;
            Ok(left)
        },
    }
}

fn require_assignable(target: Type, ty: Type) -> Result<(), TypeError> {
    if target.is_assignable_from(ty) {
        Ok(())
    } else {
        Err(TypeError::Unassignable { expected: target, actual: ty })
    }
}

fn resolve_annotation(name: Option<&str>) -> Result<Option<Type>, TypeError> {
    name.map(Type::resolve).transpose()
}

/// The builtin functions every program sees: name, generated Java name,
/// parameter types, return type.
fn builtin_signatures() -> [(&'static str, &'static str, Vec<Type>, Type); 4] {
    [
        ("print", "System.out.println", vec![Type::Any], Type::Nil),
        ("main", "main", Vec::new(), Type::Integer),
        ("logarithm", "Math.log", vec![Type::Decimal], Type::Decimal),
        ("converter", "Integer.toString", vec![Type::Integer, Type::Integer], Type::String),
    ]
}
