use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::types::Type;

/// A whole compilation unit: globals first, then function definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Top-level `VAL`, `VAR`, and `LIST` declarations, in source order.
    pub globals: Vec<Global>,
    /// Top-level `FUN` definitions, in source order.
    pub functions: Vec<Function>,
}

/// A top-level variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    /// The declared name.
    pub name: String,
    /// The type annotation as written, if any.
    pub type_name: Option<String>,
    /// `false` for `VAL`, `true` for `VAR` and `LIST`.
    pub mutable: bool,
    /// The initializer. Always present for `VAL` and `LIST`.
    pub value: Option<Expression>,
    /// Binding resolved by the analyzer.
    pub variable: Option<Variable>,
}

/// A `FUN` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name.
    pub name: String,
    /// Parameter names, in order.
    pub parameters: Vec<String>,
    /// Parameter type names as written, parallel to `parameters`.
    pub parameter_type_names: Vec<String>,
    /// The return type name as written, if any.
    pub return_type_name: Option<String>,
    /// The body.
    pub statements: Vec<Statement>,
    /// Signature resolved by the analyzer.
    pub signature: Option<FunctionSignature>,
}

#[derive(Debug, Clone, PartialEq)]
/// One statement inside a function body or nested block.
pub enum Statement {
    /// An expression evaluated for its value or effect.
    Expression {
        /// The expression.
        expression: Expression,
    },
    /// A `LET` declaration.
    Declaration {
        /// The declared name.
        name: String,
        /// The type annotation as written, if any.
        type_name: Option<String>,
        /// The initializer, if any.
        value: Option<Expression>,
        /// Binding resolved by the analyzer.
        variable: Option<Variable>,
    },
    /// An assignment to a variable or list element.
    Assignment {
        /// The target; always an access expression.
        receiver: Expression,
        /// The value assigned.
        value: Expression,
    },
    /// An `IF` statement, with an optional `ELSE` block.
    If {
        /// The condition; must be Boolean.
        condition: Expression,
        /// Statements run when the condition holds.
        then_statements: Vec<Statement>,
        /// Statements run otherwise. Empty when no `ELSE` was written.
        else_statements: Vec<Statement>,
    },
    /// A `SWITCH` statement. The last case is always the default.
    Switch {
        /// The value the cases are compared against.
        condition: Expression,
        /// The cases, in source order; exactly one has no value.
        cases: Vec<Case>,
    },
    /// A `WHILE` loop.
    While {
        /// The condition; must be Boolean.
        condition: Expression,
        /// The loop body.
        statements: Vec<Statement>,
    },
    /// A `RETURN` statement.
    Return {
        /// The value returned.
        value: Expression,
    },
}

/// One arm of a `SWITCH` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// The value this case matches, or `None` for the default arm.
    pub value: Option<Expression>,
    /// The statements run when this arm is chosen.
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
/// One expression node.
///
/// The `ty`, `variable`, and `signature` fields start out `None` and are
/// written exactly once by the analyzer; the parser never fills them.
pub enum Expression {
    /// A literal value.
    Literal {
        /// The value.
        value: LiteralValue,
        /// Static type, resolved by the analyzer.
        ty: Option<Type>,
    },
    /// A parenthesized expression.
    Group {
        /// The inner expression.
        inner: Box<Expression>,
        /// Static type, resolved by the analyzer.
        ty: Option<Type>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        operator: BinaryOperator,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
        /// Static type, resolved by the analyzer.
        ty: Option<Type>,
    },
    /// A variable read, or a list element read when `index` is present.
    Access {
        /// The variable name.
        name: String,
        /// The index expression for `name[index]` accesses.
        index: Option<Box<Expression>>,
        /// Binding resolved by the analyzer.
        variable: Option<Variable>,
    },
    /// A function call.
    Call {
        /// The function name.
        name: String,
        /// The arguments, in order.
        arguments: Vec<Expression>,
        /// Signature resolved by the analyzer.
        signature: Option<FunctionSignature>,
    },
    /// A bracketed list literal. Never empty.
    ListLiteral {
        /// The elements, in order.
        elements: Vec<Expression>,
        /// Static element type, resolved by the analyzer.
        ty: Option<Type>,
    },
}

impl Expression {
    /// The static type the analyzer resolved for this node, if it ran.
    #[must_use]
    pub fn static_type(&self) -> Option<Type> {
        match self {
            Self::Literal { ty, .. }
            | Self::Group { ty, .. }
            | Self::Binary { ty, .. }
            | Self::ListLiteral { ty, .. } => *ty,
            Self::Access { variable, .. } => variable.as_ref().map(|variable| variable.ty),
            Self::Call { signature, .. } => signature.as_ref().map(|signature| signature.return_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A literal as it appears in the source, already decoded.
pub enum LiteralValue {
    /// `NIL`.
    Nil,
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// An integer literal.
    Integer(BigInt),
    /// A decimal literal.
    Decimal(BigDecimal),
    /// A character literal with its escape resolved.
    Character(char),
    /// A string literal with its escapes resolved.
    String(String),
}

impl LiteralValue {
    /// The static type this literal carries.
    #[must_use]
    pub const fn static_type(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Boolean(_) => Type::Boolean,
            Self::Integer(_) => Type::Integer,
            Self::Decimal(_) => Type::Decimal,
            Self::Character(_) => Type::Character,
            Self::String(_) => Type::String,
        }
    }
}

/// A resolved variable binding, attached to declarations and accesses.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The variable name.
    pub name: String,
    /// The static type of the binding.
    pub ty: Type,
    /// Whether assignment to it is allowed.
    pub mutable: bool,
}

/// A resolved function signature, attached to definitions and call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    /// The function name.
    pub name: String,
    /// The name this function renders under in generated Java.
    pub jvm_name: String,
    /// Parameter types, in order.
    pub parameter_types: Vec<Type>,
    /// The return type. `Any` when none was declared.
    pub return_type: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// All binary operators, from lowest to highest precedence tier.
pub enum BinaryOperator {
    /// `&&`, short-circuiting.
    And,
    /// `||`, short-circuiting.
    Or,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `+`, also string concatenation.
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`, truncating on Integers.
    Divide,
    /// `^`
    Power,
}

impl BinaryOperator {
    /// Maps an operator token's literal text to its operator.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            "<" => Some(Self::Less),
            ">" => Some(Self::Greater),
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "^" => Some(Self::Power),
            _ => None,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        };
        write!(f, "{symbol}")
    }
}
