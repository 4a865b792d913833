use num_bigint::BigInt;

use crate::ast::BinaryOperator;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised during evaluation.
pub enum RuntimeError {
    /// A variable name resolved to no binding at evaluation time.
    UnknownVariable {
        /// The variable name.
        name: String,
    },
    /// A call resolved to no function at evaluation time.
    UnknownFunction {
        /// The function name.
        name: String,
        /// The number of arguments at the call site.
        arity: usize,
    },
    /// An assignment targeted an immutable binding.
    NotMutable {
        /// The variable name.
        name: String,
    },
    /// A name was defined twice in the same runtime scope.
    Redefined {
        /// The offending name.
        name: String,
    },
    /// A binary operator was applied to values it does not accept.
    InvalidOperands {
        /// The operator applied.
        operator: BinaryOperator,
        /// Tag of the left operand.
        left: &'static str,
        /// Tag of the right operand.
        right: &'static str,
    },
    /// A condition or logical operand was not a Boolean.
    ExpectedBoolean {
        /// Tag of the value found instead.
        found: &'static str,
    },
    /// A list index was not an Integer.
    ExpectedInteger {
        /// Tag of the value found instead.
        found: &'static str,
    },
    /// A builtin needed a Decimal argument.
    ExpectedDecimal {
        /// Tag of the value found instead.
        found: &'static str,
    },
    /// An index access targeted a value that is not a list.
    ExpectedList {
        /// Tag of the value found instead.
        found: &'static str,
    },
    /// A list index fell outside the list.
    IndexOutOfBounds {
        /// The index used.
        index: BigInt,
        /// The length of the list.
        len: usize,
    },
    /// Division by zero.
    DivisionByZero,
    /// An exponent that is negative, fractional where that is not allowed,
    /// or too large to apply.
    InvalidExponent,
    /// A builtin received a value outside its domain.
    InvalidArgument {
        /// Details about the rejected value.
        details: String,
    },
    /// Writing to the output sink failed.
    Output {
        /// The underlying I/O error message.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => {
                write!(f, "Runtime error: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name, arity } => {
                write!(f, "Runtime error: Unknown function '{name}' taking {arity} argument(s).")
            },
            Self::NotMutable { name } => {
                write!(f, "Runtime error: Variable '{name}' is not mutable.")
            },
            Self::Redefined { name } => {
                write!(f, "Runtime error: '{name}' is already defined in this scope.")
            },
            Self::InvalidOperands { operator, left, right } => {
                write!(f, "Runtime error: Operator '{operator}' cannot be applied to {left} and {right}.")
            },
            Self::ExpectedBoolean { found } => {
                write!(f, "Runtime error: Expected a Boolean but found {found}.")
            },
            Self::ExpectedInteger { found } => {
                write!(f, "Runtime error: Expected an Integer but found {found}.")
            },
            Self::ExpectedDecimal { found } => {
                write!(f, "Runtime error: Expected a Decimal but found {found}.")
            },
            Self::ExpectedList { found } => {
                write!(f, "Runtime error: Expected a List but found {found}.")
            },
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "Runtime error: Index {index} is out of bounds for a list of length {len}.")
            },
            Self::DivisionByZero => {
                write!(f, "Runtime error: Division by zero.")
            },
            Self::InvalidExponent => {
                write!(f, "Runtime error: Exponent cannot be applied.")
            },
            Self::InvalidArgument { details } => {
                write!(f, "Runtime error: {details}")
            },
            Self::Output { message } => {
                write!(f, "Runtime error: Failed to write output: {message}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
