use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors the static analyzer can raise.
pub enum TypeError {
    /// A value of one static type was placed where another is required.
    Unassignable {
        /// The type required by the target position.
        expected: Type,
        /// The type the expression actually has.
        actual: Type,
    },
    /// A type annotation named a type that does not exist.
    UnknownType {
        /// The name as written in the source.
        name: String,
    },
    /// A variable was read before any declaration introduced it.
    UnknownVariable {
        /// The variable name.
        name: String,
    },
    /// A call named a function no declaration matches.
    UnknownFunction {
        /// The function name.
        name: String,
        /// The number of arguments at the call site.
        arity: usize,
    },
    /// A declaration reused a variable name already bound in the same scope.
    DuplicateVariable {
        /// The variable name.
        name: String,
    },
    /// A definition reused a function name and arity already bound in the
    /// same scope.
    DuplicateFunction {
        /// The function name.
        name: String,
        /// The number of parameters.
        arity: usize,
    },
    /// A `LET` declaration with neither a type annotation nor an initializer.
    MissingType {
        /// The variable name.
        name: String,
    },
    /// A `SWITCH` whose last case is not the single default.
    MissingDefaultCase,
    /// An assignment whose receiver is not a variable or list access.
    InvalidReceiver,
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unassignable { expected, actual } => {
                write!(f, "Type error: Expected {expected} but found {actual}.")
            },
            Self::UnknownType { name } => {
                write!(f, "Type error: Unknown type '{name}'.")
            },
            Self::UnknownVariable { name } => {
                write!(f, "Type error: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name, arity } => {
                write!(f, "Type error: Unknown function '{name}' taking {arity} argument(s).")
            },
            Self::DuplicateVariable { name } => {
                write!(f, "Type error: Variable '{name}' is already defined in this scope.")
            },
            Self::DuplicateFunction { name, arity } => {
                write!(f, "Type error: Function '{name}' taking {arity} argument(s) is already defined.")
            },
            Self::MissingType { name } => {
                write!(f, "Type error: Declaration of '{name}' needs a type annotation or an initializer.")
            },
            Self::MissingDefaultCase => {
                write!(f, "Type error: A switch needs exactly one default case, in last position.")
            },
            Self::InvalidReceiver => {
                write!(f, "Type error: Only a variable or a list element can be assigned to.")
            },
        }
    }
}

impl std::error::Error for TypeError {}
