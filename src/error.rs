/// Lexing errors.
///
/// Defines the errors that can occur while splitting source text into tokens:
/// unrecognized characters, numbers with leading zeros or a dangling decimal
/// point, and malformed character or string literals. Each error carries the
/// byte offset of the offending input.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the errors that can occur while building the syntax tree from the
/// token sequence: unexpected tokens, premature end of input, empty list
/// initializers, and invalid assignment targets.
pub mod parse_error;
/// Analysis errors.
///
/// Defines the errors the static analyzer raises before anything runs:
/// assignability violations, unknown or duplicate names, and declarations
/// whose type cannot be determined.
pub mod type_error;
/// Runtime errors.
///
/// Defines the errors that can be raised during evaluation: unresolved names,
/// writes to immutable bindings, operand tag mismatches, out-of-bounds list
/// indices, division by zero, and inapplicable exponents. Every one of them
/// halts the program.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use type_error::TypeError;

#[derive(Debug)]
/// Any error the pipeline can produce, one variant per phase.
pub enum Error {
    /// The source text could not be tokenized.
    Lex(LexError),
    /// The token sequence did not match the grammar.
    Parse(ParseError),
    /// The syntax tree failed static analysis.
    Type(TypeError),
    /// Evaluation halted.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(error) => error.fmt(f),
            Self::Parse(error) => error.fmt(f),
            Self::Type(error) => error.fmt(f),
            Self::Runtime(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<TypeError> for Error {
    fn from(error: TypeError) -> Self {
        Self::Type(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}
