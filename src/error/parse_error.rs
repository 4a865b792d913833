#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while building the syntax tree.
pub enum ParseError {
    /// Found a token that does not fit the grammar rule being parsed.
    UnexpectedToken {
        /// What the parser was looking for.
        expected: &'static str,
        /// The literal text of the token encountered.
        found: String,
        /// Byte offset of the offending token.
        offset: usize,
    },
    /// Reached the end of input while a rule was still incomplete.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: &'static str,
        /// Byte offset just past the last token.
        offset: usize,
    },
    /// A `LIST` initializer with no elements.
    EmptyList {
        /// Byte offset of the closing bracket.
        offset: usize,
    },
    /// The left side of an `=` was not a variable or list access.
    InvalidAssignmentTarget {
        /// Byte offset where the receiver expression begins.
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEndOfInput { offset, .. }
            | Self::EmptyList { offset }
            | Self::InvalidAssignmentTarget { offset } => *offset,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found, offset } => {
                write!(f, "Error at offset {offset}: Expected {expected} but found '{found}'.")
            },
            Self::UnexpectedEndOfInput { expected, offset } => {
                write!(f, "Error at offset {offset}: Expected {expected} but reached the end of input.")
            },
            Self::EmptyList { offset } => {
                write!(f, "Error at offset {offset}: A list needs at least one element.")
            },
            Self::InvalidAssignmentTarget { offset } => {
                write!(f, "Error at offset {offset}: Only a variable or a list element can be assigned to.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
