/// Classifies what went wrong inside a single token.
///
/// The lexer attaches one of these to the byte offset where the offending
/// token begins; together they form a [`LexError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// A character that cannot begin any token.
    #[default]
    UnrecognizedCharacter,
    /// A multi-digit number starting with `0`.
    LeadingZero,
    /// A decimal point with no fraction digits after it.
    TrailingDecimalPoint,
    /// A character literal that is empty, unterminated, or holds an invalid
    /// escape or raw whitespace.
    MalformedCharacter,
    /// A string literal that is unterminated or holds an invalid escape or a
    /// raw newline-class character.
    MalformedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents a failure to split the source text into tokens.
pub struct LexError {
    /// What kind of malformed input was found.
    pub kind: LexErrorKind,
    /// Byte offset of the offending input.
    pub offset: usize,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            LexErrorKind::UnrecognizedCharacter => {
                write!(f, "Error at offset {}: Unrecognized character.", self.offset)
            },
            LexErrorKind::LeadingZero => {
                write!(f, "Error at offset {}: Number literals may not start with a leading zero.", self.offset)
            },
            LexErrorKind::TrailingDecimalPoint => {
                write!(f, "Error at offset {}: Decimal literals need at least one digit after the decimal point.", self.offset)
            },
            LexErrorKind::MalformedCharacter => {
                write!(f, "Error at offset {}: Malformed character literal.", self.offset)
            },
            LexErrorKind::MalformedString => {
                write!(f, "Error at offset {}: Malformed string literal.", self.offset)
            },
        }
    }
}

impl std::error::Error for LexError {}
