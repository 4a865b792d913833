use crate::error::TypeError;

/// The static types the analyzer reasons about.
///
/// `Any` accepts every type and `Comparable` accepts the ordered ones by
/// convention; every other assignment requires the exact same type. There is
/// no numeric widening: an Integer is never silently a Decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// The top type; anything is assignable to it.
    Any,
    /// The type of `NIL` and of functions that return nothing.
    Nil,
    /// `TRUE` or `FALSE`.
    Boolean,
    /// Arbitrary-precision integer.
    Integer,
    /// Arbitrary-precision decimal.
    Decimal,
    /// A single character.
    Character,
    /// Text.
    String,
    /// Accepts any of the ordered types, like `Any` does.
    Comparable,
}

impl Type {
    /// Resolves a type name as written in the source.
    ///
    /// # Errors
    /// Returns [`TypeError::UnknownType`] when the name matches no type.
    pub fn resolve(name: &str) -> Result<Self, TypeError> {
        match name {
            "Any" => Ok(Self::Any),
            "Nil" => Ok(Self::Nil),
            "Boolean" => Ok(Self::Boolean),
            "Integer" => Ok(Self::Integer),
            "Decimal" => Ok(Self::Decimal),
            "Character" => Ok(Self::Character),
            "String" => Ok(Self::String),
            "Comparable" => Ok(Self::Comparable),
            _ => Err(TypeError::UnknownType { name: name.to_string() }),
        }
    }

    /// Whether a value of type `ty` may sit where `self` is required.
    #[must_use]
    pub fn is_assignable_from(self, ty: Self) -> bool {
        matches!(self, Self::Any | Self::Comparable) || self == ty
    }

    /// The name this type renders under in generated Java.
    #[must_use]
    pub const fn jvm_name(self) -> &'static str {
        match self {
            Self::Any => "Object",
            Self::Nil => "Void",
            Self::Boolean => "boolean",
            Self::Integer => "int",
            Self::Decimal => "double",
            Self::Character => "char",
            Self::String => "String",
            Self::Comparable => "Comparable",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Any => "Any",
            Self::Nil => "Nil",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Decimal => "Decimal",
            Self::Character => "Character",
            Self::String => "String",
            Self::Comparable => "Comparable",
        };
        write!(f, "{name}")
    }
}
