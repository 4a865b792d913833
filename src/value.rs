use std::{cell::RefCell, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{ast::LiteralValue, error::RuntimeError};

/// A runtime value, tagged by its variant.
///
/// Numbers are arbitrary precision. Lists are shared: cloning a `Value::List`
/// clones the handle, not the elements, so a binding and every alias of it
/// observe in-place element writes.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A truth value.
    Boolean(bool),
    /// An arbitrary-precision integer.
    Integer(BigInt),
    /// An arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// A single character.
    Character(char),
    /// Text.
    String(String),
    /// A mutable, shared list.
    List(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    /// The tag name used in error messages and dispatch.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Decimal(_) => "Decimal",
            Self::Character(_) => "Character",
            Self::String(_) => "String",
            Self::List(_) => "List",
        }
    }

    /// Reads this value as a Boolean.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ExpectedBoolean`] for every other tag; nothing
    /// is truthy or falsy by coercion.
    pub fn as_boolean(&self) -> Result<bool, RuntimeError> {
        match self {
            Self::Boolean(value) => Ok(*value),
            other => Err(RuntimeError::ExpectedBoolean { found: other.tag() }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(left), Self::Boolean(right)) => left == right,
            (Self::Integer(left), Self::Integer(right)) => left == right,
            (Self::Decimal(left), Self::Decimal(right)) => left == right,
            (Self::Character(left), Self::Character(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::List(left), Self::List(right)) => *left.borrow() == *right.borrow(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Character(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::List(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Nil => Self::Nil,
            LiteralValue::Boolean(value) => Self::Boolean(*value),
            LiteralValue::Integer(value) => Self::Integer(value.clone()),
            LiteralValue::Decimal(value) => Self::Decimal(value.clone()),
            LiteralValue::Character(value) => Self::Character(*value),
            LiteralValue::String(value) => Self::String(value.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Character(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Self::List(Rc::new(RefCell::new(elements)))
    }
}
