use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::{error::RuntimeError, value::Value};

use super::core::EvalResult;

/// The builtin functions, dispatched by the evaluator.
///
/// `print` and the fallback `main` need the interpreter itself (for the
/// output sink and nothing else, respectively) and live there; the numeric
/// builtins below are plain functions over values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `print(Any) -> Nil`: writes one line to the output sink.
    Print,
    /// `main() -> Integer`: returns 0. Shadowed by any user-defined `main`.
    Main,
    /// `logarithm(Decimal) -> Decimal`: natural logarithm.
    Logarithm,
    /// `converter(Integer, Integer) -> String`: renders the first argument
    /// in the base given by the second.
    Converter,
}

/// Natural logarithm of a Decimal, computed through `f64`.
///
/// # Errors
/// Rejects non-Decimal arguments, values too large for the conversion, and
/// values with no logarithm (zero and below).
pub fn logarithm(argument: &Value) -> EvalResult<Value> {
    let Value::Decimal(value) = argument else {
        return Err(RuntimeError::ExpectedDecimal { found: argument.tag() });
    };
    let approximation = value.to_f64().ok_or_else(|| RuntimeError::InvalidArgument {
        details: format!("logarithm argument {value} is out of range."),
    })?;
    BigDecimal::from_f64(approximation.ln()).map(Value::Decimal).ok_or_else(|| {
        RuntimeError::InvalidArgument { details: format!("logarithm of {value} is undefined.") }
    })
}

/// Renders an Integer in a base between 2 and 36.
///
/// # Errors
/// Rejects non-Integer arguments and bases outside 2..=36.
pub fn converter(value: &Value, base: &Value) -> EvalResult<Value> {
    let Value::Integer(number) = value else {
        return Err(RuntimeError::ExpectedInteger { found: value.tag() });
    };
    let Value::Integer(radix) = base else {
        return Err(RuntimeError::ExpectedInteger { found: base.tag() });
    };
    let radix = radix.to_u32().filter(|radix| (2..=36).contains(radix)).ok_or_else(|| {
        RuntimeError::InvalidArgument {
            details: format!("conversion base {radix} is not between 2 and 36."),
        }
    })?;
    Ok(Value::String(number.to_str_radix(radix)))
}
