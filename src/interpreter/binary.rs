use bigdecimal::BigDecimal;
use num_traits::{Pow, ToPrimitive, Zero};

use crate::{ast::BinaryOperator, error::RuntimeError, value::Value};

use super::core::EvalResult;

/// Applies a binary operator to two evaluated operands.
///
/// Dispatch is an exhaustive match on value tags; there is no coercion, so
/// `Integer + Decimal` is an error rather than a widened sum. The evaluator
/// short-circuits `&&` and `||` before values exist, so the logical arms
/// here only see two fully evaluated operands.
///
/// # Errors
/// Returns [`RuntimeError::InvalidOperands`] for a tag combination the
/// operator does not accept, and the arithmetic errors documented on each
/// operation.
pub fn apply(operator: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    match operator {
        BinaryOperator::And => Ok(Value::Boolean(left.as_boolean()? && right.as_boolean()?)),
        BinaryOperator::Or => Ok(Value::Boolean(left.as_boolean()? || right.as_boolean()?)),
        BinaryOperator::Less | BinaryOperator::Greater => compare(operator, &left, &right),
        BinaryOperator::Equal => Ok(Value::Boolean(equals(operator, &left, &right)?)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(!equals(operator, &left, &right)?)),
        BinaryOperator::Add => add(left, right),
        BinaryOperator::Subtract => subtract(left, right),
        BinaryOperator::Multiply => multiply(left, right),
        BinaryOperator::Divide => divide(left, right),
        BinaryOperator::Power => power(left, right),
    }
}

/// Orders two operands of the same ordered tag: Integer, Decimal, Character,
/// or String.
fn compare(operator: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => l.cmp(r),
        (Value::Decimal(l), Value::Decimal(r)) => l.cmp(r),
        (Value::Character(l), Value::Character(r)) => l.cmp(r),
        (Value::String(l), Value::String(r)) => l.cmp(r),
        _ => return Err(invalid(operator, left, right)),
    };
    Ok(Value::Boolean(match operator {
        BinaryOperator::Less => ordering.is_lt(),
        _ => ordering.is_gt(),
    }))
}

/// Structural equality between two operands of the same tag. Lists compare
/// element by element.
///
/// # Errors
/// Returns [`RuntimeError::InvalidOperands`] when the tags differ; equality
/// across tags is not `false`, it is a fault.
pub fn equals(operator: BinaryOperator, left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Boolean(l), Value::Boolean(r)) => Ok(l == r),
        (Value::Integer(l), Value::Integer(r)) => Ok(l == r),
        (Value::Decimal(l), Value::Decimal(r)) => Ok(l == r),
        (Value::Character(l), Value::Character(r)) => Ok(l == r),
        (Value::String(l), Value::String(r)) => Ok(l == r),
        (Value::List(l), Value::List(r)) => Ok(*l.borrow() == *r.borrow()),
        _ => Err(invalid(operator, left, right)),
    }
}

/// Adds numbers of the same tag, or concatenates when either side is a
/// String. The non-String side renders the way `print` would show it.
fn add(left: Value, right: Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l + r)),
        (Value::Decimal(l), Value::Decimal(r)) => Ok(Value::Decimal(l + r)),
        (Value::String(l), right) => Ok(Value::String(format!("{l}{right}"))),
        (left, Value::String(r)) => Ok(Value::String(format!("{left}{r}"))),
        (left, right) => Err(invalid(BinaryOperator::Add, &left, &right)),
    }
}

fn subtract(left: Value, right: Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l - r)),
        (Value::Decimal(l), Value::Decimal(r)) => Ok(Value::Decimal(l - r)),
        (left, right) => Err(invalid(BinaryOperator::Subtract, &left, &right)),
    }
}

fn multiply(left: Value, right: Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l * r)),
        (Value::Decimal(l), Value::Decimal(r)) => Ok(Value::Decimal(l * r)),
        (left, right) => Err(invalid(BinaryOperator::Multiply, &left, &right)),
    }
}

/// Divides two numbers of the same tag. Integer division truncates toward
/// zero.
///
/// # Errors
/// Returns [`RuntimeError::DivisionByZero`] for a zero divisor; the check is
/// explicit, nothing is caught.
fn divide(left: Value, right: Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => {
            if r.is_zero() {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Integer(l / r))
            }
        },
        (Value::Decimal(l), Value::Decimal(r)) => {
            if r.is_zero() {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Decimal(l / r))
            }
        },
        (left, right) => Err(invalid(BinaryOperator::Divide, &left, &right)),
    }
}

/// Raises a number to a power.
///
/// An Integer exponent must be non-negative and fit `u32`. A Decimal
/// exponent is truncated to an integer first and may be negative, in which
/// case the result is the reciprocal of the positive power.
fn power(left: Value, right: Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(base), Value::Integer(exponent)) => {
            let exponent = exponent.to_u32().ok_or(RuntimeError::InvalidExponent)?;
            Ok(Value::Integer(Pow::pow(base, exponent)))
        },
        (Value::Decimal(base), Value::Decimal(exponent)) => {
            let exponent = exponent.to_i64().ok_or(RuntimeError::InvalidExponent)?;
            decimal_power(&base, exponent)
        },
        (left, right) => Err(invalid(BinaryOperator::Power, &left, &right)),
    }
}

/// Exponentiation by squaring over `BigDecimal`.
fn decimal_power(base: &BigDecimal, exponent: i64) -> EvalResult<Value> {
    if exponent < 0 && base.is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }
    let mut result = BigDecimal::from(1);
    let mut factor = base.clone();
    let mut remaining = exponent.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = &result * &factor;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = &factor * &factor;
        }
    }
    if exponent < 0 {
        result = BigDecimal::from(1) / result;
    }
    Ok(Value::Decimal(result))
}

fn invalid(operator: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::InvalidOperands { operator, left: left.tag(), right: right.tag() }
}
