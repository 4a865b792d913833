/// Evaluator core.
///
/// Declares the `Interpreter` struct that walks an analyzed tree, its
/// runtime scope handling, and the `Flow` type that carries `RETURN` values
/// up to the enclosing call. Execution order and scoping rules live here;
/// the arithmetic itself does not.
pub mod core;
/// Binary operator dispatch.
///
/// Applies every binary operator to two already-evaluated values, matching
/// exhaustively on value tags. Mixed-tag operands are rejected with a
/// runtime error; nothing is coerced.
pub mod binary;
/// Builtin functions.
///
/// The functions every program can call without defining them: `print`,
/// the fallback `main`, `logarithm`, and `converter`.
pub mod builtin;

pub use self::core::{Flow, Interpreter};
