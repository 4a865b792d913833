//! # quill
//!
//! quill is a small imperative scripting language implemented end to end:
//! a lexer, a recursive-descent parser, a static analyzer, a tree-walking
//! interpreter, and a Java source generator, all sharing one syntax tree.
//!
//! The pipeline runs in a strict order. [`lexer::lex`] turns source text
//! into tokens, [`parser::parse`] builds the tree, [`analyzer::analyze`]
//! checks it and writes type and binding annotations into it, and only then
//! does [`interpreter::Interpreter`] execute it or [`generator::generate`]
//! render it. Every error is fatal: the first failure in any phase stops the
//! pipeline and is reported to the caller.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

/// Defines the structure of parsed code.
///
/// This module declares the `Source`, `Statement`, and `Expression` types
/// that represent a program as a tree. The tree is built by the parser,
/// annotated in place by the analyzer, and then only read: the interpreter
/// and the generator both walk it without changing it.
///
/// # Responsibilities
/// - Defines node types for every language construct.
/// - Carries the analyzer's type, variable, and signature annotations.
/// - Keeps literal values decoded, with lexical details left behind.
pub mod ast;
/// Checks and annotates a parsed tree.
///
/// This module owns the one static pass between parsing and execution. It
/// resolves names against a scope chain, computes the static type of every
/// expression post-order, enforces assignability, and records what it found
/// directly on the tree nodes.
///
/// # Responsibilities
/// - Rejects unknown names, duplicate definitions, and type mismatches.
/// - Annotates accesses with their bindings and calls with their signatures.
/// - Tracks the enclosing function's return type for `RETURN` checks.
pub mod analyzer;
/// Provides unified error types for every phase.
///
/// This module defines the four fatal error kinds the pipeline can produce,
/// one per phase, and a top-level `Error` that wraps them for the library
/// entry points. Lexing and parsing errors carry byte offsets; analysis and
/// runtime errors carry the names and tags involved.
pub mod error;
/// Renders an analyzed tree as Java source.
///
/// This module contains the read-only back end: it walks the annotated tree
/// and builds the text of a `public class Main`, mapping builtins and
/// operators to their Java spellings. It never evaluates anything and never
/// changes the tree.
pub mod generator;
/// Executes an analyzed tree.
///
/// This module contains the tree-walking evaluator: runtime values, scope
/// handling, operator dispatch on value tags, and the builtin functions.
/// `print` output goes to a caller-supplied sink so embedders and tests can
/// capture it.
pub mod interpreter;
/// Splits source text into tokens.
///
/// This module defines the token model and the `lex` driver. Tokens carry
/// their kind, their exact source text, and their byte offset; keywords are
/// ordinary identifiers the parser matches by literal.
pub mod lexer;
/// Builds the syntax tree from tokens.
///
/// This module implements the recursive descent: one function per grammar
/// rule, a precedence ladder with left-folding loops for binary operators,
/// and a plain token cursor with no other parser state.
pub mod parser;
/// The scope arena shared by the analyzer and the interpreter.
pub mod scope;
/// The static type model: the type set, assignability, and JVM names.
pub mod types;
/// The runtime value model: a tagged union with shared, mutable lists.
pub mod value;

use crate::{ast::Source, error::Error, interpreter::Interpreter, value::Value};

/// Lexes, parses, and analyzes source text, returning the annotated tree.
///
/// This is the shared front half of [`interpret`] and [`transpile`].
///
/// # Errors
/// Returns the first error of whichever phase fails.
pub fn compile(source: &str) -> Result<Source, Error> {
    let tokens = lexer::lex(source)?;
    let mut tree = parser::parse(tokens)?;
    analyzer::analyze(&mut tree)?;
    Ok(tree)
}

/// Runs a program and returns the value of its `main()`.
///
/// `print` output is written to `out`, one line per call.
///
/// # Errors
/// Returns the first error of whichever phase fails; a runtime error means
/// execution stopped at that point.
///
/// # Examples
/// ```
/// use quill::{interpret, value::Value};
///
/// let mut out = Vec::new();
/// let value = interpret("FUN main(): Integer DO print(\"hi\"); RETURN 2 + 3; END", &mut out).unwrap();
/// assert_eq!(value, Value::from(5));
/// assert_eq!(out, b"hi\n");
/// ```
pub fn interpret<W: Write>(source: &str, out: W) -> Result<Value, Error> {
    let tree = compile(source)?;
    let mut interpreter = Interpreter::new(out);
    let value = interpreter.interpret(&tree)?;
    Ok(value)
}

/// Renders a program as Java source without running it.
///
/// # Errors
/// Returns the first lexing, parsing, or analysis error; generation itself
/// cannot fail.
pub fn transpile(source: &str) -> Result<String, Error> {
    let tree = compile(source)?;
    Ok(generator::generate(&tree))
}
