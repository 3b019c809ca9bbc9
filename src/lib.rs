//! # mathbench
//!
//! mathbench is a symbolic expression workbench written in Rust.
//! It parses one line of notation at a time, simplifies it against a
//! workspace of variables and user functions over the complex numbers, and
//! renders the result back to text. Names that are not bound stay symbolic.

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
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::tokenize,
        parser::{core::ParseResult, statement::parse_statement},
        workspace::Workspace,
    },
};

/// Defines the structure of parsed input.
///
/// This module declares the `Expression` enum and related types that
/// represent a line of notation as a tree. The tree is built by the parser,
/// rewritten by the evaluator and walked by renderers.
///
/// # Responsibilities
/// - Defines expression, comparison and statement types.
/// - Answers structural queries: shape, components, free variables.
/// - Renders trees back to parseable text through a visitor.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing or simplifying a line. Tokens carry no position, so errors name
/// the tokens or the operands involved instead.
///
/// # Responsibilities
/// - Defines `ParseError` for malformed input.
/// - Defines `RuntimeError` for arity, shape and recursion failures.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the path from text to a simplified result.
///
/// This module ties together lexing, parsing, evaluation, the value types
/// and the workspace.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and simplifying user input.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Parses one line of input into a statement.
///
/// Unbalanced brackets are closed or opened as needed, so input that is
/// still being typed parses.
///
/// # Errors
/// Returns a `ParseError` for malformed input.
///
/// # Examples
/// ```
/// use mathbench::parse;
///
/// assert_eq!(parse("(1+2").unwrap(), parse("(1+2)").unwrap());
/// assert_eq!(parse("2x").unwrap(), parse("2 x").unwrap());
/// assert!(parse("(1+2]").is_err());
/// ```
pub fn parse(text: &str) -> ParseResult<Statement> {
    let tokens = tokenize(text)?;
    let statement = parse_statement(&tokens)?;
    debug!("parsed {text:?} as {statement}");
    Ok(statement)
}

/// Parses and simplifies every line of `source` in order.
///
/// Blank lines and lines starting with `//` are skipped. Each line sees the
/// bindings made by the lines before it.
///
/// # Errors
/// Returns the first parse or runtime error. Bindings made by earlier lines
/// stay in the workspace.
///
/// # Examples
/// ```
/// use mathbench::{interpreter::workspace::Workspace, run};
///
/// let mut workspace = Workspace::new();
/// let results = run("f(x) = x^2\n// squares\nf(3)", &mut workspace).unwrap();
/// assert_eq!(results.last().map(ToString::to_string), Some("9".to_string()));
///
/// // A comparator inside brackets is a syntax error.
/// assert!(run("(1 = 1)", &mut workspace).is_err());
/// ```
pub fn run(source: &str, workspace: &mut Workspace) -> Result<Vec<Statement>, Box<dyn std::error::Error>> {
    let mut results = Vec::new();

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        let statement = parse(trimmed)?;
        results.push(statement.simplified(workspace)?);
    }

    Ok(results)
}
