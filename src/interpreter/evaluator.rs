/// Built-in transcendental functions.
///
/// Declares the table of built-in names and applies them to constants,
/// vectors and sets.
pub mod builtin;

/// Statement evaluation.
///
/// Assignments, function definitions, and comparisons that decide to a
/// truth value.
pub mod comparison;

/// Core simplification.
///
/// Contains the entry point that reduces any expression against a workspace
/// and the resolution of names.
pub mod core;

/// User function calls.
///
/// Binds arguments into a local scope, enforces the call depth limit and
/// handles juxtaposition with plain values.
pub mod function;

/// Operator application.
///
/// Combines simplified operands, dispatching on whether each is a scalar, a
/// vector, a set or still symbolic.
pub mod operation;
