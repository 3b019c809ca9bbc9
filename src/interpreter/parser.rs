/// Expression parsing.
///
/// Splits a span of tokens at its loosest binding top level operator and
/// recurses on both sides, falling back to bracketed groups.
pub mod core;

/// Bracketed groups.
///
/// Turns a delimiter pair and the name fused to its opener into a
/// parenthesization, a vector, a set, an absolute value, a built-in call or a
/// user function call.
pub mod group;

/// Statement parsing.
///
/// Splits a line at its top level comparators.
pub mod statement;

/// Shared helpers for the parser.
///
/// Bracket nesting, token depths and rendering of tokens for error messages.
pub mod utils;
