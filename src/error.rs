/// Parsing errors.
///
/// Defines all error types that can occur while balancing, tokenizing and
/// parsing a line of notation. Parse errors are syntax problems: a stray
/// symbol, a span without operators, a comparator nested inside brackets, or
/// brackets of the wrong kind.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while simplifying a statement.
/// Runtime errors include argument count mismatches, operand shape mismatches,
/// out-of-range component access and runaway recursion.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
