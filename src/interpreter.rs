/// The evaluator simplifies trees against a workspace.
///
/// Simplification is a bottom up rewrite. Constants stay as they are, bound
/// names are replaced, operators over values are applied by the constant
/// kernel, and whatever depends on a free name is rebuilt symbolically.
///
/// # Responsibilities
/// - Reduces expressions and statements, performing all supported operations.
/// - Calls user functions in local scopes and binds assignments.
/// - Reports runtime errors such as shape mismatches or runaway recursion.
pub mod evaluator;
/// The lexer splits one line of input into tokens.
///
/// Produces numbers, names, operators, comparators and brackets, fusing a
/// name with the opening bracket right after it. A balancing pass then
/// closes what was left open, so a line that is still being typed parses.
///
/// # Responsibilities
/// - Converts the input characters into tokens.
/// - Balances brackets and absolute value bars.
/// - Reports brackets of the wrong kind.
pub mod lexer;
/// The parser builds trees from tokens.
///
/// Parsing is recursive over spans of tokens: a span splits at its loosest
/// binding top level operator, ranked from lists through sums and products
/// to powers.
///
/// # Responsibilities
/// - Converts tokens into expressions and statements.
/// - Resolves built-in names, vectors, sets and calls.
/// - Reports malformed spans with the tokens involved.
pub mod parser;
/// The value module defines the data that simplification reduces to.
///
/// # Responsibilities
/// - Complex constants and the kernel of operations on them.
/// - Vectors and sets of expressions.
pub mod value;
/// Name bindings.
///
/// A persistent map from names to variables and user functions, together
/// with the settings that govern evaluation. Function calls derive local
/// scopes from it without changing it.
pub mod workspace;
