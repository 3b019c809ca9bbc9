use crate::{
    ast::{Comparator, Comparison, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::depths,
        },
    },
};

/// Parses one line of tokens into a statement.
///
/// Every top level comparator splits the line. Without comparators the line
/// is a single expression; otherwise each adjacent pair of segments is
/// joined by the comparator between them.
///
/// # Parameters
/// - `tokens`: The balanced tokens of one line.
///
/// # Returns
/// A [`Statement::Expression`] or a [`Statement::Comparison`].
///
/// # Errors
/// - `ComparatorInBrackets` when a comparator is nested in any delimiter.
/// - Any error from parsing the segments.
pub fn parse_statement(tokens: &[Token]) -> ParseResult<Statement> {
    let depths = depths(tokens)?;

    let mut segments = Vec::new();
    let mut operators: Vec<Comparator> = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        let Token::Compare(comparator) = token else {
            continue;
        };
        if depths[i] > 0 {
            return Err(ParseError::ComparatorInBrackets { comparator: comparator.to_string() });
        }

        segments.push(parse_expression(&tokens[start..i])?);
        operators.push(*comparator);
        start = i + 1;
    }

    let last = parse_expression(&tokens[start..])?;
    if operators.is_empty() {
        return Ok(Statement::Expression(last));
    }

    segments.push(last);
    Comparison::new(segments, operators).map(Statement::Comparison)
}
