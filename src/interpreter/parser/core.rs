use crate::{
    ast::{Expression, Operator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            group::parse_group,
            utils::{depths, is_enclosed, render},
        },
        value::{constant::Constant, vector::Vector},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Operator tiers, from the loosest binding to the tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rank {
    /// `,`
    List,
    /// `+ -`
    Sum,
    /// `* • × / \ %` and juxtaposition.
    Product,
    /// `^`
    Power,
}

const RANKS: [Rank; 4] = [Rank::List, Rank::Sum, Rank::Product, Rank::Power];

/// Where a span of tokens splits into two operands.
#[derive(Debug, Clone, Copy)]
enum Split {
    /// An explicit operator token at this index.
    Operator(usize),
    /// Juxtaposition: the right operand starts at this index.
    Implicit(usize),
}

/// Parses a span of tokens into an expression.
///
/// Spans of zero and one token are the base cases. Otherwise the span is
/// split at its loosest binding top level operator, trying each rank in
/// turn and scanning each rank from the right, which makes every binary
/// operator left associative. A span that no operator splits must be a
/// single bracketed group.
///
/// # Parameters
/// - `tokens`: A balanced span of tokens.
///
/// # Returns
/// The parsed expression node, never simplified.
///
/// # Errors
/// - `UnexpectedSymbol` for a lone operator.
/// - `MissingOperand` for a binary operator with an empty side.
/// - `InvalidNumber` for a malformed numeric literal.
/// - `NoOperators` for a span that is neither split nor bracketed.
pub fn parse_expression(tokens: &[Token]) -> ParseResult<Expression> {
    match tokens {
        [] => Ok(Expression::Null),
        [token] => parse_atom(token),
        _ if is_enclosed(tokens) => parse_group(tokens),
        _ => parse_ranks(tokens),
    }
}

fn parse_ranks(tokens: &[Token]) -> ParseResult<Expression> {
    let depths = depths(tokens)?;

    for rank in RANKS {
        if let Some(split) = find_split(tokens, &depths, rank) {
            return parse_split(tokens, split);
        }

        if rank == Rank::Sum {
            match tokens.first() {
                Some(Token::Minus) => return Ok(Expression::negate(parse_expression(&tokens[1..])?)),
                Some(Token::Plus) => return parse_expression(&tokens[1..]),
                _ => {},
            }
        }
    }

    Err(ParseError::NoOperators { tokens: render(tokens) })
}

/// Finds the rightmost top level split of the given rank.
fn find_split(tokens: &[Token], depths: &[usize], rank: Rank) -> Option<Split> {
    (1..tokens.len()).rev()
                     .filter(|&i| depths[i] == 0)
                     .find_map(|i| {
                         let previous = &tokens[i - 1];
                         match (rank, &tokens[i]) {
                             (Rank::List, Token::Comma) | (Rank::Sum, Token::Plus) => {
                                 Some(Split::Operator(i))
                             },
                             (Rank::Sum, Token::Minus) if !previous.is_operator() => {
                                 Some(Split::Operator(i))
                             },
                             (Rank::Product,
                              Token::Star
                              | Token::Bullet
                              | Token::Cross
                              | Token::Slash
                              | Token::Backslash
                              | Token::Percent) => Some(Split::Operator(i)),
                             (Rank::Product, token)
                                 if depths[i - 1] == 0
                                    && !token.is_operator()
                                    && !previous.is_operator() =>
                             {
                                 Some(Split::Implicit(i))
                             },
                             (Rank::Power, Token::Caret) => Some(Split::Operator(i)),
                             _ => None,
                         }
                     })
}

fn parse_split(tokens: &[Token], split: Split) -> ParseResult<Expression> {
    let (index, right_start) = match split {
        Split::Operator(index) => (index, index + 1),
        Split::Implicit(index) => (index, index),
    };
    let lhs = parse_expression(&tokens[..index])?;
    let rhs = parse_expression(&tokens[right_start..])?;
    let binary_operator = matches!(split, Split::Operator(_)) && !matches!(tokens[index], Token::Comma);
    if binary_operator && (lhs == Expression::Null || rhs == Expression::Null) {
        return Err(ParseError::MissingOperand { operator: tokens[index].to_string(),
                                                tokens:   render(tokens), });
    }

    let operator = match split {
        Split::Implicit(_) => Operator::Multiply,
        Split::Operator(_) => match tokens[index] {
            Token::Comma => return Ok(Expression::Vector(Vector::concat(lhs, rhs))),
            Token::Backslash => return Ok(Expression::binary(Operator::Divide, rhs, lhs)),
            Token::Plus => Operator::Add,
            Token::Minus => Operator::Subtract,
            Token::Cross => Operator::Cross,
            Token::Slash => Operator::Divide,
            Token::Percent => Operator::Modulo,
            Token::Caret => Operator::Power,
            _ => Operator::Multiply,
        },
    };

    Ok(Expression::binary(operator, lhs, rhs))
}

/// Parses a single token: a number, `i`, or a name.
fn parse_atom(token: &Token) -> ParseResult<Expression> {
    match token {
        Token::Number(literal) => {
            literal.parse::<f64>()
                   .map(Expression::real)
                   .map_err(|_| ParseError::InvalidNumber { literal: literal.clone() })
        },
        Token::Identifier(name) if name == "i" => Ok(Expression::Constant(Constant::I)),
        Token::Identifier(name) => Ok(Expression::variable(name.clone())),
        symbol => Err(ParseError::UnexpectedSymbol { token: symbol.to_string() }),
    }
}
