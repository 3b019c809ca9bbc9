use crate::{
    ast::{BuiltInFunction, Expression, Function, Operator},
    error::ParseError,
    interpreter::{
        evaluator::builtin::BuiltIn,
        lexer::{Bracket, Opening, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{is_enclosed, render},
        },
        value::{constant::Constant, set::Set, vector::Vector},
    },
};

/// Parses a span that is exactly one delimiter pair around an interior.
///
/// The interior is parsed first. What the pair means then depends on the
/// delimiter and on the name fused to the opening bracket:
/// - `|x|` is an absolute value;
/// - `(x)` parenthesizes, `(a, b)` is a vector written with parentheses;
/// - `[a, b]` is a vector, `[x]` a vector of one component;
/// - `{a, b}` is a set, `{x}` a set of one element;
/// - `ln(x)`, `sqrt(x)`, `log(x)`, `log(b, x)` and the built-in names are
///   built-in operations;
/// - any other name is a call of a user function.
///
/// # Parameters
/// - `tokens`: The opener, the interior and the closer.
///
/// # Returns
/// The parsed group.
pub(in crate::interpreter::parser) fn parse_group(tokens: &[Token]) -> ParseResult<Expression> {
    let [first, interior @ .., _] = tokens else {
        return Err(ParseError::NoOperators { tokens: render(tokens) });
    };

    let inner = parse_expression(interior)?;
    let items = list_items(interior, inner);

    match first {
        Token::Pipe => Ok(Expression::unary(Operator::Abs, items.into_single())),
        Token::Open(Opening { head, bracket }) if head.is_empty() => Ok(bare_group(*bracket, items)),
        Token::Open(Opening { head, .. }) => Ok(named_group(head, items)),
        _ => Err(ParseError::NoOperators { tokens: render(tokens) }),
    }
}

/// An interior as the parser sees it: one expression or a comma list.
enum Items {
    /// Nothing between the brackets.
    Empty,
    /// One expression.
    Single(Expression),
    /// A top level comma list, already flattened.
    List(Vector),
}

impl Items {
    fn into_single(self) -> Expression {
        match self {
            Self::Empty => Expression::Null,
            Self::Single(expression) => expression,
            Self::List(vector) => Expression::Vector(vector),
        }
    }

    fn into_vec(self) -> Vec<Expression> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(expression) => vec![expression],
            Self::List(vector) => vector.into_components(),
        }
    }
}

/// Classifies a parsed interior.
///
/// Only a top level comma makes a list. A vector that is itself bracketed,
/// as in `([a, b])`, is a single item.
fn list_items(interior: &[Token], inner: Expression) -> Items {
    match inner {
        Expression::Null => Items::Empty,
        Expression::Vector(vector) if !is_enclosed(interior) => Items::List(vector),
        other => Items::Single(other),
    }
}

fn bare_group(bracket: Bracket, items: Items) -> Expression {
    match (bracket, items) {
        (Bracket::Round, Items::List(vector)) => Expression::Vector(vector.into_parenthetic()),
        (Bracket::Round, items) => Expression::unary(Operator::Paren, items.into_single()),
        (Bracket::Square, items) => Expression::Vector(Vector::new(items.into_vec())),
        (Bracket::Curly, items) => Expression::Set(Set::new(items.into_vec())),
    }
}

fn named_group(head: &str, items: Items) -> Expression {
    match (head, items) {
        ("i", items) => Expression::binary(Operator::Multiply,
                                           Expression::Constant(Constant::I),
                                           bare_group(Bracket::Round, items)),
        ("ln", items) => Expression::unary(Operator::Ln, items.into_single()),
        ("sqrt", items) => Expression::binary(Operator::Root,
                                              items.into_single(),
                                              Expression::Constant(Constant::TWO)),
        ("log", Items::List(vector)) => match <[Expression; 2]>::try_from(vector.into_components()) {
            Ok([base, arg]) => Expression::binary(Operator::LogBase, base, arg),
            Err(args) => Expression::binary(Operator::LogBase,
                                            Expression::Constant(Constant::TEN),
                                            Expression::Vector(Vector::new(args))),
        },
        ("log", items) => Expression::binary(Operator::LogBase,
                                             Expression::Constant(Constant::TEN),
                                             items.into_single()),
        (name, items) => match BuiltIn::from_name(name) {
            Some(function) => {
                Expression::BuiltInFunction(BuiltInFunction::new(function, name, items.into_single()))
            },
            None => Expression::Function(Function::new(name, items.into_vec())),
        },
    }
}
