use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Bracket, Token},
        parser::core::ParseResult,
    },
};

/// Something that is open and waits for its closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Bracket(Bracket),
    Pipe,
}

/// What feeding one token to a [`Nesting`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The token opened a bracket or an absolute value.
    Opened,
    /// The token closed the innermost delimiter.
    Closed,
    /// The token is a closer with nothing open.
    Unmatched(Bracket),
    /// The token does not change the nesting.
    Level,
}

/// Matched-pair stack for brackets and `|`.
///
/// A `|` closes an open `|` on top of the stack when it follows an operand,
/// and opens one otherwise. So `|a| + |b|` holds two absolute values rather
/// than one around `a| + |b`, while `|a - |b||` nests.
#[derive(Debug, Default)]
pub struct Nesting {
    stack:         Vec<Delimiter>,
    after_operand: bool,
}

impl Nesting {
    /// Feeds one token.
    ///
    /// # Errors
    /// `MismatchedBrackets` when a closer does not match the innermost
    /// delimiter.
    pub fn step(&mut self, token: &Token) -> ParseResult<Step> {
        let step = self.advance(token)?;
        self.after_operand = match token {
            Token::Close(_) => true,
            Token::Pipe => step == Step::Closed,
            Token::Open(_) | Token::Compare(_) => false,
            other => !other.is_operator(),
        };
        Ok(step)
    }

    fn advance(&mut self, token: &Token) -> ParseResult<Step> {
        match token {
            Token::Open(opening) => {
                self.stack.push(Delimiter::Bracket(opening.bracket));
                Ok(Step::Opened)
            },
            Token::Pipe if self.after_operand && self.stack.last() == Some(&Delimiter::Pipe) => {
                self.stack.pop();
                Ok(Step::Closed)
            },
            Token::Pipe => {
                self.stack.push(Delimiter::Pipe);
                Ok(Step::Opened)
            },
            Token::Close(bracket) => match self.stack.last() {
                None => Ok(Step::Unmatched(*bracket)),
                Some(Delimiter::Bracket(open)) if open == bracket => {
                    self.stack.pop();
                    Ok(Step::Closed)
                },
                Some(Delimiter::Bracket(open)) => {
                    Err(ParseError::MismatchedBrackets { expected: open.close(),
                                                         found:    bracket.close(), })
                },
                Some(Delimiter::Pipe) => {
                    Err(ParseError::MismatchedBrackets { expected: '|',
                                                         found:    bracket.close(), })
                },
            },
            _ => Ok(Step::Level),
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the closers of everything still open, innermost first.
    #[must_use]
    pub fn closers(&self) -> Vec<Token> {
        self.stack
            .iter()
            .rev()
            .map(|delimiter| match delimiter {
                Delimiter::Bracket(bracket) => Token::Close(*bracket),
                Delimiter::Pipe => Token::Pipe,
            })
            .collect()
    }
}

/// Returns the nesting depth of every token.
///
/// Brackets count at the depth they open or close from, so the operators
/// and brackets of a top level expression all report zero.
///
/// # Errors
/// `MismatchedBrackets` for unbalanced input.
pub(in crate::interpreter::parser) fn depths(tokens: &[Token]) -> ParseResult<Vec<usize>> {
    let mut nesting = Nesting::default();
    tokens.iter()
          .map(|token| {
              let before = nesting.depth();
              nesting.step(token)?;
              Ok(before.min(nesting.depth()))
          })
          .collect()
}

/// Tests whether the tokens are exactly one delimiter pair and its interior.
pub(in crate::interpreter::parser) fn is_enclosed(tokens: &[Token]) -> bool {
    if tokens.len() < 2 || !matches!(tokens[0], Token::Open(_) | Token::Pipe) {
        return false;
    }

    let mut nesting = Nesting::default();
    for (i, token) in tokens.iter().enumerate() {
        if nesting.step(token).is_err() {
            return false;
        }
        if nesting.depth() == 0 {
            return i == tokens.len() - 1;
        }
    }
    false
}

/// Joins tokens with spaces for error messages.
pub(in crate::interpreter::parser) fn render(tokens: &[Token]) -> String {
    tokens.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}
