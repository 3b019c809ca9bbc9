use std::fmt;

use log::trace;
use logos::Logos;

use crate::{
    ast::Comparator,
    interpreter::parser::{
        core::ParseResult,
        utils::{Nesting, Step},
    },
};

/// The three kinds of typed bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    /// `( )`
    Round,
    /// `[ ]`
    Square,
    /// `{ }`
    Curly,
}

impl Bracket {
    #[must_use]
    pub const fn open(self) -> char {
        match self {
            Self::Round => '(',
            Self::Square => '[',
            Self::Curly => '{',
        }
    }

    #[must_use]
    pub const fn close(self) -> char {
        match self {
            Self::Round => ')',
            Self::Square => ']',
            Self::Curly => '}',
        }
    }

    #[must_use]
    pub const fn from_open(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::Round),
            '[' => Some(Self::Square),
            '{' => Some(Self::Curly),
            _ => None,
        }
    }
}

/// An opening bracket together with the name written right before it.
///
/// `sin(` lexes as one `Opening` with head `"sin"`; a bare `(` has an empty
/// head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub head:    String,
    pub bracket: Bracket,
}

impl Opening {
    /// An opening bracket with no head.
    #[must_use]
    pub const fn bare(bracket: Bracket) -> Self {
        Self { head: String::new(),
               bracket }
    }
}

/// Represents a lexical token in one line of input.
///
/// Tokens carry no position. Whitespace is skipped, so `2 x` and `2x` lex to
/// the same tokens.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// A run of digits and decimal points such as `3.14`. Validated by the
    /// parser, so `1.2.3` is still one token.
    #[regex(r"[0-9.]+", |lex| lex.slice().to_string())]
    Number(String),
    /// Any other run of characters that are not operators, brackets or
    /// whitespace, such as `x`, `theta2` or `π`.
    #[regex(r"[^0-9. \t\r\n\f+\-*•×/\\%\^,=≠<≤>≥!()\[\]{}|][^ \t\r\n\f+\-*•×/\\%\^,=≠<≤>≥!()\[\]{}|]*",
            |lex| lex.slice().to_string(),
            allow_greedy = true)]
    Identifier(String),
    /// An opening bracket, fused with the identifier before it: `(`, `f(`,
    /// `sqrt(`, `[`, `{`.
    #[regex(r"([^0-9. \t\r\n\f+\-*•×/\\%\^,=≠<≤>≥!()\[\]{}|][^ \t\r\n\f+\-*•×/\\%\^,=≠<≤>≥!()\[\]{}|]*)?[(\[{]",
            open_bracket,
            allow_greedy = true)]
    Open(Opening),
    /// `)`, `]` or `}`
    #[token(")", |_| Bracket::Round)]
    #[token("]", |_| Bracket::Square)]
    #[token("}", |_| Bracket::Curly)]
    Close(Bracket),
    /// `|`, which opens or closes an absolute value.
    #[token("|")]
    Pipe,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `•`
    #[token("•")]
    Bullet,
    /// `×`
    #[token("×")]
    Cross,
    /// `/`
    #[token("/")]
    Slash,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `,`
    #[token(",")]
    Comma,
    /// `= ≠ < ≤ > ≥` and the ASCII spellings `!= <= >=`.
    #[token("=", |_| Comparator::Equal)]
    #[token("≠", |_| Comparator::NotEqual)]
    #[token("!=", |_| Comparator::NotEqual)]
    #[token("<", |_| Comparator::Less)]
    #[token("≤", |_| Comparator::LessEqual)]
    #[token("<=", |_| Comparator::LessEqual)]
    #[token(">", |_| Comparator::Greater)]
    #[token("≥", |_| Comparator::GreaterEqual)]
    #[token(">=", |_| Comparator::GreaterEqual)]
    Compare(Comparator),
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Splits the slice of an opening token into its head and bracket.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(Opening)`: The head text and the bracket kind.
/// - `None`: If the slice does not end in an opening bracket.
fn open_bracket(lex: &logos::Lexer<Token>) -> Option<Opening> {
    let slice = lex.slice();
    let last = slice.chars().next_back()?;
    let head = &slice[..slice.len() - last.len_utf8()];

    Some(Opening { head:    head.to_string(),
                   bracket: Bracket::from_open(last)?, })
}

impl Token {
    /// Tests whether the token is one of the arithmetic operators or the
    /// comma. Comparators are not operators in this sense.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self,
                 Self::Plus
                 | Self::Minus
                 | Self::Star
                 | Self::Bullet
                 | Self::Cross
                 | Self::Slash
                 | Self::Backslash
                 | Self::Percent
                 | Self::Caret
                 | Self::Comma)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) | Self::Identifier(text) => write!(f, "{text}"),
            Self::Open(Opening { head, bracket }) => write!(f, "{head}{}", bracket.open()),
            Self::Close(bracket) => write!(f, "{}", bracket.close()),
            Self::Pipe => write!(f, "|"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Bullet => write!(f, "•"),
            Self::Cross => write!(f, "×"),
            Self::Slash => write!(f, "/"),
            Self::Backslash => write!(f, "\\"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::Comma => write!(f, ","),
            Self::Compare(comparator) => write!(f, "{}", comparator.symbol()),
            Self::Ignored => Ok(()),
        }
    }
}

/// Splits one line into tokens and balances its brackets.
///
/// Characters the lexer does not recognize become identifiers, so only the
/// bracket balancing can fail.
///
/// # Errors
/// `MismatchedBrackets` when a closer does not match the innermost opener.
///
/// # Example
/// ```
/// use mathbench::interpreter::lexer::{tokenize, Token};
///
/// let tokens = tokenize("sin(x").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1], Token::Identifier("x".to_string()));
/// assert_eq!(tokens[2].to_string(), ")");
///
/// assert!(tokenize("(x]").is_err());
/// ```
pub fn tokenize(input: &str) -> ParseResult<Vec<Token>> {
    let tokens = Token::lexer(input).spanned()
                                    .map(|(token, span)| {
                                        token.unwrap_or_else(|()| Token::Identifier(input[span].to_string()))
                                    })
                                    .collect::<Vec<_>>();

    let balanced = balance(tokens)?;
    trace!("tokenized {input:?} into {}", balanced.len());
    Ok(balanced)
}

/// Closes what was left open and opens what was closed too early.
///
/// A closer with nothing open gets a bare opener of its kind prepended. Every
/// opener still open at the end gets its closer appended, innermost first.
///
/// # Errors
/// `MismatchedBrackets` when a closer does not match the innermost opener.
pub fn balance(tokens: Vec<Token>) -> ParseResult<Vec<Token>> {
    let mut nesting = Nesting::default();
    let mut prefix = Vec::new();

    for token in &tokens {
        match nesting.step(token)? {
            Step::Unmatched(bracket) => prefix.push(Token::Open(Opening::bare(bracket))),
            Step::Opened | Step::Closed | Step::Level => {},
        }
    }

    prefix.reverse();
    prefix.extend(tokens);
    prefix.extend(nesting.closers());
    Ok(prefix)
}
