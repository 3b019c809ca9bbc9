#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during tokenizing or parsing.
///
/// Tokens carry no position, so every variant reports the offending tokens
/// themselves instead of a line or column.
pub enum ParseError {
    /// A single token that is a symbol and cannot stand on its own.
    UnexpectedSymbol {
        /// The symbol encountered.
        token: String,
    },
    /// A span of several tokens with no operator to split on.
    NoOperators {
        /// The tokens of the span, space separated.
        tokens: String,
    },
    /// A binary operator with nothing on one of its sides, such as `x -`.
    MissingOperand {
        /// The operator that lacks an operand.
        operator: String,
        /// The tokens of the span, space separated.
        tokens:   String,
    },
    /// A comparator appeared inside a bracket pair.
    ComparatorInBrackets {
        /// The comparator encountered.
        comparator: String,
    },
    /// A closing bracket did not match the innermost open bracket.
    MismatchedBrackets {
        /// The closer that was expected.
        expected: char,
        /// The closer that was found.
        found:    char,
    },
    /// A digit run that is not a decimal number, such as `1.2.3`.
    InvalidNumber {
        /// The offending literal.
        literal: String,
    },
    /// A comparison whose operator count is not one less than its side count.
    MalformedComparison {
        /// Number of compared expressions.
        expressions: usize,
        /// Number of comparators.
        operators:   usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedSymbol { token } => {
                write!(f, "Syntax error: Unexpected symbol '{token}'.")
            },

            Self::NoOperators { tokens } => {
                write!(f, "Syntax error: No operators detected in: {tokens}")
            },

            Self::MissingOperand { operator, tokens } => {
                write!(f, "Syntax error: '{operator}' is missing an operand in: {tokens}")
            },

            Self::ComparatorInBrackets { comparator } => write!(f,
                                                                "Syntax error: Comparator '{comparator}' cannot be inside brackets."),

            Self::MismatchedBrackets { expected, found } => write!(f,
                                                                   "Syntax error: Mismatched brackets, expected '{expected}' but found '{found}'."),

            Self::InvalidNumber { literal } => {
                write!(f, "Syntax error: '{literal}' is not a valid number.")
            },

            Self::MalformedComparison { expressions, operators } => write!(f,
                                                                           "Syntax error: {operators} comparators cannot join {expressions} expressions."),
        }
    }
}

impl std::error::Error for ParseError {}
