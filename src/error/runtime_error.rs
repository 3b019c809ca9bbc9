#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while simplifying.
pub enum RuntimeError {
    /// A user function was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of parameters it was defined with.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// Operands had shapes the operator cannot combine, such as adding a
    /// scalar to a vector or a cross product of non length 3 vectors.
    ShapeMismatch {
        /// Details about the mismatch.
        details: String,
    },
    /// Tried to access a component outside of an expression's shape.
    IndexOutOfBounds {
        /// The `(row, column)` that was requested.
        index: (usize, usize),
        /// The `(rows, columns)` shape of the expression.
        shape: (usize, usize),
    },
    /// User function calls nested deeper than the configured limit.
    RecursionLimit {
        /// The function whose call exceeded the limit.
        name:  String,
        /// The limit that was exceeded.
        limit: usize,
    },
    /// A variable assignment whose value refers to the variable itself.
    CircularDefinition {
        /// The name of the variable.
        name: String,
    },
    /// Two values cannot be ordered, such as complex numbers with a nonzero
    /// imaginary part.
    NotComparable {
        /// Details describing the comparison.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArgumentCountMismatch { name, expected, found } => write!(f,
                                                                            "Error: {name} takes {expected} arguments but {found} were given."),

            Self::ShapeMismatch { details } => write!(f, "Error: Shape mismatch: {details}."),

            Self::IndexOutOfBounds { index, shape } => write!(f,
                                                              "Error: Index ({}, {}) is out of bounds for shape ({}, {}).",
                                                              index.0, index.1, shape.0, shape.1),

            Self::RecursionLimit { name, limit } => write!(f,
                                                           "Error: Calling {name} exceeded the maximum call depth of {limit}."),

            Self::CircularDefinition { name } => {
                write!(f, "Error: Circular definition, '{name}' refers to itself.")
            },

            Self::NotComparable { details } => write!(f, "Error: Cannot compare {details}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
