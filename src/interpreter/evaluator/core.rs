use crate::{
    ast::{Expression, Locus},
    error::RuntimeError,
    interpreter::workspace::{Binding, Workspace},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Expression {
    /// Reduces the expression as far as the workspace allows.
    ///
    /// The tree is simplified bottom up. Constants are fixed points, bound
    /// names are replaced by what they are bound to, operators whose operands
    /// reduced to values are applied, and whatever still depends on a free
    /// name is rebuilt around the simplified parts. Simplifying a result
    /// again yields the same result.
    ///
    /// # Parameters
    /// - `workspace`: The bindings visible to this expression.
    ///
    /// # Returns
    /// The simplified expression, which is never an error just because a
    /// name is unbound.
    ///
    /// # Errors
    /// - `ShapeMismatch` when an operator meets operands it cannot combine.
    /// - `ArgumentCountMismatch` when a bound function is called with the
    ///   wrong number of arguments.
    /// - `RecursionLimit` when user function calls nest too deeply.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::{Expression, Operator}, interpreter::workspace::Workspace};
    ///
    /// let mut workspace = Workspace::new();
    /// workspace.put("x", None, Expression::real(3.0));
    ///
    /// let sum = Expression::binary(Operator::Add, Expression::variable("x"), Expression::real(1.0));
    /// assert_eq!(sum.simplified(&workspace), Ok(Expression::real(4.0)));
    ///
    /// let free = Expression::binary(Operator::Add, Expression::variable("y"), Expression::real(1.0));
    /// assert_eq!(free.simplified(&workspace), Ok(free.clone()));
    /// ```
    pub fn simplified(&self, workspace: &Workspace) -> EvalResult<Self> {
        match self {
            Self::Null => Ok(Self::Null),
            Self::Constant(c) => Ok(Self::Constant(*c)),
            Self::Variable(name) => resolve(name, workspace),
            Self::Vector(vector) => Ok(Self::Vector(vector.try_map(|c| c.simplified(workspace))?)),
            Self::Set(set) => Ok(Self::Set(set.try_map(|e| e.simplified(workspace))?)),
            Self::Operation(operation) => operation.simplified(workspace),
            Self::Function(function) => function.simplified(workspace),
            Self::BuiltInFunction(call) => call.simplified(workspace),
            Self::Locus(locus) => locus.simplified(workspace).map(Self::Locus),
        }
    }
}

/// Resolves a variable reference.
///
/// Arguments bound by a call are already simplified in the caller's scope
/// and are returned untouched. Plain variables are simplified again among
/// the globals, so chains of aliases resolve transitively and a parameter
/// never leaks into a global that shares its name.
fn resolve(name: &str, workspace: &Workspace) -> EvalResult<Expression> {
    match workspace.binding(name) {
        Some(Binding::Argument(value)) => Ok(value.clone()),
        Some(Binding::Variable(value)) => value.simplified(&workspace.global_scope()),
        Some(Binding::Function { .. }) | None => Ok(Expression::Variable(name.to_string())),
    }
}

impl Locus {
    /// Simplifies the template and the bounds with the parameters hidden.
    pub(crate) fn simplified(&self, workspace: &Workspace) -> EvalResult<Self> {
        let hidden = workspace.localize_hiding(self.params());
        let simplify_all = |bounds: &[Expression]| {
            bounds.iter()
                  .map(|bound| bound.simplified(&hidden))
                  .collect::<EvalResult<Vec<_>>>()
        };

        Ok(self.rebuilt(self.template().simplified(&hidden)?,
                        self.params().to_vec(),
                        simplify_all(self.lower())?,
                        simplify_all(self.upper())?))
    }
}
