use log::debug;

use crate::{
    ast::{Comparator, Comparison, Expression, Statement},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::constant::Constant, workspace::Workspace},
};

impl Statement {
    /// Simplifies one statement against the session workspace.
    ///
    /// Bare expressions are simplified. `name = rhs` and `f(x, ...) = body`
    /// bind into `workspace` and return the simplified right side. Every
    /// other comparison either decides to [`Statement::Truth`] or stays a
    /// comparison of the simplified sides.
    ///
    /// The workspace is only written to after the right side simplified
    /// without error.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::{Expression, Statement}, interpreter::workspace::Workspace, parse};
    ///
    /// let mut workspace = Workspace::new();
    ///
    /// let assignment = parse("z = 4+4").unwrap();
    /// assert_eq!(assignment.simplified(&mut workspace), Ok(Statement::Expression(Expression::real(8.0))));
    ///
    /// let check = parse("z > 7").unwrap();
    /// assert_eq!(check.simplified(&mut workspace), Ok(Statement::Truth(true)));
    /// ```
    pub fn simplified(&self, workspace: &mut Workspace) -> EvalResult<Self> {
        let result = match self {
            Self::Expression(expression) => expression.simplified(workspace).map(Self::Expression),
            Self::Comparison(comparison) => comparison.simplified(workspace),
            Self::Truth(truth) => Ok(Self::Truth(*truth)),
        }?;

        debug!("simplified {self} to {result}");
        Ok(result)
    }
}

impl Comparison {
    /// Simplifies a comparison, treating `=` with a storable left side as a
    /// binding.
    pub fn simplified(&self, workspace: &mut Workspace) -> EvalResult<Statement> {
        if let ([lhs, rhs], [Comparator::Equal]) = (self.expressions(), self.operators()) {
            match lhs {
                Expression::Variable(name) => return assign_variable(name, rhs, workspace),
                Expression::Function(function) => {
                    if let Some(params) = function.params() {
                        return define_function(function.name(), params, rhs, workspace);
                    }
                },
                _ => {},
            }
        }

        let sides = self.expressions()
                        .iter()
                        .map(|side| side.simplified(workspace))
                        .collect::<EvalResult<Vec<_>>>()?;

        if !sides.iter().all(is_value) {
            return Ok(Statement::Comparison(self.with_sides(sides)));
        }

        let tolerance = workspace.tolerance();
        let mut truth = true;
        for (operator, pair) in self.operators().iter().zip(sides.windows(2)) {
            truth &= compare(*operator, &pair[0], &pair[1], tolerance)?;
        }
        Ok(Statement::Truth(truth))
    }
}

/// Binds `name` to the simplified right side.
///
/// # Errors
/// `CircularDefinition` when the simplified value still refers to `name`.
fn assign_variable(name: &str, rhs: &Expression, workspace: &mut Workspace) -> EvalResult<Statement> {
    let value = rhs.simplified(workspace)?;

    if value.inputs(workspace).iter().any(|input| input == name) {
        return Err(RuntimeError::CircularDefinition { name: name.to_string() });
    }

    workspace.put(name, None, value.clone());
    Ok(Statement::Expression(value))
}

/// Stores the raw body of a user function and returns a preview of it
/// simplified with the parameters and the function itself left free.
fn define_function(name: &str,
                   params: Vec<String>,
                   body: &Expression,
                   workspace: &mut Workspace)
                   -> EvalResult<Statement> {
    let mut hidden = params.clone();
    hidden.push(name.to_string());
    let preview = body.simplified(&workspace.localize_hiding(&hidden))?;

    workspace.put(name, Some(params), body.clone());
    Ok(Statement::Expression(preview))
}

/// Tests whether an expression is fully reduced to numbers.
fn is_value(expression: &Expression) -> bool {
    match expression {
        Expression::Constant(_) => true,
        Expression::Vector(vector) => vector.components().iter().all(is_value),
        Expression::Set(set) => set.elements().iter().all(is_value),
        _ => false,
    }
}

/// Applies one comparator to two values.
///
/// # Parameters
/// - `operator`: The comparator between the two sides.
/// - `lhs`, `rhs`: Values, as tested by [`is_value`].
/// - `tolerance`: Relative tolerance for equality.
///
/// # Returns
/// Whether the comparison holds. Equality is approximate; `<` and `>` also
/// fail for values that are approximately equal.
fn compare(operator: Comparator, lhs: &Expression, rhs: &Expression, tolerance: f64) -> EvalResult<bool> {
    if matches!(operator, Comparator::Equal | Comparator::NotEqual) {
        let equality = equal(lhs, rhs, tolerance);
        return Ok(if operator == Comparator::Equal { equality } else { !equality });
    }

    let left = real_value(operator, lhs, tolerance)?;
    let right = real_value(operator, rhs, tolerance)?;
    let close = Constant::real(left).approx_eq(&Constant::real(right), tolerance);

    Ok(match operator {
        Comparator::Less => left < right && !close,
        Comparator::LessEqual => left < right || close,
        Comparator::Greater => left > right && !close,
        Comparator::GreaterEqual => left > right || close,
        Comparator::Equal | Comparator::NotEqual => close,
    })
}

fn equal(lhs: &Expression, rhs: &Expression, tolerance: f64) -> bool {
    match (lhs, rhs) {
        (Expression::Constant(a), Expression::Constant(b)) => a.approx_eq(b, tolerance),
        (Expression::Vector(a), Expression::Vector(b)) => {
            a.len() == b.len()
            && a.components()
                .iter()
                .zip(b.components())
                .all(|(x, y)| equal(x, y, tolerance))
        },
        (Expression::Set(a), Expression::Set(b)) => {
            let covers = |from: &[Expression], to: &[Expression]| {
                from.iter()
                    .all(|x| to.iter().any(|y| equal(x, y, tolerance)))
            };
            covers(a.elements(), b.elements()) && covers(b.elements(), a.elements())
        },
        _ => false,
    }
}

/// Returns the real value of a constant whose imaginary part is negligible.
fn real_value(operator: Comparator, value: &Expression, tolerance: f64) -> EvalResult<f64> {
    match value {
        Expression::Constant(c) if c.im.abs() <= tolerance * c.re.abs().max(1.0) => Ok(c.re),
        other => {
            Err(RuntimeError::NotComparable { details: format!("'{other}' with '{operator}'") })
        },
    }
}
