use log::trace;

use crate::{
    ast::{Expression, Function, Operator},
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, operation::binary},
        value::vector::Vector,
        workspace::{Binding, Workspace},
    },
};

impl Function {
    /// Evaluates a call.
    ///
    /// The arguments are simplified in the calling scope first. What happens
    /// next depends on what the name is bound to:
    /// - a user function: its body is simplified in a scope where each
    ///   parameter is bound to the matching argument;
    /// - a plain value: the call is juxtaposition, the value times the
    ///   argument;
    /// - nothing: the call stays symbolic over the simplified arguments.
    pub(crate) fn simplified(&self, workspace: &Workspace) -> EvalResult<Expression> {
        let args = self.args()
                       .iter()
                       .map(|arg| arg.simplified(workspace))
                       .collect::<EvalResult<Vec<_>>>()?;

        match workspace.binding(self.name()) {
            Some(Binding::Function { params, body }) => {
                call(self.name(), params, body, args, workspace)
            },
            Some(Binding::Variable(_) | Binding::Argument(_)) => {
                juxtapose(self.name(), args, workspace)
            },
            None => Ok(Expression::Function(Self::new(self.name(), args))),
        }
    }
}

/// Simplifies a user function body with its parameters bound.
///
/// # Parameters
/// - `name`: Function name, for errors and logging.
/// - `params`: Parameter names the function was defined with.
/// - `body`: The stored body.
/// - `args`: Arguments, already simplified in the caller's scope.
/// - `workspace`: The caller's scope.
///
/// # Returns
/// The simplified body, or an error on an argument count mismatch or when
/// the call nests deeper than the workspace allows.
fn call(name: &str,
        params: &[String],
        body: &Expression,
        args: Vec<Expression>,
        workspace: &Workspace)
        -> EvalResult<Expression> {
    if params.len() != args.len() {
        return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                         expected: params.len(),
                                                         found:    args.len(), });
    }

    let local = workspace.localize(params, args);
    let limit = workspace.settings().max_call_depth;
    if local.depth() > limit {
        return Err(RuntimeError::RecursionLimit { name: name.to_string(),
                                                  limit });
    }

    trace!("calling {name} at depth {}", local.depth());
    body.simplified(&local)
}

/// Treats `a(x)` as `a*x` when `a` is bound to a plain value.
fn juxtapose(name: &str, mut args: Vec<Expression>, workspace: &Workspace) -> EvalResult<Expression> {
    let value = Expression::variable(name).simplified(workspace)?;

    let operand = match args.len() {
        0 => return Ok(value),
        1 => args.remove(0),
        _ => Expression::Vector(Vector::parenthesized(args)),
    };

    binary(Operator::Multiply, value, operand)
}
