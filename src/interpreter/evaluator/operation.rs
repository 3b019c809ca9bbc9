use crate::{
    ast::{Expression, Operation, Operator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{constant::Constant, set::Set, vector::Vector},
        workspace::Workspace,
    },
};

/// What an already simplified operand can take part in.
///
/// Operators dispatch on a pair of these instead of testing node kinds one at
/// a time.
enum Operand {
    /// A complex constant.
    Scalar(Constant),
    /// A vector; its components may still be symbolic.
    Tuple(Vector),
    /// A set; operators lift over its elements.
    Collection(Set),
    /// Anything that has not reduced to a value.
    Symbolic(Expression),
}

impl From<Expression> for Operand {
    fn from(expression: Expression) -> Self {
        match expression {
            Expression::Constant(c) => Self::Scalar(c),
            Expression::Vector(v) => Self::Tuple(v),
            Expression::Set(s) => Self::Collection(s),
            other => Self::Symbolic(other),
        }
    }
}

impl From<Operand> for Expression {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Scalar(c) => Self::Constant(c),
            Operand::Tuple(v) => Self::Vector(v),
            Operand::Collection(s) => Self::Set(s),
            Operand::Symbolic(e) => e,
        }
    }
}

impl Operation {
    /// Simplifies the arguments, then applies the operator to them.
    pub(crate) fn simplified(&self, workspace: &Workspace) -> EvalResult<Expression> {
        match self.args() {
            [arg] => unary(self.operator(), arg.simplified(workspace)?),
            [lhs, rhs] => binary(self.operator(),
                                 lhs.simplified(workspace)?,
                                 rhs.simplified(workspace)?),
            _ => Ok(Expression::Operation(self.clone())),
        }
    }
}

/// Applies a one argument operator to a simplified operand.
///
/// Parentheses disappear, constants reduce through the kernel, `|v|` of a
/// vector is its norm, vectors and sets are mapped element by element, and
/// anything symbolic is rebuilt as an operation.
pub(crate) fn unary(operator: Operator, arg: Expression) -> EvalResult<Expression> {
    if operator == Operator::Paren {
        return Ok(arg);
    }

    match Operand::from(arg) {
        Operand::Scalar(c) => Ok(Expression::Constant(match operator {
                                  Operator::Negate => c.negative(),
                                  Operator::Ln => c.ln(),
                                  Operator::Abs => Constant::real(c.abs()),
                                  _ => c,
                              })),
        Operand::Tuple(v) if operator == Operator::Abs => v.norm(),
        Operand::Tuple(v) => Ok(Expression::Vector(v.try_map(|c| unary(operator, c.clone()))?)),
        Operand::Collection(s) => Ok(Expression::Set(s.try_map(|e| unary(operator, e.clone()))?)),
        Operand::Symbolic(e) => Ok(Expression::unary(operator, e)),
    }
}

/// Applies a two argument operator to simplified operands.
///
/// This never looks anything up, so it is safe to call on values that came
/// from a different scope.
///
/// # Errors
/// Returns `ShapeMismatch` for operand shapes the operator is not defined on,
/// such as adding a scalar to a vector or dividing a scalar by a vector.
pub(crate) fn binary(operator: Operator, lhs: Expression, rhs: Expression) -> EvalResult<Expression> {
    match (Operand::from(lhs), Operand::from(rhs)) {
        (Operand::Collection(left), Operand::Collection(right)) => {
            let mut elements = Vec::with_capacity(left.len() * right.len());
            for a in left.elements() {
                for b in right.elements() {
                    elements.push(binary(operator, a.clone(), b.clone())?);
                }
            }
            Ok(Expression::Set(Set::new(elements)))
        },
        (Operand::Collection(left), right) => {
            let right = Expression::from(right);
            Ok(Expression::Set(left.try_map(|a| binary(operator, a.clone(), right.clone()))?))
        },
        (left, Operand::Collection(right)) => {
            let left = Expression::from(left);
            Ok(Expression::Set(right.try_map(|b| binary(operator, left.clone(), b.clone()))?))
        },
        (Operand::Scalar(a), Operand::Scalar(b)) => Ok(Expression::Constant(scalar(operator, a, b))),
        (Operand::Tuple(u), Operand::Tuple(v)) => tuples(operator, &u, &v),
        (Operand::Tuple(v), Operand::Scalar(c)) => tuple_scalar(operator, &v, c),
        (Operand::Scalar(c), Operand::Tuple(v)) => scalar_tuple(operator, c, &v),
        (left, right) => Ok(Expression::binary(operator, left.into(), right.into())),
    }
}

fn scalar(operator: Operator, a: Constant, b: Constant) -> Constant {
    match operator {
        Operator::Add => a.plus(b),
        Operator::Subtract => a.minus(b),
        Operator::Multiply | Operator::Cross => a.times(b),
        Operator::Divide => a.divide(b),
        Operator::Modulo => a.modulo(b),
        Operator::Power => a.pow(b),
        Operator::Root => a.root(b),
        Operator::LogBase => b.log_base(a),
        Operator::Paren | Operator::Negate | Operator::Ln | Operator::Abs => a,
    }
}

fn tuples(operator: Operator, u: &Vector, v: &Vector) -> EvalResult<Expression> {
    match operator {
        Operator::Add | Operator::Subtract => u.zip_with(v, operator).map(Expression::Vector),
        Operator::Multiply => u.dot(v),
        Operator::Cross => u.cross(v).map(Expression::Vector),
        _ => Err(shape_mismatch(operator, "two vectors")),
    }
}

fn tuple_scalar(operator: Operator, v: &Vector, c: Constant) -> EvalResult<Expression> {
    match operator {
        Operator::Multiply | Operator::Cross => {
            let factor = Expression::Constant(c);
            v.try_map(|e| binary(Operator::Multiply, e.clone(), factor.clone()))
             .map(Expression::Vector)
        },
        Operator::Divide => {
            let divisor = Expression::Constant(c);
            v.try_map(|e| binary(Operator::Divide, e.clone(), divisor.clone()))
             .map(Expression::Vector)
        },
        _ => Err(shape_mismatch(operator, "a vector and a scalar")),
    }
}

fn scalar_tuple(operator: Operator, c: Constant, v: &Vector) -> EvalResult<Expression> {
    match operator {
        Operator::Multiply | Operator::Cross => {
            let factor = Expression::Constant(c);
            v.try_map(|e| binary(Operator::Multiply, factor.clone(), e.clone()))
             .map(Expression::Vector)
        },
        _ => Err(shape_mismatch(operator, "a scalar and a vector")),
    }
}

fn shape_mismatch(operator: Operator, operands: &str) -> RuntimeError {
    RuntimeError::ShapeMismatch { details: format!("'{}' is not defined between {operands}",
                                                   operator.symbol()) }
}
