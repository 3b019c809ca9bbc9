use crate::{
    ast::{BuiltInFunction, Expression, Function, Locus, Operation, Operator, Precedence},
    interpreter::value::{constant::Constant, set::Set, vector::Vector},
};

/// Callbacks for walking an expression tree, one per node kind.
///
/// [`Expression::accept`] dispatches to the matching callback. The visitor
/// decides itself whether and when to descend into children, which lets a
/// renderer compare a child's [`precedence`](Expression::precedence) with
/// its parent's before visiting it.
pub trait Visitor {
    /// What visiting a node produces.
    type Output;

    fn visit_null(&mut self) -> Self::Output;
    fn visit_constant(&mut self, constant: &Constant) -> Self::Output;
    fn visit_variable(&mut self, name: &str) -> Self::Output;
    fn visit_vector(&mut self, vector: &Vector) -> Self::Output;
    fn visit_set(&mut self, set: &Set) -> Self::Output;
    fn visit_operation(&mut self, operation: &Operation) -> Self::Output;
    fn visit_function(&mut self, function: &Function) -> Self::Output;
    fn visit_builtin(&mut self, call: &BuiltInFunction) -> Self::Output;
    fn visit_locus(&mut self, locus: &Locus) -> Self::Output;
}

impl Expression {
    /// Calls the visitor callback for this node's kind.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Null => visitor.visit_null(),
            Self::Constant(constant) => visitor.visit_constant(constant),
            Self::Variable(name) => visitor.visit_variable(name),
            Self::Vector(vector) => visitor.visit_vector(vector),
            Self::Set(set) => visitor.visit_set(set),
            Self::Operation(operation) => visitor.visit_operation(operation),
            Self::Function(function) => visitor.visit_function(function),
            Self::BuiltInFunction(call) => visitor.visit_builtin(call),
            Self::Locus(locus) => visitor.visit_locus(locus),
        }
    }

    /// Returns the direct sub-expressions in rendering order.
    ///
    /// # Example
    /// ```
    /// use mathbench::ast::{Expression, Operator};
    ///
    /// let sum = Expression::binary(Operator::Add, Expression::variable("a"), Expression::real(1.0));
    /// assert_eq!(sum.children(), vec![&Expression::variable("a"), &Expression::real(1.0)]);
    /// assert!(Expression::real(1.0).children().is_empty());
    /// ```
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Null | Self::Constant(_) | Self::Variable(_) => Vec::new(),
            Self::Vector(vector) => vector.components().iter().collect(),
            Self::Set(set) => set.elements().iter().collect(),
            Self::Operation(operation) => operation.args().iter().collect(),
            Self::Function(function) => function.args().iter().collect(),
            Self::BuiltInFunction(call) => vec![call.arg()],
            Self::Locus(locus) => std::iter::once(locus.template()).chain(locus.lower())
                                                                   .chain(locus.upper())
                                                                   .collect(),
        }
    }

    /// Returns how tightly the rendered form of this node binds.
    ///
    /// A negative constant renders with a leading minus and a constant with
    /// both parts renders as a sum, so those bind like negation and addition.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Constant(constant) => constant_precedence(constant),
            Self::Operation(operation) => operation.precedence(),
            _ => Precedence::Atom,
        }
    }
}

impl Operation {
    /// Returns how tightly the rendered form of this operation binds.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        match (self.operator(), self.args()) {
            (Operator::Add | Operator::Subtract, _) => Precedence::Sum,
            (Operator::Negate, _) => Precedence::Negation,
            (Operator::Multiply | Operator::Divide | Operator::Modulo | Operator::Cross, _) => {
                Precedence::Product
            },
            (Operator::Root, [_, degree]) if is_square_root(degree) => Precedence::Atom,
            (Operator::Power | Operator::Root, _) => Precedence::Power,
            (Operator::Paren | Operator::Ln | Operator::LogBase | Operator::Abs, _) => {
                Precedence::Atom
            },
        }
    }
}

/// Tests whether a root degree is the constant two.
pub(crate) fn is_square_root(degree: &Expression) -> bool {
    *degree == Expression::Constant(Constant::TWO)
}

#[allow(clippy::float_cmp)]
fn constant_precedence(constant: &Constant) -> Precedence {
    let re = constant.re + 0.0;
    let im = constant.im + 0.0;

    if re != 0.0 && im != 0.0 {
        Precedence::Sum
    } else if re < 0.0 || im < 0.0 {
        Precedence::Negation
    } else if im != 0.0 && im != 1.0 {
        Precedence::Product
    } else {
        Precedence::Atom
    }
}
