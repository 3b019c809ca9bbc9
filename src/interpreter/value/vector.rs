use crate::{
    ast::{Expression, Operator},
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, operation::binary},
        value::constant::Constant,
    },
};

/// A fixed-length ordered tuple of expressions.
///
/// `parenthetic` records whether the vector was written `(a, b)` rather than
/// `[a, b]`. It only affects rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    components:  Vec<Expression>,
    parenthetic: bool,
}

impl Vector {
    /// Constructs a vector written with square brackets.
    #[must_use]
    pub const fn new(components: Vec<Expression>) -> Self {
        Self { components,
               parenthetic: false }
    }

    /// Constructs a vector written with parentheses.
    #[must_use]
    pub const fn parenthesized(components: Vec<Expression>) -> Self {
        Self { components,
               parenthetic: true }
    }

    /// Joins two expressions into one vector, splicing in the components of
    /// either side that is itself a vector.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::Expression, interpreter::value::vector::Vector};
    ///
    /// let left = Vector::new(vec![Expression::real(1.0), Expression::real(2.0)]);
    /// let joined = Vector::concat(left.into(), Expression::real(3.0));
    /// assert_eq!(joined.len(), 3);
    /// ```
    #[must_use]
    pub fn concat(left: Expression, right: Expression) -> Self {
        let mut components = Vec::new();
        for part in [left, right] {
            match part {
                Expression::Vector(vector) => components.extend(vector.components),
                other => components.push(other),
            }
        }
        Self::new(components)
    }

    #[must_use]
    pub(crate) fn into_parenthetic(self) -> Self {
        Self::parenthesized(self.components)
    }

    #[must_use]
    pub fn components(&self) -> &[Expression] {
        &self.components
    }

    #[must_use]
    pub fn into_components(self) -> Vec<Expression> {
        self.components
    }

    #[must_use]
    pub const fn is_parenthetic(&self) -> bool {
        self.parenthetic
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the component at `index`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` when `index` is not below the length.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::Expression, interpreter::value::vector::Vector};
    ///
    /// let v = Vector::new(vec![Expression::real(1.0), Expression::real(2.0)]);
    /// assert_eq!(v.get(1), Ok(&Expression::real(2.0)));
    /// assert!(v.get(2).is_err());
    /// ```
    pub fn get(&self, index: usize) -> EvalResult<&Expression> {
        self.components
            .get(index)
            .ok_or(RuntimeError::IndexOutOfBounds { index: (index, 0),
                                                    shape: (self.len(), 1), })
    }

    /// Applies a map to every component, keeping the notation.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
        where F: FnMut(&Expression) -> Expression
    {
        Self { components:  self.components.iter().map(f).collect(),
               parenthetic: self.parenthetic, }
    }

    /// Applies a fallible map to every component, keeping the notation.
    pub fn try_map<F>(&self, f: F) -> EvalResult<Self>
        where F: FnMut(&Expression) -> EvalResult<Expression>
    {
        Ok(Self { components:  self.components.iter().map(f).collect::<EvalResult<_>>()?,
                  parenthetic: self.parenthetic, })
    }

    /// Combines two vectors component by component.
    pub(crate) fn zip_with(&self, other: &Self, operator: Operator) -> EvalResult<Self> {
        self.check_same_length(other, operator)?;

        let components = self.components
                             .iter()
                             .zip(&other.components)
                             .map(|(a, b)| binary(operator, a.clone(), b.clone()))
                             .collect::<EvalResult<_>>()?;

        Ok(Self { components,
                  parenthetic: self.parenthetic })
    }

    /// Returns the dot product. Two empty vectors have dot product zero.
    pub(crate) fn dot(&self, other: &Self) -> EvalResult<Expression> {
        self.check_same_length(other, Operator::Multiply)?;

        let mut sum: Option<Expression> = None;
        for (a, b) in self.components.iter().zip(&other.components) {
            let term = binary(Operator::Multiply, a.clone(), b.clone())?;
            sum = Some(match sum {
                           Some(sum) => binary(Operator::Add, sum, term)?,
                           None => term,
                       });
        }

        Ok(sum.unwrap_or(Expression::Constant(Constant::ZERO)))
    }

    /// Returns the cross product of two vectors of length three.
    pub(crate) fn cross(&self, other: &Self) -> EvalResult<Self> {
        let ([a1, a2, a3], [b1, b2, b3]) = (self.components.as_slice(), other.components.as_slice())
        else {
            return Err(RuntimeError::ShapeMismatch { details: format!("the cross product needs two vectors of length 3, found lengths {} and {}",
                                                                      self.len(),
                                                                      other.len()) });
        };

        let term = |p: &Expression, q: &Expression, r: &Expression, s: &Expression| {
            binary(Operator::Subtract,
                   binary(Operator::Multiply, p.clone(), q.clone())?,
                   binary(Operator::Multiply, r.clone(), s.clone())?)
        };

        Ok(Self { components:  vec![term(a2, b3, a3, b2)?,
                                    term(a3, b1, a1, b3)?,
                                    term(a1, b2, a2, b1)?],
                  parenthetic: self.parenthetic, })
    }

    /// Returns the Euclidean norm.
    ///
    /// Constant components contribute their squared magnitude; symbolic ones
    /// contribute `x*x`.
    pub(crate) fn norm(&self) -> EvalResult<Expression> {
        let mut sum = Expression::Constant(Constant::ZERO);
        for component in &self.components {
            let square = match component {
                Expression::Constant(c) => Expression::real(c.abs().powi(2)),
                other => binary(Operator::Multiply, other.clone(), other.clone())?,
            };
            sum = binary(Operator::Add, sum, square)?;
        }

        binary(Operator::Root, sum, Expression::Constant(Constant::TWO))
    }

    fn check_same_length(&self, other: &Self, operator: Operator) -> EvalResult<()> {
        if self.len() == other.len() {
            return Ok(());
        }
        Err(RuntimeError::ShapeMismatch { details: format!("cannot apply '{}' to vectors of length {} and {}",
                                                           operator.symbol(),
                                                           self.len(),
                                                           other.len()) })
    }
}
