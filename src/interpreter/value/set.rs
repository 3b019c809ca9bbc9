use crate::{ast::Expression, interpreter::evaluator::core::EvalResult};

/// An unordered collection of expressions.
///
/// Elements keep the order they were written in for display, but no
/// operation depends on that order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Set {
    elements: Vec<Expression>,
}

impl Set {
    #[must_use]
    pub const fn new(elements: Vec<Expression>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn elements(&self) -> &[Expression] {
        &self.elements
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<Expression> {
        self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Applies a map to every element.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
        where F: FnMut(&Expression) -> Expression
    {
        Self { elements: self.elements.iter().map(f).collect(), }
    }

    /// Applies a fallible map to every element.
    pub fn try_map<F>(&self, f: F) -> EvalResult<Self>
        where F: FnMut(&Expression) -> EvalResult<Expression>
    {
        Ok(Self { elements: self.elements.iter().map(f).collect::<EvalResult<_>>()?, })
    }
}
