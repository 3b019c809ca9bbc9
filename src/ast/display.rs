use std::fmt;

use crate::{
    ast::{
        visit::{is_square_root, Visitor},
        BuiltInFunction, Comparator, Comparison, Expression, Function, Locus, Operation, Operator,
        Precedence, Statement,
    },
    interpreter::value::{constant::Constant, set::Set, vector::Vector},
};

/// Renders a tree as text the parser reads back into an equal tree.
#[derive(Default)]
struct TextRenderer {
    /// Set between a pair of `|` bars with no bracket in between, where a
    /// bare `|` would close the outer bars.
    within_bars: bool,
}

impl TextRenderer {
    /// Runs `render` with `within_bars` set, then restores it.
    fn nested(&mut self, within_bars: bool, render: impl FnOnce(&mut Self) -> String) -> String {
        let outer = std::mem::replace(&mut self.within_bars, within_bars);
        let text = render(self);
        self.within_bars = outer;
        text
    }

    /// Renders text that will be wrapped in brackets.
    fn bracketed(&mut self, child: &Expression) -> String {
        self.nested(false, |renderer| child.accept(renderer))
    }

    /// Renders a child, in parentheses when it binds looser than `tightest`.
    fn operand(&mut self, child: &Expression, tightest: Precedence) -> String {
        if child.precedence() < tightest {
            format!("({})", self.bracketed(child))
        } else {
            child.accept(self)
        }
    }

    fn list(&mut self, items: &[Expression]) -> String {
        items.iter()
             .map(|item| self.bracketed(item))
             .collect::<Vec<_>>()
             .join(", ")
    }

    fn infix(&mut self, lhs: &Expression, symbol: &str, rhs: &Expression, level: Precedence) -> String {
        let left = self.operand(lhs, level);
        let right = self.operand(rhs, tighter(level));
        format!("{left}{symbol}{right}")
    }
}

/// Returns the next tighter level, used for right operands of left
/// associative operators.
const fn tighter(level: Precedence) -> Precedence {
    match level {
        Precedence::List => Precedence::Sum,
        Precedence::Sum => Precedence::Negation,
        Precedence::Negation | Precedence::Product => Precedence::Power,
        Precedence::Power | Precedence::Atom => Precedence::Atom,
    }
}

impl Visitor for TextRenderer {
    type Output = String;

    fn visit_null(&mut self) -> String {
        String::new()
    }

    fn visit_constant(&mut self, constant: &Constant) -> String {
        constant.to_string()
    }

    fn visit_variable(&mut self, name: &str) -> String {
        name.to_string()
    }

    fn visit_vector(&mut self, vector: &Vector) -> String {
        let inner = self.list(vector.components());
        if vector.is_parenthetic() {
            format!("({inner})")
        } else {
            format!("[{inner}]")
        }
    }

    fn visit_set(&mut self, set: &Set) -> String {
        format!("{{{}}}", self.list(set.elements()))
    }

    fn visit_operation(&mut self, operation: &Operation) -> String {
        match (operation.operator(), operation.args()) {
            (Operator::Paren, [arg]) => format!("({})", self.bracketed(arg)),
            (Operator::Negate, [arg]) => format!("-{}", self.operand(arg, Precedence::Negation)),
            (Operator::Ln, [arg]) => format!("ln({})", self.bracketed(arg)),
            (Operator::Abs, [arg]) => {
                let bars = format!("|{}|", self.nested(true, |renderer| arg.accept(renderer)));
                if self.within_bars { format!("({bars})") } else { bars }
            },
            (Operator::Add, [lhs, rhs]) => self.infix(lhs, " + ", rhs, Precedence::Sum),
            (Operator::Subtract, [lhs, rhs]) => self.infix(lhs, " - ", rhs, Precedence::Sum),
            (Operator::Multiply, [lhs, rhs]) => self.infix(lhs, "*", rhs, Precedence::Product),
            (Operator::Divide, [lhs, rhs]) => self.infix(lhs, "/", rhs, Precedence::Product),
            (Operator::Modulo, [lhs, rhs]) => self.infix(lhs, "%", rhs, Precedence::Product),
            (Operator::Cross, [lhs, rhs]) => self.infix(lhs, " × ", rhs, Precedence::Product),
            (Operator::Power, [lhs, rhs]) => self.infix(lhs, "^", rhs, Precedence::Power),
            (Operator::Root, [radicand, degree]) if is_square_root(degree) => {
                format!("sqrt({})", self.bracketed(radicand))
            },
            (Operator::Root, [radicand, degree]) => {
                let base = self.operand(radicand, Precedence::Power);
                let degree = self.nested(false, |renderer| renderer.operand(degree, Precedence::Power));
                format!("{base}^(1/{degree})")
            },
            (Operator::LogBase, [base, arg]) if *base == Expression::Constant(Constant::TEN) => {
                format!("log({})", self.bracketed(arg))
            },
            (Operator::LogBase, [base, arg]) => {
                format!("log({}, {})", self.bracketed(base), self.bracketed(arg))
            },
            (operator, args) => format!("{}({})", operator.symbol(), self.list(args)),
        }
    }

    fn visit_function(&mut self, function: &Function) -> String {
        format!("{}({})", function.name(), self.list(function.args()))
    }

    fn visit_builtin(&mut self, call: &BuiltInFunction) -> String {
        format!("{}({})", call.name(), self.bracketed(call.arg()))
    }

    fn visit_locus(&mut self, locus: &Locus) -> String {
        let template = self.bracketed(locus.template());
        let ranges = locus.params()
                          .iter()
                          .zip(locus.lower().iter().zip(locus.upper()))
                          .map(|(param, (lower, upper))| {
                              format!("{} ≤ {param} ≤ {}", self.bracketed(lower), self.bracketed(upper))
                          })
                          .collect::<Vec<_>>()
                          .join(", ");
        format!("{{{template} | {ranges}}}")
    }
}

impl fmt::Display for Expression {
    /// Writes the expression in parser notation.
    ///
    /// # Example
    /// ```
    /// use mathbench::ast::{Expression, Operator};
    ///
    /// let a = Expression::variable("a");
    /// let b = Expression::variable("b");
    /// let c = Expression::variable("c");
    ///
    /// let grouped = Expression::binary(Operator::Multiply, Expression::binary(Operator::Add, a.clone(), b.clone()), c.clone());
    /// assert_eq!(grouped.to_string(), "(a + b)*c");
    ///
    /// let right = Expression::binary(Operator::Subtract, a, Expression::binary(Operator::Subtract, b, c));
    /// assert_eq!(right.to_string(), "a - (b - c)");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.accept(&mut TextRenderer::default()))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sides = self.expressions().iter();
        if let Some(first) = sides.next() {
            write!(f, "{first}")?;
        }
        for (operator, side) in self.operators().iter().zip(sides) {
            write!(f, " {operator} {side}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expression) => write!(f, "{expression}"),
            Self::Comparison(comparison) => write!(f, "{comparison}"),
            Self::Truth(true) => write!(f, "True"),
            Self::Truth(false) => write!(f, "False"),
        }
    }
}
