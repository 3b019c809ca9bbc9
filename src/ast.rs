use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::{builtin::BuiltIn, core::EvalResult},
        parser::core::ParseResult,
        value::{constant::Constant, set::Set, vector::Vector},
    },
};

/// Textual rendering.
///
/// Renders expressions and statements back to notation that the parser
/// accepts, inserting parentheses only where operator precedence requires
/// them.
pub mod display;
/// Shape, component access, free variables and renaming.
///
/// These queries inspect a tree without simplifying it. They are what the
/// charting collaborator uses to decide how many parameters a plot needs and
/// how to sample each coordinate.
pub mod structure;
/// Structural visitor.
///
/// Exposes one callback per node kind together with operator precedence, so
/// that renderers other than the textual one can walk a tree without
/// matching on its internals.
pub mod visit;

/// Operator tag of an [`Operation`] node.
///
/// The arity of each tag is fixed: `Paren`, `Negate`, `Ln` and `Abs` take one
/// argument, every other tag takes two. `Root` takes `[radicand, degree]` and
/// `LogBase` takes `[base, argument]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Explicit parentheses, kept until simplification.
    Paren,
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `-a`
    Negate,
    /// `a*b`, also the dot product of two vectors.
    Multiply,
    /// `a/b`
    Divide,
    /// `a%b`
    Modulo,
    /// `a × b`, the cross product of two vectors.
    Cross,
    /// `a^b`
    Power,
    /// `sqrt(a)` or the `b`th root of `a`.
    Root,
    /// `ln(a)`
    Ln,
    /// `log(b, a)`
    LogBase,
    /// `|a|`
    Abs,
}

impl Operator {
    /// Returns the number of arguments the operator takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Paren | Self::Negate | Self::Ln | Self::Abs => 1,
            _ => 2,
        }
    }

    /// Returns the symbol used in error messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Paren => "()",
            Self::Add => "+",
            Self::Subtract | Self::Negate => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Cross => "×",
            Self::Power => "^",
            Self::Root => "sqrt",
            Self::Ln => "ln",
            Self::LogBase => "log",
            Self::Abs => "|",
        }
    }
}

/// Binding strength of rendered notation, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `a, b`
    List,
    /// `a + b`, `a - b`
    Sum,
    /// `-a`
    Negation,
    /// `a*b`, `a/b`, `a%b`, `a × b`
    Product,
    /// `a^b`
    Power,
    /// Literals, names, calls and anything bracketed.
    Atom,
}

/// An arithmetic or transcendental node with a fixed number of arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    operator: Operator,
    args:     Vec<Expression>,
}

impl Operation {
    /// Constructs a one argument operation.
    #[must_use]
    pub fn unary(operator: Operator, arg: Expression) -> Self {
        debug_assert_eq!(operator.arity(), 1);
        Self { operator,
               args: vec![arg] }
    }

    /// Constructs a two argument operation.
    #[must_use]
    pub fn binary(operator: Operator, lhs: Expression, rhs: Expression) -> Self {
        debug_assert_eq!(operator.arity(), 2);
        Self { operator,
               args: vec![lhs, rhs] }
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    /// Returns the same operator over different arguments.
    #[must_use]
    pub(crate) fn with_args(&self, args: Vec<Expression>) -> Self {
        debug_assert_eq!(self.operator.arity(), args.len());
        Self { operator: self.operator,
               args }
    }
}

/// A call to a name that may or may not be bound when the call is simplified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    name: String,
    args: Vec<Expression>,
}

impl Function {
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self { name: name.into(),
               args }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    /// Returns the parameter names when every argument is a bare variable,
    /// which is what makes `f(x, y) = ...` a definition rather than a
    /// comparison.
    ///
    /// # Example
    /// ```
    /// use mathbench::ast::{Expression, Function};
    ///
    /// let f = Function::new("f", vec![Expression::variable("x"), Expression::variable("y")]);
    /// assert_eq!(f.params(), Some(vec!["x".to_string(), "y".to_string()]));
    ///
    /// let g = Function::new("g", vec![Expression::real(3.0)]);
    /// assert_eq!(g.params(), None);
    /// ```
    #[must_use]
    pub fn params(&self) -> Option<Vec<String>> {
        self.args
            .iter()
            .map(|arg| match arg {
                Expression::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn is_storable(&self) -> bool {
        self.params().is_some()
    }
}

/// A call to one of the fixed transcendental functions.
///
/// The name is kept as written so that `arcsin(x)` renders back as
/// `arcsin(x)` even though it evaluates exactly like `asin(x)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuiltInFunction {
    function: BuiltIn,
    name:     String,
    arg:      Box<Expression>,
}

impl BuiltInFunction {
    /// Constructs a call by name, or `None` when the name is not built in.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::{BuiltInFunction, Expression}, interpreter::evaluator::builtin::BuiltIn};
    ///
    /// let call = BuiltInFunction::named("arcsin", Expression::variable("x")).unwrap();
    /// assert_eq!(call.function(), BuiltIn::Asin);
    /// assert_eq!(call.name(), "arcsin");
    /// assert!(BuiltInFunction::named("f", Expression::variable("x")).is_none());
    /// ```
    #[must_use]
    pub fn named(name: &str, arg: Expression) -> Option<Self> {
        BuiltIn::from_name(name).map(|function| Self::new(function, name, arg))
    }

    /// Constructs a call of `function` written as `name`.
    #[must_use]
    pub fn new(function: BuiltIn, name: &str, arg: Expression) -> Self {
        Self { function,
               name: name.to_string(),
               arg: Box::new(arg) }
    }

    /// Returns the same call applied to a different argument.
    #[must_use]
    pub fn with_arg(&self, arg: Expression) -> Self {
        Self { function: self.function,
               name:     self.name.clone(),
               arg:      Box::new(arg), }
    }

    #[must_use]
    pub const fn function(&self) -> BuiltIn {
        self.function
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn arg(&self) -> &Expression {
        &self.arg
    }
}

/// A parametrized point set `{template | lower ≤ param ≤ upper, ...}`.
///
/// Inside the template the parameters are bound, so they are never resolved
/// against the workspace the locus is simplified in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locus {
    template: Box<Expression>,
    params:   Vec<String>,
    lower:    Vec<Expression>,
    upper:    Vec<Expression>,
}

impl Locus {
    /// Constructs a locus with one lower and one upper bound per parameter.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` when the bound lists are not as long as the
    /// parameter list.
    ///
    /// # Example
    /// ```
    /// use mathbench::ast::{Expression, Locus};
    ///
    /// let circle = Locus::new(Expression::variable("t"),
    ///                         vec!["t".to_string()],
    ///                         vec![Expression::real(0.0)],
    ///                         vec![Expression::real(1.0)]);
    /// assert!(circle.is_ok());
    ///
    /// let broken = Locus::new(Expression::variable("t"), vec!["t".to_string()], vec![], vec![]);
    /// assert!(broken.is_err());
    /// ```
    pub fn new(template: Expression,
               params: Vec<String>,
               lower: Vec<Expression>,
               upper: Vec<Expression>)
               -> EvalResult<Self> {
        if lower.len() != params.len() || upper.len() != params.len() {
            return Err(RuntimeError::ShapeMismatch { details: format!("a locus over {} parameters needs as many lower and upper bounds, found {} and {}",
                                                                      params.len(),
                                                                      lower.len(),
                                                                      upper.len()) });
        }

        Ok(Self { template: Box::new(template),
                  params,
                  lower,
                  upper })
    }

    #[must_use]
    pub fn template(&self) -> &Expression {
        &self.template
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn lower(&self) -> &[Expression] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[Expression] {
        &self.upper
    }

    /// Returns a locus with the same number of parameters but new parts.
    #[must_use]
    pub(crate) fn rebuilt(&self,
                          template: Expression,
                          params: Vec<String>,
                          lower: Vec<Expression>,
                          upper: Vec<Expression>)
                          -> Self {
        debug_assert_eq!(self.params.len(), params.len());
        Self { template: Box::new(template),
               params,
               lower,
               upper }
    }
}

/// An abstract syntax tree node.
///
/// Trees are immutable once built. Simplification never edits a tree in
/// place; it returns a new one that is either a value (a [`Constant`], or a
/// [`Vector`] or [`Set`] of values) or a residual tree that still mentions
/// free names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// The empty expression, such as the interior of `()`.
    Null,
    /// A complex scalar.
    Constant(Constant),
    /// A free or bound name.
    Variable(String),
    /// An ordered tuple.
    Vector(Vector),
    /// An unordered collection.
    Set(Set),
    /// An arithmetic or transcendental node.
    Operation(Operation),
    /// A call to a user function.
    Function(Function),
    /// A call to a built-in transcendental function.
    BuiltInFunction(BuiltInFunction),
    /// A parametrized point set.
    Locus(Locus),
}

impl From<Constant> for Expression {
    fn from(value: Constant) -> Self {
        Self::Constant(value)
    }
}

impl From<Vector> for Expression {
    fn from(value: Vector) -> Self {
        Self::Vector(value)
    }
}

impl From<Set> for Expression {
    fn from(value: Set) -> Self {
        Self::Set(value)
    }
}

impl Expression {
    /// A real constant.
    #[must_use]
    pub const fn real(value: f64) -> Self {
        Self::Constant(Constant::real(value))
    }

    /// A variable reference.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    #[must_use]
    pub fn unary(operator: Operator, arg: Self) -> Self {
        Self::Operation(Operation::unary(operator, arg))
    }

    #[must_use]
    pub fn binary(operator: Operator, lhs: Self, rhs: Self) -> Self {
        Self::Operation(Operation::binary(operator, lhs, rhs))
    }

    #[must_use]
    pub fn negate(arg: Self) -> Self {
        Self::unary(Operator::Negate, arg)
    }

    /// Returns the constant if this node is one.
    #[must_use]
    pub const fn as_constant(&self) -> Option<Constant> {
        match self {
            Self::Constant(constant) => Some(*constant),
            _ => None,
        }
    }
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `=`, also assignment when the left side is storable.
    Equal,
    /// `≠` or `!=`
    NotEqual,
    /// `<`
    Less,
    /// `≤` or `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `≥` or `>=`
    GreaterEqual,
}

impl Comparator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "≠",
            Self::Less => "<",
            Self::LessEqual => "≤",
            Self::Greater => ">",
            Self::GreaterEqual => "≥",
        }
    }
}

/// A chain of expressions joined by comparators, such as `a < b ≤ c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    expressions: Vec<Expression>,
    operators:   Vec<Comparator>,
}

impl Comparison {
    /// Constructs a comparison.
    ///
    /// # Errors
    /// Returns `MalformedComparison` unless there is exactly one operator
    /// fewer than expressions and at least one operator.
    pub fn new(expressions: Vec<Expression>, operators: Vec<Comparator>) -> ParseResult<Self> {
        if operators.is_empty() || operators.len() + 1 != expressions.len() {
            return Err(ParseError::MalformedComparison { expressions: expressions.len(),
                                                         operators:   operators.len(), });
        }
        Ok(Self { expressions,
                  operators })
    }

    #[must_use]
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    #[must_use]
    pub fn operators(&self) -> &[Comparator] {
        &self.operators
    }

    /// Returns the same comparators between different sides.
    #[must_use]
    pub(crate) fn with_sides(&self, expressions: Vec<Expression>) -> Self {
        debug_assert_eq!(self.expressions.len(), expressions.len());
        Self { expressions,
               operators: self.operators.clone() }
    }
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A bare expression.
    Expression(Expression),
    /// A comparison or an assignment.
    Comparison(Comparison),
    /// The outcome of a comparison whose sides all reduced to values.
    Truth(bool),
}
