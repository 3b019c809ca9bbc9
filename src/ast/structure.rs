use crate::{
    ast::{Expression, Function, Operation, Operator},
    error::RuntimeError,
    interpreter::{
        evaluator::{builtin::BuiltIn, core::EvalResult},
        workspace::{Binding, Workspace},
    },
};

/// `(rows, columns)` of an expression. Vectors are columns.
pub type Shape = (usize, usize);

/// The shape of a single scalar.
pub const SCALAR: Shape = (1, 1);

impl Expression {
    /// Returns the shape this expression will have once simplified, or
    /// `None` when that depends on what a name is bound to.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::{Expression, Operator}, interpreter::value::vector::Vector};
    ///
    /// let v = Expression::Vector(Vector::new(vec![Expression::real(1.0), Expression::real(2.0)]));
    /// assert_eq!(v.shape(), Some((2, 1)));
    ///
    /// let scaled = Expression::binary(Operator::Multiply, Expression::real(3.0), v.clone());
    /// assert_eq!(scaled.shape(), Some((2, 1)));
    ///
    /// let dot = Expression::binary(Operator::Multiply, v.clone(), v);
    /// assert_eq!(dot.shape(), Some((1, 1)));
    ///
    /// assert_eq!(Expression::variable("x").shape(), None);
    /// ```
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Null => Some((0, 0)),
            Self::Constant(_) => Some(SCALAR),
            Self::Variable(_) | Self::Function(_) => None,
            Self::Vector(vector) => Some((vector.len(), 1)),
            Self::Set(set) => set.elements().first().map_or(Some((0, 0)), Self::shape),
            Self::Operation(operation) => operation.shape(),
            Self::BuiltInFunction(call) if call.function() == BuiltIn::Abs => Some(SCALAR),
            Self::BuiltInFunction(call) => call.arg().shape(),
            Self::Locus(locus) => locus.template().shape(),
        }
    }

    /// Returns the sub-expression at `(row, column)`.
    ///
    /// Operators that work element by element distribute over their
    /// arguments, broadcasting scalar arguments, so the component of `2v` is
    /// `2` times the component of `v`. Sets and loci take the component of
    /// each element and of the template respectively.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` when the index lies outside a known shape.
    /// - `ShapeMismatch` for a nonzero index into something whose shape is
    ///   not known, or into a cross product.
    pub fn component(&self, row: usize, column: usize) -> EvalResult<Self> {
        match self {
            Self::Vector(vector) if column == 0 => vector.get(row).cloned(),
            Self::Set(set) => set.try_map(|e| e.component(row, column)).map(Self::Set),
            Self::Operation(operation) => operation.component(row, column),
            Self::BuiltInFunction(call) if call.function() != BuiltIn::Abs => {
                Ok(Self::BuiltInFunction(call.with_arg(call.arg().component(row, column)?)))
            },
            Self::Locus(locus) => {
                Ok(Self::Locus(locus.rebuilt(locus.template().component(row, column)?,
                                             locus.params().to_vec(),
                                             locus.lower().to_vec(),
                                             locus.upper().to_vec())))
            },
            _ => self.whole_component(row, column),
        }
    }

    /// Component access for expressions that are not split any further.
    fn whole_component(&self, row: usize, column: usize) -> EvalResult<Self> {
        match self.shape() {
            Some(SCALAR) | None if (row, column) == (0, 0) => Ok(self.clone()),
            Some(shape) => Err(RuntimeError::IndexOutOfBounds { index: (row, column),
                                                                shape }),
            None => Err(RuntimeError::ShapeMismatch { details: format!("the shape of {self} is not known before it is simplified") }),
        }
    }

    /// Returns the names this expression depends on that the workspace does
    /// not bind, in order of first appearance.
    ///
    /// Bound variables are followed to their values and bound functions to
    /// their bodies. Parameters of a locus are bound inside it and never
    /// reported.
    ///
    /// # Example
    /// ```
    /// use mathbench::{parse, ast::Statement, interpreter::workspace::Workspace};
    ///
    /// let Statement::Expression(value) = parse("2a").unwrap() else { panic!() };
    /// let mut workspace = Workspace::new();
    /// workspace.put("y", None, value);
    ///
    /// let Statement::Expression(e) = parse("x + y + x").unwrap() else { panic!() };
    /// assert_eq!(e.inputs(&workspace), vec!["x".to_string(), "a".to_string()]);
    /// ```
    #[must_use]
    pub fn inputs(&self, workspace: &Workspace) -> Vec<String> {
        let mut inputs = Vec::new();
        self.collect_inputs(workspace, &mut inputs);
        inputs
    }

    fn collect_inputs(&self, workspace: &Workspace, inputs: &mut Vec<String>) {
        match self {
            Self::Null | Self::Constant(_) => {},
            Self::Variable(name) => match workspace.binding(name) {
                Some(Binding::Variable(value)) => {
                    let global = workspace.global_scope();
                    value.collect_inputs(&global.localize_hiding(std::slice::from_ref(name)),
                                         inputs);
                },
                Some(Binding::Argument(value)) => {
                    value.collect_inputs(&Workspace::default(), inputs);
                },
                Some(Binding::Function { .. }) => {},
                None => push_unique(inputs, name),
            },
            Self::Vector(vector) => {
                for component in vector.components() {
                    component.collect_inputs(workspace, inputs);
                }
            },
            Self::Set(set) => {
                for element in set.elements() {
                    element.collect_inputs(workspace, inputs);
                }
            },
            Self::Operation(operation) => {
                for arg in operation.args() {
                    arg.collect_inputs(workspace, inputs);
                }
            },
            Self::BuiltInFunction(call) => call.arg().collect_inputs(workspace, inputs),
            Self::Function(function) => function.collect_inputs(workspace, inputs),
            Self::Locus(locus) => {
                let hidden = workspace.localize_hiding(locus.params());
                let mut inner = Vec::new();
                locus.template().collect_inputs(&hidden, &mut inner);
                for bound in locus.lower().iter().chain(locus.upper()) {
                    bound.collect_inputs(&hidden, &mut inner);
                }
                for name in &inner {
                    if !locus.params().contains(name) {
                        push_unique(inputs, name);
                    }
                }
            },
        }
    }

    /// Renames variables, including the parameters of any locus, replacing
    /// `old[i]` with `new[i]`.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::Statement, parse};
    ///
    /// let Statement::Expression(e) = parse("x + y").unwrap() else { panic!() };
    /// let renamed = e.replaced(&["x".to_string()], &["t".to_string()]);
    /// assert_eq!(renamed.to_string(), "t + y");
    /// ```
    #[must_use]
    pub fn replaced(&self, old: &[String], new: &[String]) -> Self {
        let rename = |name: &String| {
            old.iter()
               .position(|candidate| candidate == name)
               .and_then(|i| new.get(i))
               .unwrap_or(name)
               .clone()
        };

        match self {
            Self::Null | Self::Constant(_) => self.clone(),
            Self::Variable(name) => Self::Variable(rename(name)),
            Self::Vector(vector) => Self::Vector(vector.map(|c| c.replaced(old, new))),
            Self::Set(set) => Self::Set(set.map(|e| e.replaced(old, new))),
            Self::Operation(operation) => {
                Self::Operation(operation.with_args(operation.args()
                                                             .iter()
                                                             .map(|arg| arg.replaced(old, new))
                                                             .collect()))
            },
            Self::Function(function) => {
                Self::Function(Function::new(function.name(),
                                             function.args()
                                                     .iter()
                                                     .map(|arg| arg.replaced(old, new))
                                                     .collect()))
            },
            Self::BuiltInFunction(call) => {
                Self::BuiltInFunction(call.with_arg(call.arg().replaced(old, new)))
            },
            Self::Locus(locus) => {
                let rename_all = |bounds: &[Self]| -> Vec<Self> {
                    bounds.iter().map(|b| b.replaced(old, new)).collect()
                };
                Self::Locus(locus.rebuilt(locus.template().replaced(old, new),
                                          locus.params().iter().map(rename).collect(),
                                          rename_all(locus.lower()),
                                          rename_all(locus.upper())))
            },
        }
    }
}

impl Operation {
    fn shape(&self) -> Option<Shape> {
        match (self.operator(), self.args()) {
            (Operator::Abs, _) => Some(SCALAR),
            (Operator::Multiply, [lhs, rhs]) => match (lhs.shape()?, rhs.shape()?) {
                (SCALAR, other) | (other, SCALAR) => Some(other),
                _ => Some(SCALAR),
            },
            (_, [arg]) => arg.shape(),
            (_, [lhs, rhs]) => match (lhs.shape()?, rhs.shape()?) {
                (SCALAR, other) => Some(other),
                (shape, _) => Some(shape),
            },
            _ => None,
        }
    }

    fn component(&self, row: usize, column: usize) -> EvalResult<Expression> {
        let whole = Expression::Operation(self.clone());
        match self.shape() {
            Some(SCALAR) | None => whole.whole_component(row, column),
            Some(_) if self.operator() == Operator::Cross => {
                Err(RuntimeError::ShapeMismatch { details: format!("the components of {whole} are not known before it is simplified") })
            },
            Some(_) => {
                let args = self.args()
                               .iter()
                               .map(|arg| match arg.shape() {
                                   Some(SCALAR) => Ok(arg.clone()),
                                   _ => arg.component(row, column),
                               })
                               .collect::<EvalResult<Vec<_>>>()?;
                Ok(Expression::Operation(self.with_args(args)))
            },
        }
    }
}

impl Function {
    /// Collects the inputs of the arguments and, when the function is bound,
    /// the inputs of its body other than its parameters.
    fn collect_inputs(&self, workspace: &Workspace, inputs: &mut Vec<String>) {
        for arg in self.args() {
            arg.collect_inputs(workspace, inputs);
        }

        if let Some(Binding::Function { params, body }) = workspace.binding(self.name()) {
            let mut hidden = params.clone();
            hidden.push(self.name().to_string());

            let mut inner = Vec::new();
            body.collect_inputs(&workspace.localize_hiding(&hidden), &mut inner);
            for name in &inner {
                if !hidden.contains(name) {
                    push_unique(inputs, name);
                }
            }
        }
    }
}

fn push_unique(inputs: &mut Vec<String>, name: &str) {
    if !inputs.iter().any(|input| input == name) {
        inputs.push(name.to_string());
    }
}
