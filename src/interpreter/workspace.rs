use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{ast::Expression, interpreter::value::constant::Constant};

/// Default relative tolerance for approximate equality.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Evaluation settings carried by a workspace and every scope derived from
/// it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Relative tolerance used when comparing values.
    pub tolerance:      f64,
    /// How deeply user function calls may nest.
    pub max_call_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { tolerance:      DEFAULT_TOLERANCE,
               max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }
}

/// What a name stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// `x = expr`: simplified again wherever it is referenced.
    Variable(Expression),
    /// `f(x, y) = body`: the raw body, bound at call time.
    Function { params: Vec<String>, body: Expression },
    /// A call argument, already simplified in the caller's scope and
    /// returned as is.
    Argument(Expression),
}

impl Binding {
    /// Returns the bound expression or function body.
    #[must_use]
    pub const fn expression(&self) -> &Expression {
        match self {
            Self::Variable(expression) | Self::Argument(expression) => expression,
            Self::Function { body, .. } => body,
        }
    }

    /// Returns the parameter list of a function binding.
    #[must_use]
    pub fn params(&self) -> Option<&[String]> {
        match self {
            Self::Function { params, .. } => Some(params.as_slice()),
            Self::Variable(_) | Self::Argument(_) => None,
        }
    }
}

/// An entry in the layer a call or a hiding scope places over the globals.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Local {
    Bound(Binding),
    Hidden,
}

/// A persistent mapping from names to bindings.
///
/// Cloning a workspace is cheap: the map and the display order are shared
/// until one of the copies is written to. A scope derived with
/// [`localize`](Self::localize) therefore never changes the scope it came
/// from.
///
/// Call arguments sit in a separate layer over the globals. A global
/// variable is resolved in [`global_scope`](Self::global_scope), so it never
/// sees the parameters of the function that happens to reference it.
///
/// # Example
/// ```
/// use mathbench::{ast::Expression, interpreter::workspace::Workspace};
///
/// let mut global = Workspace::new();
/// global.put("x", None, Expression::real(1.0));
///
/// let local = global.localize(&["y".to_string()], vec![Expression::real(2.0)]);
/// assert!(local.contains_key("x"));
/// assert!(local.contains_key("y"));
/// assert!(!global.contains_key("y"));
/// assert_eq!(local.depth(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    bindings: Rc<HashMap<String, Rc<Binding>>>,
    locals:   Rc<HashMap<String, Local>>,
    order:    Rc<Vec<String>>,
    depth:    usize,
    settings: Settings,
}

impl Workspace {
    /// Creates an empty workspace with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty workspace with the given settings.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self { settings,
               ..Self::default() }
    }

    /// Binds `pi`, `π`, `e` and `tau`.
    #[must_use]
    pub fn with_constants(mut self) -> Self {
        let constants = [("pi", Constant::PI),
                         ("π", Constant::PI),
                         ("e", Constant::E),
                         ("tau", Constant::TAU)];
        for (name, value) in constants {
            self.put(name, None, Expression::Constant(value));
        }
        self
    }

    /// A workspace with default settings and the predefined constants.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::workspace::Workspace;
    ///
    /// let workspace = Workspace::standard();
    /// assert!(workspace.contains_key("pi"));
    /// assert!(workspace.contains_key("e"));
    /// assert!(workspace.contains_key("tau"));
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_constants()
    }

    /// Binds a name, replacing any earlier binding.
    ///
    /// # Parameters
    /// - `name`: The name to bind.
    /// - `params`: `Some(params)` for a function definition, `None` for a
    ///   variable.
    /// - `expression`: The value, or the body of the function.
    pub fn put(&mut self, name: impl Into<String>, params: Option<Vec<String>>, expression: Expression) {
        let name = name.into();
        let binding = match params {
            Some(params) => Binding::Function { params,
                                                body: expression },
            None => Binding::Variable(expression),
        };

        debug!("binding {name} to {}", binding.expression());

        let order = Rc::make_mut(&mut self.order);
        order.retain(|existing| *existing != name);
        order.push(name.clone());
        if self.locals.contains_key(&name) {
            Rc::make_mut(&mut self.locals).remove(&name);
        }
        Rc::make_mut(&mut self.bindings).insert(name, Rc::new(binding));
    }

    /// Removes a name, returning what it was bound to.
    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        if !self.bindings.contains_key(name) {
            return None;
        }

        Rc::make_mut(&mut self.order).retain(|existing| existing != name);
        if self.locals.contains_key(name) {
            Rc::make_mut(&mut self.locals).remove(name);
        }
        Rc::make_mut(&mut self.bindings).remove(name)
                                        .map(Rc::unwrap_or_clone)
    }

    /// Returns the bound expression or function body.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Expression> {
        self.binding(name).map(Binding::expression)
    }

    /// Returns the parameter list when the name is bound to a function.
    #[must_use]
    pub fn get_args(&self, name: &str) -> Option<&[String]> {
        self.binding(name).and_then(Binding::params)
    }

    /// Looks a name up in the call layer first, then among the globals.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        match self.locals.get(name) {
            Some(Local::Bound(binding)) => Some(binding),
            Some(Local::Hidden) => None,
            None => self.bindings.get(name).map(Rc::as_ref),
        }
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.binding(name).is_some()
    }

    /// Returns the names bound with [`put`](Self::put), oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(|name| self.bindings.contains_key(name.as_str()))
            .map(String::as_str)
    }

    /// Returns the names bound with [`put`](Self::put) together with their
    /// bindings, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.keys()
            .filter_map(|name| self.binding(name).map(|binding| (name, binding)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Derives the scope a function body is simplified in.
    ///
    /// Each parameter is bound to the matching argument, shadowing any
    /// global of the same name. Arguments of enclosing calls are dropped, so
    /// the body only sees its own parameters and the globals. The receiver
    /// is left unchanged.
    ///
    /// # Parameters
    /// - `params`: Parameter names of the function.
    /// - `args`: Arguments already simplified in the caller's scope.
    ///
    /// # Returns
    /// A scope one call deeper than `self`.
    #[must_use]
    pub fn localize(&self, params: &[String], args: Vec<Expression>) -> Self {
        let mut local = self.global_scope();
        let locals = Rc::make_mut(&mut local.locals);
        for (param, arg) in params.iter().zip(args) {
            locals.insert(param.clone(), Local::Bound(Binding::Argument(arg)));
        }
        local.depth += 1;
        local
    }

    /// Derives the scope global variables are simplified in: the same
    /// globals, hidden names and depth, without any call arguments.
    ///
    /// # Example
    /// ```
    /// use mathbench::{ast::Expression, interpreter::workspace::Workspace};
    ///
    /// let local = Workspace::new().localize(&["x".to_string()], vec![Expression::real(2.0)]);
    /// assert!(local.contains_key("x"));
    /// assert!(!local.global_scope().contains_key("x"));
    /// assert_eq!(local.global_scope().depth(), 1);
    /// ```
    #[must_use]
    pub fn global_scope(&self) -> Self {
        let mut global = self.clone();
        if global.locals.values().any(|local| matches!(local, Local::Bound(_))) {
            Rc::make_mut(&mut global.locals).retain(|_, local| matches!(local, Local::Hidden));
        }
        global
    }

    /// Derives a scope in which the given names are free.
    ///
    /// Used for function previews and locus templates, where parameters must
    /// stay symbolic even if a global of the same name exists.
    #[must_use]
    pub fn localize_hiding(&self, names: &[String]) -> Self {
        let mut local = self.clone();
        let locals = Rc::make_mut(&mut local.locals);
        for name in names {
            locals.insert(name.clone(), Local::Hidden);
        }
        local
    }

    /// Number of user function calls enclosing this scope.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.settings.tolerance
    }
}
