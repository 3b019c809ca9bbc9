use crate::{
    ast::{BuiltInFunction, Expression},
    interpreter::{
        evaluator::core::EvalResult,
        value::constant::Constant,
        workspace::Workspace,
    },
};

/// Type alias for the kernel routine behind a builtin.
type KernelFn = fn(Constant) -> Constant;

/// Defines the builtin functions by generating the `BuiltIn` enum, its lookup
/// table and the list of every recognized name.
///
/// Each entry provides:
/// - the enum variant,
/// - the canonical name followed by any aliases, separated by `|`,
/// - the kernel routine implementing it.
macro_rules! builtin_functions {
    (
        $(
            $variant:ident => {
                names: $canonical:literal $(| $alias:literal)*,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// One of the fixed unary functions resolved without consulting the
        /// workspace.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BuiltIn {
            $(
                #[doc = concat!("`", $canonical, "`")]
                $variant,
            )*
        }

        struct BuiltinDef {
            names:    &'static [&'static str],
            function: BuiltIn,
        }

        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { names: &[$canonical $(, $alias)*], function: BuiltIn::$variant },
            )*
        ];

        /// Every name that parses to a builtin call, aliases included.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($canonical, $($alias,)*)*
        ];

        impl BuiltIn {
            /// Returns the canonical name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical,)*
                }
            }

            fn kernel(self) -> KernelFn {
                match self {
                    $(Self::$variant => $func,)*
                }
            }
        }
    };
}

builtin_functions! {
    Sin   => { names: "sin",                func: Constant::sin },
    Cos   => { names: "cos",                func: Constant::cos },
    Tan   => { names: "tan",                func: Constant::tan },
    Csc   => { names: "csc",                func: Constant::csc },
    Sec   => { names: "sec",                func: Constant::sec },
    Cot   => { names: "cot",                func: Constant::cot },
    Sinh  => { names: "sinh",               func: Constant::sinh },
    Cosh  => { names: "cosh",               func: Constant::cosh },
    Tanh  => { names: "tanh",               func: Constant::tanh },
    Csch  => { names: "csch",               func: Constant::csch },
    Sech  => { names: "sech",               func: Constant::sech },
    Coth  => { names: "coth",               func: Constant::coth },
    Asin  => { names: "asin"  | "arcsin",   func: Constant::asin },
    Acos  => { names: "acos"  | "arccos",   func: Constant::acos },
    Atan  => { names: "atan"  | "arctan",   func: Constant::atan },
    Acsc  => { names: "acsc"  | "arccsc",   func: Constant::acsc },
    Asec  => { names: "asec"  | "arcsec",   func: Constant::asec },
    Acot  => { names: "acot"  | "arccot",   func: Constant::acot },
    Asinh => { names: "asinh" | "arcsinh",  func: Constant::asinh },
    Acosh => { names: "acosh" | "arccosh",  func: Constant::acosh },
    Atanh => { names: "atanh" | "arctanh",  func: Constant::atanh },
    Acsch => { names: "acsch" | "arccsch",  func: Constant::acsch },
    Asech => { names: "asech" | "arcsech",  func: Constant::asech },
    Acoth => { names: "acoth" | "arccoth",  func: Constant::acoth },
    Abs   => { names: "abs",                func: |c| Constant::real(c.abs()) },
    Arg   => { names: "arg",                func: |c| Constant::real(c.arg()) },
}

impl BuiltIn {
    /// Looks up a builtin by any of its names.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::evaluator::builtin::BuiltIn;
    ///
    /// assert_eq!(BuiltIn::from_name("arctan"), Some(BuiltIn::Atan));
    /// assert_eq!(BuiltIn::from_name("atan"), Some(BuiltIn::Atan));
    /// assert_eq!(BuiltIn::from_name("exp"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_TABLE.iter()
                     .find(|def| def.names.iter().any(|alias| *alias == name))
                     .map(|def| def.function)
    }

    /// Applies the function to a constant.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::{evaluator::builtin::BuiltIn, value::constant::Constant};
    ///
    /// assert_eq!(BuiltIn::Abs.apply(Constant::new(3.0, 4.0)), Constant::real(5.0));
    /// assert_eq!(BuiltIn::Arg.apply(Constant::ONE), Constant::ZERO);
    /// ```
    #[must_use]
    pub fn apply(self, value: Constant) -> Constant {
        (self.kernel())(value)
    }
}

impl BuiltInFunction {
    /// Simplifies the argument and applies the function to it.
    pub(crate) fn simplified(&self, workspace: &Workspace) -> EvalResult<Expression> {
        let arg = self.arg().simplified(workspace)?;
        apply(self, arg)
    }
}

/// Applies a builtin to an already simplified argument.
///
/// Constants go through the kernel, vectors and sets are mapped component by
/// component (except that `abs` of a vector is its norm), and anything else
/// stays a symbolic call.
pub(crate) fn apply(call: &BuiltInFunction, arg: Expression) -> EvalResult<Expression> {
    match arg {
        Expression::Constant(c) => Ok(Expression::Constant(call.function().apply(c))),
        Expression::Vector(vector) if call.function() == BuiltIn::Abs => vector.norm(),
        Expression::Vector(vector) => {
            Ok(Expression::Vector(vector.try_map(|c| apply(call, c.clone()))?))
        },
        Expression::Set(set) => Ok(Expression::Set(set.try_map(|e| apply(call, e.clone()))?)),
        other => Ok(Expression::BuiltInFunction(call.with_arg(other))),
    }
}
