//! Property tests for rendering, simplification and the complex kernel.

use mathbench::{
    ast::{BuiltInFunction, Expression, Function, Operator, Statement},
    interpreter::{value::constant::Constant, workspace::Workspace},
    parse, run,
};
use proptest::prelude::*;

/// Maximum depth of generated trees.
const MAX_DEPTH: u32 = 4;

fn arb_leaf() -> impl Strategy<Value = Expression> {
    (0.0..100.0f64).prop_map(Expression::real)
}

/// Trees of constants and arithmetic operators only.
fn arb_arithmetic() -> impl Strategy<Value = Expression> {
    arb_leaf().prop_recursive(MAX_DEPTH, 32, 2, |inner| {
                  prop_oneof![
                      (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Add, a, b)),
                      (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Subtract, a, b)),
                      (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Multiply, a, b)),
                      (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Divide, a, b)),
                      inner.clone().prop_map(Expression::negate),
                      (inner, 0..4u8).prop_map(|(a, n)| {
                                         Expression::binary(Operator::Power, a, Expression::real(f64::from(n)))
                                     }),
                  ]
              })
}

/// Trees that also mention bound and free names, calls and built-ins.
fn arb_symbolic() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        arb_leaf(),
        Just(Expression::variable("a")),
        Just(Expression::variable("b")),
        Just(Expression::variable("x")),
    ];

    leaf.prop_recursive(MAX_DEPTH, 32, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Add, a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Multiply, a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expression::binary(Operator::Divide, a, b)),
                inner.clone().prop_map(Expression::negate),
                inner.clone().prop_map(|a| Expression::unary(Operator::Paren, a)),
                inner.clone().prop_map(|a| {
                                 BuiltInFunction::named("sin", a).map_or(Expression::Null,
                                                                         Expression::BuiltInFunction)
                             }),
                inner.prop_map(|a| Expression::Function(Function::new("f", vec![a]))),
            ]
        })
}

fn session() -> Workspace {
    let mut workspace = Workspace::standard();
    run("a = 2\nf(x) = x*x + b", &mut workspace).unwrap();
    workspace
}

proptest! {
    #[test]
    fn rendered_arithmetic_parses_to_the_same_value(e in arb_arithmetic()) {
        let workspace = Workspace::new();
        let direct = e.simplified(&workspace).unwrap();
        let direct = direct.as_constant().unwrap();
        prop_assume!(direct.is_finite());

        let text = e.to_string();
        let Statement::Expression(parsed) = parse(&text).unwrap() else {
            panic!("{text} did not parse to an expression");
        };
        let reparsed = parsed.simplified(&workspace).unwrap().as_constant().unwrap();

        prop_assert!(reparsed.approx_eq(&direct, 1e-9), "{} gave {} instead of {}", text, reparsed, direct);
    }

    #[test]
    fn simplification_is_idempotent(e in arb_symbolic()) {
        let workspace = session();
        let once = e.simplified(&workspace).unwrap();
        let twice = once.simplified(&workspace).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn asin_inverts_sin(re in -1.2..1.2f64, im in -1.0..1.0f64) {
        let z = Constant::new(re, im);
        let back = z.sin().asin();
        prop_assert!(back.approx_eq(&z, 1e-8), "asin(sin({})) = {}", z, back);
    }

    #[test]
    fn exp_inverts_ln(re in -10.0..10.0f64, im in -10.0..10.0f64) {
        let z = Constant::new(re, im);
        prop_assume!(z.abs() > 1e-6);
        prop_assert!(z.ln().exp().approx_eq(&z, 1e-9));
    }
}
