use std::f64::consts::{FRAC_PI_2, PI};

use mathbench::interpreter::{
    evaluator::builtin::{BuiltIn, BUILTIN_FUNCTIONS},
    value::constant::{Constant, Units},
};

const TOLERANCE: f64 = 1e-10;

fn assert_close(actual: Constant, expected: Constant) {
    assert!(actual.approx_eq(&expected, TOLERANCE),
            "expected {expected}, found {actual}");
}

#[test]
fn field_arithmetic() {
    let a = Constant::new(1.0, 2.0);
    let b = Constant::new(3.0, -4.0);

    assert_eq!(a + b, Constant::new(4.0, -2.0));
    assert_eq!(a - b, Constant::new(-2.0, 6.0));
    assert_eq!(a * b, Constant::new(11.0, 2.0));
    assert_close(a / b * b, a);
    assert_close(a * a.recip(), Constant::ONE);
    assert_eq!(-a, Constant::new(-1.0, -2.0));
    assert_eq!(a.conj(), Constant::new(1.0, -2.0));
}

#[test]
fn magnitude_and_argument() {
    assert_eq!(Constant::new(3.0, 4.0).abs(), 5.0);
    assert_eq!(Constant::I.arg(), FRAC_PI_2);
    assert_eq!(Constant::NEG_ONE.arg(), PI);
    assert_eq!(Constant::new(-1.0, -0.0).arg(), PI);
    assert_eq!(Constant::ZERO.arg(), 0.0);
}

#[test]
fn exp_and_ln_are_inverse() {
    for z in [Constant::new(0.5, 0.25), Constant::new(-2.0, 1.0), Constant::new(1.0, -3.0)] {
        assert_close(z.ln().exp(), z);
    }
    assert_close(Constant::E.ln(), Constant::ONE);
    assert_eq!(Constant::ZERO.ln().re, f64::NEG_INFINITY);
}

#[test]
fn powers_and_roots() {
    assert_eq!(Constant::real(3.0).pow(Constant::real(4.0)), Constant::real(81.0));
    assert_eq!(Constant::TWO.pow(Constant::real(-2.0)), Constant::real(0.25));
    assert_close(Constant::real(8.0).root(Constant::real(3.0)), Constant::TWO);
    assert_close(Constant::NEG_ONE.pow(Constant::HALF), Constant::I);
    assert_close(Constant::I.sqrt(), Constant::new(0.5f64.sqrt(), 0.5f64.sqrt()));
    assert_eq!(Constant::new(-4.0, -0.0).sqrt().re, 0.0);
}

#[test]
fn floor_and_modulo() {
    assert_eq!(Constant::real(5.5).floor(), Constant::real(5.0));
    assert_close(Constant::new(3.0, 4.0).floor(), Constant::new(3.0, 4.0));
    assert_close(Constant::new(3.3, 4.4).floor(), Constant::new(3.0, 4.0));
    assert_eq!(Constant::real(10.0) % Constant::real(4.0), Constant::real(2.0));
}

#[test]
fn trigonometric_identities() {
    let z = Constant::new(0.3, -0.7);

    let sin = z.sin();
    let cos = z.cos();
    assert_close(sin * sin + cos * cos, Constant::ONE);
    assert_close(z.tan(), sin / cos);
    assert_close(z.csc(), sin.recip());
    assert_close(z.sec(), cos.recip());
    assert_close(z.cot(), cos / sin);

    let sinh = z.sinh();
    let cosh = z.cosh();
    assert_close(cosh * cosh - sinh * sinh, Constant::ONE);
    assert_close(z.tanh(), sinh / cosh);
}

#[test]
fn inverse_functions_on_the_principal_branch() {
    let z = Constant::new(0.4, 0.2);

    assert_close(z.sin().asin(), z);
    assert_close(z.cos().acos(), z);
    assert_close(z.tan().atan(), z);
    assert_close(z.csc().acsc(), z);
    assert_close(z.sec().asec(), z);
    assert_close(z.cot().acot(), z);
    assert_close(z.sinh().asinh(), z);
    assert_close(z.cosh().acosh(), z);
    assert_close(z.tanh().atanh(), z);
    assert_close(z.csch().acsch(), z);
    assert_close(z.sech().asech(), z);
    assert_close(z.coth().acoth(), z);
}

#[test]
fn real_inputs_stay_real() {
    assert_close(Constant::real(0.5).asin(), Constant::real(0.5f64.asin()));
    assert_close(Constant::real(2.0).acosh(), Constant::real(2.0f64.acosh()));
    assert_close(Constant::real(1.0).atan(), Constant::real(1.0f64.atan()));
}

#[test]
fn display_forms() {
    assert_eq!(Constant::real(2.5).to_string(), "2.5");
    assert_eq!(Constant::I.to_string(), "i");
    assert_eq!((-Constant::I).to_string(), "-i");
    assert_eq!(Constant::new(0.0, 3.0).to_string(), "3i");
    assert_eq!(Constant::new(1.0, -2.0).to_string(), "1 - 2i");
    assert_eq!(Constant::real(-0.0).to_string(), "0");
    assert_eq!(Constant::ONE.divide(Constant::ZERO).to_string(), "NaN");
}

#[test]
fn units_are_carried_but_not_consulted() {
    let c = Constant::real(2.0);
    assert!(c.units().is_dimensionless());
    assert!(c.matches(&Constant::real(3.0)));
    assert_eq!(c.radix(), 10);
    assert_eq!(c.with_units(Units::NONE), c);
}

#[test]
fn every_builtin_name_resolves() {
    assert_eq!(BUILTIN_FUNCTIONS.len(), 38);
    for name in BUILTIN_FUNCTIONS {
        let builtin = BuiltIn::from_name(name).unwrap_or_else(|| panic!("{name} did not resolve"));
        assert_eq!(BuiltIn::from_name(builtin.name()), Some(builtin));
    }
}
