use std::{
    f64::consts,
    fmt::Display,
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;

/// The only radix constants are currently written and displayed in.
pub const DECIMAL: u32 = 10;

/// Number of SI base dimensions tracked by [`Units`].
pub const DIMENSIONS: usize = 7;

/// Largest integer exponent [`Constant::pow`] raises by repeated squaring.
const MAX_EXACT_EXPONENT: f64 = 1024.0;

/// The seven SI base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    Luminosity,
}

/// Physical dimension exponents attached to a [`Constant`].
///
/// Every constant produced by the parser or the kernel is dimensionless. The
/// tag is carried through so that unit aware arithmetic can be layered on
/// later without changing the shape of [`Constant`].
///
/// # Example
/// ```
/// use mathbench::interpreter::value::constant::{Dimension, Units};
/// let velocity = Units::NONE.with(Dimension::Length, 1).with(Dimension::Time, -1);
/// assert_eq!(velocity.exponent(Dimension::Time), -1);
/// assert!(!velocity.is_dimensionless());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Units([i8; DIMENSIONS]);

impl Units {
    /// No dimensions at all.
    pub const NONE: Self = Self([0; DIMENSIONS]);

    /// Returns a copy with the exponent of `dimension` set to `exponent`.
    #[must_use]
    pub const fn with(self, dimension: Dimension, exponent: i8) -> Self {
        let mut exponents = self.0;
        exponents[dimension as usize] = exponent;
        Self(exponents)
    }

    #[must_use]
    pub const fn exponent(self, dimension: Dimension) -> i8 {
        self.0[dimension as usize]
    }

    #[must_use]
    pub fn is_dimensionless(self) -> bool {
        self == Self::NONE
    }
}

/// A complex scalar, the terminal value of every simplification.
///
/// All arithmetic is IEEE double precision. Nothing here raises: division by
/// zero and the logarithm of zero propagate infinities and `NaN` through the
/// result, and it is up to the structural operations above the kernel to
/// decide what is an error.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    /// The real part.
    pub re: f64,
    /// The imaginary part.
    pub im: f64,
    radix:  u32,
    units:  Units,
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.re) == OrderedFloat(other.re)
        && OrderedFloat(self.im) == OrderedFloat(other.im)
        && self.radix == other.radix
        && self.units == other.units
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.re).hash(state);
        OrderedFloat(self.im).hash(state);
        self.radix.hash(state);
        self.units.hash(state);
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_nan() {
            return write!(f, "NaN");
        }

        // Adding zero turns -0.0 into 0.0.
        let re = self.re + 0.0;
        let im = self.im + 0.0;

        if im == 0.0 {
            return write!(f, "{re}");
        }

        let magnitude = im.abs();
        #[allow(clippy::float_cmp)]
        let unit = if magnitude == 1.0 {
            "i".to_string()
        } else {
            format!("{magnitude}i")
        };

        match (re == 0.0, im > 0.0) {
            (true, true) => write!(f, "{unit}"),
            (true, false) => write!(f, "-{unit}"),
            (false, true) => write!(f, "{re} + {unit}"),
            (false, false) => write!(f, "{re} - {unit}"),
        }
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Self::real(value)
    }
}

impl Constant {
    /// `0`
    pub const ZERO: Self = Self::real(0.0);
    /// `1`
    pub const ONE: Self = Self::real(1.0);
    /// `2`
    pub const TWO: Self = Self::real(2.0);
    /// `10`
    pub const TEN: Self = Self::real(10.0);
    /// `-1`
    pub const NEG_ONE: Self = Self::real(-1.0);
    /// `0.5`
    pub const HALF: Self = Self::real(0.5);
    /// The imaginary unit.
    pub const I: Self = Self::new(0.0, 1.0);
    /// Archimedes' constant.
    pub const PI: Self = Self::real(consts::PI);
    /// Euler's number.
    pub const E: Self = Self::real(consts::E);
    /// A full turn in radians.
    pub const TAU: Self = Self::real(consts::TAU);

    /// Constructs a new constant from real and imaginary parts.
    ///
    /// # Parameters
    /// - `re`: The real part.
    /// - `im`: The imaginary part.
    ///
    /// # Returns
    /// A dimensionless constant in base ten.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let c = Constant::new(5.0, -1.0);
    /// assert_eq!(c.re, 5.0);
    /// assert_eq!(c.im, -1.0);
    /// assert_eq!(c.to_string(), "5 - i");
    /// ```
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re,
               im,
               radix: DECIMAL,
               units: Units::NONE }
    }

    /// Constructs a constant on the real axis.
    #[must_use]
    pub const fn real(re: f64) -> Self {
        Self::new(re, 0.0)
    }

    #[must_use]
    pub const fn radix(&self) -> u32 {
        self.radix
    }

    #[must_use]
    pub const fn units(&self) -> Units {
        self.units
    }

    /// Returns a copy carrying the given dimension tag.
    #[must_use]
    pub const fn with_units(self, units: Units) -> Self {
        Self { units, ..self }
    }

    /// Tests whether two constants carry the same dimension tag.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.units == other.units
    }

    /// Tests whether the imaginary part is exactly zero.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        self.im == 0.0
    }

    /// Tests whether either part is `NaN`.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Tests whether two constants agree within a relative tolerance.
    ///
    /// The distance between the two is compared with `tolerance` scaled by
    /// the larger magnitude, or by one when both are small.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let a = Constant::real(0.1 + 0.2);
    /// assert!(a.approx_eq(&Constant::real(0.3), 1e-9));
    /// assert!(!a.approx_eq(&Constant::real(0.31), 1e-9));
    /// ```
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        if self == other {
            return true;
        }
        let scale = self.abs().max(other.abs()).max(1.0);
        self.minus(*other).abs() <= tolerance * scale
    }

    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self::new(self.re + other.re, self.im + other.im)
    }

    #[must_use]
    pub fn minus(self, other: Self) -> Self {
        Self::new(self.re - other.re, self.im - other.im)
    }

    #[must_use]
    pub fn negative(self) -> Self {
        Self::new(-self.re, -self.im)
    }

    /// Multiplies two constants.
    ///
    /// A real operand scales the other one directly, so that an infinity on
    /// the real axis does not produce a `NaN` imaginary part.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let z = Constant::new(1.0, 2.0).times(Constant::new(3.0, -1.0));
    /// assert_eq!(z, Constant::new(5.0, 5.0));
    /// ```
    #[must_use]
    pub fn times(self, other: Self) -> Self {
        if other.im == 0.0 {
            return self.scaled(other.re);
        }
        if self.im == 0.0 {
            return other.scaled(self.re);
        }

        Self::new(self.re.mul_add(other.re, -(self.im * other.im)),
                  self.re.mul_add(other.im, self.im * other.re))
    }

    /// Returns the reciprocal `1/z`.
    ///
    /// The reciprocal of zero is `NaN` in both parts.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// assert_eq!(Constant::real(4.0).recip(), Constant::real(0.25));
    /// assert!(Constant::ZERO.recip().re.is_nan());
    /// ```
    #[must_use]
    pub fn recip(self) -> Self {
        let modulus_squared = self.re.mul_add(self.re, self.im * self.im);

        Self::new(self.re / modulus_squared, -self.im / modulus_squared)
    }

    #[must_use]
    pub fn divide(self, other: Self) -> Self {
        self.times(other.recip())
    }

    #[must_use]
    pub const fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Returns the magnitude `hypot(re, im)`.
    #[must_use]
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Returns the phase angle in `(-π, π]`.
    ///
    /// Signed zeros count as zero, so every point on the negative real axis
    /// has argument `π`.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// assert_eq!(Constant::new(-1.0, -0.0).arg(), std::f64::consts::PI);
    /// assert_eq!(Constant::new(-0.0, 0.0).arg(), 0.0);
    /// ```
    #[must_use]
    pub fn arg(self) -> f64 {
        atan2(self.im, self.re)
    }

    /// Rounds towards zero along the direction of the constant.
    ///
    /// The magnitude is floored while the direction is kept, so on the real
    /// axis this truncates.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// assert_eq!(Constant::real(2.7).floor(), Constant::real(2.0));
    /// assert_eq!(Constant::real(-2.5).floor(), Constant::real(-2.0));
    /// assert_eq!(Constant::ZERO.floor(), Constant::ZERO);
    /// ```
    #[must_use]
    pub fn floor(self) -> Self {
        if self.im == 0.0 {
            return Self::real(self.re.trunc());
        }
        let magnitude = self.abs();
        if magnitude == 0.0 {
            return Self::ZERO;
        }
        self.scaled(magnitude.floor() / magnitude)
    }

    /// Returns `self - floor(self / other) * other`.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// assert_eq!(Constant::real(7.0).modulo(Constant::real(3.0)), Constant::real(1.0));
    /// assert_eq!(Constant::real(-7.0).modulo(Constant::real(3.0)), Constant::real(-1.0));
    /// ```
    #[must_use]
    pub fn modulo(self, other: Self) -> Self {
        self.minus(self.divide(other).floor().times(other))
    }

    /// Multiplies by `i` raised to `quarter_turns`, a rotation by multiples of
    /// ninety degrees that never rounds.
    #[must_use]
    pub const fn rot90(self, quarter_turns: i32) -> Self {
        match quarter_turns.rem_euclid(4) {
            1 => Self::new(-self.im, self.re),
            2 => Self::new(-self.re, -self.im),
            3 => Self::new(self.im, -self.re),
            _ => self,
        }
    }

    /// Returns `e^z`.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let z = Constant::new(0.0, std::f64::consts::PI).exp();
    /// assert!(z.approx_eq(&Constant::NEG_ONE, 1e-12));
    /// ```
    #[must_use]
    pub fn exp(self) -> Self {
        let modulus = self.re.exp();
        if self.im == 0.0 {
            return Self::real(modulus);
        }
        Self::new(modulus * self.im.cos(), modulus * self.im.sin())
    }

    /// Returns the principal natural logarithm. `ln(0)` is `-inf`.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let z = Constant::NEG_ONE.ln();
    /// assert_eq!(z, Constant::new(0.0, std::f64::consts::PI));
    /// ```
    #[must_use]
    pub fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    /// Returns the principal square root.
    ///
    /// This is `exp(ln(z)/2)` computed from the magnitude directly so that
    /// perfect squares come out exact.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// assert_eq!(Constant::real(9.0).sqrt(), Constant::real(3.0));
    /// assert_eq!(Constant::real(-4.0).sqrt(), Constant::new(0.0, 2.0));
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let modulus = self.abs();
        let re = f64::midpoint(modulus, self.re).sqrt();
        let im = ((modulus - self.re) / 2.0).sqrt();

        if self.im < 0.0 {
            Self::new(re, -im)
        } else {
            Self::new(re, im)
        }
    }

    /// Raises to a complex power, `exp(ln(self) * exponent)`.
    ///
    /// Real integer exponents are applied by repeated squaring instead, which
    /// keeps results such as `2^10` exact.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// assert_eq!(Constant::TWO.pow(Constant::TEN), Constant::real(1024.0));
    /// assert_eq!(Constant::I.pow(Constant::TWO), Constant::NEG_ONE);
    ///
    /// let root = Constant::real(4.0).pow(Constant::HALF);
    /// assert!(root.approx_eq(&Constant::TWO, 1e-12));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pow(self, exponent: Self) -> Self {
        if exponent.im == 0.0
           && exponent.re.fract() == 0.0
           && exponent.re.abs() <= MAX_EXACT_EXPONENT
        {
            return self.powi(exponent.re as i32);
        }
        self.ln().times(exponent).exp()
    }

    fn powi(self, exponent: i32) -> Self {
        let mut base = self;
        let mut result = Self::ONE;
        let mut n = exponent.unsigned_abs();

        while n > 0 {
            if n % 2 == 1 {
                result = result.times(base);
            }
            base = base.times(base);
            n /= 2;
        }

        if exponent < 0 { result.recip() } else { result }
    }

    /// Returns the `degree`th principal root, `exp(ln(self) / degree)`.
    #[must_use]
    pub fn root(self, degree: Self) -> Self {
        if degree == Self::TWO {
            return self.sqrt();
        }
        self.ln().divide(degree).exp()
    }

    /// Returns the logarithm of `self` in the given base.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let log = Constant::real(1000.0).log_base(Constant::TEN);
    /// assert!(log.approx_eq(&Constant::real(3.0), 1e-12));
    /// ```
    #[must_use]
    pub fn log_base(self, base: Self) -> Self {
        self.ln().divide(base.ln())
    }

    #[must_use]
    pub fn sinh(self) -> Self {
        self.exp().minus(self.negative().exp()).scaled(0.5)
    }

    #[must_use]
    pub fn cosh(self) -> Self {
        self.exp().plus(self.negative().exp()).scaled(0.5)
    }

    #[must_use]
    pub fn tanh(self) -> Self {
        self.sinh().divide(self.cosh())
    }

    #[must_use]
    pub fn csch(self) -> Self {
        self.sinh().recip()
    }

    #[must_use]
    pub fn sech(self) -> Self {
        self.cosh().recip()
    }

    #[must_use]
    pub fn coth(self) -> Self {
        self.cosh().divide(self.sinh())
    }

    /// Principal inverse hyperbolic sine, `ln(z + sqrt(z² + 1))`.
    #[must_use]
    pub fn asinh(self) -> Self {
        self.plus(self.times(self).plus(Self::ONE).sqrt()).ln()
    }

    /// Principal inverse hyperbolic cosine, `ln(z + sqrt(z + 1)·sqrt(z - 1))`.
    #[must_use]
    pub fn acosh(self) -> Self {
        let product = self.plus(Self::ONE).sqrt().times(self.minus(Self::ONE).sqrt());
        self.plus(product).ln()
    }

    /// Principal inverse hyperbolic tangent, `(ln(1 + z) - ln(1 - z)) / 2`.
    #[must_use]
    pub fn atanh(self) -> Self {
        Self::ONE.plus(self).ln().minus(Self::ONE.minus(self).ln()).scaled(0.5)
    }

    #[must_use]
    pub fn acsch(self) -> Self {
        self.recip().asinh()
    }

    #[must_use]
    pub fn asech(self) -> Self {
        self.recip().acosh()
    }

    #[must_use]
    pub fn acoth(self) -> Self {
        self.recip().atanh()
    }

    /// Returns the sine, `-i·sinh(iz)`.
    ///
    /// # Example
    /// ```
    /// use mathbench::interpreter::value::constant::Constant;
    /// let s = Constant::real(std::f64::consts::FRAC_PI_2).sin();
    /// assert!(s.approx_eq(&Constant::ONE, 1e-12));
    /// ```
    #[must_use]
    pub fn sin(self) -> Self {
        self.rot90(1).sinh().rot90(-1)
    }

    /// Returns the cosine, `cosh(iz)`.
    #[must_use]
    pub fn cos(self) -> Self {
        self.rot90(1).cosh()
    }

    #[must_use]
    pub fn tan(self) -> Self {
        self.rot90(1).tanh().rot90(-1)
    }

    #[must_use]
    pub fn csc(self) -> Self {
        self.sin().recip()
    }

    #[must_use]
    pub fn sec(self) -> Self {
        self.cos().recip()
    }

    #[must_use]
    pub fn cot(self) -> Self {
        self.tan().recip()
    }

    /// Principal inverse sine, `-i·asinh(iz)`.
    #[must_use]
    pub fn asin(self) -> Self {
        self.rot90(1).asinh().rot90(-1)
    }

    /// Principal inverse cosine, `π/2 - asin(z)`.
    #[must_use]
    pub fn acos(self) -> Self {
        Self::real(consts::FRAC_PI_2).minus(self.asin())
    }

    /// Principal inverse tangent, `-i·atanh(iz)`.
    #[must_use]
    pub fn atan(self) -> Self {
        self.rot90(1).atanh().rot90(-1)
    }

    #[must_use]
    pub fn acsc(self) -> Self {
        self.recip().asin()
    }

    #[must_use]
    pub fn asec(self) -> Self {
        self.recip().acos()
    }

    #[must_use]
    pub fn acot(self) -> Self {
        self.recip().atan()
    }
}

/// `atan2` that treats both signed zeros of `y` as positive zero.
fn atan2(y: f64, x: f64) -> f64 {
    if y == 0.0 {
        if x < 0.0 { consts::PI } else { 0.0 }
    } else {
        y.atan2(x)
    }
}

impl ops::Add for Constant {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl ops::Sub for Constant {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl ops::Mul for Constant {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.times(rhs)
    }
}

impl ops::Div for Constant {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.divide(rhs)
    }
}

impl ops::Rem for Constant {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        self.modulo(rhs)
    }
}

impl ops::Neg for Constant {
    type Output = Self;

    fn neg(self) -> Self {
        self.negative()
    }
}
