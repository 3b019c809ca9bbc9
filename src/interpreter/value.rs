/// Complex scalar kernel.
///
/// Defines [`Constant`](constant::Constant), the terminal value of every
/// simplification, together with the closed complex algebra it supports:
/// field arithmetic, `exp` and `ln`, powers and roots, and the trigonometric
/// and hyperbolic families with their inverses on the principal branch.
pub mod constant;
/// Unordered collections.
///
/// Defines the [`Set`](set::Set) container. Operators lift over sets element
/// by element.
pub mod set;
/// Ordered tuples.
///
/// Defines the [`Vector`](vector::Vector) container and the component-wise,
/// dot, cross and norm routines that operators dispatch to when their
/// operands are vectors.
pub mod vector;
