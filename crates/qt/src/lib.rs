//! Exact scalar arithmetic in the field `ℚ(q, t)`.
//!
//! Everything downstream of this crate manipulates coefficients that are
//! rational functions in the two deformation parameters `q` and `t`. A
//! [`Poly`] is a sparse bivariate polynomial over [`BigRational`]; a
//! [`Scalar`] is a quotient of two such polynomials kept in a canonical
//! reduced form, so that scalars can serve as hash-map keys (bases are
//! interned by the values their parameters were fixed to).
//!
//! [`BigRational`]: num_rational::BigRational

mod gcd;
mod poly;
mod ratio;

pub use num_rational::BigRational;
pub use poly::Poly;
pub use ratio::Scalar;

/// One of the two distinguished parameters of the coefficient field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    Q,
    T,
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Var::Q => write!(f, "q"),
            Var::T => write!(f, "t"),
        }
    }
}
