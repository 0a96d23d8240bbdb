use std::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::gcd::gcd;
use crate::poly::Poly;
use crate::Var;

/// An element of `ℚ(q, t)`: a quotient of two polynomials in canonical
/// form — fully reduced, denominator nonzero with leading coefficient 1.
///
/// Canonical form makes the derived `Eq`/`Hash` agree with mathematical
/// equality, which the caches rely on (specialized bases are interned by
/// their `(q, t)` values).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar {
    num: Poly,
    den: Poly,
}

impl Scalar {
    /// Build `num / den` in canonical form. Panics if `den` is zero.
    pub fn new(num: Poly, den: Poly) -> Self {
        assert!(!den.is_zero(), "zero denominator");
        if num.is_zero() {
            return Self { num, den: Poly::one() };
        }
        let g = gcd(&num, &den);
        let mut num = num.div_exact(&g).expect("gcd must divide");
        let mut den = den.div_exact(&g).expect("gcd must divide");
        let (_, lc) = den.leading().expect("nonzero");
        let inv = BigRational::one() / lc;
        num = num.scale(&inv);
        den = den.scale(&inv);
        Self { num, den }
    }

    pub fn from_poly(p: Poly) -> Self {
        Self { num: p, den: Poly::one() }
    }

    pub fn zero() -> Self {
        Self::from_poly(Poly::zero())
    }

    pub fn one() -> Self {
        Self::from_poly(Poly::one())
    }

    pub fn int(n: i64) -> Self {
        Self::from_poly(Poly::int(n))
    }

    pub fn rational(n: i64, d: i64) -> Self {
        Self::from_poly(Poly::rational(BigRational::new(BigInt::from(n), BigInt::from(d))))
    }

    pub fn from_rational(c: BigRational) -> Self {
        Self::from_poly(Poly::rational(c))
    }

    pub fn q() -> Self {
        Self::from_poly(Poly::gen(Var::Q))
    }

    pub fn t() -> Self {
        Self::from_poly(Poly::gen(Var::T))
    }

    pub fn gen(v: Var) -> Self {
        Self::from_poly(Poly::gen(v))
    }

    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    /// Degree zero in both variables.
    pub fn is_constant(&self) -> bool {
        self.num.is_constant() && self.den.is_one()
    }

    pub fn as_rational(&self) -> Option<BigRational> {
        if self.den.is_one() {
            self.num.as_rational()
        } else {
            None
        }
    }

    pub fn checked_inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self::new(self.den.clone(), self.num.clone()))
        }
    }

    pub fn inv(&self) -> Self {
        self.checked_inv().expect("inverse of zero")
    }

    pub fn pow(&self, e: i64) -> Self {
        if e < 0 {
            return self.inv().pow(-e);
        }
        Self::new(self.num.pow(e as u32), self.den.pow(e as u32))
    }

    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        rhs.checked_inv().map(|r| self * &r)
    }

    /// Exchange the roles of `q` and `t`.
    pub fn swap_qt(&self) -> Self {
        Self::new(self.num.swap_qt(), self.den.swap_qt())
    }

    /// Substitute `value` for the variable `v`. Returns `None` when the
    /// substitution annihilates the denominator (a degenerate
    /// specialization, e.g. `t = 1` meeting `1/(1 - t)`).
    pub fn substitute(&self, v: Var, value: &Scalar) -> Option<Self> {
        let num = self.num.eval_var(v, value);
        let den = self.den.eval_var(v, value);
        if den.is_zero() {
            return None;
        }
        num.checked_div(&den)
    }
}

impl Add for &Scalar {
    type Output = Scalar;
    fn add(self, rhs: &Scalar) -> Scalar {
        Scalar::new(
            &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            &self.den * &rhs.den,
        )
    }
}

impl Sub for &Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &Scalar) -> Scalar {
        Scalar::new(
            &(&self.num * &rhs.den) - &(&rhs.num * &self.den),
            &self.den * &rhs.den,
        )
    }
}

impl Mul for &Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar::new(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Div for &Scalar {
    type Output = Scalar;
    fn div(self, rhs: &Scalar) -> Scalar {
        self.checked_div(rhs).expect("division by zero scalar")
    }
}

impl Neg for &Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

crate::poly::forward_owned_binop!(Add, add, Scalar);
crate::poly::forward_owned_binop!(Sub, sub, Scalar);
crate::poly::forward_owned_binop!(Mul, mul, Scalar);
crate::poly::forward_owned_binop!(Div, div, Scalar);

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.den.is_one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({})/({})", self.num, self.den)
        }
    }
}
