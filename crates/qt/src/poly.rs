use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::Var;

/// A sparse polynomial in `ℚ[q, t]`.
///
/// Monomials are keyed by their `(q, t)` exponent pair; zero coefficients
/// are never stored. The `BTreeMap` storage makes equality, hashing and
/// display order canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Poly {
    terms: BTreeMap<(u32, u32), BigRational>,
}

impl Poly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::int(1)
    }

    pub fn int(n: i64) -> Self {
        Self::rational(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn rational(c: BigRational) -> Self {
        Self::monomial(0, 0, c)
    }

    /// The polynomial `c · q^qe · t^te`.
    pub fn monomial(qe: u32, te: u32, c: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert((qe, te), c);
        }
        Self { terms }
    }

    pub fn gen(v: Var) -> Self {
        match v {
            Var::Q => Self::monomial(1, 0, BigRational::one()),
            Var::T => Self::monomial(0, 1, BigRational::one()),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.terms.get(&(0, 0)).is_some_and(BigRational::is_one)
    }

    pub fn is_constant(&self) -> bool {
        self.terms.len() <= 1 && self.terms.keys().all(|&k| k == (0, 0))
    }

    /// The value of a degree-zero polynomial, `None` otherwise.
    pub fn as_rational(&self) -> Option<BigRational> {
        if self.is_zero() {
            Some(BigRational::zero())
        } else if self.is_constant() {
            self.terms.get(&(0, 0)).cloned()
        } else {
            None
        }
    }

    pub fn degree(&self, v: Var) -> u32 {
        self.terms
            .keys()
            .map(|&(qe, te)| match v {
                Var::Q => qe,
                Var::T => te,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&(u32, u32), &BigRational)> {
        self.terms.iter()
    }

    /// The lexicographically greatest monomial and its coefficient.
    pub(crate) fn leading(&self) -> Option<((u32, u32), &BigRational)> {
        self.terms.iter().next_back().map(|(&m, c)| (m, c))
    }

    pub(crate) fn add_term(&mut self, m: (u32, u32), c: &BigRational) {
        if c.is_zero() {
            return;
        }
        use std::collections::btree_map::Entry;
        match self.terms.entry(m) {
            Entry::Vacant(e) => {
                e.insert(c.clone());
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() += c;
                if e.get().is_zero() {
                    e.remove();
                }
            }
        }
    }

    pub fn scale(&self, c: &BigRational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|(&m, v)| (m, v * c)).collect(),
        }
    }

    pub fn pow(&self, mut e: u32) -> Self {
        let mut base = self.clone();
        let mut acc = Self::one();
        while e > 0 {
            if e & 1 == 1 {
                acc = &acc * &base;
            }
            e >>= 1;
            if e > 0 {
                base = &base * &base;
            }
        }
        acc
    }

    /// Exchange the roles of `q` and `t`.
    pub fn swap_qt(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(&(qe, te), c)| ((te, qe), c.clone())).collect(),
        }
    }

    /// Exact division, `None` when `self` is not a multiple of `rhs`.
    pub fn div_exact(&self, rhs: &Poly) -> Option<Poly> {
        assert!(!rhs.is_zero(), "division by the zero polynomial");
        let mut rem = self.clone();
        let mut quot = Poly::zero();
        let ((bq, bt), bc) = rhs.leading().unwrap();
        let bc = bc.clone();
        while let Some(((rq, rt), rc)) = rem.leading() {
            if rq < bq || rt < bt {
                return None;
            }
            let m = (rq - bq, rt - bt);
            let c = rc / &bc;
            quot.add_term(m, &c);
            let piece = Poly::monomial(m.0, m.1, c) * rhs.clone();
            rem = &rem - &piece;
        }
        Some(quot)
    }

    /// Evaluate at `v = value`, where `value` may itself be any scalar.
    /// Horner's rule over the exponents of `v`; the other variable stays
    /// symbolic.
    pub fn eval_var(&self, v: Var, value: &crate::Scalar) -> crate::Scalar {
        // Group terms by the exponent of `v`, descending.
        let mut by_exp: BTreeMap<u32, Poly> = BTreeMap::new();
        for (&(qe, te), c) in &self.terms {
            let (e, rest) = match v {
                Var::Q => (qe, Poly::monomial(0, te, c.clone())),
                Var::T => (te, Poly::monomial(qe, 0, c.clone())),
            };
            let slot = by_exp.entry(e).or_insert_with(Poly::zero);
            *slot = &*slot + &rest;
        }
        let mut acc = crate::Scalar::zero();
        let mut prev: Option<u32> = None;
        for (&e, coeff) in by_exp.iter().rev() {
            if let Some(p) = prev {
                acc = &acc * &value.pow((p - e) as i64);
            }
            acc = &acc + &crate::Scalar::from_poly(coeff.clone());
            prev = Some(e);
        }
        match prev {
            Some(e) => &acc * &value.pow(e as i64),
            None => crate::Scalar::zero(),
        }
    }
}

impl Add for &Poly {
    type Output = Poly;
    fn add(self, rhs: &Poly) -> Poly {
        let mut out = self.clone();
        for (&m, c) in &rhs.terms {
            out.add_term(m, c);
        }
        out
    }
}

impl Sub for &Poly {
    type Output = Poly;
    fn sub(self, rhs: &Poly) -> Poly {
        let mut out = self.clone();
        for (&m, c) in &rhs.terms {
            out.add_term(m, &-c.clone());
        }
        out
    }
}

impl Mul for &Poly {
    type Output = Poly;
    fn mul(self, rhs: &Poly) -> Poly {
        let mut out = Poly::zero();
        for (&(aq, at), ac) in &self.terms {
            for (&(bq, bt), bc) in &rhs.terms {
                out.add_term((aq + bq, at + bt), &(ac * bc));
            }
        }
        out
    }
}

impl Neg for &Poly {
    type Output = Poly;
    fn neg(self) -> Poly {
        Poly {
            terms: self.terms.iter().map(|(&m, c)| (m, -c.clone())).collect(),
        }
    }
}

macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident, $ty:ty) => {
        impl $trait for $ty {
            type Output = $ty;
            fn $method(self, rhs: $ty) -> $ty {
                (&self).$method(&rhs)
            }
        }
    };
}
forward_owned_binop!(Add, add, Poly);
forward_owned_binop!(Sub, sub, Poly);
forward_owned_binop!(Mul, mul, Poly);
pub(crate) use forward_owned_binop;

fn fmt_coeff(f: &mut std::fmt::Formatter, c: &BigRational, lead: bool, bare: bool) -> std::fmt::Result {
    let (sign, mag) = if c < &BigRational::zero() {
        ("-", -c.clone())
    } else {
        ("+", c.clone())
    };
    if lead {
        if sign == "-" {
            write!(f, "-")?;
        }
    } else {
        write!(f, " {} ", sign)?;
    }
    if bare || !mag.is_one() {
        write!(f, "{}", mag)?;
        if !bare {
            write!(f, "*")?;
        }
    }
    Ok(())
}

impl std::fmt::Display for Poly {
    /// Monomials in descending lexicographic order:
    /// `q^3 - q^2 - q + 1`, `q*t^2 - q*t - t + 1`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (&(qe, te), c)) in self.terms.iter().rev().enumerate() {
            fmt_coeff(f, c, i == 0, qe == 0 && te == 0)?;
            let mut star = false;
            if qe > 0 {
                write!(f, "q")?;
                if qe > 1 {
                    write!(f, "^{qe}")?;
                }
                star = true;
            }
            if te > 0 {
                if star {
                    write!(f, "*")?;
                }
                write!(f, "t")?;
                if te > 1 {
                    write!(f, "^{te}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q() -> Poly {
        Poly::gen(Var::Q)
    }

    fn t() -> Poly {
        Poly::gen(Var::T)
    }

    #[test]
    fn display_matches_descending_order() {
        let p = q().pow(3) - q().pow(2) - q() + Poly::one();
        assert_eq!(p.to_string(), "q^3 - q^2 - q + 1");
        let p = q() * t().pow(2) - q() * t() - t() + Poly::one();
        assert_eq!(p.to_string(), "q*t^2 - q*t - t + 1");
    }

    #[test]
    fn exact_division() {
        let a = (q() - t()) * (q() * t() - Poly::one());
        assert_eq!(a.div_exact(&(q() - t())), Some(q() * t() - Poly::one()));
        assert_eq!(a.div_exact(&(q() + t())), None);
    }

    #[test]
    fn swap_exchanges_variables() {
        let p = q().pow(2) * t() - Poly::int(3);
        assert_eq!(p.swap_qt(), t().pow(2) * q() - Poly::int(3));
    }
}
