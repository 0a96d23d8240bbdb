//! Polynomial GCD in `ℚ[q, t]`, used to keep [`Scalar`](crate::Scalar)
//! values in canonical reduced form.
//!
//! The computation runs the primitive polynomial remainder sequence on the
//! polynomials viewed as elements of `ℚ[q][t]`: take contents with respect
//! to `ℚ[q]`, run a pseudo-remainder Euclid on the primitive parts, and
//! recombine with the univariate content GCD.

use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::poly::Poly;

/// Dense univariate polynomial in `q`; index = exponent, no trailing zeros.
type QPoly = Vec<BigRational>;

/// Polynomial in `t` with `ℚ[q]` coefficients; index = `t`-exponent.
type TPoly = Vec<QPoly>;

fn trim(p: &mut QPoly) {
    while p.last().is_some_and(BigRational::is_zero) {
        p.pop();
    }
}

fn qp_is_zero(p: &QPoly) -> bool {
    p.is_empty()
}

fn qp_mul(a: &QPoly, b: &QPoly) -> QPoly {
    if qp_is_zero(a) || qp_is_zero(b) {
        return Vec::new();
    }
    let mut out = vec![BigRational::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        for (j, bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    let mut out = out;
    trim(&mut out);
    out
}

fn qp_sub(a: &QPoly, b: &QPoly) -> QPoly {
    let mut out = a.clone();
    if out.len() < b.len() {
        out.resize(b.len(), BigRational::zero());
    }
    for (i, bi) in b.iter().enumerate() {
        out[i] -= bi;
    }
    trim(&mut out);
    out
}

/// Division with remainder over the field ℚ.
fn qp_div_rem(a: &QPoly, b: &QPoly) -> (QPoly, QPoly) {
    assert!(!qp_is_zero(b));
    let mut rem = a.clone();
    let mut quot = vec![BigRational::zero(); a.len().saturating_sub(b.len() - 1)];
    while rem.len() >= b.len() {
        let shift = rem.len() - b.len();
        let c = rem.last().unwrap() / b.last().unwrap();
        quot[shift] = c.clone();
        for (i, bi) in b.iter().enumerate() {
            let v = bi * &c;
            rem[shift + i] -= v;
        }
        trim(&mut rem);
    }
    trim(&mut quot);
    (quot, rem)
}

fn qp_div_exact(a: &QPoly, b: &QPoly) -> QPoly {
    let (q, r) = qp_div_rem(a, b);
    debug_assert!(qp_is_zero(&r), "inexact univariate division");
    q
}

/// Monic univariate GCD by Euclid's algorithm.
fn qp_gcd(a: &QPoly, b: &QPoly) -> QPoly {
    let mut a = a.clone();
    let mut b = b.clone();
    while !qp_is_zero(&b) {
        let (_, r) = qp_div_rem(&a, &b);
        a = b;
        b = r;
    }
    if let Some(lc) = a.last().cloned() {
        for c in &mut a {
            *c /= &lc;
        }
    }
    a
}

fn to_t_slices(p: &Poly) -> TPoly {
    let mut slices: TPoly = vec![Vec::new(); p.degree(crate::Var::T) as usize + 1];
    for (&(qe, te), c) in p.terms() {
        let slice = &mut slices[te as usize];
        if slice.len() <= qe as usize {
            slice.resize(qe as usize + 1, BigRational::zero());
        }
        slice[qe as usize] = c.clone();
    }
    for s in &mut slices {
        trim(s);
    }
    slices
}

fn from_t_slices(slices: &TPoly) -> Poly {
    let mut out = Poly::zero();
    for (te, slice) in slices.iter().enumerate() {
        for (qe, c) in slice.iter().enumerate() {
            out.add_term((qe as u32, te as u32), c);
        }
    }
    out
}

fn tp_deg(p: &TPoly) -> Option<usize> {
    p.iter().rposition(|s| !qp_is_zero(s))
}

fn tp_trim(p: &mut TPoly) {
    match tp_deg(p) {
        Some(d) => p.truncate(d + 1),
        None => p.clear(),
    }
}

/// Content of `p` with respect to `ℚ[q]`: the monic GCD of its slices.
fn tp_content(p: &TPoly) -> QPoly {
    let mut g: QPoly = Vec::new();
    for s in p.iter().filter(|s| !qp_is_zero(s)) {
        g = if qp_is_zero(&g) { s.clone() } else { qp_gcd(&g, s) };
        if g.len() == 1 {
            break;
        }
    }
    g
}

fn tp_primitive(p: &TPoly) -> TPoly {
    let c = tp_content(p);
    if qp_is_zero(&c) {
        return Vec::new();
    }
    p.iter()
        .map(|s| if qp_is_zero(s) { Vec::new() } else { qp_div_exact(s, &c) })
        .collect()
}

/// Pseudo-remainder of `u` by `v` in `ℚ[q][t]`; `v` must be nonzero.
fn tp_prem(u: &TPoly, v: &TPoly) -> TPoly {
    let dv = tp_deg(v).expect("pseudo-division by zero");
    let lcv = v[dv].clone();
    let mut r = u.clone();
    while let Some(dr) = tp_deg(&r) {
        if dr < dv {
            break;
        }
        let lcr = r[dr].clone();
        // r ← lc(v)·r − lc(r)·t^{dr−dv}·v
        let mut next: TPoly = r.iter().map(|s| qp_mul(s, &lcv)).collect();
        for (i, vi) in v.iter().enumerate() {
            let idx = dr - dv + i;
            next[idx] = qp_sub(&next[idx], &qp_mul(vi, &lcr));
        }
        tp_trim(&mut next);
        r = next;
    }
    r
}

/// GCD in `ℚ[q, t]`, unique up to a rational constant.
pub(crate) fn gcd(a: &Poly, b: &Poly) -> Poly {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }
    let sa = to_t_slices(a);
    let sb = to_t_slices(b);
    let ca = tp_content(&sa);
    let cb = tp_content(&sb);
    let content = qp_gcd(&ca, &cb);

    let mut r0 = tp_primitive(&sa);
    let mut r1 = tp_primitive(&sb);
    if tp_deg(&r0) < tp_deg(&r1) {
        std::mem::swap(&mut r0, &mut r1);
    }
    while tp_deg(&r1).is_some() {
        let r2 = tp_prem(&r0, &r1);
        r0 = r1;
        r1 = tp_primitive(&r2);
    }
    let pp = tp_primitive(&r0);
    let combined: TPoly = pp.iter().map(|s| qp_mul(s, &content)).collect();
    from_t_slices(&combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Var;

    fn q() -> Poly {
        Poly::gen(Var::Q)
    }

    fn t() -> Poly {
        Poly::gen(Var::T)
    }

    #[test]
    fn common_factor_is_recovered() {
        let g = q() * t() - Poly::one();
        let a = &g * &(q() - t());
        let b = &g * &(q() + Poly::int(2));
        let d = gcd(&a, &b);
        // Unique up to a rational scalar: dividing both inputs must be exact.
        assert!(a.div_exact(&d).is_some());
        assert!(b.div_exact(&d).is_some());
        assert!(d.div_exact(&g).is_some());
    }

    #[test]
    fn coprime_inputs_give_constant() {
        let d = gcd(&(q() - t()), &(q() + t()));
        assert!(d.is_constant() && !d.is_zero());
    }

    #[test]
    fn univariate_contents() {
        let a = (q() - Poly::one()) * (q() + Poly::one());
        let b = (q() - Poly::one()) * q();
        let d = gcd(&a, &b);
        assert!(d.div_exact(&(q() - Poly::one())).is_some());
        assert!((q() - Poly::one()).div_exact(&d).is_some());
    }
}
