//! The deformed scalar-product engine.
//!
//! Every pairing is computed on power-sum coordinates, where the bilinear
//! form is diagonal: `⟨p_λ, p_μ⟩ = 0` for λ ≠ μ by definition, and
//! `⟨p_λ, p_λ⟩` is the deformed centralizer size supplied by the caller.
//! Cross terms are therefore never evaluated at all — the sum runs over
//! the intersection of the two supports.

use partitions::Partition;
use qt::Scalar;
use symfunc::Expansion;

use crate::error::Result;

/// Pair two power-sum expansions against a diagonal Gram form. Terms of
/// different weight contribute the defined zero, so inhomogeneous inputs
/// are fine; pairing anything with the zero element yields zero.
pub(crate) fn pair_power(
    a: &Expansion,
    b: &Expansion,
    diagonal: impl Fn(&Partition) -> Result<Scalar>,
) -> Result<Scalar> {
    let mut total = Scalar::zero();
    for (part, ca) in a.iter() {
        let cb = b.coeff(part);
        if cb.is_zero() {
            continue;
        }
        total = &total + &(&(ca * &cb) * &diagonal(part)?);
    }
    Ok(total)
}

/// The Hall–Littlewood Gram diagonal over symbolic `t`:
/// `z_λ · Π (1 − t^{λᵢ})^{-1}` — the `q = 0` specialization of the
/// deformed centralizer size.
pub(crate) fn hall_littlewood_diagonal(part: &Partition) -> Result<Scalar> {
    Ok(part
        .centralizer_qt(&Scalar::zero(), &Scalar::t())
        .expect("symbolic t cannot degenerate"))
}
