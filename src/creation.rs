//! The determinant creation operator on the S basis.
//!
//! Prepending a part of size `k` to an S-indexed term is realized as the
//! determinant of a k×k matrix whose `(i, j)` entry is
//! `(1 − q^{v} t^{k-j-1}) · h_v` with `v = μᵢ + j − i + 1` (and an
//! outright zero when `v` is negative). The determinant is evaluated in
//! the homogeneous basis, expanded into Schur, and the resulting Schur
//! shapes are re-read as S indices. Iterating this operator over the
//! parts of a partition is what seeds the J family.

use partitions::Partition;
use qt::Scalar;
use symfunc::classical::merge_mul;
use symfunc::{ClassicalAlgebra, ClassicalBasis, Expansion};

use crate::error::{Error, Result};

/// Apply the size-`k` creation operator to an S-indexed expansion.
pub(crate) fn apply(
    classical: &ClassicalAlgebra,
    input: &Expansion,
    k: u32,
    q: &Scalar,
    t: &Scalar,
) -> Result<Expansion> {
    let mut out = Expansion::zero();
    for (part, coeff) in input.iter() {
        let image = one_term(classical, part, k, q, t)?;
        out.add_scaled(&image, coeff);
    }
    Ok(out)
}

fn one_term(
    classical: &ClassicalAlgebra,
    part: &Partition,
    k: u32,
    q: &Scalar,
    t: &Scalar,
) -> Result<Expansion> {
    if part.len() > k as usize {
        return Err(Error::CreationTooShort {
            part: part.clone(),
            k,
        });
    }
    let n = k as usize;
    let mut padded = part.parts().to_vec();
    padded.resize(n, 0);

    let mut matrix = vec![vec![Expansion::zero(); n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            let value = i64::from(padded[i]) + j as i64 - i as i64 + 1;
            if value < 0 {
                continue;
            }
            let coeff =
                &Scalar::one() - &(&q.pow(value) * &t.pow((n - j - 1) as i64));
            let index = if value > 0 {
                Partition::new(vec![value as u32])
            } else {
                Partition::empty()
            };
            *entry = Expansion::single(index, coeff);
        }
    }

    let det = determinant(&matrix);
    Ok(classical.convert(ClassicalBasis::Homogeneous, ClassicalBasis::Schur, &det)?)
}

/// Cofactor expansion along the first row. The entries live in a
/// commutative ring (the homogeneous basis), not a field, so elimination
/// is not an option; the sizes are the parts of a partition, so the
/// factorial blow-up is irrelevant.
fn determinant(matrix: &[Vec<Expansion>]) -> Expansion {
    let n = matrix.len();
    if n == 0 {
        return Expansion::unit(Partition::empty());
    }
    if n == 1 {
        return matrix[0][0].clone();
    }
    let mut det = Expansion::zero();
    for (j, entry) in matrix[0].iter().enumerate() {
        if entry.is_zero() {
            continue;
        }
        let minor: Vec<Vec<Expansion>> = matrix[1..]
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(c, _)| c != j)
                    .map(|(_, e)| e.clone())
                    .collect()
            })
            .collect();
        let sign = if j % 2 == 0 { Scalar::one() } else { Scalar::int(-1) };
        let product = merge_mul(entry, &determinant(&minor));
        det.add_scaled(&product, &sign);
    }
    det
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(parts: &[u32]) -> Partition {
        Partition::new(parts.to_vec())
    }

    fn q() -> Scalar {
        Scalar::q()
    }

    fn t() -> Scalar {
        Scalar::t()
    }

    #[test]
    fn creation_on_the_unit_weight_one() {
        // One step of size 1 on the S-unit: (1 − q)·S[1].
        let classical = ClassicalAlgebra::new();
        let out = apply(&classical, &Expansion::unit(Partition::empty()), 1, &q(), &t()).unwrap();
        assert_eq!(out.coeff(&p(&[1])), &Scalar::one() - &q());
        assert_eq!(out.support_len(), 1);
    }

    #[test]
    fn creation_on_the_unit_weight_two() {
        // creation(2) on the unit:
        // (q²t − qt − q + 1)·S[1,1] + (q² − qt − q + t)·S[2].
        let classical = ClassicalAlgebra::new();
        let out = apply(&classical, &Expansion::unit(Partition::empty()), 2, &q(), &t()).unwrap();
        let one = Scalar::one();
        assert_eq!(
            out.coeff(&p(&[1, 1])),
            &(&one - &q()) * &(&one - &(&q() * &t()))
        );
        // q² − q·t − q + t = (q − t)(q − 1)
        assert_eq!(
            out.coeff(&p(&[2])),
            &(&q() - &t()) * &(&q() - &one)
        );
    }

    #[test]
    fn too_many_rows_is_reported() {
        let classical = ClassicalAlgebra::new();
        let err = apply(&classical, &Expansion::unit(p(&[1, 1])), 1, &q(), &t()).unwrap_err();
        assert!(matches!(err, Error::CreationTooShort { .. }));
    }
}
