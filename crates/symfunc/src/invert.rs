//! Inversion of change-of-basis tables.
//!
//! The workhorse is [`triangular`]: a forward sweep over one degree's
//! partitions in an order compatible with dominance, back-substituting
//! against the rows already produced. The diagonal is arbitrary nonzero,
//! never assumed to be 1. A table whose rows spread across
//! dominance-incomparable partitions cannot go through the sweep;
//! [`dense`] covers those by Gauss–Jordan elimination over the scalar
//! field.

use partitions::partitions_of;
use qt::Scalar;

use crate::table::{Expansion, Table};
use crate::Error;

/// Which side of the dominance order a triangular table's off-diagonal
/// entries live on, relative to the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangularity {
    /// Row λ only touches columns μ ⊴ λ.
    Lower,
    /// Row λ only touches columns μ ⊵ λ.
    Upper,
}

/// Invert a dominance-triangular table by back-substitution.
///
/// Rows are processed so that every row a given row refers to has already
/// been inverted: ascending dominance for [`Triangularity::Lower`],
/// descending for [`Triangularity::Upper`], with descending lexicographic
/// order as the fixed total refinement. Fails with a diagnosable error if
/// a diagonal entry vanishes or an off-diagonal entry sits on the wrong
/// side of the order — either means the table is not what the caller
/// declared it to be.
pub fn triangular(direct: &Table, tri: Triangularity) -> Result<Table, Error> {
    let mut order = partitions_of(direct.degree());
    if tri == Triangularity::Lower {
        order.reverse();
    }
    let mut inverse = Table::new(direct.degree());
    for part in &order {
        let row = direct
            .row(part)
            .ok_or_else(|| Error::MissingRow { part: part.clone() })?;
        let diag = row.coeff(part);
        if diag.is_zero() {
            return Err(Error::ZeroDiagonal { part: part.clone() });
        }
        let mut inv_row = Expansion::unit(part.clone());
        for (col, coeff) in row.iter().filter(|(col, _)| *col != part) {
            let ok = match (tri, part.dominance_cmp(col)) {
                (Triangularity::Lower, Some(std::cmp::Ordering::Greater)) => true,
                (Triangularity::Upper, Some(std::cmp::Ordering::Less)) => true,
                _ => false,
            };
            if !ok {
                return Err(Error::NotTriangular {
                    row: part.clone(),
                    col: col.clone(),
                });
            }
            // Already inverted: `col` strictly precedes `part` in the sweep.
            let done = inverse.row(col).expect("sweep order");
            inv_row.add_scaled(&done.clone(), &-coeff.clone());
        }
        inverse.insert_row(part.clone(), inv_row.scale(&diag.inv()))?;
    }
    Ok(inverse)
}

/// Invert a table with no triangularity to exploit: Gauss–Jordan over the
/// fraction field. Fails if the table is singular, which for the tables
/// this engine produces only happens under a degenerate specialization of
/// `q` or `t`.
pub fn dense(direct: &Table) -> Result<Table, Error> {
    let parts = partitions_of(direct.degree());
    let n = parts.len();
    let mut m = vec![vec![Scalar::zero(); n]; n];
    let mut inv = vec![vec![Scalar::zero(); n]; n];
    for i in 0..n {
        inv[i][i] = Scalar::one();
        let row = direct
            .row(&parts[i])
            .ok_or_else(|| Error::MissingRow { part: parts[i].clone() })?;
        for (col, coeff) in row.iter() {
            let j = parts.iter().position(|p| p == col).ok_or_else(|| {
                Error::DegreeMismatch {
                    expected: direct.degree(),
                    found: col.weight(),
                }
            })?;
            m[i][j] = coeff.clone();
        }
    }

    for col in 0..n {
        let pivot = (col..n)
            .find(|&r| !m[r][col].is_zero())
            .ok_or(Error::Singular {
                degree: direct.degree(),
            })?;
        m.swap(col, pivot);
        inv.swap(col, pivot);
        let scale = m[col][col].inv();
        for j in 0..n {
            m[col][j] = &m[col][j] * &scale;
            inv[col][j] = &inv[col][j] * &scale;
        }
        for r in 0..n {
            if r == col || m[r][col].is_zero() {
                continue;
            }
            let factor = m[r][col].clone();
            for j in 0..n {
                m[r][j] = &m[r][j] - &(&factor * &m[col][j]);
                inv[r][j] = &inv[r][j] - &(&factor * &inv[col][j]);
            }
        }
    }

    let mut out = Table::new(direct.degree());
    for (i, part) in parts.iter().enumerate() {
        let mut row = Expansion::zero();
        for (j, col) in parts.iter().enumerate() {
            row.add_term(col.clone(), &inv[i][j]);
        }
        out.insert_row(part.clone(), row)?;
    }
    Ok(out)
}
