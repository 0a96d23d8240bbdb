use std::collections::BTreeMap;

use itertools::Itertools;
use partitions::Partition;
use qt::Scalar;

use crate::Error;

/// A sparse linear combination of basis vectors, indexed by partitions.
/// Zero coefficients are never stored. The expansion itself carries no
/// basis tag; the caller knows which basis the indices refer to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expansion {
    coeffs: BTreeMap<Partition, Scalar>,
}

impl Expansion {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn unit(part: Partition) -> Self {
        Self::single(part, Scalar::one())
    }

    pub fn single(part: Partition, coeff: Scalar) -> Self {
        let mut coeffs = BTreeMap::new();
        if !coeff.is_zero() {
            coeffs.insert(part, coeff);
        }
        Self { coeffs }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn support_len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coeff(&self, part: &Partition) -> Scalar {
        self.coeffs.get(part).cloned().unwrap_or_else(Scalar::zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Partition, &Scalar)> {
        self.coeffs.iter()
    }

    /// The weights present in the expansion, ascending.
    pub fn weights(&self) -> Vec<u32> {
        self.coeffs.keys().map(Partition::weight).unique().sorted().collect()
    }

    /// The terms of a single weight.
    pub fn homogeneous_part(&self, weight: u32) -> Self {
        Self {
            coeffs: self
                .coeffs
                .iter()
                .filter(|(p, _)| p.weight() == weight)
                .map(|(p, c)| (p.clone(), c.clone()))
                .collect(),
        }
    }

    pub fn add_term(&mut self, part: Partition, coeff: &Scalar) {
        if coeff.is_zero() {
            return;
        }
        use std::collections::btree_map::Entry;
        match self.coeffs.entry(part) {
            Entry::Vacant(e) => {
                e.insert(coeff.clone());
            }
            Entry::Occupied(mut e) => {
                let sum = &*e.get() + coeff;
                if sum.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
        }
    }

    pub fn add_scaled(&mut self, other: &Expansion, scale: &Scalar) {
        for (p, c) in other.iter() {
            self.add_term(p.clone(), &(c * scale));
        }
    }

    pub fn scale(&self, scale: &Scalar) -> Self {
        if scale.is_zero() {
            return Self::zero();
        }
        Self {
            coeffs: self
                .coeffs
                .iter()
                .map(|(p, c)| (p.clone(), c * scale))
                .collect(),
        }
    }

    pub fn map_coeffs(&self, mut f: impl FnMut(&Scalar) -> Scalar) -> Self {
        let mut out = Self::zero();
        for (p, c) in self.iter() {
            out.add_term(p.clone(), &f(c));
        }
        out
    }

    /// Re-index every term through `f` (e.g. conjugation).
    pub fn map_support(&self, mut f: impl FnMut(&Partition) -> Partition) -> Self {
        let mut out = Self::zero();
        for (p, c) in self.iter() {
            out.add_term(f(p), c);
        }
        out
    }
}

impl std::fmt::Display for Expansion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let rendered = self
            .coeffs
            .iter()
            .map(|(p, c)| {
                if c.is_one() {
                    format!("{p}")
                } else {
                    format!("({c})*{p}")
                }
            })
            .join(" + ");
        write!(f, "{rendered}")
    }
}

/// One graded piece of a change of basis: for each partition λ of the
/// table's degree, the expansion of `A[λ]` in the basis `B`. Rows and
/// columns of a single table always live in the same degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    degree: u32,
    rows: BTreeMap<Partition, Expansion>,
}

impl Table {
    pub fn new(degree: u32) -> Self {
        Self {
            degree,
            rows: BTreeMap::new(),
        }
    }

    pub fn identity(degree: u32) -> Self {
        let mut table = Self::new(degree);
        for part in partitions::partitions_of(degree) {
            table.rows.insert(part.clone(), Expansion::unit(part));
        }
        table
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn insert_row(&mut self, part: Partition, row: Expansion) -> Result<(), Error> {
        if part.weight() != self.degree {
            return Err(Error::DegreeMismatch {
                expected: self.degree,
                found: part.weight(),
            });
        }
        if let Some(bad) = row.iter().map(|(p, _)| p).find(|p| p.weight() != self.degree) {
            return Err(Error::DegreeMismatch {
                expected: self.degree,
                found: bad.weight(),
            });
        }
        self.rows.insert(part, row);
        Ok(())
    }

    pub fn row(&self, part: &Partition) -> Option<&Expansion> {
        self.rows.get(part)
    }

    pub fn entry(&self, row: &Partition, col: &Partition) -> Scalar {
        self.rows
            .get(row)
            .map(|r| r.coeff(col))
            .unwrap_or_else(Scalar::zero)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&Partition, &Expansion)> {
        self.rows.iter()
    }

    /// Apply the table to a homogeneous expansion in the `A` basis,
    /// producing its image in `B`.
    pub fn apply(&self, input: &Expansion) -> Result<Expansion, Error> {
        let mut out = Expansion::zero();
        for (part, coeff) in input.iter() {
            if part.weight() != self.degree {
                return Err(Error::DegreeMismatch {
                    expected: self.degree,
                    found: part.weight(),
                });
            }
            let row = self.rows.get(part).ok_or_else(|| Error::MissingRow {
                part: part.clone(),
            })?;
            out.add_scaled(row, coeff);
        }
        Ok(out)
    }

    /// Compose `self: A → B` with `other: B → C` into `A → C`.
    pub fn compose(&self, other: &Table) -> Result<Table, Error> {
        if self.degree != other.degree {
            return Err(Error::DegreeMismatch {
                expected: self.degree,
                found: other.degree,
            });
        }
        let mut out = Table::new(self.degree);
        for (part, row) in &self.rows {
            out.insert_row(part.clone(), other.apply(row)?)?;
        }
        Ok(out)
    }

    /// Scale row `λ` by `f(λ)` (a diagonal module map).
    pub fn scale_rows(&self, mut f: impl FnMut(&Partition) -> Scalar) -> Table {
        let mut out = Table::new(self.degree);
        for (part, row) in &self.rows {
            out.rows.insert(part.clone(), row.scale(&f(part)));
        }
        out
    }

    /// Scale the entries of column `μ` by `f(μ)` — precomposition with a
    /// diagonal map on the target basis.
    pub fn scale_cols(&self, mut f: impl FnMut(&Partition) -> Scalar) -> Table {
        let mut out = Table::new(self.degree);
        for (part, row) in &self.rows {
            let mut scaled = Expansion::zero();
            for (col, coeff) in row.iter() {
                scaled.add_term(col.clone(), &(coeff * &f(col)));
            }
            out.rows.insert(part.clone(), scaled);
        }
        out
    }

    pub fn map_coeffs(&self, mut f: impl FnMut(&Scalar) -> Scalar) -> Table {
        let mut out = Table::new(self.degree);
        for (part, row) in &self.rows {
            out.rows.insert(part.clone(), row.map_coeffs(&mut f));
        }
        out
    }

    pub fn is_identity(&self) -> bool {
        self.rows
            .iter()
            .all(|(p, row)| row.support_len() == 1 && row.coeff(p).is_one())
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (part, row) in &self.rows {
            writeln!(f, "{part}: {row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(parts: &[u32]) -> Partition {
        Partition::new(parts.to_vec())
    }

    #[test]
    fn insert_enforces_grading() {
        let mut table = Table::new(2);
        assert!(table
            .insert_row(p(&[3]), Expansion::unit(p(&[3])))
            .is_err());
        assert!(table
            .insert_row(p(&[2]), Expansion::unit(p(&[1])))
            .is_err());
        assert!(table
            .insert_row(p(&[2]), Expansion::unit(p(&[1, 1])))
            .is_ok());
    }

    #[test]
    fn compose_with_identity() {
        let mut table = Table::new(2);
        let mut row = Expansion::unit(p(&[2]));
        row.add_term(p(&[1, 1]), &Scalar::q());
        table.insert_row(p(&[2]), row).unwrap();
        table
            .insert_row(p(&[1, 1]), Expansion::unit(p(&[1, 1])))
            .unwrap();
        let id = Table::identity(2);
        assert_eq!(table.compose(&id).unwrap(), table);
    }
}
