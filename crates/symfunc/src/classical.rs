//! The four classical bases and their interchange tables.
//!
//! All routes go through Schur: the monomial table is the Kostka matrix
//! (semistandard tableau counts), the homogeneous table its transpose,
//! and the power sums reach Schur through the homogeneous basis via
//! Newton's identities. The Kostka tables are dominance-triangular with
//! unit diagonal, so their reverses come from the triangular sweep; the
//! power-sum legs are compositions and need no inversion of their own.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, ReentrantMutex};
use partitions::{partitions_of, Partition};
use qt::Scalar;
use rustc_hash::FxHashMap;

use crate::invert;
use crate::table::{Expansion, Table};
use crate::{Error, Triangularity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassicalBasis {
    Monomial,
    PowerSum,
    Homogeneous,
    Schur,
}

impl ClassicalBasis {
    /// The conventional single-letter prefix (`m`, `p`, `h`, `s`).
    pub fn prefix(self) -> &'static str {
        match self {
            ClassicalBasis::Monomial => "m",
            ClassicalBasis::PowerSum => "p",
            ClassicalBasis::Homogeneous => "h",
            ClassicalBasis::Schur => "s",
        }
    }
}

impl std::fmt::Display for ClassicalBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Lazily built, degree-at-a-time tables between the classical bases.
/// One instance per registry; all tables are over symbolic `(q, t)`-free
/// rationals, so they are shared by every specialization.
pub struct ClassicalAlgebra {
    tables: DashMap<(ClassicalBasis, ClassicalBasis, u32), Arc<Table>>,
    kostka: Mutex<FxHashMap<(Partition, Partition), u64>>,
    power_in_h: Mutex<FxHashMap<u32, Expansion>>,
    compute_guard: ReentrantMutex<()>,
}

impl Default for ClassicalAlgebra {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassicalAlgebra {
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
            kostka: Mutex::new(FxHashMap::default()),
            power_in_h: Mutex::new(FxHashMap::default()),
            compute_guard: ReentrantMutex::new(()),
        }
    }

    /// The Kostka number `K_{λμ}`: semistandard tableaux of shape λ and
    /// content μ. Zero when the weights differ.
    pub fn kostka(&self, shape: &Partition, content: &Partition) -> u64 {
        if shape.weight() != content.weight() {
            return 0;
        }
        let mut memo = self.kostka.lock();
        kostka_rec(&mut memo, shape, content)
    }

    /// The change-of-basis table `from → to` in one degree.
    pub fn table(
        &self,
        from: ClassicalBasis,
        to: ClassicalBasis,
        degree: u32,
    ) -> Result<Arc<Table>, Error> {
        let key = (from, to, degree);
        if let Some(table) = self.tables.get(&key) {
            return Ok(table.clone());
        }
        let _guard = self.compute_guard.lock();
        if let Some(table) = self.tables.get(&key) {
            return Ok(table.clone());
        }
        let table = Arc::new(self.compute_table(from, to, degree)?);
        self.tables.insert(key, table.clone());
        Ok(table)
    }

    fn compute_table(
        &self,
        from: ClassicalBasis,
        to: ClassicalBasis,
        degree: u32,
    ) -> Result<Table, Error> {
        use ClassicalBasis::*;
        match (from, to) {
            _ if from == to => Ok(Table::identity(degree)),
            (Schur, Monomial) => self.schur_to_monomial(degree),
            (Monomial, Schur) => {
                invert::triangular(&*self.table(Schur, Monomial, degree)?, Triangularity::Lower)
            }
            (Homogeneous, Schur) => self.homogeneous_to_schur(degree),
            (Schur, Homogeneous) => {
                invert::triangular(&*self.table(Homogeneous, Schur, degree)?, Triangularity::Upper)
            }
            (PowerSum, Homogeneous) => self.power_to_homogeneous(degree),
            (Homogeneous, PowerSum) => self.homogeneous_to_power(degree),
            (PowerSum, Schur) => self
                .table(PowerSum, Homogeneous, degree)?
                .compose(&*self.table(Homogeneous, Schur, degree)?),
            (Schur, PowerSum) => self
                .table(Schur, Homogeneous, degree)?
                .compose(&*self.table(Homogeneous, PowerSum, degree)?),
            // Remaining pairs go through Schur.
            (from, to) => self
                .table(from, Schur, degree)?
                .compose(&*self.table(Schur, to, degree)?),
        }
    }

    /// `s_λ = Σ_{μ ⊴ λ} K_{λμ} m_μ` — unitriangular under dominance.
    fn schur_to_monomial(&self, degree: u32) -> Result<Table, Error> {
        let parts = partitions_of(degree);
        let mut table = Table::new(degree);
        for shape in &parts {
            let mut row = Expansion::zero();
            for content in &parts {
                let k = self.kostka(shape, content);
                row.add_term(content.clone(), &Scalar::int(k as i64));
            }
            table.insert_row(shape.clone(), row)?;
        }
        Ok(table)
    }

    /// `h_μ = Σ_{λ ⊵ μ} K_{λμ} s_λ` — the transpose Kostka table.
    fn homogeneous_to_schur(&self, degree: u32) -> Result<Table, Error> {
        let parts = partitions_of(degree);
        let mut table = Table::new(degree);
        for content in &parts {
            let mut row = Expansion::zero();
            for shape in &parts {
                let k = self.kostka(shape, content);
                row.add_term(shape.clone(), &Scalar::int(k as i64));
            }
            table.insert_row(content.clone(), row)?;
        }
        Ok(table)
    }

    /// `p_k` in the homogeneous basis by Newton's identity
    /// `p_k = k·h_k − Σ_{i<k} h_i · p_{k−i}`.
    fn power_part_in_h(&self, k: u32) -> Expansion {
        let mut memo = self.power_in_h.lock();
        power_rec(&mut memo, k)
    }

    fn power_to_homogeneous(&self, degree: u32) -> Result<Table, Error> {
        let mut table = Table::new(degree);
        for part in partitions_of(degree) {
            let mut row = Expansion::unit(Partition::empty());
            for &k in part.parts() {
                row = merge_mul(&row, &self.power_part_in_h(k));
            }
            table.insert_row(part, row)?;
        }
        Ok(table)
    }

    /// `h_n = Σ_{λ ⊢ n} p_λ / z_λ`, extended multiplicatively.
    fn homogeneous_to_power(&self, degree: u32) -> Result<Table, Error> {
        let mut table = Table::new(degree);
        for part in partitions_of(degree) {
            let mut row = Expansion::unit(Partition::empty());
            for &k in part.parts() {
                let mut h_k = Expansion::zero();
                for lam in partitions_of(k) {
                    let z = Scalar::from_rational(lam.centralizer_size());
                    h_k.add_term(lam, &z.inv());
                }
                row = merge_mul(&row, &h_k);
            }
            table.insert_row(part, row)?;
        }
        Ok(table)
    }

    /// Convert a (possibly inhomogeneous) expansion between bases,
    /// degree by degree.
    pub fn convert(
        &self,
        from: ClassicalBasis,
        to: ClassicalBasis,
        input: &Expansion,
    ) -> Result<Expansion, Error> {
        if from == to {
            return Ok(input.clone());
        }
        let mut out = Expansion::zero();
        for weight in input.weights() {
            let table = self.table(from, to, weight)?;
            let image = table.apply(&input.homogeneous_part(weight))?;
            out.add_scaled(&image, &Scalar::one());
        }
        Ok(out)
    }

    /// Multiply two expansions of the given basis.
    ///
    /// Power-sum and homogeneous products concatenate indices; the other
    /// bases round-trip through the homogeneous basis.
    pub fn multiply(
        &self,
        basis: ClassicalBasis,
        a: &Expansion,
        b: &Expansion,
    ) -> Result<Expansion, Error> {
        match basis {
            ClassicalBasis::PowerSum | ClassicalBasis::Homogeneous => Ok(merge_mul(a, b)),
            _ => {
                let ha = self.convert(basis, ClassicalBasis::Homogeneous, a)?;
                let hb = self.convert(basis, ClassicalBasis::Homogeneous, b)?;
                self.convert(ClassicalBasis::Homogeneous, basis, &merge_mul(&ha, &hb))
            }
        }
    }

    /// The image of a Schur expansion under the classical ω involution:
    /// `s_λ ↦ s_{λ'}`.
    pub fn schur_conjugate(&self, input: &Expansion) -> Expansion {
        input.map_support(Partition::conjugate)
    }
}

/// `Σ a_λ b_μ · [λ ∪ μ]` — the product rule of any basis whose vectors
/// multiply by concatenation of indices.
pub fn merge_mul(a: &Expansion, b: &Expansion) -> Expansion {
    let mut out = Expansion::zero();
    for (la, ca) in a.iter() {
        for (mu, cb) in b.iter() {
            out.add_term(la.merged(mu), &(ca * cb));
        }
    }
    out
}

fn power_rec(memo: &mut FxHashMap<u32, Expansion>, k: u32) -> Expansion {
    if let Some(found) = memo.get(&k) {
        return found.clone();
    }
    let mut out = Expansion::single(Partition::new(vec![k]), Scalar::int(i64::from(k)));
    for i in 1..k {
        let tail = power_rec(memo, k - i);
        let shifted = tail.map_support(|p| p.merged(&Partition::new(vec![i])));
        out.add_scaled(&shifted, &Scalar::int(-1));
    }
    memo.insert(k, out.clone());
    out
}

/// Partitions ν ⊆ λ with `λ/ν` a horizontal strip of the given size.
fn horizontal_strips(shape: &Partition, size: u32) -> Vec<Partition> {
    fn rec(shape: &[u32], row: usize, left: u32, prefix: &mut Vec<u32>, out: &mut Vec<Partition>) {
        if row == shape.len() {
            if left == 0 {
                out.push(Partition::from_unsorted(prefix.iter().copied()));
            }
            return;
        }
        let hi = shape[row];
        let lo = shape.get(row + 1).copied().unwrap_or(0);
        // Strip at most `hi - lo` cells from this row so the result stays
        // a partition and the strip stays horizontal.
        for keep in lo..=hi {
            let removed = hi - keep;
            if removed > left {
                continue;
            }
            prefix.push(keep);
            rec(shape, row + 1, left - removed, prefix, out);
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    rec(shape.parts(), 0, size, &mut Vec::new(), &mut out);
    out
}

fn kostka_rec(
    memo: &mut FxHashMap<(Partition, Partition), u64>,
    shape: &Partition,
    content: &Partition,
) -> u64 {
    if content.is_empty() {
        return u64::from(shape.is_empty());
    }
    if let Some(&found) = memo.get(&(shape.clone(), content.clone())) {
        return found;
    }
    // Peel the smallest content entry as a horizontal strip; Kostka
    // numbers do not depend on the order of the content.
    let parts = content.parts();
    let last = *parts.last().unwrap();
    let rest = Partition::new(parts[..parts.len() - 1].to_vec());
    let mut total = 0;
    for inner in horizontal_strips(shape, last) {
        total += kostka_rec(memo, &inner, &rest);
    }
    memo.insert((shape.clone(), content.clone()), total);
    total
}
