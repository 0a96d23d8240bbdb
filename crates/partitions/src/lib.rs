//! Integer partitions and the combinatorial quantities the basis engine
//! reads off them: dominance order, conjugates, arm/leg lengths, weighted
//! size and (deformed) centralizer sizes.
//!
//! A partition indexes a basis vector in each graded piece of the algebra,
//! so the type is immutable and cheap to clone, with content-based
//! equality and hashing.

use std::cmp::Ordering;

use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use qt::Scalar;

/// A non-increasing sequence of positive integers.
///
/// The derived `Ord` is lexicographic on the part list. It is a total
/// refinement of dominance (λ ⊳ μ implies λ > μ lexicographically), which
/// is what the triangular sweep uses as its tie-break; it is *not*
/// dominance itself — use [`Partition::dominance_cmp`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Partition {
    parts: Vec<u32>,
}

impl Partition {
    /// Panics unless `parts` is non-increasing and strictly positive.
    pub fn new(parts: Vec<u32>) -> Self {
        assert!(
            parts.windows(2).all(|w| w[0] >= w[1]) && parts.last().map_or(true, |&p| p > 0),
            "not a partition: {parts:?}"
        );
        Self { parts }
    }

    /// Sorts the parts and drops zeros.
    pub fn from_unsorted(parts: impl IntoIterator<Item = u32>) -> Self {
        let mut parts: Vec<u32> = parts.into_iter().filter(|&p| p > 0).collect();
        parts.sort_unstable_by(|a, b| b.cmp(a));
        Self { parts }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The sum of the parts; the degree of the graded piece this
    /// partition indexes.
    pub fn weight(&self) -> u32 {
        self.parts.iter().sum()
    }

    pub fn conjugate(&self) -> Self {
        let rows = self.parts.first().copied().unwrap_or(0) as usize;
        let parts = (0..rows)
            .map(|j| self.parts.iter().take_while(|&&p| p > j as u32).count() as u32)
            .collect();
        Self { parts }
    }

    /// Dominance comparison. `None` for incomparable partitions and for
    /// partitions of different weight (gradings never mix).
    pub fn dominance_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.weight() != other.weight() {
            return None;
        }
        let (mut ge, mut le) = (true, true);
        let (mut a, mut b) = (0u64, 0u64);
        for i in 0..self.parts.len().max(other.parts.len()) {
            a += u64::from(self.parts.get(i).copied().unwrap_or(0));
            b += u64::from(other.parts.get(i).copied().unwrap_or(0));
            ge &= a >= b;
            le &= a <= b;
        }
        match (ge, le) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => None,
        }
    }

    pub fn dominates(&self, other: &Self) -> bool {
        matches!(
            self.dominance_cmp(other),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }

    /// Arm lengths of all cells, row by row: for the cell in row `i`,
    /// column `j`, the number of cells strictly to its right.
    pub fn arm_lengths(&self) -> Vec<u32> {
        self.parts
            .iter()
            .flat_map(|&p| (0..p).map(move |j| p - j - 1))
            .collect()
    }

    /// Leg lengths of all cells, row by row: the number of cells strictly
    /// below each cell.
    pub fn leg_lengths(&self) -> Vec<u32> {
        let conj = self.conjugate();
        self.parts
            .iter()
            .enumerate()
            .flat_map(|(i, &p)| {
                let conj = &conj;
                (0..p as usize).map(move |j| conj.parts[j] - i as u32 - 1)
            })
            .collect()
    }

    /// The weighted size `n(λ) = Σ (i-1)·λᵢ`.
    pub fn weighted_size(&self) -> u32 {
        self.parts
            .iter()
            .enumerate()
            .map(|(i, &p)| i as u32 * p)
            .sum()
    }

    /// The centralizer size `z_λ = Π mᵢ! · i^{mᵢ}`, where `mᵢ` is the
    /// multiplicity of `i` among the parts.
    pub fn centralizer_size(&self) -> BigRational {
        let mut z = BigInt::one();
        for (part, group) in &self.parts.iter().chunk_by(|&&p| p) {
            let m = group.count();
            for k in 1..=m {
                z *= BigInt::from(k);
            }
            z *= BigInt::from(part).pow(m as u32);
        }
        BigRational::from_integer(z)
    }

    /// The `(q, t)`-deformed centralizer size
    /// `z_λ(q, t) = z_λ · Π (1 - q^{λᵢ})/(1 - t^{λᵢ})` — the diagonal of
    /// the deformed Hall pairing on power sums. `None` when a factor
    /// `1 - t^{λᵢ}` vanishes under the given specialization.
    pub fn centralizer_qt(&self, q: &Scalar, t: &Scalar) -> Option<Scalar> {
        let mut z = Scalar::from_rational(self.centralizer_size());
        for &p in &self.parts {
            let num = &Scalar::one() - &q.pow(i64::from(p));
            let den = &Scalar::one() - &t.pow(i64::from(p));
            z = (&z * &num).checked_div(&den)?;
        }
        Some(z)
    }

    /// Multiset union of the parts; the index of `p_λ · p_μ` (and of
    /// `h_λ · h_μ`).
    pub fn merged(&self, other: &Self) -> Self {
        Self::from_unsorted(self.parts.iter().chain(other.parts.iter()).copied())
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}]", self.parts.iter().join(", "))
    }
}

/// All partitions of `n` in descending lexicographic order, `[n]` first
/// and `[1, 1, …, 1]` last. This order refines dominance downward, so a
/// left-to-right sweep over it never visits a partition before one it is
/// dominated by.
pub fn partitions_of(n: u32) -> Vec<Partition> {
    fn rec(n: u32, max: u32, prefix: &mut Vec<u32>, out: &mut Vec<Partition>) {
        if n == 0 {
            out.push(Partition::new(prefix.clone()));
            return;
        }
        for k in (1..=n.min(max)).rev() {
            prefix.push(k);
            rec(n - k, k, prefix, out);
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    rec(n, n, &mut Vec::new(), &mut out);
    out
}
