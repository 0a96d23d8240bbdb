//! The six Macdonald basis families and their construction rules.
//!
//! Each family is described by a capability record: how its
//! direct-to-Schur table is produced in one degree, and how the reverse
//! table is recovered (triangular sweep where the direct table is
//! dominance-triangular, dense elimination where it is not). P and Q are
//! not built from a rule of their own — they are diagonal rescalings of
//! J, which is why their records point at J with the rescaling factor.

use partitions::{partitions_of, Partition};
use qt::{Scalar, Var};
use symfunc::{ClassicalBasis, Expansion, Table, Triangularity};

use crate::creation;
use crate::error::Result;
use crate::pairing;
use crate::registry::Registry;

/// The basis tags of the Macdonald family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum McdBasis {
    P,
    Q,
    J,
    H,
    Ht,
    S,
}

impl McdBasis {
    pub const ALL: [McdBasis; 6] = [
        McdBasis::P,
        McdBasis::Q,
        McdBasis::J,
        McdBasis::H,
        McdBasis::Ht,
        McdBasis::S,
    ];

    /// The display prefix of basis elements (`McdP[2, 1]`, …).
    pub fn prefix(self) -> &'static str {
        match self {
            McdBasis::P => "McdP",
            McdBasis::Q => "McdQ",
            McdBasis::J => "McdJ",
            McdBasis::H => "McdH",
            McdBasis::Ht => "McdHt",
            McdBasis::S => "McdS",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            McdBasis::P => "P",
            McdBasis::Q => "Q",
            McdBasis::J => "J",
            McdBasis::H => "H",
            McdBasis::Ht => "Ht",
            McdBasis::S => "S",
        }
    }
}

impl std::fmt::Display for McdBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `c1(λ) = Π (1 − q^{arm+1} t^{leg})` over the cells of λ — the pairing
/// `⟨J_λ, P_λ⟩`, and the factor relating J to Q.
pub fn c1(part: &Partition, q: &Scalar, t: &Scalar) -> Scalar {
    cell_product(part, q, t, 1, 0)
}

/// `c2(λ) = Π (1 − q^{arm} t^{leg+1})` over the cells of λ — the pairing
/// `⟨J_λ, Q_λ⟩`, and the factor relating J to P.
pub fn c2(part: &Partition, q: &Scalar, t: &Scalar) -> Scalar {
    cell_product(part, q, t, 0, 1)
}

fn cell_product(part: &Partition, q: &Scalar, t: &Scalar, arm_shift: u32, leg_shift: u32) -> Scalar {
    let arms = part.arm_lengths();
    let legs = part.leg_lengths();
    let mut res = Scalar::one();
    for (arm, leg) in arms.into_iter().zip(legs) {
        let factor = &Scalar::one()
            - &(&q.pow(i64::from(arm + arm_shift)) * &t.pow(i64::from(leg + leg_shift)));
        res = &res * &factor;
    }
    res
}

/// How a family's reverse (Schur-to-family) table is obtained from the
/// direct one.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Inversion {
    /// The direct table is dominance-triangular with nonzero diagonal.
    Triangular(Triangularity),
    /// The direct table is dense under dominance; eliminate over ℚ(q,t).
    Dense,
}

/// The construction capability of one family.
pub(crate) enum Construction {
    /// An explicit rule for the direct-to-Schur table, plus the way to
    /// invert it.
    Direct {
        to_schur: fn(&Registry, u32) -> Result<Table>,
        inversion: Inversion,
    },
    /// `base_λ = factor(λ) · self_λ`: a diagonal module map, no inversion
    /// involved. `factor` is evaluated over symbolic `(q, t)`.
    Diagonal {
        base: McdBasis,
        factor: fn(&Partition) -> Scalar,
    },
}

pub(crate) fn construction(basis: McdBasis) -> Construction {
    match basis {
        McdBasis::P => Construction::Diagonal {
            base: McdBasis::J,
            factor: |part| c2(part, &Scalar::q(), &Scalar::t()),
        },
        McdBasis::Q => Construction::Diagonal {
            base: McdBasis::J,
            factor: |part| c1(part, &Scalar::q(), &Scalar::t()),
        },
        McdBasis::J => Construction::Direct {
            to_schur: j_to_schur,
            inversion: Inversion::Triangular(Triangularity::Lower),
        },
        McdBasis::H => Construction::Direct {
            to_schur: h_to_schur,
            inversion: Inversion::Dense,
        },
        McdBasis::Ht => Construction::Direct {
            to_schur: ht_to_schur,
            inversion: Inversion::Dense,
        },
        McdBasis::S => Construction::Direct {
            to_schur: s_to_schur,
            inversion: Inversion::Dense,
        },
    }
}

/// `J_μ` in Schur: run the creation operators for the parts of μ,
/// smallest part first, over the S-unit; conjugate the resulting indices
/// (the ω relabeling in Schur); swap `q ↔ t` in the coefficients.
fn j_to_schur(reg: &Registry, degree: u32) -> Result<Table> {
    let classical = reg.classical();
    let q = Scalar::q();
    let t = Scalar::t();
    let mut table = Table::new(degree);
    for part in partitions_of(degree) {
        let mut acc = Expansion::unit(Partition::empty());
        for &k in part.parts().iter().rev() {
            acc = creation::apply(classical, &acc, k, &q, &t)?;
        }
        let conjugated = classical.schur_conjugate(&acc);
        let row = conjugated.map_coeffs(Scalar::swap_qt);
        table.insert_row(part, row)?;
    }
    Ok(table)
}

/// `S_μ = s_μ[X(1−t)]`: scale the power-sum coordinate `p_λ` of `s_μ` by
/// `Π_{k ∈ λ} (1 − t^k)` and return to Schur.
fn s_to_schur(reg: &Registry, degree: u32) -> Result<Table> {
    let classical = reg.classical();
    let s_to_p = classical.table(ClassicalBasis::Schur, ClassicalBasis::PowerSum, degree)?;
    let p_to_s = classical.table(ClassicalBasis::PowerSum, ClassicalBasis::Schur, degree)?;
    let t = Scalar::t();
    let scaled = s_to_p.scale_cols(|lam| {
        lam.parts()
            .iter()
            .map(|&k| &Scalar::one() - &t.pow(i64::from(k)))
            .fold(Scalar::one(), |acc, f| &acc * &f)
    });
    Ok(scaled.compose(&p_to_s)?)
}

/// `Ht_μ` in Schur: pair `J_μ` against every Schur vector under the
/// `t`-deformed Hall pairing, then apply `t ↦ 1/t` and scale by
/// `t^{n(μ)}`.
fn ht_to_schur(reg: &Registry, degree: u32) -> Result<Table> {
    let classical = reg.classical();
    let j_to_s = reg.to_schur_generic(McdBasis::J, degree)?;
    let s_to_p = classical.table(ClassicalBasis::Schur, ClassicalBasis::PowerSum, degree)?;
    let parts = partitions_of(degree);
    let mut table = Table::new(degree);
    for part in &parts {
        let j_in_p = s_to_p.apply(j_to_s.row(part).expect("table is complete"))?;
        let mut row = Expansion::zero();
        for schur in &parts {
            let s_in_p = s_to_p
                .row(schur)
                .expect("table is complete");
            let coeff = pairing::pair_power(&j_in_p, s_in_p, pairing::hall_littlewood_diagonal)?;
            row.add_term(schur.clone(), &coeff);
        }
        table.insert_row(part.clone(), flip_t(&row, part))?;
    }
    Ok(table)
}

/// `H_μ` in Schur: the Ht table with `t ↦ 1/t` and the `t^{n(μ)}` scale —
/// the coefficients become the qt-Kostka polynomials.
fn h_to_schur(reg: &Registry, degree: u32) -> Result<Table> {
    let ht = reg.to_schur_generic(McdBasis::Ht, degree)?;
    let mut table = Table::new(degree);
    for (part, row) in ht.rows() {
        table.insert_row(part.clone(), flip_t(row, part))?;
    }
    Ok(table)
}

/// Apply `t ↦ 1/t` to every coefficient and scale by `t^{n(μ)}`.
fn flip_t(row: &Expansion, part: &Partition) -> Expansion {
    let t_inv = Scalar::one() / Scalar::t();
    let scale = Scalar::t().pow(i64::from(part.weighted_size()));
    row.map_coeffs(|c| {
        let flipped = c
            .substitute(Var::T, &t_inv)
            .expect("t ↦ 1/t cannot vanish on ℚ(q,t)");
        &flipped * &scale
    })
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
    fn c1_c2_weight_two() {
        let one = Scalar::one();
        // c1([1,1]) = q·t − q − t + 1, c2([1,1]) = t³ − t² − t + 1.
        assert_eq!(
            c1(&p(&[1, 1]), &q(), &t()),
            &(&one - &q()) * &(&one - &(&q() * &t()))
        );
        assert_eq!(
            c2(&p(&[1, 1]), &q(), &t()),
            &(&one - &t()) * &(&one - &t().pow(2))
        );
        assert_eq!(
            c2(&p(&[1, 1]), &q(), &t()).to_string(),
            "t^3 - t^2 - t + 1"
        );
    }

    #[test]
    fn c1_c2_hook() {
        // c1([2,1]) = −q⁴t + 2q³t − q²t + q² − 2q + 1,
        //       c2([2,1]) = −qt⁴ + 2qt³ − qt² + t² − 2t + 1.
        assert_eq!(
            c1(&p(&[2, 1]), &q(), &t()).to_string(),
            "-q^4*t + 2*q^3*t - q^2*t + q^2 - 2*q + 1"
        );
        assert_eq!(
            c2(&p(&[2, 1]), &q(), &t()).to_string(),
            "-q*t^4 + 2*q*t^3 - q*t^2 + t^2 - 2*t + 1"
        );
    }
}
