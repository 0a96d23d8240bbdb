//! Change of basis: triangularity of the J table, round trips between
//! every pair of families, and the classical-basis fixtures.

use expect_test::expect;
use macdonald::{
    c2, Basis, ClassicalBasis, Expansion, McdBasis, Partition, QtParams, Registry, Scalar,
};

fn p(parts: &[u32]) -> Partition {
    Partition::new(parts.to_vec())
}

fn q() -> Scalar {
    Scalar::q()
}

fn t() -> Scalar {
    Scalar::t()
}

fn one() -> Scalar {
    Scalar::one()
}

#[test]
fn j_to_schur_is_dominance_triangular_with_c2_diagonal() {
    let bj = Basis::j(QtParams::generic());
    for n in 1..=4 {
        let table = bj.transition_table(ClassicalBasis::Schur, n).unwrap();
        for (row, expansion) in table.rows() {
            assert_eq!(
                expansion.coeff(row),
                c2(row, &q(), &t()),
                "diagonal at {row}"
            );
            for (col, coeff) in expansion.iter() {
                assert!(
                    row.dominates(col),
                    "J{row} reaches s{col} with coefficient {coeff}"
                );
            }
        }
    }
}

#[test]
fn j_transition_table_weight_two() {
    let bj = Basis::j(QtParams::generic());
    let table = bj.transition_table(ClassicalBasis::Schur, 2).unwrap();
    expect![[r#"
        [1, 1]: (t^3 - t^2 - t + 1)*[1, 1]
        [2]: (-q*t + q + t^2 - t)*[1, 1] + (q*t^2 - q*t - t + 1)*[2]
    "#]]
    .assert_eq(&table.to_string());
}

#[test]
fn round_trips_between_all_families() {
    let registry = Registry::global();
    let bases: Vec<_> = McdBasis::ALL
        .iter()
        .map(|&kind| registry.basis(kind, QtParams::generic()))
        .collect();
    for from in &bases {
        for to in &bases {
            for parts in [&[2, 1][..], &[1, 1, 1]] {
                let original = from.from_parts(parts);
                let back = original.convert(to).unwrap().convert(from).unwrap();
                assert_eq!(
                    back, original,
                    "{} → {} → {} at {parts:?}",
                    from.kind(),
                    to.kind(),
                    from.kind()
                );
            }
        }
    }
}

#[test]
fn diagonal_coercions() {
    let bp = Basis::p(QtParams::generic());
    let bq = Basis::q(QtParams::generic());
    let bj = Basis::j(QtParams::generic());

    // P(J[2]) = (q·t² − q·t − t + 1)·P[2] = c2([2])·P[2].
    let in_p = bj.from_parts(&[2]).convert(&bp).unwrap();
    assert_eq!(in_p.coeff(&p(&[2])), c2(&p(&[2]), &q(), &t()));
    assert_eq!(in_p.coeffs().support_len(), 1);

    // Q(P[2]) = ((q³ − q² − q + 1)/(q·t² − q·t − t + 1))·Q[2].
    let in_q = bp.from_parts(&[2]).convert(&bq).unwrap();
    let expected = (&(q().pow(3) - q().pow(2)) - &(q() - one()))
        / (&(q() * t().pow(2) - q() * t()) - &(t() - one()));
    assert_eq!(in_q.coeff(&p(&[2])), expected);
}

#[test]
fn schur_into_p() {
    // P(s[2]) = ((q − t)/(q·t − 1))·P[1, 1] + P[2].
    let bp = Basis::p(QtParams::generic());
    let elt = bp.from_schur(&Expansion::unit(p(&[2]))).unwrap();
    assert_eq!(
        elt.coeff(&p(&[1, 1])),
        (q() - t()) / (q() * t() - one())
    );
    assert!(elt.coeff(&p(&[2])).is_one());
}

#[test]
fn schur_into_h() {
    // H(s[2]) = (q/(q·t − 1))·H[1, 1] + (1/(1 − q·t))·H[2], i.e. the
    // equivalently ((-q)/(-q*t+1))·McdH[1,1] + (1/(-q*t+1))·McdH[2].
    let bh = Basis::h(QtParams::generic());
    let elt = bh.from_schur(&Expansion::unit(p(&[2]))).unwrap();
    assert_eq!(elt.coeff(&p(&[1, 1])), q() / (q() * t() - one()));
    assert_eq!(elt.coeff(&p(&[2])), one() / (one() - q() * t()));
}

#[test]
fn h_in_schur_is_the_kostka_data() {
    // s(H[2]) = q·s[1,1] + s[2] and s(H[1,1]) = s[1,1] + t·s[2].
    let bh = Basis::h(QtParams::generic());
    let two = bh.from_parts(&[2]).to_schur().unwrap();
    assert_eq!(two.coeff(&p(&[1, 1])), q());
    assert!(two.coeff(&p(&[2])).is_one());
    let pair = bh.from_parts(&[1, 1]).to_schur().unwrap();
    assert!(pair.coeff(&p(&[1, 1])).is_one());
    assert_eq!(pair.coeff(&p(&[2])), t());
}

#[test]
fn ht_in_schur_weight_three() {
    // s(Ht[2,1]) = q·t·s[1,1,1] + (q + t)·s[2,1] + s[3].
    let bht = Basis::ht(QtParams::generic());
    let elt = bht.from_parts(&[2, 1]).to_schur().unwrap();
    assert_eq!(elt.coeff(&p(&[1, 1, 1])), q() * t());
    assert_eq!(elt.coeff(&p(&[2, 1])), q() + t());
    assert!(elt.coeff(&p(&[3])).is_one());
}

#[test]
fn j_in_schur_weight_two() {
    // s(J[2]) = (−q·t + t² + q − t)·s[1,1] + (q·t² − q·t − t + 1)·s[2].
    let bj = Basis::j(QtParams::generic());
    let elt = bj.from_parts(&[2]).to_schur().unwrap();
    assert_eq!(
        elt.coeff(&p(&[1, 1])),
        &(q() - t()) * &(one() - t())
    );
    assert_eq!(
        elt.coeff(&p(&[2])),
        &(one() - t()) * &(one() - q() * t())
    );
}

#[test]
fn j_in_modified_schur_is_the_kostka_data() {
    // S(J[2]) = q·S[1,1] + S[2]; S(J[1,1]) = S[1,1] + t·S[2].
    let bj = Basis::j(QtParams::generic());
    let bs = Basis::s(QtParams::generic());
    let two = bj.from_parts(&[2]).convert(&bs).unwrap();
    assert_eq!(two.coeff(&p(&[1, 1])), q());
    assert!(two.coeff(&p(&[2])).is_one());
    let pair = bj.from_parts(&[1, 1]).convert(&bs).unwrap();
    assert!(pair.coeff(&p(&[1, 1])).is_one());
    assert_eq!(pair.coeff(&p(&[2])), t());
}

#[test]
fn monomial_transition_weight_two() {
    // The transition matrix into monomials at weight 2 is = [[1, (q·t − q + t − 1)/(q·t − 1)], [0, 1]].
    let bp = Basis::p(QtParams::generic());
    let table = bp.transition_table(ClassicalBasis::Monomial, 2).unwrap();
    assert!(table.entry(&p(&[2]), &p(&[2])).is_one());
    assert_eq!(
        table.entry(&p(&[2]), &p(&[1, 1])),
        (&(q() * t() - q()) + &(t() - one())) / (q() * t() - one())
    );
    assert!(table.entry(&p(&[1, 1]), &p(&[2])).is_zero());
    assert!(table.entry(&p(&[1, 1]), &p(&[1, 1])).is_one());
}

#[test]
fn display_and_parse_round_trip() {
    let bp = Basis::p(QtParams::generic());
    let elt = bp.from_schur(&Expansion::unit(p(&[2]))).unwrap();
    let rendered = elt.to_string();
    assert_eq!(bp.parse(&rendered).unwrap(), elt);

    let bj = Basis::j(QtParams::generic());
    let elt = bj.from_parts(&[2, 1]).scale(&(q() - t()));
    assert_eq!(bj.parse(&elt.to_string()).unwrap(), elt);
}
