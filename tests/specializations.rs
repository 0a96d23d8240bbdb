//! Fixed `q`/`t` values: the Hall–Littlewood limit at `q = 0`, a rational
//! specialization, and the failure modes of invalid or degenerate
//! parameter choices.

use macdonald::{Basis, Error, Expansion, Partition, QtParams, Scalar};

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

/// At `q = 0` the P family is the Hall–Littlewood P family; its products
/// carry the classical Hall–Littlewood structure constants.
#[test]
fn hall_littlewood_products_at_q_zero() {
    let bp = Basis::p(QtParams::with_q(Scalar::zero()).unwrap());

    // P[1]² = (t + 1)·P[1,1] + P[2].
    let a = bp.from_parts(&[1]);
    let square = a.multiply(&a).unwrap();
    assert_eq!(square.coeff(&p(&[1, 1])), t() + one());
    assert!(square.coeff(&p(&[2])).is_one());

    // P[2]² = (t + 1)·P[2,2] + (1 − t)·P[3,1] + P[4].
    let b = bp.from_parts(&[2]);
    let square = b.multiply(&b).unwrap();
    assert_eq!(square.coeff(&p(&[2, 2])), t() + one());
    assert_eq!(square.coeff(&p(&[3, 1])), one() - t());
    assert!(square.coeff(&p(&[4])).is_one());
    assert!(square.coeff(&p(&[2, 1, 1])).is_zero());
}

/// The specialized structure constants are exactly the generic ones with
/// the value substituted, partition by partition.
#[test]
fn specialization_agrees_with_generic_substitution() {
    let generic = Basis::p(QtParams::generic());
    let fixed = Basis::p(QtParams::with_q(Scalar::zero()).unwrap());
    for parts in [&[1][..], &[2], &[2, 1]] {
        let g = generic.from_parts(parts);
        let f = fixed.from_parts(parts);
        let g_sq = g.multiply(&g).unwrap();
        let f_sq = f.multiply(&f).unwrap();
        for (part, coeff) in f_sq.coeffs().iter() {
            let substituted = g_sq
                .coeff(part)
                .substitute(macdonald::Var::Q, &Scalar::zero())
                .unwrap();
            assert_eq!(*coeff, substituted, "at {part}");
        }
    }
}

#[test]
fn rational_specialization_of_t() {
    // With t = 2: J(s[2,1]) =
    // ((−q + 2)/(28q − 7))·J[1,1,1] + (1/(−4q + 1))·J[2,1].
    let bj = Basis::j(QtParams::with_t(Scalar::int(2)).unwrap());
    let elt = bj.from_schur(&Expansion::unit(p(&[2, 1]))).unwrap();
    let expected_bottom = (Scalar::int(2) - q())
        / (&(Scalar::int(28) * q()) - &Scalar::int(7));
    assert_eq!(elt.coeff(&p(&[1, 1, 1])), expected_bottom);
    let expected_mid = one() / (&one() - &(Scalar::int(4) * q()));
    assert_eq!(elt.coeff(&p(&[2, 1])), expected_mid);
    assert!(elt.coeff(&p(&[3])).is_zero());
}

#[test]
fn non_constant_specializations_are_rejected() {
    let err = QtParams::with_q(Scalar::t()).unwrap_err();
    assert!(matches!(err, Error::InvalidSpecialization { .. }));
    let err = QtParams::new(None, Some(q() + one())).unwrap_err();
    assert!(matches!(err, Error::InvalidSpecialization { .. }));
}

#[test]
fn degenerate_specializations_are_reported() {
    // At q = t = 1 the c2 scaling collapses, so Schur cannot be
    // re-expressed in P.
    let params = QtParams::new(Some(Scalar::one()), Some(Scalar::one())).unwrap();
    let bp = Basis::p(params);
    let err = bp.from_schur(&Expansion::unit(p(&[2]))).unwrap_err();
    assert!(matches!(err, Error::DegenerateSpecialization { .. }));
}

#[test]
fn duality_survives_specialization() {
    let params = QtParams::with_q(Scalar::int(2)).unwrap();
    let bp = Basis::p(params.clone());
    let bq = Basis::q(params);
    for parts in [&[2][..], &[1, 1]] {
        let pairing = bp
            .from_parts(parts)
            .scalar_qt(&bq.from_parts(parts))
            .unwrap();
        assert!(pairing.is_one(), "at {parts:?}: {pairing}");
    }
    assert!(bp
        .from_parts(&[2])
        .scalar_qt(&bq.from_parts(&[1, 1]))
        .unwrap()
        .is_zero());
}
