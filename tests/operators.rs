//! Products, omega, nabla and the creation operator.

use macdonald::{partitions_of, Basis, Error, Partition, QtParams, Scalar};

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
fn p_basis_product() {
    // P[1]² = ((q·t + q − t − 1)/(q·t − 1))·P[1,1] + P[2].
    let bp = Basis::p(QtParams::generic());
    let a = bp.from_parts(&[1]);
    let square = a.multiply(&a).unwrap();
    assert_eq!(
        square.coeff(&p(&[1, 1])),
        (&(q() * t() + q()) - &(t() + one())) / (q() * t() - one())
    );
    assert!(square.coeff(&p(&[2])).is_one());
}

#[test]
fn j_basis_product() {
    // J[1]² = ((q − 1)/(q·t − 1))·J[1,1] + ((t − 1)/(q·t − 1))·J[2].
    let bj = Basis::j(QtParams::generic());
    let a = bj.from_parts(&[1]);
    let square = a.multiply(&a).unwrap();
    assert_eq!(
        square.coeff(&p(&[1, 1])),
        (q() - one()) / (q() * t() - one())
    );
    assert_eq!(square.coeff(&p(&[2])), (t() - one()) / (q() * t() - one()));
}

#[test]
fn ht_basis_product() {
    // Ht[1]² = ((1 − q)/(t − q))·Ht[1,1] + ((t − 1)/(t − q))·Ht[2].
    let bht = Basis::ht(QtParams::generic());
    let a = bht.from_parts(&[1]);
    let square = a.multiply(&a).unwrap();
    assert_eq!(square.coeff(&p(&[1, 1])), (one() - q()) / (t() - q()));
    assert_eq!(square.coeff(&p(&[2])), (t() - one()) / (t() - q()));
}

#[test]
fn h_basis_product() {
    // H[1]² = ((q − 1)/(q·t − 1))·H[1,1] + ((t − 1)/(q·t − 1))·H[2].
    let bh = Basis::h(QtParams::generic());
    let a = bh.from_parts(&[1]);
    let square = a.multiply(&a).unwrap();
    assert_eq!(square.coeff(&p(&[1, 1])), (q() - one()) / (q() * t() - one()));
    assert_eq!(square.coeff(&p(&[2])), (t() - one()) / (q() * t() - one()));
}

#[test]
fn s_basis_product_has_schur_structure_constants() {
    // S[2]² = S[2,2] + S[3,1] + S[4].
    let bs = Basis::s(QtParams::generic());
    let a = bs.from_parts(&[2]);
    let square = a.multiply(&a).unwrap();
    assert!(square.coeff(&p(&[2, 2])).is_one());
    assert!(square.coeff(&p(&[3, 1])).is_one());
    assert!(square.coeff(&p(&[4])).is_one());
    assert_eq!(square.coeffs().support_len(), 3);
}

#[test]
fn product_distributes_over_sums() {
    let bp = Basis::p(QtParams::generic());
    let a = bp.from_parts(&[2]);
    let b = bp.from_parts(&[1, 1]);
    let c = bp.from_parts(&[1]);
    let lhs = (&a + &b).multiply(&c).unwrap();
    let rhs = &a.multiply(&c).unwrap() + &b.multiply(&c).unwrap();
    assert_eq!(lhs, rhs);
}

#[test]
fn nabla_eigenvalues_on_ht() {
    // ∇ of the sum of the weight-3 Ht vectors:
    // t³·Ht[1,1,1] + q·t·Ht[2,1] + q³·Ht[3].
    let bht = Basis::ht(QtParams::generic());
    let sum = partitions_of(3)
        .into_iter()
        .fold(bht.zero(), |acc, part| &acc + &bht.element(part));
    let image = sum.nabla().unwrap();
    assert_eq!(image.coeff(&p(&[1, 1, 1])), t().pow(3));
    assert_eq!(image.coeff(&p(&[2, 1])), q() * t());
    assert_eq!(image.coeff(&p(&[3])), q().pow(3));
}

#[test]
fn nabla_on_the_p_basis() {
    // P[1,1].nabla() = ((q²t + q·t² − 2t)/(q·t − 1))·P[1,1] + P[2].
    let bp = Basis::p(QtParams::generic());
    let image = bp.from_parts(&[1, 1]).nabla().unwrap();
    let expected = (&(q().pow(2) * t() + q() * t().pow(2)) - &(t() + t()))
        / (q() * t() - one());
    assert_eq!(image.coeff(&p(&[1, 1])), expected);
    assert!(image.coeff(&p(&[2])).is_one());
}

#[test]
fn omega_scales_power_sums() {
    // J[1] = (1 − t)·p₁, so ω_qt(J[1]) = ((1 − q)/(1 − t))·J[1].
    let bj = Basis::j(QtParams::generic());
    let image = bj.from_parts(&[1]).omega_qt().unwrap();
    assert_eq!(
        image.coeff(&p(&[1])),
        (one() - q()) / (one() - t())
    );
    assert_eq!(image.coeffs().support_len(), 1);
}

#[test]
fn omega_on_the_h_basis() {
    // H[1,1].omega_qt() =
    // ((2q² − 2q·t − 2q + 2t)/(t³ − t² − t + 1))·H[1,1] + ((q − 1)/(t − 1))·H[2].
    let bh = Basis::h(QtParams::generic());
    let image = bh.from_parts(&[1, 1]).omega_qt().unwrap();
    let two = Scalar::int(2);
    let num = &(&(&two * &q().pow(2)) - &(&two * &(q() * t()))) + &(&(&two * &t()) - &(&two * &q()));
    let den = &(t().pow(3) - t().pow(2)) - &(t() - one());
    assert_eq!(image.coeff(&p(&[1, 1])), &num / &den);
    assert_eq!(image.coeff(&p(&[2])), (q() - one()) / (t() - one()));
}

#[test]
fn creation_seeds_the_s_basis() {
    let bs = Basis::s(QtParams::generic());
    // creation(1) on the unit: (1 − q)·S[1].
    let step = bs.one().creation(1).unwrap();
    assert_eq!(step.coeff(&p(&[1])), one() - q());
    // creation(2) on the unit:
    // (q²t − q·t − q + 1)·S[1,1] + (q² − q·t − q + t)·S[2].
    let step = bs.one().creation(2).unwrap();
    assert_eq!(
        step.coeff(&p(&[1, 1])),
        &(one() - q()) * &(one() - q() * t())
    );
    assert_eq!(step.coeff(&p(&[2])), &(q() - t()) * &(q() - one()));
}

#[test]
fn creation_is_only_defined_on_s() {
    let bp = Basis::p(QtParams::generic());
    assert!(matches!(
        bp.one().creation(1).unwrap_err(),
        Error::UnsupportedOperation { .. }
    ));
}

#[test]
fn creation_rejects_short_columns() {
    let bs = Basis::s(QtParams::generic());
    let err = bs.from_parts(&[1, 1]).creation(1).unwrap_err();
    assert!(matches!(err, Error::CreationTooShort { .. }));
}

#[test]
fn products_across_parameters_are_rejected() {
    let generic = Basis::p(QtParams::generic());
    let fixed = Basis::p(QtParams::with_q(Scalar::zero()).unwrap());
    assert!(matches!(
        generic.from_parts(&[1]).multiply(&fixed.from_parts(&[1])),
        Err(Error::ParameterMismatch)
    ));
}
