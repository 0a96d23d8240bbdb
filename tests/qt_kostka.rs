//! The qt-Kostka polynomials `K_{λμ}(q, t)`.

use macdonald::{partitions_of, qt_kostka, Partition, Scalar, Var};
use rstest::rstest;

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
fn weight_two() {
    assert_eq!(qt_kostka(&p(&[1, 1]), &p(&[2])).unwrap(), q());
    assert_eq!(qt_kostka(&p(&[2]), &p(&[1, 1])).unwrap(), t());
    assert!(qt_kostka(&p(&[2]), &p(&[2])).unwrap().is_one());
    assert!(qt_kostka(&p(&[1, 1]), &p(&[1, 1])).unwrap().is_one());
}

#[rstest]
#[case(&[2, 1, 1], &[1, 1, 1, 1], "t^3 + t^2 + t")]
#[case(&[1, 1, 1, 1], &[2, 1, 1], "q")]
#[case(&[1, 1, 1, 1], &[3, 1], "q^3")]
#[case(&[1, 1, 1, 1], &[1, 1, 1, 1], "1")]
#[case(&[2, 1, 1], &[2, 2], "q^2*t + q*t + q")]
#[case(&[2, 2], &[2, 2], "q^2*t^2 + 1")]
#[case(&[4], &[3, 1], "t")]
#[case(&[2, 2], &[3, 1], "q^2*t + q")]
#[case(&[3, 1], &[2, 1, 1], "q*t^3 + t^2 + t")]
#[case(&[2, 1, 1], &[2, 1, 1], "q*t^2 + q*t + 1")]
fn weight_four_values(#[case] lam: &[u32], #[case] mu: &[u32], #[case] expected: &str) {
    let value = qt_kostka(&p(lam), &p(mu)).unwrap();
    assert_eq!(value.to_string(), expected);
}

#[test]
fn weight_mismatch_is_the_defined_zero() {
    assert!(qt_kostka(&p(&[2, 1]), &p(&[1, 1, 1, 1])).unwrap().is_zero());
    assert!(qt_kostka(&p(&[1, 1, 1, 1]), &p(&[2, 1])).unwrap().is_zero());
}

#[test]
fn entries_are_polynomial() {
    for n in 1..=4 {
        for lam in partitions_of(n) {
            for mu in partitions_of(n) {
                let value = qt_kostka(&lam, &mu).unwrap();
                assert!(
                    value.denominator().is_one(),
                    "K({lam}, {mu}) = {value} is not polynomial"
                );
            }
        }
    }
}

#[test]
fn diagonal_has_nonzero_constant_term() {
    let zero = Scalar::zero();
    for n in 1..=4 {
        for lam in partitions_of(n) {
            let value = qt_kostka(&lam, &lam).unwrap();
            let constant = value
                .substitute(Var::Q, &zero)
                .and_then(|v| v.substitute(Var::T, &zero))
                .unwrap();
            assert!(!constant.is_zero(), "K({lam}, {lam}) = {value}");
        }
    }
}
