//! Basis instances and elements.
//!
//! A [`Basis`] is one Macdonald family under fixed `(q, t)` parameters,
//! interned by the registry. An [`Element`] is a sparse partition-indexed
//! coefficient table attached to its basis. All arithmetic is structural:
//! products are computed by expanding into Schur, multiplying there and
//! converting back; the P↔J, Q↔J and P↔Q coercions are diagonal and never
//! touch a table.

use std::sync::{Arc, Weak};

use itertools::Itertools;
use partitions::Partition;
use qt::Scalar;
use symfunc::{ClassicalBasis, Expansion};

use crate::error::{Error, Result};
use crate::family::{c1, c2, McdBasis};
use crate::pairing;
use crate::params::QtParams;
use crate::registry::{Direction, Registry};
use crate::{creation, parse};

/// One basis family under fixed parameters. Instances come from
/// [`Registry::basis`] (or the [`Basis::p`]-style shorthands on the
/// global registry) and are shared: equal tag and equal parameters mean
/// the same interned object.
pub struct Basis {
    kind: McdBasis,
    params: QtParams,
    registry: Arc<Registry>,
    // Handle to the interning Arc, so `&self` methods can hand out owned
    // references to this very instance.
    self_ref: Weak<Basis>,
}

impl PartialEq for Basis {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.params == other.params
    }
}

impl Eq for Basis {}

impl Basis {
    pub(crate) fn new(
        kind: McdBasis,
        params: QtParams,
        registry: Arc<Registry>,
        self_ref: Weak<Basis>,
    ) -> Self {
        Self {
            kind,
            params,
            registry,
            self_ref,
        }
    }

    /// The interned `Arc` this basis lives in.
    fn handle(&self) -> Arc<Basis> {
        self.self_ref.upgrade().expect("basis is interned for the process lifetime")
    }

    pub fn p(params: QtParams) -> Arc<Basis> {
        Registry::global().basis(McdBasis::P, params)
    }

    pub fn q(params: QtParams) -> Arc<Basis> {
        Registry::global().basis(McdBasis::Q, params)
    }

    pub fn j(params: QtParams) -> Arc<Basis> {
        Registry::global().basis(McdBasis::J, params)
    }

    pub fn h(params: QtParams) -> Arc<Basis> {
        Registry::global().basis(McdBasis::H, params)
    }

    pub fn ht(params: QtParams) -> Arc<Basis> {
        Registry::global().basis(McdBasis::Ht, params)
    }

    pub fn s(params: QtParams) -> Arc<Basis> {
        Registry::global().basis(McdBasis::S, params)
    }

    pub fn kind(&self) -> McdBasis {
        self.kind
    }

    pub fn params(&self) -> &QtParams {
        &self.params
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The basis vector indexed by a partition.
    pub fn element(&self, part: Partition) -> Element {
        Element {
            basis: self.handle(),
            coeffs: Expansion::unit(part),
        }
    }

    pub fn from_parts(&self, parts: &[u32]) -> Element {
        self.element(Partition::new(parts.to_vec()))
    }

    pub fn zero(&self) -> Element {
        Element {
            basis: self.handle(),
            coeffs: Expansion::zero(),
        }
    }

    pub fn one(&self) -> Element {
        self.element(Partition::empty())
    }

    /// Re-express a Schur expansion in this basis.
    pub fn from_schur(&self, schur: &Expansion) -> Result<Element> {
        let mut coeffs = Expansion::zero();
        for weight in schur.weights() {
            let table =
                self.registry
                    .table_at(self.kind, Direction::FromSchur, &self.params, weight)?;
            let image = table.apply(&schur.homogeneous_part(weight))?;
            coeffs.add_scaled(&image, &Scalar::one());
        }
        Ok(Element {
            basis: self.handle(),
            coeffs,
        })
    }

    /// Re-express a classical-basis expansion in this basis.
    pub fn from_classical(&self, classical: ClassicalBasis, input: &Expansion) -> Result<Element> {
        let schur = self
            .registry
            .classical()
            .convert(classical, ClassicalBasis::Schur, input)?;
        self.from_schur(&schur)
    }

    /// The transition table from this basis into a classical basis at one
    /// degree: row λ is the expansion of the λ-th basis vector.
    pub fn transition_table(&self, to: ClassicalBasis, degree: u32) -> Result<symfunc::Table> {
        let to_schur = self
            .registry
            .table_at(self.kind, Direction::ToSchur, &self.params, degree)?;
        let classical = self
            .registry
            .classical()
            .table(ClassicalBasis::Schur, to, degree)?;
        Ok(to_schur.compose(&classical)?)
    }

    /// Parse an element of this basis from its display form, e.g.
    /// `"McdP[2, 1] + (q*t - 1)*McdP[1, 1, 1]"`.
    pub fn parse(&self, input: &str) -> Result<Element> {
        let (kind, coeffs) = parse::element(input)?;
        if let Some(found) = kind {
            if found != self.kind {
                return Err(Error::Parse(format!(
                    "expression is in the {found} basis, not {}",
                    self.kind
                )));
            }
        }
        Ok(Element {
            basis: self.handle(),
            coeffs,
        })
    }
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Macdonald polynomials in the {} basis{}",
            self.kind, self.params
        )
    }
}

/// An element of one Macdonald basis: a sparse linear combination of
/// basis vectors, possibly inhomogeneous.
#[derive(Clone)]
pub struct Element {
    basis: Arc<Basis>,
    coeffs: Expansion,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind())
            .field("coeffs", &self.coeffs)
            .finish()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.basis == other.basis && self.coeffs == other.coeffs
    }
}

impl Eq for Element {}

impl Element {
    pub fn basis(&self) -> &Arc<Basis> {
        &self.basis
    }

    pub fn kind(&self) -> McdBasis {
        self.basis.kind
    }

    pub fn coeffs(&self) -> &Expansion {
        &self.coeffs
    }

    pub fn coeff(&self, part: &Partition) -> Scalar {
        self.coeffs.coeff(part)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_zero()
    }

    pub fn scale(&self, scalar: &Scalar) -> Element {
        Element {
            basis: self.basis.clone(),
            coeffs: self.coeffs.scale(scalar),
        }
    }

    /// The Schur expansion of this element.
    pub fn to_schur(&self) -> Result<Expansion> {
        let registry = self.basis.registry();
        let mut out = Expansion::zero();
        for weight in self.coeffs.weights() {
            let table = registry.table_at(
                self.kind(),
                Direction::ToSchur,
                &self.basis.params,
                weight,
            )?;
            out.add_scaled(&table.apply(&self.coeffs.homogeneous_part(weight))?, &Scalar::one());
        }
        Ok(out)
    }

    /// The expansion of this element in a classical basis.
    pub fn to_classical(&self, classical: ClassicalBasis) -> Result<Expansion> {
        let schur = self.to_schur()?;
        Ok(self
            .basis
            .registry()
            .classical()
            .convert(ClassicalBasis::Schur, classical, &schur)?)
    }

    /// Convert into another Macdonald basis over the same parameters.
    ///
    /// The P↔J, Q↔J and P↔Q pairs are diagonal module maps; everything
    /// else is routed through Schur.
    pub fn convert(&self, target: &Arc<Basis>) -> Result<Element> {
        if self.basis.params != target.params {
            return Err(Error::ParameterMismatch);
        }
        if self.basis == *target {
            return Ok(self.clone());
        }
        if let Some(element) = self.convert_diagonal(target)? {
            return Ok(element);
        }
        target.from_schur(&self.to_schur()?)
    }

    /// The diagonal coercions. `J_λ = c2(λ)·P_λ = c1(λ)·Q_λ`, hence
    /// `P_λ = (c1/c2)(λ)·Q_λ`.
    fn convert_diagonal(&self, target: &Arc<Basis>) -> Result<Option<Element>> {
        use McdBasis::*;
        let params = &self.basis.params;
        let q = params.q();
        let t = params.t();
        let factor: Box<dyn Fn(&Partition) -> Result<Scalar> + '_> =
            match (self.kind(), target.kind) {
                (J, P) => Box::new(move |part| Ok(c2(part, q, t))),
                (J, Q) => Box::new(move |part| Ok(c1(part, q, t))),
                (P, J) => Box::new(move |part| invert_scalar(c2(part, q, t), params)),
                (Q, J) => Box::new(move |part| invert_scalar(c1(part, q, t), params)),
                (P, Q) => Box::new(move |part| {
                    c1(part, q, t)
                        .checked_div(&c2(part, q, t))
                        .ok_or_else(|| degenerate(params))
                }),
                (Q, P) => Box::new(move |part| {
                    c2(part, q, t)
                        .checked_div(&c1(part, q, t))
                        .ok_or_else(|| degenerate(params))
                }),
                _ => return Ok(None),
            };
        let mut coeffs = Expansion::zero();
        for (part, coeff) in self.coeffs.iter() {
            coeffs.add_term(part.clone(), &(coeff * &factor(part)?));
        }
        Ok(Some(Element {
            basis: target.clone(),
            coeffs,
        }))
    }

    /// Multiply two elements over the same parameters. The product is
    /// computed in the Schur basis, whose structure constants are the
    /// classical Littlewood–Richardson data, and converted back.
    pub fn multiply(&self, other: &Element) -> Result<Element> {
        if self.basis.params != other.basis.params {
            return Err(Error::ParameterMismatch);
        }
        let classical = self.basis.registry().classical();
        let product = classical.multiply(
            ClassicalBasis::Schur,
            &self.to_schur()?,
            &other.to_schur()?,
        )?;
        self.basis.from_schur(&product)
    }

    /// The deformed Hall pairing `⟨self, other⟩_{q,t}`.
    ///
    /// The P/P, P/Q and J/J pairs have closed diagonal forms; every other
    /// combination is routed through the power sums, where the pairing is
    /// diagonal with Gram entry `z_λ(q, t)`. The routes agree wherever
    /// both apply.
    pub fn scalar_qt(&self, other: &Element) -> Result<Scalar> {
        if self.basis.params != other.basis.params {
            return Err(Error::ParameterMismatch);
        }
        let params = &self.basis.params;
        let q = params.q();
        let t = params.t();
        use McdBasis::*;
        match (self.kind(), other.kind()) {
            // ⟨P_λ, P_λ⟩ = c1/c2. At [3, 2, 1] this does not quite match
            // Macdonald, "Symmetric Functions and Orthogonal Polynomials"
            // p.12 (11.3); possibly a normalization variant of that P.
            (P, P) => pairing::pair_power(&self.coeffs, &other.coeffs, |part| {
                c1(part, q, t)
                    .checked_div(&c2(part, q, t))
                    .ok_or_else(|| degenerate(params))
            }),
            (P, Q) | (Q, P) => {
                pairing::pair_power(&self.coeffs, &other.coeffs, |_| Ok(Scalar::one()))
            }
            (J, J) => pairing::pair_power(&self.coeffs, &other.coeffs, |part| {
                Ok(&c1(part, q, t) * &c2(part, q, t))
            }),
            _ => {
                let a = self.to_classical(ClassicalBasis::PowerSum)?;
                let b = other.to_classical(ClassicalBasis::PowerSum)?;
                pairing::pair_power(&a, &b, |part| {
                    part.centralizer_qt(q, t).ok_or_else(|| degenerate(params))
                })
            }
        }
    }

    /// The Hall–Littlewood `t`-pairing, with Gram diagonal
    /// `z_λ · Π (1 - t^{λᵢ})^{-1}` on the power sums.
    pub fn scalar_t(&self, other: &Element) -> Result<Scalar> {
        if self.basis.params != other.basis.params {
            return Err(Error::ParameterMismatch);
        }
        let params = &self.basis.params;
        let a = self.to_classical(ClassicalBasis::PowerSum)?;
        let b = other.to_classical(ClassicalBasis::PowerSum)?;
        pairing::pair_power(&a, &b, |part| {
            part.centralizer_qt(&Scalar::zero(), params.t())
                .ok_or_else(|| degenerate(params))
        })
    }

    /// The `ω_{qt}` automorphism:
    /// `p_λ ↦ (−1)^{|λ|−ℓ(λ)} · Π (1−q^{λᵢ})/(1−t^{λᵢ}) · p_λ`.
    pub fn omega_qt(&self) -> Result<Element> {
        let params = &self.basis.params;
        let q = params.q();
        let t = params.t();
        let power = self.to_classical(ClassicalBasis::PowerSum)?;
        let mut scaled = Expansion::zero();
        for (part, coeff) in power.iter() {
            let mut factor = if (part.weight() as usize - part.len()) % 2 == 0 {
                Scalar::one()
            } else {
                Scalar::int(-1)
            };
            for &k in part.parts() {
                let num = &Scalar::one() - &q.pow(i64::from(k));
                let den = &Scalar::one() - &t.pow(i64::from(k));
                factor = (&factor * &num)
                    .checked_div(&den)
                    .ok_or_else(|| degenerate(params))?;
            }
            scaled.add_term(part.clone(), &(coeff * &factor));
        }
        self.basis.from_classical(ClassicalBasis::PowerSum, &scaled)
    }

    /// The nabla operator, diagonal on the Ht basis with eigenvalue
    /// `t^{n(λ)} q^{n(λ')}`; other bases convert to Ht, scale, and come
    /// back.
    pub fn nabla(&self) -> Result<Element> {
        let params = self.basis.params.clone();
        let q = params.q();
        let t = params.t();
        let ht = self.basis.registry().basis(McdBasis::Ht, params.clone());
        let in_ht = self.convert(&ht)?;
        let mut coeffs = Expansion::zero();
        for (part, coeff) in in_ht.coeffs.iter() {
            let eigen = &t.pow(i64::from(part.weighted_size()))
                * &q.pow(i64::from(part.conjugate().weighted_size()));
            coeffs.add_term(part.clone(), &(coeff * &eigen));
        }
        Element {
            basis: ht,
            coeffs,
        }
        .convert(&self.basis)
    }

    /// The determinant creation operator; defined on the S basis only.
    pub fn creation(&self, k: u32) -> Result<Element> {
        if self.kind() != McdBasis::S {
            return Err(Error::UnsupportedOperation {
                operation: "creation",
                basis: self.kind().name(),
            });
        }
        let params = &self.basis.params;
        let coeffs = creation::apply(
            self.basis.registry().classical(),
            &self.coeffs,
            k,
            params.q(),
            params.t(),
        )?;
        Ok(Element {
            basis: self.basis.clone(),
            coeffs,
        })
    }
}

fn invert_scalar(value: Scalar, params: &QtParams) -> Result<Scalar> {
    value.checked_inv().ok_or_else(|| degenerate(params))
}

fn degenerate(params: &QtParams) -> Error {
    Error::DegenerateSpecialization {
        q: params.q().clone(),
        t: params.t().clone(),
    }
}

impl std::ops::Add for &Element {
    type Output = Element;
    fn add(self, rhs: &Element) -> Element {
        assert!(self.basis == rhs.basis, "elements of different bases");
        let mut coeffs = self.coeffs.clone();
        coeffs.add_scaled(&rhs.coeffs, &Scalar::one());
        Element {
            basis: self.basis.clone(),
            coeffs,
        }
    }
}

impl std::ops::Sub for &Element {
    type Output = Element;
    fn sub(self, rhs: &Element) -> Element {
        assert!(self.basis == rhs.basis, "elements of different bases");
        let mut coeffs = self.coeffs.clone();
        coeffs.add_scaled(&rhs.coeffs, &Scalar::int(-1));
        Element {
            basis: self.basis.clone(),
            coeffs,
        }
    }
}

impl std::ops::Neg for &Element {
    type Output = Element;
    fn neg(self) -> Element {
        self.scale(&Scalar::int(-1))
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.coeffs.is_zero() {
            return write!(f, "0");
        }
        let prefix = self.kind().prefix();
        let rendered = self
            .coeffs
            .iter()
            .map(|(part, coeff)| {
                if coeff.is_one() {
                    format!("{prefix}{part}")
                } else {
                    format!("({coeff})*{prefix}{part}")
                }
            })
            .join(" + ");
        write!(f, "{rendered}")
    }
}
