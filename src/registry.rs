//! The process-wide cache of structure-constant tables.
//!
//! Tables are computed once over symbolic `(q, t)` and specialized by
//! substitution, so the cache has two layers: generic tables keyed by
//! `(family, direction, degree)`, and specialized tables additionally
//! keyed by the `(q, t)` value pair. Basis instances are interned here as
//! well — asking twice for the same family under the same parameters
//! returns the same `Arc`.
//!
//! Insertion is serialized by a single re-entrant guard: a thread that is
//! filling one table may recursively request the tables it depends on
//! (Ht needs J, H needs Ht, P and Q need J), while other threads block
//! until the entry is fully inserted. A failed computation inserts
//! nothing.

use std::sync::{Arc, OnceLock, Weak};

use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use partitions::Partition;
use qt::Scalar;
use symfunc::{invert, ClassicalAlgebra, Expansion, Table};

use crate::element::Basis;
use crate::error::Result;
use crate::family::{construction, Construction, Inversion, McdBasis};
use crate::params::QtParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    ToSchur,
    FromSchur,
}

pub struct Registry {
    classical: ClassicalAlgebra,
    generic: DashMap<(McdBasis, Direction, u32), Arc<Table>>,
    specialized: DashMap<(McdBasis, Direction, QtParams, u32), Arc<Table>>,
    bases: DashMap<(McdBasis, QtParams), Arc<Basis>>,
    compute_guard: ReentrantMutex<()>,
    self_ref: Weak<Registry>,
}

impl Registry {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            classical: ClassicalAlgebra::new(),
            generic: DashMap::new(),
            specialized: DashMap::new(),
            bases: DashMap::new(),
            compute_guard: ReentrantMutex::new(()),
            self_ref: self_ref.clone(),
        })
    }

    /// The shared process-wide registry. Bases constructed without an
    /// explicit registry live here, as does [`qt_kostka`].
    pub fn global() -> &'static Arc<Registry> {
        static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// The classical symmetric-function algebra backing this registry.
    pub fn classical(&self) -> &ClassicalAlgebra {
        &self.classical
    }

    /// The interned basis instance for a family under given parameters.
    pub fn basis(&self, kind: McdBasis, params: QtParams) -> Arc<Basis> {
        let key = (kind, params.clone());
        let registry = self.self_ref.upgrade().expect("registry is behind an Arc");
        self.bases
            .entry(key)
            .or_insert_with(|| {
                Arc::new_cyclic(|weak| Basis::new(kind, params, registry, weak.clone()))
            })
            .clone()
    }

    /// The direct-to-Schur table of a family in one degree, over symbolic
    /// `(q, t)`.
    pub(crate) fn to_schur_generic(&self, kind: McdBasis, degree: u32) -> Result<Arc<Table>> {
        let key = (kind, Direction::ToSchur, degree);
        if let Some(table) = self.generic.get(&key) {
            return Ok(table.clone());
        }
        let _guard = self.compute_guard.lock();
        if let Some(table) = self.generic.get(&key) {
            return Ok(table.clone());
        }
        let table = self.compute_to_schur(kind, degree)?;
        let table = Arc::new(table);
        self.generic.insert(key, table.clone());
        Ok(table)
    }

    /// The Schur-to-family table in one degree, over symbolic `(q, t)`.
    pub(crate) fn from_schur_generic(&self, kind: McdBasis, degree: u32) -> Result<Arc<Table>> {
        let key = (kind, Direction::FromSchur, degree);
        if let Some(table) = self.generic.get(&key) {
            return Ok(table.clone());
        }
        let _guard = self.compute_guard.lock();
        if let Some(table) = self.generic.get(&key) {
            return Ok(table.clone());
        }
        let table = self.compute_from_schur(kind, degree)?;
        let table = Arc::new(table);
        self.generic.insert(key, table.clone());
        Ok(table)
    }

    #[tracing::instrument(skip(self))]
    fn compute_to_schur(&self, kind: McdBasis, degree: u32) -> Result<Table> {
        tracing::debug!("materializing direct table");
        match construction(kind) {
            Construction::Direct { to_schur, .. } => to_schur(self, degree),
            Construction::Diagonal { base, factor } => Ok(self
                .to_schur_generic(base, degree)?
                .scale_rows(|part| factor(part).inv())),
        }
    }

    #[tracing::instrument(skip(self))]
    fn compute_from_schur(&self, kind: McdBasis, degree: u32) -> Result<Table> {
        tracing::debug!("materializing reverse table");
        match construction(kind) {
            Construction::Direct { inversion, .. } => {
                let direct = self.to_schur_generic(kind, degree)?;
                let inverse = match inversion {
                    Inversion::Triangular(tri) => invert::triangular(&direct, tri)?,
                    Inversion::Dense => invert::dense(&direct)?,
                };
                Ok(inverse)
            }
            Construction::Diagonal { base, factor } => Ok(self
                .from_schur_generic(base, degree)?
                .scale_cols(factor)),
        }
    }

    /// A direction's table under fixed parameters, by substitution into
    /// the generic table.
    pub(crate) fn table_at(
        &self,
        kind: McdBasis,
        direction: Direction,
        params: &QtParams,
        degree: u32,
    ) -> Result<Arc<Table>> {
        let generic = match direction {
            Direction::ToSchur => self.to_schur_generic(kind, degree)?,
            Direction::FromSchur => self.from_schur_generic(kind, degree)?,
        };
        if params.is_generic() {
            return Ok(generic);
        }
        let key = (kind, direction, params.clone(), degree);
        if let Some(table) = self.specialized.get(&key) {
            return Ok(table.clone());
        }
        let _guard = self.compute_guard.lock();
        if let Some(table) = self.specialized.get(&key) {
            return Ok(table.clone());
        }
        let table = Arc::new(specialize_table(&generic, params)?);
        self.specialized.insert(key, table.clone());
        Ok(table)
    }
}

fn specialize_table(table: &Table, params: &QtParams) -> Result<Table> {
    let mut out = Table::new(table.degree());
    for (part, row) in table.rows() {
        let mut specialized = Expansion::zero();
        for (col, coeff) in row.iter() {
            specialized.add_term(col.clone(), &params.specialize(coeff)?);
        }
        out.insert_row(part.clone(), specialized)?;
    }
    Ok(out)
}

/// The qt-Kostka polynomial `K_{λμ}(q, t)`: the coefficient of the Schur
/// vector `s_λ` in the Schur expansion of `H_μ`. Zero when the weights
/// differ. Cached in the global registry, independent of any basis
/// instance.
pub fn qt_kostka(lambda: &Partition, mu: &Partition) -> Result<Scalar> {
    if lambda.weight() != mu.weight() {
        return Ok(Scalar::zero());
    }
    let table = Registry::global().to_schur_generic(McdBasis::H, mu.weight())?;
    Ok(table.entry(mu, lambda))
}
