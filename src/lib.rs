//! Structure constants for the Macdonald symmetric-function bases.
//!
//! The algebra of symmetric functions is graded, with each homogeneous
//! piece spanned by vectors indexed by the integer partitions of its
//! degree. The Macdonald families P, Q, J, H, Ht and S are defined only
//! implicitly — by an explicit expansion into the Schur basis, by
//! orthogonality under the `(q, t)`-deformed Hall pairing, or by a
//! diagonal relation to one another — and every arithmetic operation a
//! user performs needs the *reverse* change of basis, recovered here by
//! inverting the direct tables degree by degree.
//!
//! Nothing is ever expanded into monomials of underlying variables: an
//! element is a partition-indexed table of scalars in `ℚ(q, t)`, and all
//! structural data lives in sparse [`symfunc::Table`]s owned by the
//! process-wide [`Registry`].
//!
//! ```
//! use macdonald::{Basis, QtParams};
//!
//! let p = Basis::p(QtParams::generic());
//! let q = Basis::q(QtParams::generic());
//! let a = p.from_parts(&[2]);
//! let b = q.from_parts(&[2]);
//! // P and Q are dual under the qt-Hall pairing.
//! assert!(a.scalar_qt(&b).unwrap().is_one());
//! ```

pub mod element;
pub mod error;
pub mod family;
pub mod params;
pub mod registry;

mod creation;
mod pairing;
mod parse;

pub use element::{Basis, Element};
pub use error::{Error, Result};
pub use family::{c1, c2, McdBasis};
pub use params::QtParams;
pub use registry::{qt_kostka, Registry};

pub use partitions::{partitions_of, Partition};
pub use qt::{Scalar, Var};
pub use symfunc::{ClassicalBasis, Expansion, Table};
