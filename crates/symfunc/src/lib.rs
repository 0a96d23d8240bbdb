//! The classical symmetric-function algebra: monomial, power-sum,
//! homogeneous and Schur bases with their mutual change-of-basis tables
//! and products, plus the inversion engine used to turn a direct
//! change-of-basis rule into its reverse.
//!
//! Everything is carried structurally: an element is a partition-indexed
//! table of scalars, never an expanded polynomial in underlying variables.

pub mod classical;
pub mod invert;
pub mod table;

pub use classical::{ClassicalAlgebra, ClassicalBasis};
pub use invert::Triangularity;
pub use table::{Expansion, Table};

use partitions::Partition;

/// Failures of the table layer and the inversion engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A graded table was asked to mix partitions of different weights.
    DegreeMismatch { expected: u32, found: u32 },
    /// A table is missing the row for a partition of its degree.
    MissingRow { part: Partition },
    /// A table declared triangular has a vanishing diagonal entry.
    ZeroDiagonal { part: Partition },
    /// A table declared triangular has an entry on the wrong side of the
    /// dominance order.
    NotTriangular { row: Partition, col: Partition },
    /// A dense change-of-basis matrix is not invertible.
    Singular { degree: u32 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::DegreeMismatch { expected, found } => {
                write!(f, "degree mismatch: expected weight {expected}, found {found}")
            }
            Error::MissingRow { part } => write!(f, "no row for partition {part}"),
            Error::ZeroDiagonal { part } => {
                write!(f, "triangularity violated: zero diagonal at {part}")
            }
            Error::NotTriangular { row, col } => {
                write!(f, "triangularity violated: row {row} reaches column {col}")
            }
            Error::Singular { degree } => {
                write!(f, "change-of-basis matrix is singular in degree {degree}")
            }
        }
    }
}

impl std::error::Error for Error {}
