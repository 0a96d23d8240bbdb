use partitions::Partition;
use qt::{Scalar, Var};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the basis engine. All of these are synchronous and
/// deterministic — nothing is retried, and no partially computed table is
/// ever cached.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A graded table or inversion failed; includes degree mixing, zero
    /// triangular diagonals and singular dense systems.
    Table(symfunc::Error),
    /// A requested specialization is not a constant of the coefficient
    /// field (e.g. fixing `q` to an expression involving `t`).
    InvalidSpecialization { var: Var, value: String },
    /// Substituting the fixed `(q, t)` values annihilated a denominator —
    /// the basis family degenerates at this point of parameter space.
    DegenerateSpecialization { q: Scalar, t: Scalar },
    /// The two operands live over different `(q, t)` parameters; no
    /// conversion between such bases is defined.
    ParameterMismatch,
    /// The requested operation is only defined on another basis family.
    UnsupportedOperation {
        operation: &'static str,
        basis: &'static str,
    },
    /// The creation operator was applied with a part smaller than the
    /// number of rows already present.
    CreationTooShort { part: Partition, k: u32 },
    /// An element expression could not be parsed.
    Parse(String),
}

impl From<symfunc::Error> for Error {
    fn from(e: symfunc::Error) -> Self {
        Error::Table(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Table(e) => write!(f, "{e}"),
            Error::InvalidSpecialization { var, value } => {
                write!(f, "cannot fix {var} to the non-constant value {value}")
            }
            Error::DegenerateSpecialization { q, t } => {
                write!(f, "basis degenerates at q = {q}, t = {t}")
            }
            Error::ParameterMismatch => {
                write!(f, "operands live over different (q, t) parameters")
            }
            Error::UnsupportedOperation { operation, basis } => {
                write!(f, "{operation} is not defined on the {basis} basis")
            }
            Error::CreationTooShort { part, k } => {
                write!(f, "cannot prepend a part of size {k} to {part}")
            }
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Table(e) => Some(e),
            _ => None,
        }
    }
}
