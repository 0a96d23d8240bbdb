use qt::{Scalar, Var};

use crate::error::{Error, Result};

/// The `(q, t)` pair a basis family is instantiated with: the symbolic
/// generators by default, or constants fixed at construction time.
///
/// Two bases with equal tag and equal parameter values are the same
/// logical basis; this type's `Eq`/`Hash` are what the registry interns
/// by. The ambient coefficient field stays `ℚ(q, t)` under
/// specialization — a fixed parameter simply stops appearing in any
/// computed coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QtParams {
    q: Scalar,
    t: Scalar,
}

impl Default for QtParams {
    fn default() -> Self {
        Self::generic()
    }
}

impl QtParams {
    /// Both parameters symbolic.
    pub fn generic() -> Self {
        Self {
            q: Scalar::q(),
            t: Scalar::t(),
        }
    }

    /// Fix either parameter to a constant. A non-constant value is
    /// rejected here, at construction time.
    pub fn new(q: Option<Scalar>, t: Option<Scalar>) -> Result<Self> {
        let check = |var, value: Option<Scalar>, gen: fn() -> Scalar| match value {
            None => Ok(gen()),
            Some(v) if v.is_constant() => Ok(v),
            Some(v) => Err(Error::InvalidSpecialization {
                var,
                value: v.to_string(),
            }),
        };
        Ok(Self {
            q: check(Var::Q, q, Scalar::q)?,
            t: check(Var::T, t, Scalar::t)?,
        })
    }

    pub fn with_q(q: Scalar) -> Result<Self> {
        Self::new(Some(q), None)
    }

    pub fn with_t(t: Scalar) -> Result<Self> {
        Self::new(None, Some(t))
    }

    pub fn q(&self) -> &Scalar {
        &self.q
    }

    pub fn t(&self) -> &Scalar {
        &self.t
    }

    pub fn is_generic(&self) -> bool {
        self.q == Scalar::q() && self.t == Scalar::t()
    }

    /// Substitute the fixed values into a coefficient computed over
    /// symbolic `(q, t)`. Fails when the substitution meets a vanishing
    /// denominator — the degenerate-parameter failure mode.
    pub fn specialize(&self, value: &Scalar) -> Result<Scalar> {
        if self.is_generic() {
            return Ok(value.clone());
        }
        value
            .substitute(Var::Q, &self.q)
            .and_then(|v| v.substitute(Var::T, &self.t))
            .ok_or_else(|| Error::DegenerateSpecialization {
                q: self.q.clone(),
                t: self.t.clone(),
            })
    }
}

impl std::fmt::Display for QtParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.q == Scalar::q(), self.t == Scalar::t()) {
            (true, true) => Ok(()),
            (false, true) => write!(f, " with q={}", self.q),
            (true, false) => write!(f, " with t={}", self.t),
            (false, false) => write!(f, " with q={} and t={}", self.q, self.t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constant_values_are_rejected() {
        let err = QtParams::with_q(Scalar::t()).unwrap_err();
        assert!(matches!(err, Error::InvalidSpecialization { var: Var::Q, .. }));
    }

    #[test]
    fn specialization_substitutes() {
        let params = QtParams::with_q(Scalar::zero()).unwrap();
        let c = &(&Scalar::one() - &Scalar::q()) * &Scalar::t();
        assert_eq!(params.specialize(&c).unwrap(), Scalar::t());
    }

    #[test]
    fn degenerate_substitution_is_reported() {
        let params = QtParams::with_t(Scalar::one()).unwrap();
        let c = Scalar::one() / (&Scalar::one() - &Scalar::t());
        assert!(matches!(
            params.specialize(&c),
            Err(Error::DegenerateSpecialization { .. })
        ));
    }
}
