use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::trimf;

/// Breakpoints `(a, b, c)` of a triangular membership function.
///
/// Serialises as a plain `[a, b, c]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Triangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Triangle {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Triangle { a, b, c }
    }

    pub fn validate(&self) -> Result<()> {
        let Triangle { a, b, c } = *self;

        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(Error::config(format!("breakpoints must be finite, got [{a}, {b}, {c}]")));
        }
        if a > b || b > c {
            return Err(Error::config(format!("breakpoints must satisfy a <= b <= c, got [{a}, {b}, {c}]")));
        }

        Ok(())
    }

    #[inline]
    pub fn membership(&self, x: f64) -> f64 {
        trimf(x, [self.a, self.b, self.c])
    }
}

impl From<[f64; 3]> for Triangle {
    fn from([a, b, c]: [f64; 3]) -> Self {
        Triangle { a, b, c }
    }
}

impl From<Triangle> for [f64; 3] {
    fn from(t: Triangle) -> Self {
        [t.a, t.b, t.c]
    }
}

/// A named level of a linguistic variable, e.g. damage is "medium".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Term {
    name: String,
    #[serde(rename = "trimf")]
    shape: Triangle,
}

impl Term {
    pub fn new(name: impl Into<String>, breakpoints: [f64; 3]) -> Result<Self> {
        let term = Term {
            name: name.into(),
            shape: breakpoints.into(),
        };

        term.validate()?;

        Ok(term)
    }

    pub(crate) fn new_unchecked(name: &str, breakpoints: [f64; 3]) -> Self {
        Term {
            name: name.to_owned(),
            shape: breakpoints.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config("term names must not be empty"));
        }

        self.shape
            .validate()
            .map_err(|e| Error::config(format!("term `{}`: {e}", self.name)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Triangle {
        self.shape
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    #[inline]
    pub fn membership(&self, x: f64) -> f64 {
        self.shape.membership(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_peak_and_feet() {
        let term = Term::new("medium", [2., 5., 8.]).unwrap();

        assert_eq!(term.membership(2.), 0.);
        assert_eq!(term.membership(5.), 1.);
        assert_eq!(term.membership(8.), 0.);
        assert!((term.membership(4.) - 2. / 3.).abs() < 1e-12);
    }

    #[test]
    fn test_term_rejects_unordered_breakpoints() {
        let err = Term::new("bad", [5., 2., 8.]).unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("bad"));
        assert!(Term::new("nan", [0., f64::NAN, 1.]).is_err());
        assert!(Term::new("", [0., 1., 2.]).is_err());
    }

    #[test]
    fn test_triangle_serde_as_array() {
        let term = Term::new("low", [0., 0., 5.]).unwrap();
        let json = serde_json::to_string(&term).unwrap();

        assert_eq!(json, r#"{"name":"low","trimf":[0.0,0.0,5.0]}"#);
        assert_eq!(serde_json::from_str::<Term>(&json).unwrap(), term);
    }
}
