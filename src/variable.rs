use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::linspace::Linspace;
use crate::terms::Term;

/// Names of the five output levels, lowest first.
pub const PRIORITY_TERMS: [&str; 5] = ["low", "medium", "medium_high", "high", "very_high"];

/// Upper bound on the number of samples of a universe or membership curve.
pub const MAX_SAMPLES: usize = 1_000_000;

/// A named dimension (damage, priority, ...) split into overlapping terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    min: f64,
    max: f64,
    /// Sampling resolution of the universe. Only the output variable's
    /// samples feed the defuzzifier.
    step: f64,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe_range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let this = Self {
            name: name.into(),
            min: *universe_range.start(),
            max: *universe_range.end(),
            step,
            terms: Vec::new(),
        };

        this.validate_universe()?;

        Ok(this)
    }

    /// Appends a term. Names must be unique within the variable.
    pub fn with_term(mut self, name: impl Into<String>, breakpoints: [f64; 3]) -> Result<Self> {
        let term = Term::new(name, breakpoints)?;

        if self.term_index(term.name()).is_some() {
            return Err(Error::config(format!(
                "variable `{}` already has a term named `{}`",
                self.name,
                term.name()
            )));
        }

        self.terms.push(term);

        Ok(self)
    }

    fn fixed(name: &str, universe_range: RangeInclusive<f64>, terms: &[(&str, [f64; 3])]) -> Self {
        Self {
            name: name.to_owned(),
            min: *universe_range.start(),
            max: *universe_range.end(),
            step: 1.,
            terms: terms
                .iter()
                .map(|(name, breakpoints)| Term::new_unchecked(name, *breakpoints))
                .collect(),
        }
    }

    fn validate_universe(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(Error::config(format!(
                "variable `{}` needs a finite universe with min < max, got [{}, {}]",
                self.name, self.min, self.max
            )));
        }

        self.grid(self.step)?;

        Ok(())
    }

    fn grid(&self, step: f64) -> Result<Linspace> {
        if !step.is_finite() || step <= 0. {
            return Err(Error::config(format!(
                "variable `{}` needs a positive sampling step, got {step}",
                self.name
            )));
        }

        Linspace::with_step(self.min, self.max, step)
            .filter(|grid| grid.len() <= MAX_SAMPLES)
            .ok_or_else(|| {
                Error::config(format!(
                    "variable `{}` sampled every {step} exceeds {MAX_SAMPLES} points",
                    self.name
                ))
            })
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_universe()?;

        if self.terms.is_empty() {
            return Err(Error::config(format!("variable `{}` has no terms", self.name)));
        }

        let mut seen = HashSet::with_capacity(self.terms.len());

        for term in &self.terms {
            term.validate()
                .map_err(|e| Error::config(format!("variable `{}`: {e}", self.name)))?;

            if !seen.insert(term.name()) {
                return Err(Error::config(format!(
                    "variable `{}` defines term `{}` twice",
                    self.name,
                    term.name()
                )));
            }
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name() == name)
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name() == name)
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(Term::name)
    }

    /// Sample points of the universe at the variable's own step.
    pub fn universe(&self) -> Result<Linspace> {
        self.grid(self.step)
    }

    /// Crisp values outside the universe take the edge value.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Degree of membership of `x` in every term, keyed by term name.
    pub fn fuzzify(&self, x: f64) -> HashMap<&str, f64> {
        self.terms.iter().map(|t| (t.name(), t.membership(x))).collect()
    }

    /// Same as [`fuzzify`](Self::fuzzify) but in term order.
    pub(crate) fn degrees(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.membership(x)).collect()
    }

    /// Samples every term over the universe, e.g. to plot the membership functions.
    pub fn curve(&self, step: f64) -> Result<MembershipCurve> {
        let points = self
            .grid(step)?
            .map(|x| CurvePoint {
                x,
                degrees: self.degrees(x),
            })
            .collect();

        Ok(MembershipCurve {
            variable: self.name.clone(),
            terms: self.term_names().map(str::to_owned).collect(),
            points,
        })
    }
}

/// Membership degrees of each term sampled along a variable's universe.
#[derive(Clone, Debug, Serialize)]
pub struct MembershipCurve {
    pub variable: String,
    pub terms: Vec<String>,
    pub points: Vec<CurvePoint>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    /// One entry per term, in term order
    pub degrees: Vec<f64>,
}

/// The three inputs and the output of the priority model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variables {
    pub damage: LinguisticVariable,
    pub accessibility: LinguisticVariable,
    pub population: LinguisticVariable,
    pub priority: LinguisticVariable,
}

impl Variables {
    pub fn validate(&self) -> Result<()> {
        for var in self.all() {
            var.validate()?;
        }

        Ok(())
    }

    /// Input variables in rule order: damage, accessibility, population.
    pub fn inputs(&self) -> [&LinguisticVariable; 3] {
        [&self.damage, &self.accessibility, &self.population]
    }

    pub fn all(&self) -> [&LinguisticVariable; 4] {
        [&self.damage, &self.accessibility, &self.population, &self.priority]
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let vars: Variables = serde_json::from_str(json)?;

        vars.validate()?;

        Ok(vars)
    }
}

impl Default for Variables {
    fn default() -> Self {
        configure_variables()
    }
}

/// The standard disaster-response model.
///
/// Inputs are scored on `[0, 10]`, priority on `[0, 100]`, all sampled at
/// integer steps.
pub fn configure_variables() -> Variables {
    const SEVERITY: [[f64; 3]; 3] = [[0., 0., 5.], [2., 5., 8.], [5., 10., 10.]];

    let severity = |name: &str, labels: [&str; 3]| {
        let terms: Vec<_> = labels.into_iter().zip(SEVERITY).collect();
        LinguisticVariable::fixed(name, 0. ..=10., &terms)
    };

    Variables {
        damage: severity("damage", ["low", "medium", "high"]),
        accessibility: severity("accessibility", ["poor", "moderate", "good"]),
        population: severity("population", ["low", "medium", "high"]),
        priority: LinguisticVariable::fixed(
            "priority",
            0. ..=100.,
            &[
                (PRIORITY_TERMS[0], [0., 0., 30.]),
                (PRIORITY_TERMS[1], [20., 40., 60.]),
                (PRIORITY_TERMS[2], [40., 60., 80.]),
                (PRIORITY_TERMS[3], [60., 80., 90.]),
                (PRIORITY_TERMS[4], [80., 100., 100.]),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_model_is_valid() {
        let vars = configure_variables();

        vars.validate().unwrap();
        assert_eq!(vars.damage.term_names().collect::<Vec<_>>(), ["low", "medium", "high"]);
        assert_eq!(vars.accessibility.term_names().collect::<Vec<_>>(), ["poor", "moderate", "good"]);
        assert_eq!(vars.priority.term_names().collect::<Vec<_>>(), PRIORITY_TERMS);
        assert_eq!(vars.priority.universe().unwrap().len(), 101);
        assert_eq!(vars.damage.universe().unwrap().len(), 11);
    }

    #[test]
    fn test_standard_breakpoints() {
        let vars = configure_variables();
        let shape = |var: &LinguisticVariable, name: &str| <[f64; 3]>::from(var.term(name).unwrap().shape());

        assert_eq!(shape(&vars.population, "high"), [5., 10., 10.]);
        assert_eq!(shape(&vars.accessibility, "moderate"), [2., 5., 8.]);
        assert_eq!(shape(&vars.priority, "medium_high"), [40., 60., 80.]);
        assert_eq!(shape(&vars.priority, "high"), [60., 80., 90.]);
        assert_eq!(shape(&vars.priority, "very_high"), [80., 100., 100.]);
    }

    #[test]
    fn test_fuzzify() {
        let vars = configure_variables();
        let degrees = vars.damage.fuzzify(3.5);

        assert_eq!(degrees.len(), 3);
        assert_eq!(degrees["low"], 0.3);
        assert_eq!(degrees["medium"], 0.5);
        assert_eq!(degrees["high"], 0.);

        let edge = vars.accessibility.fuzzify(0.);
        assert_eq!(edge["poor"], 1.);
        assert_eq!(edge["moderate"], 0.);
        assert_eq!(edge["good"], 0.);
    }

    #[test]
    fn test_builder_rejects_duplicates_and_bad_universe() {
        let var = LinguisticVariable::new("damage", 0. ..=10., 1.)
            .unwrap()
            .with_term("low", [0., 0., 5.])
            .unwrap();

        assert!(var.clone().with_term("low", [0., 2., 4.]).is_err());
        assert!(var.with_term("high", [5., 10., 10.]).unwrap().validate().is_ok());
        assert!(LinguisticVariable::new("x", 10. ..=0., 1.).is_err());
        assert!(LinguisticVariable::new("x", 0. ..=10., 0.).is_err());
        assert!(LinguisticVariable::new("x", 0. ..=10., 1.).unwrap().validate().is_err());
    }

    #[test]
    fn test_curve() {
        let vars = configure_variables();
        let curve = vars.damage.curve(0.1).unwrap();

        assert_eq!(curve.terms, ["low", "medium", "high"]);
        assert_eq!(curve.points.len(), 101);
        assert_eq!(curve.points[0].degrees, vec![1., 0., 0.]);
        assert_eq!(curve.points[100].degrees, vec![0., 0., 1.]);
        assert!(vars.damage.curve(-1.).is_err());
    }

    #[test]
    fn test_oversampled_universe_is_rejected() {
        assert!(matches!(
            LinguisticVariable::new("x", 0. ..=100., 1e-300),
            Err(Error::Configuration(_))
        ));
        assert!(LinguisticVariable::new("x", 0. ..=100., 1e-7).is_err());
        assert!(LinguisticVariable::new("x", 0. ..=100., 1e-3).is_ok());

        let vars = configure_variables();
        assert!(matches!(vars.damage.curve(1e-300), Err(Error::Configuration(_))));
        assert!(vars.damage.curve(1e-6).is_err());
    }

    #[test]
    fn test_json_model_with_tiny_step_is_rejected() {
        let mut value = serde_json::to_value(configure_variables()).unwrap();
        value["priority"]["step"] = serde_json::json!(1e-300);

        let json = value.to_string();
        assert!(matches!(Variables::from_json(&json), Err(Error::Configuration(_))));

        // Skipping validation still gives an error, not a panic
        let vars: Variables = serde_json::from_value(value).unwrap();
        assert!(vars.priority.universe().is_err());
    }

    #[test]
    fn test_json_round_trip_validates() {
        let vars = configure_variables();
        let json = serde_json::to_string(&vars).unwrap();

        assert_eq!(Variables::from_json(&json).unwrap(), vars);

        let broken = json.replacen("[2.0,5.0,8.0]", "[8.0,5.0,2.0]", 1);
        assert!(matches!(Variables::from_json(&broken), Err(Error::Configuration(_))));
    }
}
