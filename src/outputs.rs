use crate::inputs::Inputs;

/// Everything one inference call produced.
///
/// Only `score` is needed by callers; the rest is there for logging and
/// for checking which output terms were activated.
#[derive(Clone, Debug, PartialEq)]
pub struct Inference<'s> {
    inputs: Inputs,
    score: f64,
    strengths: Vec<(&'s str, f64)>,
    fired_rules: usize,
}

impl<'s> Inference<'s> {
    pub(crate) fn new(inputs: Inputs, score: f64, strengths: Vec<(&'s str, f64)>, fired_rules: usize) -> Self {
        Self {
            inputs,
            score,
            strengths,
            fired_rules,
        }
    }

    pub fn inputs(&self) -> Inputs {
        self.inputs
    }

    /// The defuzzified priority score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Aggregated firing strength of every priority term, in term order.
    pub fn strengths(&self) -> &[(&'s str, f64)] {
        &self.strengths
    }

    pub fn strength(&self, term: &str) -> Option<f64> {
        self.strengths.iter().find(|(name, _)| *name == term).map(|(_, s)| *s)
    }

    /// The priority term with the highest aggregated strength. Ties go to
    /// the earlier (lower) term.
    pub fn dominant_term(&self) -> Option<&'s str> {
        self.strengths
            .iter()
            .filter(|(_, s)| *s > 0.)
            .fold(None, |best: Option<(&'s str, f64)>, &(name, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((name, s)),
            })
            .map(|(name, _)| name)
    }

    /// Number of rules with a non-zero firing strength.
    pub fn fired_rules(&self) -> usize {
        self.fired_rules
    }
}
