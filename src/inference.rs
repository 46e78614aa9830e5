use tracing::trace;

use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::Inference;
use crate::rules::RuleSet;
use crate::variable::Variables;

/// Mamdani inference: fuzzify, fire, aggregate, defuzzify.
///
/// The default is the classic min/max/min-clip pipeline with a discrete
/// centroid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    defuzz_op: DefuzzificationOp,
}

impl MamdaniInference {
    pub fn new(and_op: AndOp, or_op: OrOp, imp_op: ImplicationOp, defuzz_op: DefuzzificationOp) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            defuzz_op,
        }
    }

    pub fn with_and_op(mut self, and_op: AndOp) -> Self {
        self.and_op = and_op;
        self
    }

    pub fn with_or_op(mut self, or_op: OrOp) -> Self {
        self.or_op = or_op;
        self
    }

    pub fn with_implication(mut self, imp_op: ImplicationOp) -> Self {
        self.imp_op = imp_op;
        self
    }

    pub fn with_defuzzification(mut self, defuzz_op: DefuzzificationOp) -> Self {
        self.defuzz_op = defuzz_op;
        self
    }

    pub fn defuzzification(&self) -> DefuzzificationOp {
        self.defuzz_op
    }

    /// Runs one inference. `rules` must have been checked against `vars`.
    pub(crate) fn eval<'v>(&self, vars: &'v Variables, rules: &RuleSet, inputs: Inputs) -> Result<Inference<'v>> {
        // Fuzzificate Facts
        // Inputs outside a universe take the edge value, as numpy.interp does
        let mut degrees = Vec::with_capacity(3);

        for (var, value) in vars.inputs().into_iter().zip(inputs.as_array()) {
            if !value.is_finite() {
                return Err(Error::InvalidInput {
                    variable: var.name().to_owned(),
                    value,
                });
            }

            degrees.push(var.degrees(var.clamp(value)));
        }

        let (damage, accessibility, population) = (&degrees[0], &degrees[1], &degrees[2]);

        // Fire rules and aggregate them per consequence
        let priority = &vars.priority;
        let mut strengths = vec![0.; priority.terms().len()];
        let mut fired_rules = 0;

        for rule in rules {
            let firing = self.and_op.call(
                self.and_op.call(damage[rule.damage], accessibility[rule.accessibility]),
                population[rule.population],
            );

            if firing > 0. {
                fired_rules += 1;
            }

            let strength = &mut strengths[rule.consequence];
            *strength = self.or_op.call(*strength, firing);
        }

        // Build the aggregated output set over the sampled universe
        let universe: Vec<f64> = priority.universe()?.collect();
        let active: Vec<_> = priority
            .terms()
            .iter()
            .zip(strengths.iter().copied())
            .filter(|(_, strength)| *strength > 0.)
            .collect();
        let aggregated: Vec<f64> = universe
            .iter()
            .map(|&y| {
                active.iter().fold(0., |acc, (term, strength)| {
                    self.or_op.call(acc, self.imp_op.call(*strength, term.membership(y)))
                })
            })
            .collect();

        // Defuzzificate
        let score = self
            .defuzz_op
            .call(&universe, &aggregated)
            .ok_or(Error::Defuzzification { inputs })?;

        trace!(%inputs, score, fired_rules, ?strengths, "inferred priority");

        let strengths = priority.term_names().zip(strengths).collect();

        Ok(Inference::new(inputs, score, strengths, fired_rules))
    }
}
