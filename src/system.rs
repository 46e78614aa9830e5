use crate::error::Result;
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::outputs::Inference;
use crate::rules::{build_rules, severity_heuristic, RuleSet};
use crate::variable::{configure_variables, Variables};

/// A configured priority model: variables, the rule base built from them,
/// and the inference settings.
///
/// Immutable once built, so it can be shared by reference between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct PrioritySystem {
    variables: Variables,
    rules: RuleSet,
    engine: MamdaniInference,
}

impl PrioritySystem {
    /// The standard model with the severity heuristic rule base.
    pub fn standard() -> Result<Self> {
        Self::from_variables(configure_variables())
    }

    /// Builds the rule base for `variables` with the severity heuristic.
    pub fn from_variables(variables: Variables) -> Result<Self> {
        variables.validate()?;

        let rules = build_rules(&variables, severity_heuristic)?;

        Self::new(variables, rules)
    }

    pub fn new(variables: Variables, rules: RuleSet) -> Result<Self> {
        variables.validate()?;
        rules.check_against(&variables)?;

        Ok(Self {
            variables,
            rules,
            engine: MamdaniInference::default(),
        })
    }

    pub fn with_engine(mut self, engine: MamdaniInference) -> Self {
        self.engine = engine;
        self
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn engine(&self) -> &MamdaniInference {
        &self.engine
    }

    /// Crisp priority score for one input triple.
    pub fn infer(&self, damage: f64, accessibility: f64, population: f64) -> Result<f64> {
        self.infer_inputs(Inputs::new(damage, accessibility, population))
    }

    pub fn infer_inputs(&self, inputs: Inputs) -> Result<f64> {
        self.evaluate(inputs).map(|out| out.score())
    }

    /// Like [`infer`](Self::infer) but keeps the per-term strengths.
    pub fn evaluate(&self, inputs: Inputs) -> Result<Inference<'_>> {
        self.engine.eval(&self.variables, &self.rules, inputs)
    }
}

/// Crisp priority score for one scenario, see [`PrioritySystem::infer`].
pub fn infer(system: &PrioritySystem, damage: f64, accessibility: f64, population: f64) -> Result<f64> {
    system.infer(damage, accessibility, population)
}
