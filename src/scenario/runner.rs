//! Scenario batch execution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::config::{FallbackPolicy, ScenarioConfig};
use super::summary::Summary;
use super::types::{PriorityLevel, ScenarioRecord};
use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::math::round_to;
use crate::system::PrioritySystem;

/// Result of a scenario batch.
#[derive(Clone, Debug)]
pub struct BatchReport {
    /// One row per scenario, in draw order.
    pub records: Vec<ScenarioRecord>,

    /// Scenarios whose score was replaced by the fallback.
    pub fallbacks: usize,
}

impl BatchReport {
    /// Descriptive statistics of the numeric columns, `None` for an empty report.
    pub fn summary(&self) -> Option<Summary> {
        Summary::from_records(&self.records)
    }
}

/// Draws random input triples and runs them through a [`PrioritySystem`].
pub struct ScenarioBatch;

impl ScenarioBatch {
    pub fn run(system: &PrioritySystem, config: &ScenarioConfig) -> Result<BatchReport> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        // Draw everything up front so the sequence does not depend on
        // how the evaluation is scheduled
        let inputs: Vec<Inputs> = (0..config.samples)
            .map(|_| Self::draw(&mut rng, config))
            .collect();

        info!(samples = config.samples, seed = ?config.seed, "running scenario batch");

        let outcomes = evaluate_all(system, &inputs, config.parallel);
        let mut records = Vec::with_capacity(inputs.len());
        let mut fallbacks = 0;

        for (i, (input, outcome)) in inputs.into_iter().zip(outcomes).enumerate() {
            let score = match outcome {
                Ok(score) => score,
                Err(err @ Error::Defuzzification { .. }) if config.fallback == FallbackPolicy::Zero => {
                    warn!(scenario = i + 1, %err, "no rule fired, recording a score of 0");
                    fallbacks += 1;
                    0.
                },
                Err(err) => return Err(err),
            };

            records.push(ScenarioRecord {
                scenario_id: i + 1,
                damage: input.damage,
                accessibility: input.accessibility,
                population: input.population,
                score: round_to(score, config.score_decimals),
                level: PriorityLevel::from_score(score),
            });
        }

        info!(records = records.len(), fallbacks, "scenario batch finished");

        Ok(BatchReport { records, fallbacks })
    }

    fn draw<R: Rng>(rng: &mut R, config: &ScenarioConfig) -> Inputs {
        let mut sample = || {
            let value = rng.random_range(config.input_range.clone());

            match config.input_decimals {
                Some(decimals) => round_to(value, decimals),
                None => value,
            }
        };

        // Field order fixes the draw order
        let damage = sample();
        let accessibility = sample();
        let population = sample();

        Inputs::new(damage, accessibility, population)
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all(system: &PrioritySystem, inputs: &[Inputs], parallel: bool) -> Vec<Result<f64>> {
    use rayon::prelude::*;

    if parallel {
        return inputs.par_iter().map(|i| system.infer_inputs(*i)).collect();
    }

    inputs.iter().map(|i| system.infer_inputs(*i)).collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(system: &PrioritySystem, inputs: &[Inputs], _parallel: bool) -> Vec<Result<f64>> {
    inputs.iter().map(|i| system.infer_inputs(*i)).collect()
}
