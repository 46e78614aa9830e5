//! Scenario batch configuration.

use std::ops::Range;

use crate::error::{Error, Result};

/// What to do with a scenario whose output set is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Record a score of 0 and carry on. The substitution is counted in
    /// the report and logged.
    #[default]
    Zero,
    /// Abort the batch with the defuzzification error.
    Propagate,
}

/// Configuration for a [`ScenarioBatch`](super::ScenarioBatch) run.
///
/// # Examples
///
/// ```
/// use fuzzy_priority::scenario::{FallbackPolicy, ScenarioConfig};
///
/// let config = ScenarioConfig::default()
///     .with_samples(500)
///     .with_seed(7)
///     .with_fallback(FallbackPolicy::Propagate);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    /// Number of random scenarios to evaluate.
    pub samples: usize,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Inputs are drawn uniformly from this half-open range.
    pub input_range: Range<f64>,

    /// Inputs are rounded to this many decimals before inference.
    /// `None` keeps the raw draw.
    pub input_decimals: Option<u32>,

    /// Decimals kept on the recorded score.
    pub score_decimals: u32,

    pub fallback: FallbackPolicy,

    /// Evaluate scenarios on the rayon pool. Needs the `parallel` feature,
    /// ignored otherwise. Results are identical either way.
    pub parallel: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            seed: Some(42),
            input_range: 0.0..10.0,
            input_decimals: Some(1),
            score_decimals: 2,
            fallback: FallbackPolicy::default(),
            parallel: false,
        }
    }
}

impl ScenarioConfig {
    pub fn with_samples(mut self, n: usize) -> Self {
        self.samples = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    pub fn with_input_range(mut self, range: Range<f64>) -> Self {
        self.input_range = range;
        self
    }

    pub fn with_input_decimals(mut self, decimals: Option<u32>) -> Self {
        self.input_decimals = decimals;
        self
    }

    pub fn with_score_decimals(mut self, decimals: u32) -> Self {
        self.score_decimals = decimals;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(Error::config("samples must be positive"));
        }

        let Range { start, end } = self.input_range;
        if !(start.is_finite() && end.is_finite()) || start >= end {
            return Err(Error::config(format!("input_range must be finite and non-empty, got {start}..{end}")));
        }
        if self.input_decimals.is_some_and(|d| d > 15) || self.score_decimals > 15 {
            return Err(Error::config("at most 15 decimals can be kept"));
        }

        Ok(())
    }
}
