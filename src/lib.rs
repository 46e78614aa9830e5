//! Fuzzy disaster-response prioritisation.
//!
//! Three crisp severity inputs (damage, accessibility, population
//! exposure, each on `[0, 10]`) are scored on `[0, 100]` by a Mamdani
//! fuzzy inference system:
//!
//! - [`configure_variables`] defines the triangular membership functions.
//! - [`build_rules`] creates one rule per combination of input terms, each
//!   concluding the priority term chosen by [`severity_heuristic`].
//! - [`infer`] fuzzifies the inputs, fires the rules (min), aggregates them
//!   per output term (max), clips the output terms and takes the centroid.
//!
//! ```
//! use fuzzy_priority::{infer, PrioritySystem};
//!
//! let system = PrioritySystem::standard()?;
//! let score = infer(&system, 5., 5., 5.)?;
//!
//! assert!((score - 60.).abs() < 1e-9);
//! # Ok::<(), fuzzy_priority::Error>(())
//! ```
//!
//! The [`scenario`] module runs seeded batches of random scenarios and
//! [`export`] writes them out.

mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod system;
mod terms;
mod variable;

pub mod export;
pub mod scenario;

pub use error::{Error, Result};
pub use inference::MamdaniInference;
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp};
pub use outputs::Inference;
pub use rules::{build_rules, severity_heuristic, Rule, RuleLabels, RuleSet};
pub use system::{infer, PrioritySystem};
pub use terms::{Term, Triangle};
pub use variable::{
    configure_variables, CurvePoint, LinguisticVariable, MembershipCurve, Variables, MAX_SAMPLES, PRIORITY_TERMS,
};
