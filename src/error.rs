use thiserror::Error;

use crate::inputs::Inputs;

/// Errors raised while configuring or running the priority model.
#[derive(Debug, Error)]
pub enum Error {
    /// The model definition is inconsistent: bad breakpoints, an unknown
    /// term label, an invalid batch setting...
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A crisp input was NaN or infinite.
    #[error("invalid input for `{variable}`: {value}")]
    InvalidInput { variable: String, value: f64 },

    /// The aggregated output set is empty, so there is no crisp value to
    /// report. Happens when no rule fires.
    #[error("cannot defuzzify: aggregated output set is empty for {inputs}")]
    Defuzzification { inputs: Inputs },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
