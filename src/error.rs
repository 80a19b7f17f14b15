//! Error type shared by the solver and its parameter and output layers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    /// Grid or parameter values outside their valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A time step that cannot advance the clock. The loop would never
    /// terminate, so the run is aborted.
    #[error("Non-positive time step {dt} at step {step}")]
    NonPositiveTimeStep { dt: f64, step: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameters: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl SolverError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
