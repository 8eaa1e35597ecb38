use thiserror::Error;

#[derive(Debug, Error)]
pub enum AveragingError {
    #[error("empty observation table")]
    Empty,

    #[error("no rows with finite energy mean and error")]
    NoEnergyRows,

    #[error("no rows with finite spread mean and error")]
    NoSpreadRows,

    #[error("non-positive or non-finite luminosity {value} in row {index}")]
    BadLuminosity { index: usize, value: f64 },

    #[error("optimizer failed: {0}")]
    Optimizer(String),

    #[error("fit did not converge: {reason}")]
    NotConverged { reason: String },

    #[error("curvature at the minimum is not positive definite")]
    BadCurvature,
}
