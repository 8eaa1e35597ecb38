use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("calibration series is empty")]
    EmptySeries,

    #[error("calibration point {index} begins before its predecessor")]
    Unordered { index: usize },

    #[error("calibration point {index} ends before it begins")]
    InvalidInterval { index: usize },

    #[error("no calibration point ends at or before {start} (window {label})")]
    NoPointBefore {
        label: String,
        start: DateTime<Utc>,
    },

    #[error("no calibration point begins at or after {end} (window {label})")]
    NoPointAfter { label: String, end: DateTime<Utc> },
}
