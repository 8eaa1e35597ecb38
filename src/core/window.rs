use chrono::{DateTime, Utc};

/// An energy point's identity and the time span of its run groups.
///
/// `start` is the start time of the first contributing run, `end` the stop time
/// of the last one. The window is what the calibration-based fallback estimator
/// brackets when the point has no direct measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct PointWindow {
    /// Point label, e.g. `scanPhi2024_e509`.
    pub label: String,
    pub first_run: u32,
    pub last_run: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PointWindow {
    pub fn new(
        label: impl Into<String>,
        first_run: u32,
        last_run: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            label: label.into(),
            first_run,
            last_run,
            start,
            end,
        }
    }
}
