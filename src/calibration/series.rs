use crate::calibration::error::LookupError;
use chrono::{DateTime, Utc};

/// One external calibration measurement and the time interval it is valid for.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationPoint {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Calibrated beam energy, MeV.
    pub energy: f64,
    pub energy_err: f64,
    /// Calibrated beam energy spread, MeV.
    pub spread: f64,
    pub spread_err: f64,
}

/// Time-ordered, read-only sequence of calibration measurements.
///
/// Ordering is an input contract of the loader: construction rejects a series
/// whose begin times decrease or whose intervals end before they begin, rather
/// than silently re-sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSeries {
    points: Vec<CalibrationPoint>,
}

impl CalibrationSeries {
    pub fn new(points: Vec<CalibrationPoint>) -> Result<Self, LookupError> {
        for (index, point) in points.iter().enumerate() {
            if point.end < point.begin {
                return Err(LookupError::InvalidInterval { index });
            }
            if index > 0 && point.begin < points[index - 1].begin {
                return Err(LookupError::Unordered { index });
            }
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// The point whose end time is closest to `t` among those ending at or
    /// before `t`. Exact ties resolve to the earliest point in series order.
    pub fn nearest_ending_before(&self, t: DateTime<Utc>) -> Option<&CalibrationPoint> {
        let mut best: Option<&CalibrationPoint> = None;
        for point in &self.points {
            if point.end > t {
                continue;
            }
            match best {
                Some(b) if point.end <= b.end => {}
                _ => best = Some(point),
            }
        }
        best
    }

    /// The point whose begin time is closest to `t` among those beginning at
    /// or after `t`. Exact ties resolve to the earliest point in series order.
    pub fn nearest_beginning_after(&self, t: DateTime<Utc>) -> Option<&CalibrationPoint> {
        let mut best: Option<&CalibrationPoint> = None;
        for point in &self.points {
            if point.begin < t {
                continue;
            }
            match best {
                Some(b) if point.begin >= b.begin => {}
                _ => best = Some(point),
            }
        }
        best
    }
}
