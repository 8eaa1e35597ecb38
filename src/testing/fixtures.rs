use crate::calibration::CalibrationPoint;
use crate::core::Observation;
use chrono::{DateTime, TimeZone, Utc};

/// Instant `seconds` after an arbitrary scan start.
pub fn ts(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

/// Observation with the given energy column and a benign spread column.
pub fn observation(energy_mean: f64, energy_err: f64, luminosity: f64) -> Observation {
    Observation {
        energy_mean,
        energy_err,
        luminosity,
        spread_mean: 1.0,
        spread_err: 0.05,
    }
}

/// `n` identical observations of one energy.
pub fn uniform_observations(
    n: usize,
    energy_mean: f64,
    energy_err: f64,
    luminosity: f64,
) -> Vec<Observation> {
    (0..n)
        .map(|_| observation(energy_mean, energy_err, luminosity))
        .collect()
}

/// Calibration point with typical laser-system uncertainties.
pub fn calibration_point(
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
    energy: f64,
) -> CalibrationPoint {
    CalibrationPoint {
        begin,
        end,
        energy,
        energy_err: 0.01,
        spread: 1.0,
        spread_err: 0.01,
    }
}
