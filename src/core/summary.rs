use crate::core::Provenance;
use serde::{Deserialize, Serialize};

/// Combined estimate for one energy point, produced by the likelihood averager.
///
/// `mean_energy_sys_err` is the fitted extra-spread parameter: the
/// point-to-point scatter the quoted statistical errors do not explain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedResult {
    pub mean_energy: f64,
    pub mean_energy_stat_err: f64,
    pub mean_energy_sys_err: f64,
    pub mean_spread: f64,
    pub mean_spread_stat_err: f64,
}

/// Energy-point estimate interpolated from the two calibration measurements
/// bracketing the point's run window.
///
/// `used_lum` is 0 by convention: the estimate has no direct luminosity, and the
/// `Indirect` provenance lets downstream combination treat it accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestEstimate {
    pub energy_point: String,
    pub first_run: u32,
    pub last_run: u32,
    pub mean_energy: f64,
    pub mean_energy_stat_err: f64,
    pub mean_energy_sys_err: f64,
    pub mean_spread: f64,
    pub mean_spread_stat_err: f64,
    pub used_lum: f64,
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averaged_result_json_round_trip_keeps_precision() {
        let r = AveragedResult {
            mean_energy: 508.97712345,
            mean_energy_stat_err: 0.0123456789,
            mean_energy_sys_err: 0.0345678901,
            mean_spread: 1.1034567,
            mean_spread_stat_err: 0.00456789,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: AveragedResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn nearest_estimate_json_round_trip() {
        let e = NearestEstimate {
            energy_point: "scanPhi2024_e509".into(),
            first_run: 61210,
            last_run: 61215,
            mean_energy: 501.0,
            mean_energy_stat_err: 0.00707,
            mean_energy_sys_err: 1.0,
            mean_spread: 1.1,
            mean_spread_stat_err: 0.00707,
            used_lum: 0.0,
            provenance: Provenance::Indirect,
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: NearestEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
