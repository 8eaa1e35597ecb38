use crate::calibration::error::LookupError;
use crate::calibration::series::{CalibrationPoint, CalibrationSeries};
use crate::core::{NearestEstimate, PointWindow, Provenance};
use crate::utils::math;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DEFAULT_UNCERTAINTY_FLOOR: f64 = 1e-3;

fn default_uncertainty_floor() -> f64 {
    DEFAULT_UNCERTAINTY_FLOOR
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NearestOptions {
    /// Reported calibration uncertainties at or below this value (same units
    /// as the measurement) are clamped up to it before the inverse-variance
    /// combination. A near-zero quoted uncertainty is treated as untrustworthy,
    /// not as a true zero-variance measurement.
    #[serde(default = "default_uncertainty_floor")]
    #[schemars(
        title = "Uncertainty Floor",
        description = "Lower clamp for calibration uncertainties, MeV",
        default = "default_uncertainty_floor"
    )]
    pub uncertainty_floor: f64,
}

impl Default for NearestOptions {
    fn default() -> Self {
        Self {
            uncertainty_floor: DEFAULT_UNCERTAINTY_FLOOR,
        }
    }
}

/// Estimates an energy point from the two calibration measurements bracketing
/// its run window: the one ending nearest before the window start and the one
/// beginning nearest after the window end.
///
/// The estimate carries no luminosity and is tagged [`Provenance::Indirect`] so
/// downstream combination can exclude or down-weight it.
pub fn estimate_from_nearest(
    window: &PointWindow,
    series: &CalibrationSeries,
) -> Result<NearestEstimate, LookupError> {
    estimate_from_nearest_with(window, series, &NearestOptions::default())
}

pub fn estimate_from_nearest_with(
    window: &PointWindow,
    series: &CalibrationSeries,
    options: &NearestOptions,
) -> Result<NearestEstimate, LookupError> {
    if series.is_empty() {
        return Err(LookupError::EmptySeries);
    }

    let before = series
        .nearest_ending_before(window.start)
        .ok_or_else(|| LookupError::NoPointBefore {
            label: window.label.clone(),
            start: window.start,
        })?;
    let after = series
        .nearest_beginning_after(window.end)
        .ok_or_else(|| LookupError::NoPointAfter {
            label: window.label.clone(),
            end: window.end,
        })?;

    Ok(combine(window, before, after, options.uncertainty_floor))
}

fn combine(
    window: &PointWindow,
    before: &CalibrationPoint,
    after: &CalibrationPoint,
    floor: f64,
) -> NearestEstimate {
    let before_energy_err = regularize(before.energy_err, floor);
    let after_energy_err = regularize(after.energy_err, floor);
    let before_spread_err = regularize(before.spread_err, floor);
    let after_spread_err = regularize(after.spread_err, floor);

    NearestEstimate {
        energy_point: window.label.clone(),
        first_run: window.first_run,
        last_run: window.last_run,
        mean_energy: (before.energy + after.energy) / 2.0,
        mean_energy_stat_err: math::inverse_variance_error(&[before_energy_err, after_energy_err]),
        // Disagreement between the bracketing points is the systematic error
        // of the interpolation.
        mean_energy_sys_err: math::population_std(&[before.energy, after.energy]),
        mean_spread: (before.spread + after.spread) / 2.0,
        mean_spread_stat_err: math::inverse_variance_error(&[before_spread_err, after_spread_err]),
        used_lum: 0.0,
        provenance: Provenance::Indirect,
    }
}

fn regularize(uncertainty: f64, floor: f64) -> f64 {
    if uncertainty <= floor {
        log::warn!("calibration uncertainty {uncertainty} clamped to floor {floor}");
        floor
    } else {
        uncertainty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::ts;
    use approx::assert_relative_eq;

    fn point(
        begin_s: i64,
        end_s: i64,
        energy: f64,
        energy_err: f64,
        spread: f64,
        spread_err: f64,
    ) -> CalibrationPoint {
        CalibrationPoint {
            begin: ts(begin_s),
            end: ts(end_s),
            energy,
            energy_err,
            spread,
            spread_err,
        }
    }

    fn window() -> PointWindow {
        PointWindow::new("scanPhi2024_e501", 61210, 61215, ts(100), ts(200))
    }

    fn bracketing_series(before_energy_err: f64) -> CalibrationSeries {
        CalibrationSeries::new(vec![
            point(0, 50, 500.0, before_energy_err, 1.0, 0.01),
            point(250, 300, 502.0, 0.01, 1.2, 0.01),
        ])
        .unwrap()
    }

    #[test]
    fn bracketing_points_are_averaged() {
        let estimate = estimate_from_nearest(&window(), &bracketing_series(0.01)).unwrap();

        assert_relative_eq!(estimate.mean_energy, 501.0, epsilon = 1e-12);
        assert_relative_eq!(estimate.mean_spread, 1.1, epsilon = 1e-12);
        // Population std of {500, 502}.
        assert_relative_eq!(estimate.mean_energy_sys_err, 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            estimate.mean_energy_stat_err,
            (1.0f64 / 20000.0).sqrt(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            estimate.mean_spread_stat_err,
            (1.0f64 / 20000.0).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(estimate.used_lum, 0.0);
        assert_eq!(estimate.provenance, Provenance::Indirect);
        assert_eq!(estimate.energy_point, "scanPhi2024_e501");
        assert_eq!(estimate.first_run, 61210);
        assert_eq!(estimate.last_run, 61215);
    }

    #[test]
    fn zero_uncertainty_is_clamped_to_the_floor() {
        let estimate = estimate_from_nearest(&window(), &bracketing_series(0.0)).unwrap();

        // Exactly the formula with 1e-3 substituted for the zero.
        let expected = (1.0 / (1.0 / 1e-3f64.powi(2) + 1.0 / 0.01f64.powi(2))).sqrt();
        assert_relative_eq!(estimate.mean_energy_stat_err, expected, epsilon = 1e-15);
    }

    #[test]
    fn custom_floor_is_honored() {
        let options = NearestOptions {
            uncertainty_floor: 0.5,
        };
        let estimate =
            estimate_from_nearest_with(&window(), &bracketing_series(0.01), &options).unwrap();

        // Both energy errors sit below the raised floor.
        let expected = (1.0 / (2.0 / 0.25f64)).sqrt();
        assert_relative_eq!(estimate.mean_energy_stat_err, expected, epsilon = 1e-15);
    }

    #[test]
    fn empty_series_fails() {
        let series = CalibrationSeries::new(vec![]).unwrap();
        assert!(matches!(
            estimate_from_nearest(&window(), &series),
            Err(LookupError::EmptySeries)
        ));
    }

    #[test]
    fn missing_before_side_fails() {
        let series = CalibrationSeries::new(vec![point(250, 300, 502.0, 0.01, 1.2, 0.01)]).unwrap();
        match estimate_from_nearest(&window(), &series) {
            Err(LookupError::NoPointBefore { label, .. }) => {
                assert_eq!(label, "scanPhi2024_e501");
            }
            other => panic!("expected NoPointBefore, got {other:?}"),
        }
    }

    #[test]
    fn missing_after_side_fails() {
        let series = CalibrationSeries::new(vec![point(0, 50, 500.0, 0.01, 1.0, 0.01)]).unwrap();
        assert!(matches!(
            estimate_from_nearest(&window(), &series),
            Err(LookupError::NoPointAfter { .. })
        ));
    }

    #[test]
    fn nearest_of_several_candidates_wins() {
        let series = CalibrationSeries::new(vec![
            point(0, 20, 499.0, 0.01, 0.9, 0.01),
            point(30, 60, 500.0, 0.01, 1.0, 0.01),
            point(250, 300, 502.0, 0.01, 1.2, 0.01),
            point(400, 450, 503.0, 0.01, 1.3, 0.01),
        ])
        .unwrap();
        let estimate = estimate_from_nearest(&window(), &series).unwrap();
        assert_relative_eq!(estimate.mean_energy, 501.0, epsilon = 1e-12);
    }
}
