use crate::averaging::error::AveragingError;
use crate::averaging::fit::{FitOptions, fit_likelihood};
use crate::averaging::likelihood::WeightedLikelihood;
use crate::core::{AveragedResult, Observation};
use crate::utils::math;

/// Combines the run-group observations of one energy point into a single
/// estimate of the point's mean energy and energy spread.
///
/// The mean energy comes from the weighted likelihood fit with an extra-spread
/// nuisance parameter; the energy spread is a closed-form inverse-variance
/// average (the spread column needs no overdispersion correction).
pub fn average(observations: &[Observation]) -> Result<AveragedResult, AveragingError> {
    average_with(observations, &FitOptions::default())
}

pub fn average_with(
    observations: &[Observation],
    options: &FitOptions,
) -> Result<AveragedResult, AveragingError> {
    if observations.is_empty() {
        return Err(AveragingError::Empty);
    }
    for (index, obs) in observations.iter().enumerate() {
        if !obs.luminosity.is_finite() || obs.luminosity <= 0.0 {
            return Err(AveragingError::BadLuminosity {
                index,
                value: obs.luminosity,
            });
        }
    }

    let energy_rows: Vec<&Observation> =
        observations.iter().filter(|o| o.has_energy()).collect();
    if energy_rows.is_empty() {
        return Err(AveragingError::NoEnergyRows);
    }

    let likelihood = WeightedLikelihood::new(
        energy_rows.iter().map(|o| o.energy_mean).collect(),
        energy_rows.iter().map(|o| o.energy_err).collect(),
        energy_rows.iter().map(|o| o.luminosity).collect(),
    );
    let fit = fit_likelihood(&likelihood, options)?;

    let (mean_spread, mean_spread_stat_err) = spread_average(observations)?;

    Ok(AveragedResult {
        mean_energy: fit.mean,
        mean_energy_stat_err: fit.mean_err,
        mean_energy_sys_err: fit.sigma,
        mean_spread,
        mean_spread_stat_err,
    })
}

/// Inverse-variance average of the spread column, luminosity-weighted:
/// each row enters with weight `luminosity / spread_err^2`, and the error term
/// normalizes luminosities by their mean so the absolute scale cancels.
fn spread_average(observations: &[Observation]) -> Result<(f64, f64), AveragingError> {
    let rows: Vec<&Observation> = observations.iter().filter(|o| o.has_spread()).collect();
    if rows.is_empty() {
        return Err(AveragingError::NoSpreadRows);
    }

    let luminosities: Vec<f64> = rows.iter().map(|o| o.luminosity).collect();
    let mean_lum = math::mean(&luminosities);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut normalized_denominator = 0.0;
    for obs in &rows {
        let inv_var = obs.luminosity / (obs.spread_err * obs.spread_err);
        numerator += obs.spread_mean * inv_var;
        denominator += inv_var;
        normalized_denominator += inv_var / mean_lum;
    }

    Ok((
        numerator / denominator,
        (1.0 / normalized_denominator).sqrt(),
    ))
}
