/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (normalized by `n`, not `n - 1`).
/// Returns NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Error of an inverse-variance combination: `sqrt(1 / sum(1 / sigma_i^2))`.
pub fn inverse_variance_error(sigmas: &[f64]) -> f64 {
    let denom: f64 = sigmas.iter().map(|s| 1.0 / (s * s)).sum();
    (1.0 / denom).sqrt()
}
