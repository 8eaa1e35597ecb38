use crate::utils::math;

/// Weighted Gaussian negative log-likelihood for a set of independent
/// measurements of one quantity.
///
/// Each observation i contributes a Gaussian centered at the true mean with
/// variance `sigma_i^2 + sigma^2`, where `sigma` is a free extra-spread
/// parameter absorbing dispersion the quoted statistical errors do not explain.
/// Weights are divided by their arithmetic mean at construction, so only the
/// relative weighting between observations matters.
///
/// The object holds the fixed data; evaluation is pure and takes the two free
/// parameters as arguments.
#[derive(Debug, Clone)]
pub struct WeightedLikelihood {
    means: Vec<f64>,
    sigmas: Vec<f64>,
    weights: Vec<f64>,
}

impl WeightedLikelihood {
    /// `means`, `sigmas` and `weights` must have equal, nonzero length; the
    /// caller validates weights are positive and finite.
    pub fn new(means: Vec<f64>, sigmas: Vec<f64>, weights: Vec<f64>) -> Self {
        debug_assert_eq!(means.len(), sigmas.len());
        debug_assert_eq!(means.len(), weights.len());
        debug_assert!(!means.is_empty());

        let mean_weight = math::mean(&weights);
        let weights = weights.iter().map(|w| w / mean_weight).collect();
        Self {
            means,
            sigmas,
            weights,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Negative log-likelihood up to an additive constant:
    /// `sum_i w_i * ((mean - m_i)^2 / (2 v_i) + ln(v_i) / 2)` with
    /// `v_i = sigma^2 + sigma_i^2`.
    ///
    /// Even in `sigma`: only `sigma^2` enters, so a search that wanders below
    /// zero sees a mirror image of the positive axis.
    pub fn neg_log_likelihood(&self, mean: f64, sigma: f64) -> f64 {
        let mut total = 0.0;
        for i in 0..self.means.len() {
            let v = sigma * sigma + self.sigmas[i] * self.sigmas[i];
            let d = mean - self.means[i];
            total += self.weights[i] * (d * d / (2.0 * v) + 0.5 * v.ln());
        }
        total
    }

    /// Analytic gradient `[d/d mean, d/d sigma]` of [`neg_log_likelihood`].
    ///
    /// [`neg_log_likelihood`]: WeightedLikelihood::neg_log_likelihood
    pub fn gradient(&self, mean: f64, sigma: f64) -> [f64; 2] {
        let mut g_mean = 0.0;
        let mut g_sigma = 0.0;
        for i in 0..self.means.len() {
            let v = sigma * sigma + self.sigmas[i] * self.sigmas[i];
            let d = mean - self.means[i];
            g_mean += self.weights[i] * d / v;
            g_sigma += self.weights[i] * sigma * (1.0 / v - d * d / (v * v));
        }
        [g_mean, g_sigma]
    }

    /// Starting point for the minimization: the unweighted mean of the
    /// observation means and their population standard deviation.
    pub fn seed(&self) -> (f64, f64) {
        (math::mean(&self.means), math::population_std(&self.means))
    }
}
