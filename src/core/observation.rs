use serde::{Deserialize, Serialize};

/// One run-group's contribution to an energy point: the fitted mean energy with
/// its statistical error, the group's integrated luminosity, and the measured
/// beam energy spread with its error.
///
/// NaN in `energy_mean`/`energy_err` (or in the spread fields) marks the row as
/// missing for the corresponding average. Incomplete rows are dropped before a
/// computation, never filled in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Fitted mean energy of the run group, MeV.
    pub energy_mean: f64,
    /// Statistical error of `energy_mean`, MeV.
    pub energy_err: f64,
    /// Integrated luminosity of the run group; proxy for statistical weight.
    pub luminosity: f64,
    /// Measured energy spread of the run group, MeV.
    pub spread_mean: f64,
    /// Statistical error of `spread_mean`, MeV.
    pub spread_err: f64,
}

impl Observation {
    /// Whether the row can enter the energy average.
    #[inline]
    pub fn has_energy(&self) -> bool {
        self.energy_mean.is_finite() && self.energy_err.is_finite()
    }

    /// Whether the row can enter the spread average.
    #[inline]
    pub fn has_spread(&self) -> bool {
        self.spread_mean.is_finite() && self.spread_err.is_finite()
    }
}
