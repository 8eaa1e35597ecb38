use thiserror::Error;

/// Two runs belong to the same calibration group when their calibration
/// energies agree within this tolerance, MeV.
const CALIBRATION_MATCH_TOL: f64 = 1e-5;

/// One run with the calibration (laser-system) energy recorded for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunCalibration {
    pub run: u32,
    /// Calibration energy of the run, MeV.
    pub energy: f64,
    pub energy_err: f64,
}

/// A contiguous set of runs analyzed together; the unit that one
/// `(mean, error)` observation is fitted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunGroup {
    runs: Vec<u32>,
}

impl RunGroup {
    pub fn runs(&self) -> &[u32] {
        &self.runs
    }

    pub fn first_run(&self) -> u32 {
        self.runs[0]
    }

    pub fn last_run(&self) -> u32 {
        *self.runs.last().expect("groups are never empty")
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum GroupingError {
    #[error("no runs to group")]
    Empty,

    #[error("max_group_size must be > 0")]
    ZeroGroupSize,
}

/// Partitions runs (in run order) into contiguous groups sharing one
/// calibration energy, then splits each into chunks of at most
/// `max_group_size` runs, remainder last.
pub fn group_runs(
    measurements: &[RunCalibration],
    max_group_size: usize,
) -> Result<Vec<RunGroup>, GroupingError> {
    if measurements.is_empty() {
        return Err(GroupingError::Empty);
    }
    if max_group_size == 0 {
        return Err(GroupingError::ZeroGroupSize);
    }

    let mut same_energy: Vec<Vec<u32>> = vec![vec![measurements[0].run]];
    for pair in measurements.windows(2) {
        if (pair[1].energy - pair[0].energy).abs() < CALIBRATION_MATCH_TOL {
            same_energy.last_mut().unwrap().push(pair[1].run);
        } else {
            same_energy.push(vec![pair[1].run]);
        }
    }

    let mut groups = Vec::new();
    for block in same_energy {
        for chunk in block.chunks(max_group_size) {
            groups.push(RunGroup {
                runs: chunk.to_vec(),
            });
        }
    }
    Ok(groups)
}
