use crate::averaging::{self, AveragingError};
use crate::core::{AveragedResult, Observation};
use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Per-point outcome of a batch run: results keyed by point label, failures
/// kept aside so one bad point never blocks the rest of the scan.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub results: BTreeMap<String, AveragedResult>,
    pub failures: Vec<PointFailure>,
}

#[derive(Debug)]
pub struct PointFailure {
    pub label: String,
    pub error: AveragingError,
}

/// Averages every energy point of a scan independently.
pub fn average_points<I>(points: I) -> BatchSummary
where
    I: IntoIterator<Item = (String, Vec<Observation>)>,
{
    let mut summary = BatchSummary::default();
    for (label, observations) in points {
        match averaging::average(&observations) {
            Ok(result) => {
                summary.results.insert(label, result);
            }
            Err(error) => {
                log::warn!("skipping point {label}: {error}");
                summary.failures.push(PointFailure { label, error });
            }
        }
    }
    summary
}

/// Writes a label-to-record map as indented JSON.
pub fn write_results<T: Serialize>(
    path: impl AsRef<Path>,
    results: &BTreeMap<String, T>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("cannot create results file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), results)
        .with_context(|| format!("cannot serialize results to {}", path.display()))?;
    Ok(())
}

/// Reads back a label-to-record map written by [`write_results`].
pub fn read_results<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> anyhow::Result<BTreeMap<String, T>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("cannot open results file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse results file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::uniform_observations;
    use approx::assert_relative_eq;

    #[test]
    fn one_bad_point_does_not_block_the_batch() {
        let points = vec![
            ("scanPhi2018_e505".to_string(), uniform_observations(3, 505.0, 0.1, 1.0)),
            ("scanPhi2018_e509".to_string(), vec![]),
            ("scanPhi2018_e510".to_string(), uniform_observations(2, 510.0, 0.1, 1.0)),
        ];

        let summary = average_points(points);

        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].label, "scanPhi2018_e509");
        assert!(matches!(summary.failures[0].error, AveragingError::Empty));
        assert_relative_eq!(
            summary.results["scanPhi2018_e505"].mean_energy,
            505.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn results_round_trip_through_json() {
        let points = vec![(
            "scanPhi2024_e509".to_string(),
            uniform_observations(4, 509.0, 0.1, 1.5),
        )];
        let summary = average_points(points);
        assert!(summary.failures.is_empty());

        let file = tempfile::NamedTempFile::new().unwrap();
        write_results(file.path(), &summary.results).unwrap();
        let back: BTreeMap<String, AveragedResult> = read_results(file.path()).unwrap();

        assert_eq!(back, summary.results);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = read_results::<AveragedResult>("/nonexistent/results.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/results.json"));
    }
}
