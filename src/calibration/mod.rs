mod error;
mod nearest;
mod series;

pub use error::LookupError;
pub use nearest::{NearestOptions, estimate_from_nearest, estimate_from_nearest_with};
pub use series::{CalibrationPoint, CalibrationSeries};
