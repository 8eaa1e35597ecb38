mod observation;
mod provenance;
mod summary;
mod window;

pub use observation::Observation;
pub use provenance::Provenance;
pub use summary::{AveragedResult, NearestEstimate};
pub use window::PointWindow;
