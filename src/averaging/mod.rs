mod averager;
mod error;
mod fit;
mod likelihood;

pub use averager::{average, average_with};
pub use error::AveragingError;
pub use fit::{FitOptions, LikelihoodFit, fit_likelihood};
pub use likelihood::WeightedLikelihood;
