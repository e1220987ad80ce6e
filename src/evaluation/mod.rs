pub mod evaluator;
pub mod gridsearch;
pub mod metrics;

pub use evaluator::{Evaluator, TrialScores};
pub use gridsearch::{GridSearch, GridSearchResult};
