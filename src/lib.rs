//! Evaluácia klasických ML klasifikátorov na TADPOLE datasete
//! (predikcia progresie Alzheimerovej choroby).
//!
//! Pipeline: surové CSV -> preprocessing -> (X, y, label dict) ->
//! opakované stratifikované splity -> fit + skórovanie -> tabuľka
//! výsledkov -> CSV export.

pub mod classifier;
pub mod config;
pub mod data_loading;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod preprocessing;
pub mod runner;

pub use classifier::{Classifier, Prediction};
pub use config::{ClassifierConfig, ExperimentConfig};
pub use dataset::{FeatureMask, Partition, TadpoleDataset};
pub use error::{Result, TadpoleError};
pub use evaluation::{Evaluator, GridSearch, TrialScores};
pub use models::{Estimator, ModelFactory};
pub use runner::run;
