//! Wrappery nad smartcore estimátormi.
//!
//! Každý wrapper drží nakonfigurované parametre a `Option` s natrénovaným
//! modelom; `fit` propaguje internú chybu estimátora ako `Fit` chybu.
//! Estimátory bez pravdepodobnostného výstupu nechávajú default
//! `predict_proba`, ktorý vracia typovanú `UnsupportedOperation` chybu.

use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{Result, TadpoleError};

pub mod factory;
pub mod forest;
pub mod knn;
pub mod logreg;
pub mod tree;

pub use factory::ModelFactory;
pub use forest::ForestClassifier;
pub use knn::KnnClassifier;
pub use logreg::LogRegClassifier;
pub use tree::TreeClassifier;

/// Jednotné rozhranie estimátora: fit / predict / predict_proba.
pub trait Estimator {
    fn get_name(&self) -> &str;

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()>;

    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u32>>;

    /// Pravdepodobnosti tried po riadkoch; každý riadok sa sčíta na 1.0.
    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let _ = x;
        Err(TadpoleError::UnsupportedOperation {
            model: self.get_name().to_string(),
            operation: "predict_proba",
        })
    }

    fn supports_proba(&self) -> bool {
        false
    }
}
