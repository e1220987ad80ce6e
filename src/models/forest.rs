use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::Estimator;
use crate::config::ForestParams;
use crate::error::{Result, TadpoleError};

/// Random Forest (klasifikácia). Deterministický cez seed v parametroch.
pub struct ForestClassifier {
    model: Option<RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>>,
    params: ForestParams,
}

impl ForestClassifier {
    pub fn new(params: ForestParams) -> Self {
        Self {
            model: None,
            params,
        }
    }
}

impl Estimator for ForestClassifier {
    fn get_name(&self) -> &str {
        "Random Forest"
    }

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()> {
        let mut forest_params = RandomForestClassifierParameters::default();
        forest_params.n_trees = self.params.n_trees;
        forest_params.max_depth = self.params.max_depth;
        forest_params.min_samples_split = self.params.min_samples_split;
        forest_params.min_samples_leaf = self.params.min_samples_leaf;
        forest_params.seed = self.params.seed;

        let y = y.to_vec();
        let model = RandomForestClassifier::fit(x, &y, forest_params)
            .map_err(|e| TadpoleError::Fit(e.to_string()))?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TadpoleError::NotFitted(self.get_name().to_string()))?;
        model.predict(x).map_err(|e| TadpoleError::Fit(e.to_string()))
    }
}
