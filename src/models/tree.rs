use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

use super::Estimator;
use crate::config::TreeParams;
use crate::error::{Result, TadpoleError};

/// Rozhodovací strom (klasifikácia). Bez pravdepodobnostného výstupu.
pub struct TreeClassifier {
    model: Option<DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>>,
    params: TreeParams,
}

impl TreeClassifier {
    pub fn new(params: TreeParams) -> Self {
        Self {
            model: None,
            params,
        }
    }
}

impl Estimator for TreeClassifier {
    fn get_name(&self) -> &str {
        "Decision Tree"
    }

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()> {
        let mut tree_params = DecisionTreeClassifierParameters::default();
        tree_params.max_depth = Some(self.params.max_depth);
        tree_params.min_samples_split = self.params.min_samples_split;
        tree_params.min_samples_leaf = self.params.min_samples_leaf;

        let y = y.to_vec();
        let model = DecisionTreeClassifier::fit(x, &y, tree_params)
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
