use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::distance::euclidian::Euclidian;
use smartcore::neighbors::knn_classifier::{KNNClassifier, KNNClassifierParameters};

use super::Estimator;
use crate::config::KnnParams;
use crate::error::{Result, TadpoleError};

/// K-Nearest Neighbors (klasifikácia, euklidovská vzdialenosť).
/// Bez pravdepodobnostného výstupu.
pub struct KnnClassifier {
    model: Option<KNNClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>, Euclidian<f64>>>,
    params: KnnParams,
}

impl KnnClassifier {
    pub fn new(params: KnnParams) -> Self {
        Self {
            model: None,
            params,
        }
    }
}

impl Estimator for KnnClassifier {
    fn get_name(&self) -> &str {
        "K-Nearest Neighbors"
    }

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()> {
        let knn_params = KNNClassifierParameters::default().with_k(self.params.k);
        let y = y.to_vec();
        let model = KNNClassifier::fit(x, &y, knn_params)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_neighbour_recovers_labels() {
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..30 {
            let class = (i % 3) as u32;
            rows.push(vec![class as f64 * 10.0, class as f64 * 10.0]);
            y.push(class);
        }
        let x = DenseMatrix::from_2d_vec(&rows).unwrap();

        let mut clf = KnnClassifier::new(KnnParams { k: 3 });
        clf.fit(&x, &y).unwrap();
        assert_eq!(clf.predict(&x).unwrap(), y);
    }

    #[test]
    fn proba_is_unsupported() {
        let clf = KnnClassifier::new(KnnParams::default());
        assert!(!clf.supports_proba());
    }
}
