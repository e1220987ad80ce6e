//! Jednotný wrapper nad estimátorom: fit, predikcie a obe metriky.

use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::config::ClassifierConfig;
use crate::dataset::Partition;
use crate::evaluation::metrics::{balanced_accuracy, macro_ovo_auc};
use crate::evaluation::TrialScores;
use crate::error::Result;
use crate::models::{Estimator, ModelFactory};

/// Výstup predikcie: tvrdé labely alebo pravdepodobnosti po triedach.
pub enum Prediction {
    Labels(Vec<u32>),
    Probabilities(DenseMatrix<f64>),
}

pub struct Classifier {
    model: Box<dyn Estimator>,
}

impl Classifier {
    pub fn new(model: Box<dyn Estimator>) -> Self {
        Self { model }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(ModelFactory::create(config))
    }

    pub fn get_name(&self) -> &str {
        self.model.get_name()
    }

    pub fn supports_proba(&self) -> bool {
        self.model.supports_proba()
    }

    pub fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()> {
        self.model.fit(x, y)
    }

    /// Tvrdé predikcie alebo pravdepodobnosti podľa `want_prob`.
    /// Estimátor bez pravdepodobnostného výstupu vráti typovanú chybu.
    pub fn predict(&self, x: &DenseMatrix<f64>, want_prob: bool) -> Result<Prediction> {
        if want_prob {
            Ok(Prediction::Probabilities(self.model.predict_proba(x)?))
        } else {
            Ok(Prediction::Labels(self.model.predict(x)?))
        }
    }

    /// Balanced accuracy na zadaných dátach.
    pub fn bca(&self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<f64> {
        let y_pred = self.model.predict(x)?;
        Ok(balanced_accuracy(y, &y_pred))
    }

    /// Macro one-vs-one AUC na zadaných dátach; vyžaduje predict_proba.
    pub fn m_auc(&self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<f64> {
        let proba = self.model.predict_proba(x)?;
        macro_ovo_auc(y, &proba)
    }

    /// Jednotka práce jedného behu: fit + obe metriky na oboch častiach.
    pub fn fit_predict(&mut self, partition: &Partition) -> Result<TrialScores> {
        self.fit(&partition.x_train, &partition.y_train)?;
        let bca_train = self.bca(&partition.x_train, &partition.y_train)?;
        let bca_test = self.bca(&partition.x_test, &partition.y_test)?;
        let m_auc_train = self.m_auc(&partition.x_train, &partition.y_train)?;
        let m_auc_test = self.m_auc(&partition.x_test, &partition.y_test)?;
        Ok(TrialScores {
            bca_train,
            bca_test,
            m_auc_train,
            m_auc_test,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogRegParams, TreeParams};
    use crate::error::TadpoleError;

    fn partition() -> Partition {
        let mut train_rows = Vec::new();
        let mut y_train = Vec::new();
        for i in 0..60 {
            let class = (i % 3) as u32;
            let jitter = (i as f64 % 10.0) * 0.01;
            train_rows.push(vec![class as f64 + jitter, (2 - class) as f64]);
            y_train.push(class);
        }
        let mut test_rows = Vec::new();
        let mut y_test = Vec::new();
        for i in 0..15 {
            let class = (i % 3) as u32;
            test_rows.push(vec![class as f64 + 0.05, (2 - class) as f64]);
            y_test.push(class);
        }
        Partition {
            x_train: DenseMatrix::from_2d_vec(&train_rows).unwrap(),
            x_test: DenseMatrix::from_2d_vec(&test_rows).unwrap(),
            y_train,
            y_test,
        }
    }

    #[test]
    fn fit_predict_returns_four_scores_in_unit_interval() {
        let mut clf =
            Classifier::from_config(&ClassifierConfig::LogisticRegression(LogRegParams::default()));
        let scores = clf.fit_predict(&partition()).unwrap();
        for value in [
            scores.bca_train,
            scores.bca_test,
            scores.m_auc_train,
            scores.m_auc_test,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        // separovateľné dáta, tréningová BCA musí byť vysoká
        assert!(scores.bca_train > 0.8);
    }

    #[test]
    fn m_auc_on_tree_is_unsupported_operation() {
        let part = partition();
        let mut clf =
            Classifier::from_config(&ClassifierConfig::DecisionTree(TreeParams::default()));
        clf.fit(&part.x_train, &part.y_train).unwrap();
        assert!(matches!(
            clf.m_auc(&part.x_train, &part.y_train).unwrap_err(),
            TadpoleError::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn predict_with_probabilities_respects_capability() {
        let part = partition();
        let mut clf =
            Classifier::from_config(&ClassifierConfig::DecisionTree(TreeParams::default()));
        clf.fit(&part.x_train, &part.y_train).unwrap();

        assert!(matches!(
            clf.predict(&part.x_test, false).unwrap(),
            Prediction::Labels(_)
        ));
        assert!(clf.predict(&part.x_test, true).is_err());
    }
}
