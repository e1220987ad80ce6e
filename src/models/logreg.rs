use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};

use super::Estimator;
use crate::config::LogRegParams;
use crate::error::{Result, TadpoleError};

/// Logistická regresia (multinomiálna pre 3+ tried).
///
/// Smartcore neexponuje predict_proba, preto sa pravdepodobnosti počítajú
/// softmaxom nad natrénovanými koeficientami a interceptom.
pub struct LogRegClassifier {
    model: Option<LogisticRegression<f64, u32, DenseMatrix<f64>, Vec<u32>>>,
    params: LogRegParams,
    n_classes: usize,
}

impl LogRegClassifier {
    pub fn new(params: LogRegParams) -> Self {
        Self {
            model: None,
            params,
            n_classes: 0,
        }
    }

    /// Lineárne skóre triedy `class` pre riadok `row` vstupnej matice.
    /// Koeficienty majú tvar (triedy x príznaky), binárny model má jediný
    /// riadok; intercept je stĺpcový vektor s riadkom na triedu.
    fn class_score(
        coef: &DenseMatrix<f64>,
        intercept: &DenseMatrix<f64>,
        x: &DenseMatrix<f64>,
        row: usize,
        class: usize,
    ) -> f64 {
        let n_features = x.shape().1;
        let mut score = 0.0;
        for j in 0..n_features {
            score += *coef.get((class, j)) * *x.get((row, j));
        }
        score + *intercept.get((class, 0))
    }
}

impl Estimator for LogRegClassifier {
    fn get_name(&self) -> &str {
        "Logistic Regression"
    }

    fn fit(&mut self, x: &DenseMatrix<f64>, y: &[u32]) -> Result<()> {
        let mut lr_params = LogisticRegressionParameters::default();
        lr_params.alpha = self.params.alpha;

        let mut classes: Vec<u32> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        self.n_classes = classes.len();

        let y = y.to_vec();
        let model = LogisticRegression::fit(x, &y, lr_params)
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

    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TadpoleError::NotFitted(self.get_name().to_string()))?;

        let coef = model.coefficients();
        let intercept = model.intercept();
        let rows = x.shape().0;
        let n_features = x.shape().1;

        let binary = self.n_classes == 2;
        let expected_rows = if binary { 1 } else { self.n_classes };
        if coef.shape() != (expected_rows, n_features) {
            return Err(TadpoleError::Fit(format!(
                "koeficienty majú tvar {:?}, očakávaný ({}, {})",
                coef.shape(),
                expected_rows,
                n_features
            )));
        }
        let mut proba_rows: Vec<Vec<f64>> = Vec::with_capacity(rows);
        for i in 0..rows {
            if binary {
                // binárny model má jedinú sadu koeficientov, stačí sigmoid
                let z = Self::class_score(coef, intercept, x, i, 0);
                let p1 = 1.0 / (1.0 + (-z).exp());
                proba_rows.push(vec![1.0 - p1, p1]);
                continue;
            }

            let scores: Vec<f64> = (0..self.n_classes)
                .map(|c| Self::class_score(coef, intercept, x, i, c))
                .collect();

            // softmax so stabilizáciou maximom
            let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
            let sum: f64 = exp.iter().sum();
            proba_rows.push(exp.iter().map(|e| e / sum).collect());
        }

        DenseMatrix::from_2d_vec(&proba_rows)
            .map_err(|e| TadpoleError::Fit(format!("matica pravdepodobností: {}", e)))
    }

    fn supports_proba(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_class_data() -> (DenseMatrix<f64>, Vec<u32>) {
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..90 {
            let class = (i % 3) as u32;
            let jitter = (i as f64 % 10.0) * 0.01;
            rows.push(vec![class as f64 + jitter, (2 - class) as f64 - jitter]);
            y.push(class);
        }
        (DenseMatrix::from_2d_vec(&rows).unwrap(), y)
    }

    #[test]
    fn predicts_separable_three_classes() {
        let (x, y) = three_class_data();
        let mut clf = LogRegClassifier::new(LogRegParams::default());
        clf.fit(&x, &y).unwrap();
        let pred = clf.predict(&x).unwrap();
        let correct = pred.iter().zip(&y).filter(|(p, t)| p == t).count();
        assert!(correct >= 80, "len {} z 90 správne", correct);
    }

    #[test]
    fn proba_rows_sum_to_one() {
        let (x, y) = three_class_data();
        let mut clf = LogRegClassifier::new(LogRegParams::default());
        clf.fit(&x, &y).unwrap();
        let proba = clf.predict_proba(&x).unwrap();
        assert_eq!(proba.shape(), (90, 3));
        for i in 0..proba.shape().0 {
            let sum: f64 = (0..3).map(|j| *proba.get((i, j))).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
            for j in 0..3 {
                assert!((0.0..=1.0).contains(proba.get((i, j))));
            }
        }
    }

    #[test]
    fn proba_matches_predict_for_square_coefficient_matrix() {
        // 3 triedy a presne 3 príznaky - tvar koeficientov je štvorcový
        // a poradie tried v riadkoch sa nesmie zameniť s príznakmi
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..90 {
            let class = (i % 3) as u32;
            let jitter = (i as f64 % 10.0) * 0.01;
            rows.push(vec![
                class as f64 + jitter,
                (2 - class) as f64 - jitter,
                if class == 1 { 1.0 } else { 0.0 },
            ]);
            y.push(class);
        }
        let x = DenseMatrix::from_2d_vec(&rows).unwrap();

        let mut clf = LogRegClassifier::new(LogRegParams::default());
        clf.fit(&x, &y).unwrap();
        let proba = clf.predict_proba(&x).unwrap();
        assert_eq!(proba.shape(), (90, 3));

        let pred = clf.predict(&x).unwrap();
        for i in 0..90 {
            let sum: f64 = (0..3).map(|j| *proba.get((i, j))).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-9);

            // argmax pravdepodobností musí sedieť s tvrdou predikciou
            let argmax = (0..3u32)
                .max_by(|&a, &b| {
                    proba
                        .get((i, a as usize))
                        .partial_cmp(proba.get((i, b as usize)))
                        .unwrap()
                })
                .unwrap();
            assert_eq!(argmax, pred[i]);
        }
    }

    #[test]
    fn supports_probability_output() {
        let clf = LogRegClassifier::new(LogRegParams::default());
        assert!(clf.supports_proba());
    }
}
