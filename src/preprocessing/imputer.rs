use smartcore::linalg::basic::arrays::{Array, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::DataProcessor;

/// Imputer chýbajúcich hodnôt (NaN) priemerom stĺpca.
///
/// Priemery sa počítajú nad celým datasetom ešte pred train/test splitom -
/// zámerné zjednodušenie prevzaté z pôvodného pipeline (leak testovacích
/// štatistík do tréningu je akceptovaný a zdokumentovaný).
pub struct MeanImputer {
    skip_columns: Vec<usize>,
    means: Option<Vec<f64>>,
}

impl MeanImputer {
    /// `skip_columns` - indexy stĺpcov, ktoré sa neimputujú (id subjektu, label).
    pub fn new(skip_columns: Vec<usize>) -> Self {
        Self {
            skip_columns,
            means: None,
        }
    }

    fn column_mean(data: &DenseMatrix<f64>, col: usize) -> f64 {
        let rows = data.shape().0;
        let mut sum = 0.0;
        let mut count = 0usize;
        for row in 0..rows {
            let val = *data.get((row, col));
            if !val.is_nan() {
                sum += val;
                count += 1;
            }
        }
        if count > 0 {
            sum / count as f64
        } else {
            0.0
        }
    }
}

impl DataProcessor for MeanImputer {
    fn get_name(&self) -> &str {
        "Mean Imputer"
    }

    fn fit(&mut self, data: &DenseMatrix<f64>) {
        let cols = data.shape().1;
        let means = (0..cols).map(|j| Self::column_mean(data, j)).collect();
        self.means = Some(means);
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> DenseMatrix<f64> {
        let (rows, cols) = data.shape();
        let mut result = data.clone();

        if let Some(ref means) = self.means {
            for j in 0..cols.min(means.len()) {
                if self.skip_columns.contains(&j) {
                    continue;
                }
                for i in 0..rows {
                    if data.get((i, j)).is_nan() {
                        result.set((i, j), means[j]);
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn replaces_nan_with_column_mean() {
        let data = DenseMatrix::from_2d_vec(&vec![
            vec![1.0, f64::NAN],
            vec![3.0, 250.5],
            vec![f64::NAN, 350.5],
        ])
        .unwrap();

        let mut imputer = MeanImputer::new(vec![]);
        imputer.fit(&data);
        let out = imputer.transform(&data);

        assert_relative_eq!(*out.get((2, 0)), 2.0);
        assert_relative_eq!(*out.get((0, 1)), 300.5);
        // existujúce hodnoty sa nemenia
        assert_relative_eq!(*out.get((1, 1)), 250.5);
    }

    #[test]
    fn skipped_columns_keep_nan() {
        let data = DenseMatrix::from_2d_vec(&vec![vec![f64::NAN, 1.0], vec![2.0, 3.0]]).unwrap();
        let mut imputer = MeanImputer::new(vec![0]);
        imputer.fit(&data);
        let out = imputer.transform(&data);
        assert!(out.get((0, 0)).is_nan());
    }

    #[test]
    fn all_nan_column_becomes_zero() {
        let data = DenseMatrix::from_2d_vec(&vec![vec![f64::NAN], vec![f64::NAN]]).unwrap();
        let mut imputer = MeanImputer::new(vec![]);
        imputer.fit(&data);
        let out = imputer.transform(&data);
        assert_relative_eq!(*out.get((0, 0)), 0.0);
    }
}
