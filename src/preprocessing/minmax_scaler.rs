use smartcore::linalg::basic::arrays::{Array, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::DataProcessor;

/// MinMax Scaler - lineárne preškáluje stĺpce do rozsahu [0, 1].
///
/// Konštantný stĺpec (min == max) sa mapuje na 0.0; guard je rozdiel
/// menší ako 1e-8, aby delenie nulou nevyrobilo NaN.
pub struct MinMaxScaler {
    skip_columns: Vec<usize>,
    min_vals: Option<Vec<f64>>,
    max_vals: Option<Vec<f64>>,
}

impl MinMaxScaler {
    pub fn new(skip_columns: Vec<usize>) -> Self {
        Self {
            skip_columns,
            min_vals: None,
            max_vals: None,
        }
    }
}

impl DataProcessor for MinMaxScaler {
    fn get_name(&self) -> &str {
        "MinMax Scaler"
    }

    fn fit(&mut self, data: &DenseMatrix<f64>) {
        let (rows, cols) = data.shape();
        let mut min_vals = vec![f64::INFINITY; cols];
        let mut max_vals = vec![f64::NEG_INFINITY; cols];

        for j in 0..cols {
            for i in 0..rows {
                let val = *data.get((i, j));
                if val.is_nan() {
                    continue;
                }
                if val < min_vals[j] {
                    min_vals[j] = val;
                }
                if val > max_vals[j] {
                    max_vals[j] = val;
                }
            }
        }

        self.min_vals = Some(min_vals);
        self.max_vals = Some(max_vals);
    }

    fn transform(&self, data: &DenseMatrix<f64>) -> DenseMatrix<f64> {
        let (rows, cols) = data.shape();
        let mut result = data.clone();

        if let (Some(min_vals), Some(max_vals)) = (&self.min_vals, &self.max_vals) {
            for j in 0..cols.min(min_vals.len()) {
                if self.skip_columns.contains(&j) {
                    continue;
                }
                let range = max_vals[j] - min_vals[j];
                for i in 0..rows {
                    let val = *data.get((i, j));
                    let scaled = if range > 1e-8 {
                        (val - min_vals[j]) / range
                    } else {
                        0.0
                    };
                    result.set((i, j), scaled);
                }
            }
        }

        result
    }
}
