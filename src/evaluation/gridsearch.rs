//! Stratifikovaná k-fold cross-validácia pre výber hyperparametrov.
//!
//! Kandidáti sú typované konfigurácie klasifikátorov; skóre je priemerná
//! validačná balanced accuracy cez foldy. Beží sekvenčne a deterministicky.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

use crate::classifier::Classifier;
use crate::config::ClassifierConfig;
use crate::dataset::extract_rows;
use crate::error::{Result, TadpoleError};

/// Skóre jedného kandidáta.
#[derive(Debug, Clone)]
pub struct GridSearchResult {
    pub config: ClassifierConfig,
    pub mean_bca: f64,
    pub fold_scores: Vec<f64>,
}

pub struct GridSearch {
    k: usize,
    seed: u64,
}

impl GridSearch {
    pub fn new(k: usize, seed: u64) -> Self {
        Self { k, seed }
    }

    /// Ohodnotí všetkých kandidátov a vráti ich zoradených zostupne podľa
    /// priemernej validačnej BCA (najlepší prvý).
    pub fn search(
        &self,
        candidates: &[ClassifierConfig],
        x: &DenseMatrix<f64>,
        y: &[u32],
    ) -> Result<Vec<GridSearchResult>> {
        if candidates.is_empty() {
            return Err(TadpoleError::Config("grid search bez kandidátov".into()));
        }
        if self.k < 2 {
            return Err(TadpoleError::Config(format!(
                "k-fold vyžaduje k >= 2, dostali sme {}",
                self.k
            )));
        }

        let folds = self.stratified_folds(y)?;
        let mut results = Vec::with_capacity(candidates.len());

        for config in candidates {
            let mut fold_scores = Vec::with_capacity(self.k);
            for fold in 0..self.k {
                let val_idx = &folds[fold];
                let train_idx: Vec<usize> = folds
                    .iter()
                    .enumerate()
                    .filter(|(f, _)| *f != fold)
                    .flat_map(|(_, idxs)| idxs.iter().copied())
                    .collect();

                let x_train = extract_rows(x, &train_idx)?;
                let x_val = extract_rows(x, val_idx)?;
                let y_train: Vec<u32> = train_idx.iter().map(|&i| y[i]).collect();
                let y_val: Vec<u32> = val_idx.iter().map(|&i| y[i]).collect();

                let mut classifier = Classifier::from_config(config);
                classifier.fit(&x_train, &y_train)?;
                fold_scores.push(classifier.bca(&x_val, &y_val)?);
            }

            let mean_bca = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
            debug!(?config, mean_bca, "kandidát ohodnotený");
            results.push(GridSearchResult {
                config: config.clone(),
                mean_bca,
                fold_scores,
            });
        }

        results.sort_by(|a, b| {
            b.mean_bca
                .partial_cmp(&a.mean_bca)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(results)
    }

    /// Rozdelí indexy do k foldov so zachovaním podielu tried: každá
    /// trieda sa deterministicky premieša a rozdá round-robin.
    fn stratified_folds(&self, y: &[u32]) -> Result<Vec<Vec<usize>>> {
        if y.len() < self.k {
            return Err(TadpoleError::Config(format!(
                "{} vzoriek sa nedá rozdeliť do {} foldov",
                y.len(),
                self.k
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut by_class: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            by_class.entry(label).or_default().push(i);
        }

        let mut folds = vec![Vec::new(); self.k];
        for (_, mut indices) in by_class {
            indices.shuffle(&mut rng);
            for (pos, idx) in indices.into_iter().enumerate() {
                folds[pos % self.k].push(idx);
            }
        }
        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KnnParams, LogRegParams};

    fn data() -> (DenseMatrix<f64>, Vec<u32>) {
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..90 {
            let class = (i % 3) as u32;
            let jitter = (i as f64 % 9.0) * 0.02;
            rows.push(vec![class as f64 + jitter, (2 - class) as f64]);
            y.push(class);
        }
        (DenseMatrix::from_2d_vec(&rows).unwrap(), y)
    }

    #[test]
    fn ranks_candidates_by_mean_validation_bca() {
        let (x, y) = data();
        let candidates = vec![
            ClassifierConfig::Knn(KnnParams { k: 3 }),
            ClassifierConfig::LogisticRegression(LogRegParams::default()),
        ];
        let results = GridSearch::new(3, 0).search(&candidates, &x, &y).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].mean_bca >= results[1].mean_bca);
        for result in &results {
            assert_eq!(result.fold_scores.len(), 3);
            assert!((0.0..=1.0).contains(&result.mean_bca));
        }
    }

    #[test]
    fn folds_preserve_class_balance() {
        let (_, y) = data();
        let folds = GridSearch::new(3, 0).stratified_folds(&y).unwrap();
        for fold in &folds {
            assert_eq!(fold.len(), 30);
            for class in 0..3u32 {
                let count = fold.iter().filter(|&&i| y[i] == class).count();
                assert_eq!(count, 10);
            }
        }
    }

    #[test]
    fn empty_candidate_list_is_config_error() {
        let (x, y) = data();
        assert!(matches!(
            GridSearch::new(3, 0).search(&[], &x, &y).unwrap_err(),
            TadpoleError::Config(_)
        ));
    }
}
