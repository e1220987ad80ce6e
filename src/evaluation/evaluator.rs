use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::dataset::{FeatureMask, TadpoleDataset};
use crate::error::Result;

/// Štyri skalárne metriky jedného behu.
#[derive(Debug, Clone, Serialize)]
pub struct TrialScores {
    #[serde(rename = "BCA_train")]
    pub bca_train: f64,
    #[serde(rename = "BCA_test")]
    pub bca_test: f64,
    #[serde(rename = "mAUC_train")]
    pub m_auc_train: f64,
    #[serde(rename = "mAUC_test")]
    pub m_auc_test: f64,
}

/// Opakovaná evaluácia klasifikátora: n nezávislých stratifikovaných
/// splitov so seedmi 0..n, fit + skórovanie, zber výsledkov v poradí behov.
///
/// Fail-fast: chyba v ktoromkoľvek behu ukončí celú evaluáciu. Dovtedy
/// nazbierané skóre zostáva v pamäti, ale automaticky sa nič neexportuje.
pub struct Evaluator {
    n_runs: usize,
    test_fraction: f64,
    mask: Option<FeatureMask>,
    scores: Vec<TrialScores>,
}

impl Evaluator {
    pub fn new(n_runs: usize, test_fraction: f64) -> Self {
        Self {
            n_runs,
            test_fraction,
            mask: None,
            scores: Vec::new(),
        }
    }

    /// Zúži feature maticu podľa predpočítanej masky pred každým behom.
    pub fn with_mask(mut self, mask: FeatureMask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn evaluate(&mut self, classifier: &mut Classifier, data: &TadpoleDataset) -> Result<()> {
        info!(
            model = classifier.get_name(),
            n_runs = self.n_runs,
            "spúšťam evaluáciu"
        );
        for run in 0..self.n_runs {
            let mut partition = data.split(run as u64, self.test_fraction)?;
            if let Some(ref mask) = self.mask {
                partition = mask.apply(&partition)?;
            }
            let trial = classifier.fit_predict(&partition)?;
            debug!(
                run,
                bca_test = trial.bca_test,
                m_auc_test = trial.m_auc_test,
                "beh dokončený"
            );
            self.scores.push(trial);
        }
        Ok(())
    }

    pub fn scores(&self) -> &[TrialScores] {
        &self.scores
    }

    /// Export výsledkov do CSV s pevnou hlavičkou
    /// `BCA_train,BCA_test,mAUC_train,mAUC_test`, jeden riadok na beh.
    pub fn export_to_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for trial in &self.scores {
            writer.serialize(trial)?;
        }
        writer.flush().map_err(csv::Error::from)?;
        info!(path = %path.display(), rows = self.scores.len(), "výsledky exportované");
        Ok(())
    }
}
