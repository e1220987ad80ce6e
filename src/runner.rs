//! Tenká kompozícia dataset + klasifikátor + evaluátor pre jedno spustenie.

use tracing::info;

use crate::classifier::Classifier;
use crate::config::ExperimentConfig;
use crate::dataset::{FeatureMask, TadpoleDataset};
use crate::error::Result;
use crate::evaluation::{Evaluator, TrialScores};

/// Spustí celý experiment podľa konfigurácie a vráti skóre všetkých behov.
/// Ak je nastavený `output`, výsledky sa zároveň exportujú do CSV.
pub fn run(config: &ExperimentConfig) -> Result<Vec<TrialScores>> {
    config.validate()?;

    let dataset = TadpoleDataset::load(&config.data_path(), config.remove_correlated)?;
    let mut classifier = Classifier::from_config(&config.classifier);

    let mut evaluator = Evaluator::new(config.n_runs, config.test_fraction);
    if let Some(ref mask_path) = config.mask_file {
        evaluator = evaluator.with_mask(FeatureMask::load(mask_path)?);
    }

    evaluator.evaluate(&mut classifier, &dataset)?;

    if let Some(ref output) = config.output {
        evaluator.export_to_csv(output)?;
    }

    info!(runs = evaluator.scores().len(), "experiment dokončený");
    Ok(evaluator.scores().to_vec())
}
