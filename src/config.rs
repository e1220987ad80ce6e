//! Konfigurácia experimentu a typované parametre estimátorov.
//!
//! Parametre nie sú dynamický slovník kľúčovaný stringom, ale tagovaný
//! enum s param štruktúrou pre každý druh estimátora; validuje ich serde
//! pri načítaní konfigurácie.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TadpoleError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    pub max_depth: u16,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_trees: u16,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogRegParams {
    /// Sila L2 regularizácie (0.0 = bez regularizácie).
    pub alpha: f64,
}

impl Default for LogRegParams {
    fn default() -> Self {
        Self { alpha: 0.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnParams {
    pub k: usize,
}

impl Default for KnnParams {
    fn default() -> Self {
        Self { k: 3 }
    }
}

/// Typovaná konfigurácia klasifikátora (jeden variant na druh estimátora).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum ClassifierConfig {
    DecisionTree(TreeParams),
    RandomForest(ForestParams),
    LogisticRegression(LogRegParams),
    Knn(KnnParams),
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig::LogisticRegression(LogRegParams::default())
    }
}

/// Pomenované presety hyperparametrov pre CLI.
static PRESETS: Lazy<HashMap<&'static str, ClassifierConfig>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        "tree",
        ClassifierConfig::DecisionTree(TreeParams::default()),
    );
    map.insert(
        "forest",
        ClassifierConfig::RandomForest(ForestParams::default()),
    );
    map.insert(
        "logreg",
        ClassifierConfig::LogisticRegression(LogRegParams::default()),
    );
    map.insert("knn", ClassifierConfig::Knn(KnnParams { k: 7 }));
    map
});

pub fn preset(name: &str) -> Option<ClassifierConfig> {
    PRESETS.get(name).cloned()
}

/// Konfiguračný povrch celého experimentu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub basepath: PathBuf,
    pub filename: String,
    pub n_runs: usize,
    pub test_fraction: f64,
    pub remove_correlated: bool,
    pub mask_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub classifier: ClassifierConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            basepath: PathBuf::from("./tadpole_challenge/"),
            filename: "TADPOLE_D1_D2.csv".to_string(),
            n_runs: 30,
            test_fraction: 0.2,
            remove_correlated: false,
            mask_file: None,
            output: None,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Načíta konfiguráciu z JSON súboru.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| TadpoleError::DataLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ExperimentConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_runs == 0 {
            return Err(TadpoleError::Config("n_runs musí byť aspoň 1".into()));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(TadpoleError::Config(format!(
                "test_fraction musí byť v (0, 1), dostali sme {}",
                self.test_fraction
            )));
        }
        Ok(())
    }

    /// Cesta k vstupnému CSV (basepath + filename).
    pub fn data_path(&self) -> PathBuf {
        self.basepath.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_original_experiment() {
        let config = ExperimentConfig::default();
        assert_eq!(config.n_runs, 30);
        assert_eq!(config.test_fraction, 0.2);
        assert!(!config.remove_correlated);
        assert!(config
            .data_path()
            .ends_with("tadpole_challenge/TADPOLE_D1_D2.csv"));
    }

    #[test]
    fn classifier_config_parses_tagged_variant() {
        let json = r#"{"kind": "decision_tree", "params": {"max_depth": 5}}"#;
        let config: ClassifierConfig = serde_json::from_str(json).unwrap();
        match config {
            ClassifierConfig::DecisionTree(params) => {
                assert_eq!(params.max_depth, 5);
                // neuvedené polia idú z defaultov
                assert_eq!(params.min_samples_split, 2);
            }
            _ => panic!("nesprávny variant"),
        }
    }

    #[test]
    fn unknown_classifier_kind_is_rejected() {
        let json = r#"{"kind": "svm", "params": {}}"#;
        assert!(serde_json::from_str::<ClassifierConfig>(json).is_err());
    }

    #[test]
    fn loads_config_file_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"n_runs": 5, "classifier": {{"kind": "knn", "params": {{"k": 9}}}}}}"#
        )
        .unwrap();
        let config = ExperimentConfig::load(file.path()).unwrap();
        assert_eq!(config.n_runs, 5);
        assert!(matches!(
            config.classifier,
            ClassifierConfig::Knn(KnnParams { k: 9 })
        ));
    }

    #[test]
    fn zero_runs_is_config_error() {
        let config = ExperimentConfig {
            n_runs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            TadpoleError::Config(_)
        ));
    }

    #[test]
    fn presets_cover_all_factory_models() {
        for name in ["tree", "forest", "logreg", "knn"] {
            assert!(preset(name).is_some(), "chýba preset '{}'", name);
        }
        assert!(preset("svm").is_none());
    }
}
