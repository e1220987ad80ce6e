use super::{Estimator, ForestClassifier, KnnClassifier, LogRegClassifier, TreeClassifier};
use crate::config::ClassifierConfig;

/// Factory pre vytváranie estimátorov z typovanej konfigurácie.
pub struct ModelFactory;

impl ModelFactory {
    /// Vytvorí estimátor podľa konfiguračného variantu. Parametre sú
    /// validované už pri deserializácii konfigurácie, nie za behu.
    pub fn create(config: &ClassifierConfig) -> Box<dyn Estimator> {
        match config {
            ClassifierConfig::DecisionTree(params) => Box::new(TreeClassifier::new(params.clone())),
            ClassifierConfig::RandomForest(params) => {
                Box::new(ForestClassifier::new(params.clone()))
            }
            ClassifierConfig::LogisticRegression(params) => {
                Box::new(LogRegClassifier::new(params.clone()))
            }
            ClassifierConfig::Knn(params) => Box::new(KnnClassifier::new(params.clone())),
        }
    }

    /// Zoznam všetkých dostupných estimátorov.
    pub fn available_models() -> Vec<&'static str> {
        vec!["tree", "forest", "logreg", "knn"]
    }
}
