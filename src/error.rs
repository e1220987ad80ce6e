use std::path::PathBuf;

use thiserror::Error;

/// Chybová taxonómia celého pipeline.
///
/// Všetky chyby sú fatálne pre aktuálnu operáciu a propagujú sa okamžite
/// volajúcemu. Žiadne retry, žiadne čiastočné výsledky.
#[derive(Debug, Error)]
pub enum TadpoleError {
    /// Chýbajúci povinný stĺpec alebo hodnota, ktorá sa nedá interpretovať.
    #[error("chyba schémy: {0}")]
    Schema(String),

    /// Súbor sa nepodarilo otvoriť alebo prečítať.
    #[error("nepodarilo sa načítať '{path}': {source}")]
    DataLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chyba pri spracovaní CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("chyba pri spracovaní JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Model nepodporuje požadovanú operáciu (napr. predict_proba).
    #[error("model '{model}' nepodporuje operáciu '{operation}'")]
    UnsupportedOperation {
        model: String,
        operation: &'static str,
    },

    /// Interná chyba estimátora počas fit; správa sa propaguje nezmenená.
    #[error("tréning modelu zlyhal: {0}")]
    Fit(String),

    #[error("model '{0}' ešte nebol natrénovaný")]
    NotFitted(String),

    #[error("neplatná konfigurácia: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TadpoleError>;
