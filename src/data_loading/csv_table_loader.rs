use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use super::raw_table::RawTable;
use crate::error::{Result, TadpoleError};

/// Loader CSV súborov do surovej stringovej tabuľky.
///
/// TADPOLE CSV obsahuje zmiešané numerické a kategorické stĺpce aj
/// cenzorované hodnoty ("<200", ">1700"), preto sa všetko načítava ako
/// string a parsuje až v preprocessingu.
pub struct CsvTableLoader;

impl CsvTableLoader {
    pub fn new() -> Self {
        Self
    }

    /// Načíta CSV zo súboru.
    pub fn load_from_path(&self, path: &Path) -> Result<RawTable> {
        let text = fs::read_to_string(path).map_err(|source| TadpoleError::DataLoad {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "CSV súbor načítaný");
        self.load_from_string(&text)
    }

    /// Načíta CSV zo stringu.
    pub fn load_from_string(&self, data: &str) -> Result<RawTable> {
        self.validate_format(data)?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() {
            return Err(TadpoleError::Schema("CSV nemá žiadne stĺpce".into()));
        }

        let mut records: Vec<Vec<String>> = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() != headers.len() {
                return Err(TadpoleError::Schema(format!(
                    "riadok {} má {} stĺpcov, očakávaných {}",
                    idx + 1,
                    record.len(),
                    headers.len()
                )));
            }
            records.push(record.iter().map(|v| v.to_string()).collect());
        }

        if records.is_empty() {
            return Err(TadpoleError::Schema("CSV neobsahuje žiadne dáta".into()));
        }

        debug!(rows = records.len(), cols = headers.len(), "CSV sparsované");
        Ok(RawTable::new(headers, records))
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        if data.trim().is_empty() {
            return Err(TadpoleError::Schema("CSV dáta sú prázdne".into()));
        }
        if data.lines().count() < 2 {
            return Err(TadpoleError::Schema(
                "CSV musí obsahovať aspoň hlavičku a jeden riadok dát".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CsvTableLoader {
    fn default() -> Self {
        Self::new()
    }
}
