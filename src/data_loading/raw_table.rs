use crate::error::{Result, TadpoleError};

/// Surová tabuľka - hlavičky + riadky stringových hodnôt, jeden riadok
/// na jednu návštevu pacienta. Všetky transformácie vracajú novú tabuľku,
/// pôvodná sa nikdy nemení.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn num_rows(&self) -> usize {
        self.records.len()
    }

    pub fn num_cols(&self) -> usize {
        self.headers.len()
    }

    /// Index stĺpca podľa názvu.
    pub fn col_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Hodnota na pozícii (riadok, stĺpec).
    pub fn value(&self, row: usize, col: usize) -> &str {
        &self.records[row][col]
    }

    /// Reštrikcia na pevný zoznam stĺpcov v zadanom poradí.
    /// Chýbajúci stĺpec je chyba schémy.
    pub fn select_columns(&self, names: &[&str]) -> Result<RawTable> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = self.col_index(name).ok_or_else(|| {
                TadpoleError::Schema(format!("chýbajúci povinný stĺpec '{}'", name))
            })?;
            indices.push(idx);
        }

        let records = self
            .records
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(RawTable::new(
            names.iter().map(|s| s.to_string()).collect(),
            records,
        ))
    }

    /// Odstráni stĺpec podľa názvu (no-op, ak neexistuje).
    pub fn drop_column(&self, name: &str) -> RawTable {
        match self.col_index(name) {
            None => self.clone(),
            Some(idx) => {
                let headers = self
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, h)| h.clone())
                    .collect();
                let records = self
                    .records
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(i, _)| *i != idx)
                            .map(|(_, v)| v.clone())
                            .collect()
                    })
                    .collect();
                RawTable::new(headers, records)
            }
        }
    }

    /// Ponechá len riadky, pre ktoré predikát vráti true.
    pub fn filter_rows<F>(&self, pred: F) -> RawTable
    where
        F: Fn(&[String]) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|row| pred(row))
            .cloned()
            .collect();
        RawTable::new(self.headers.clone(), records)
    }

    /// Aplikuje transformáciu na všetky hodnoty jedného stĺpca.
    pub fn map_column<F>(&self, col: usize, f: F) -> RawTable
    where
        F: Fn(&str) -> String,
    {
        let mut records = self.records.clone();
        for row in &mut records {
            row[col] = f(&row[col]);
        }
        RawTable::new(self.headers.clone(), records)
    }

    /// Hodnoty jedného stĺpca ako vektor.
    pub fn column_values(&self, col: usize) -> Vec<&str> {
        self.records.iter().map(|row| row[col].as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec!["1".into(), "x".into(), "10".into()],
                vec!["2".into(), "y".into(), "20".into()],
            ],
        )
    }

    #[test]
    fn select_columns_reorders() {
        let t = table().select_columns(&["c", "a"]).unwrap();
        assert_eq!(t.headers(), &["c".to_string(), "a".to_string()]);
        assert_eq!(t.value(0, 0), "10");
        assert_eq!(t.value(0, 1), "1");
    }

    #[test]
    fn select_missing_column_is_schema_error() {
        let err = table().select_columns(&["a", "zzz"]).unwrap_err();
        assert!(matches!(err, TadpoleError::Schema(_)));
    }

    #[test]
    fn drop_column_removes_values() {
        let t = table().drop_column("b");
        assert_eq!(t.num_cols(), 2);
        assert_eq!(t.value(1, 1), "20");
    }

    #[test]
    fn filter_rows_keeps_matching() {
        let t = table().filter_rows(|row| row[1] == "y");
        assert_eq!(t.num_rows(), 1);
        assert_eq!(t.value(0, 0), "2");
    }
}
