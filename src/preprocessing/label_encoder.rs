use crate::error::{Result, TadpoleError};

/// Mapovanie index triedy -> pôvodný názov kategórie.
/// Vznikne raz pri enkódovaní a ďalej sa nemení.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDict {
    names: Vec<String>,
}

impl LabelDict {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn decode(&self, index: u32) -> Option<&str> {
        self.names.get(index as usize).map(|s| s.as_str())
    }

    pub fn encode(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Label Encoder - enkóduje kategorické hodnoty na stabilné čísla (0, 1, 2, ...)
/// v lexikografickom poradí názvov kategórií.
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Zistí unikátne kategórie a zoradí ich lexikograficky.
    pub fn fit(values: &[&str]) -> Self {
        let mut classes: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn transform(&self, value: &str) -> Result<u32> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|i| i as u32)
            .ok_or_else(|| {
                TadpoleError::Schema(format!("neznáma kategória '{}' pri enkódovaní", value))
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Inverzné mapovanie pre dekódovanie predikcií.
    pub fn label_dict(&self) -> LabelDict {
        LabelDict::new(self.classes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_in_lexicographic_order() {
        let enc = LabelEncoder::fit(&["MCI", "AD", "CN", "MCI", "AD"]);
        assert_eq!(enc.transform("AD").unwrap(), 0);
        assert_eq!(enc.transform("CN").unwrap(), 1);
        assert_eq!(enc.transform("MCI").unwrap(), 2);
    }

    #[test]
    fn label_dict_round_trips() {
        let enc = LabelEncoder::fit(&["CN", "MCI", "AD"]);
        let dict = enc.label_dict();
        for name in ["AD", "CN", "MCI"] {
            let idx = enc.transform(name).unwrap();
            assert_eq!(dict.decode(idx), Some(name));
            assert_eq!(dict.encode(name), Some(idx));
        }
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn unknown_category_is_schema_error() {
        let enc = LabelEncoder::fit(&["AD", "CN"]);
        assert!(enc.transform("SMC").is_err());
    }
}
