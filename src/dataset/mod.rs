//! Dataset ako imutábilná hodnota + čistý stratifikovaný split.
//!
//! Po načítaní sa X, y ani label dict nikdy nemenia; `split` vracia novú
//! `Partition` a pre rovnaký seed vracia vždy identické rozdelenie.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, info};

use crate::data_loading::CsvTableLoader;
use crate::error::{Result, TadpoleError};
use crate::preprocessing::{self, LabelDict, PreparedTable, EXCLUDED_FROM_FEATURES, LABEL_COLUMN};

/// Výsledok jedného stratifikovaného train/test splitu.
#[derive(Debug, Clone)]
pub struct Partition {
    pub x_train: DenseMatrix<f64>,
    pub x_test: DenseMatrix<f64>,
    pub y_train: Vec<u32>,
    pub y_test: Vec<u32>,
}

/// Preprocessovaný TADPOLE dataset.
#[derive(Debug)]
pub struct TadpoleDataset {
    x: DenseMatrix<f64>,
    y: Vec<u32>,
    label_dict: LabelDict,
    feature_names: Vec<String>,
}

impl TadpoleDataset {
    /// Načíta a preprocessuje dataset z CSV súboru.
    pub fn load(path: &Path, remove_correlated: bool) -> Result<Self> {
        info!(path = %path.display(), remove_correlated, "načítavam TADPOLE dataset");
        let raw = CsvTableLoader::new().load_from_path(path)?;
        let (prepared, label_dict) = preprocessing::preprocess(&raw, remove_correlated)?;
        Self::from_prepared(prepared, label_dict)
    }

    /// Projekcia vyčistenej tabuľky na feature maticu a vektor labelov.
    pub fn from_prepared(prepared: PreparedTable, label_dict: LabelDict) -> Result<Self> {
        let label_idx = prepared
            .headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| {
                TadpoleError::Schema(format!("chýbajúci stĺpec '{}' po preprocessingu", LABEL_COLUMN))
            })?;

        let feature_indices: Vec<usize> = prepared
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !EXCLUDED_FROM_FEATURES.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();
        let feature_names: Vec<String> = feature_indices
            .iter()
            .map(|&i| prepared.headers[i].clone())
            .collect();

        let rows = prepared.matrix.shape().0;
        let mut x_rows = Vec::with_capacity(rows);
        let mut y = Vec::with_capacity(rows);
        for i in 0..rows {
            x_rows.push(
                feature_indices
                    .iter()
                    .map(|&j| *prepared.matrix.get((i, j)))
                    .collect::<Vec<f64>>(),
            );
            y.push(*prepared.matrix.get((i, label_idx)) as u32);
        }

        let x = DenseMatrix::from_2d_vec(&x_rows)
            .map_err(|e| TadpoleError::Schema(format!("nekonzistentná feature matica: {}", e)))?;

        info!(
            samples = rows,
            features = feature_names.len(),
            classes = label_dict.len(),
            "dataset pripravený"
        );
        Ok(Self {
            x,
            y,
            label_dict,
            feature_names,
        })
    }

    /// Konštruktor pre syntetické dáta v testoch a demách.
    pub fn from_parts(
        x: DenseMatrix<f64>,
        y: Vec<u32>,
        label_dict: LabelDict,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if x.shape().0 != y.len() {
            return Err(TadpoleError::Schema(format!(
                "X má {} riadkov, y má {}",
                x.shape().0,
                y.len()
            )));
        }
        Ok(Self {
            x,
            y,
            label_dict,
            feature_names,
        })
    }

    pub fn x(&self) -> &DenseMatrix<f64> {
        &self.x
    }

    pub fn y(&self) -> &[u32] {
        &self.y
    }

    pub fn label_dict(&self) -> &LabelDict {
        &self.label_dict
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn num_samples(&self) -> usize {
        self.y.len()
    }

    pub fn num_features(&self) -> usize {
        self.x.shape().1
    }

    /// Stratifikovaný train/test split.
    ///
    /// Indexy sa zoskupia podľa triedy, každá skupina sa deterministicky
    /// premieša (StdRng so zadaným seedom) a z každej ide zaokrúhlený
    /// podiel `test_fraction` do testu. Podiel tried v oboch častiach tak
    /// zodpovedá podielu v celom datasete.
    pub fn split(&self, seed: u64, test_fraction: f64) -> Result<Partition> {
        if !(0.0..1.0).contains(&test_fraction) || test_fraction <= 0.0 {
            return Err(TadpoleError::Config(format!(
                "test_fraction musí byť v (0, 1), dostali sme {}",
                test_fraction
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut by_class: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (i, &label) in self.y.iter().enumerate() {
            by_class.entry(label).or_default().push(i);
        }

        let mut train_idx = Vec::new();
        let mut test_idx = Vec::new();
        for (_, mut indices) in by_class {
            indices.shuffle(&mut rng);
            let n_test = ((indices.len() as f64) * test_fraction).round() as usize;
            let n_test = n_test.min(indices.len());
            test_idx.extend_from_slice(&indices[..n_test]);
            train_idx.extend_from_slice(&indices[n_test..]);
        }

        if train_idx.is_empty() || test_idx.is_empty() {
            return Err(TadpoleError::Config(
                "split vyprodukoval prázdnu train alebo test časť".into(),
            ));
        }

        // poradie riadkov nezávislé od poradia tried
        train_idx.shuffle(&mut rng);
        test_idx.shuffle(&mut rng);

        debug!(seed, train = train_idx.len(), test = test_idx.len(), "split hotový");
        Ok(Partition {
            x_train: extract_rows(&self.x, &train_idx)?,
            x_test: extract_rows(&self.x, &test_idx)?,
            y_train: train_idx.iter().map(|&i| self.y[i]).collect(),
            y_test: test_idx.iter().map(|&i| self.y[i]).collect(),
        })
    }
}

pub(crate) fn extract_rows(x: &DenseMatrix<f64>, indices: &[usize]) -> Result<DenseMatrix<f64>> {
    let cols = x.shape().1;
    let rows: Vec<Vec<f64>> = indices
        .iter()
        .map(|&i| (0..cols).map(|j| *x.get((i, j))).collect())
        .collect();
    DenseMatrix::from_2d_vec(&rows)
        .map_err(|e| TadpoleError::Schema(format!("extrakcia riadkov zlyhala: {}", e)))
}

/// Predpočítaná boolean maska stĺpcov z externého feature-selection modelu.
/// Tento pipeline masku len konzumuje, nikdy ju nevytvára.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureMask {
    pub selected: Vec<bool>,
}

impl FeatureMask {
    /// Načíta masku z JSON súboru ({"selected": [true, false, ...]}).
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| TadpoleError::DataLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let mask: FeatureMask = serde_json::from_str(&text)?;
        if mask.selected.is_empty() || !mask.selected.iter().any(|&s| s) {
            return Err(TadpoleError::Schema(
                "feature maska nevyberá žiadny stĺpec".into(),
            ));
        }
        Ok(mask)
    }

    pub fn n_selected(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Projekcia oboch častí partition na vybrané stĺpce.
    pub fn apply(&self, partition: &Partition) -> Result<Partition> {
        let cols = partition.x_train.shape().1;
        if self.selected.len() != cols {
            return Err(TadpoleError::Schema(format!(
                "maska má {} stĺpcov, dáta {}",
                self.selected.len(),
                cols
            )));
        }

        let indices: Vec<usize> = self
            .selected
            .iter()
            .enumerate()
            .filter(|(_, &s)| s)
            .map(|(i, _)| i)
            .collect();

        Ok(Partition {
            x_train: extract_columns(&partition.x_train, &indices)?,
            x_test: extract_columns(&partition.x_test, &indices)?,
            y_train: partition.y_train.clone(),
            y_test: partition.y_test.clone(),
        })
    }
}

fn extract_columns(x: &DenseMatrix<f64>, indices: &[usize]) -> Result<DenseMatrix<f64>> {
    let rows = x.shape().0;
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|i| indices.iter().map(|&j| *x.get((i, j))).collect())
        .collect();
    DenseMatrix::from_2d_vec(&data)
        .map_err(|e| TadpoleError::Schema(format!("extrakcia stĺpcov zlyhala: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// 90 vzoriek, 3 vyvážené triedy, 2 príznaky.
    fn balanced_dataset() -> TadpoleDataset {
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..90 {
            let class = (i % 3) as u32;
            rows.push(vec![class as f64 * 0.3 + (i as f64) * 1e-3, 0.5]);
            y.push(class);
        }
        TadpoleDataset::from_parts(
            DenseMatrix::from_2d_vec(&rows).unwrap(),
            y,
            LabelDict::new(vec!["AD".into(), "CN".into(), "MCI".into()]),
            vec!["f0".into(), "f1".into()],
        )
        .unwrap()
    }

    #[test]
    fn split_is_deterministic_for_fixed_seed() {
        let data = balanced_dataset();
        let a = data.split(7, 0.2).unwrap();
        let b = data.split(7, 0.2).unwrap();
        assert_eq!(a.y_train, b.y_train);
        assert_eq!(a.y_test, b.y_test);
        for i in 0..a.x_test.shape().0 {
            for j in 0..a.x_test.shape().1 {
                assert_eq!(a.x_test.get((i, j)), b.x_test.get((i, j)));
            }
        }
    }

    #[test]
    fn different_seeds_give_different_partitions() {
        let data = balanced_dataset();
        let a = data.split(0, 0.2).unwrap();
        let b = data.split(1, 0.2).unwrap();
        assert_ne!(a.y_train, b.y_train);
    }

    #[test]
    fn split_preserves_class_fractions() {
        let data = balanced_dataset();
        let part = data.split(3, 0.2).unwrap();
        assert_eq!(part.y_train.len(), 72);
        assert_eq!(part.y_test.len(), 18);

        for class in 0..3u32 {
            let full = 1.0 / 3.0;
            let in_train = part.y_train.iter().filter(|&&y| y == class).count() as f64
                / part.y_train.len() as f64;
            let in_test =
                part.y_test.iter().filter(|&&y| y == class).count() as f64 / part.y_test.len() as f64;
            assert!((in_train - full).abs() <= 0.05);
            assert!((in_test - full).abs() <= 0.05);
        }
    }

    #[test]
    fn invalid_test_fraction_is_config_error() {
        let data = balanced_dataset();
        assert!(matches!(
            data.split(0, 0.0).unwrap_err(),
            TadpoleError::Config(_)
        ));
        assert!(matches!(
            data.split(0, 1.0).unwrap_err(),
            TadpoleError::Config(_)
        ));
    }

    #[test]
    fn mismatched_x_y_rejected() {
        let x = DenseMatrix::from_2d_vec(&vec![vec![1.0], vec![2.0]]).unwrap();
        let err = TadpoleDataset::from_parts(
            x,
            vec![0],
            LabelDict::new(vec!["AD".into()]),
            vec!["f0".into()],
        )
        .unwrap_err();
        assert!(matches!(err, TadpoleError::Schema(_)));
    }

    #[test]
    fn mask_projects_selected_columns() {
        let data = balanced_dataset();
        let part = data.split(0, 0.2).unwrap();
        let mask = FeatureMask {
            selected: vec![true, false],
        };
        let projected = mask.apply(&part).unwrap();
        assert_eq!(projected.x_train.shape().1, 1);
        assert_eq!(projected.x_test.shape().1, 1);
        assert_eq!(projected.y_train, part.y_train);
    }

    #[test]
    fn mask_length_mismatch_is_schema_error() {
        let data = balanced_dataset();
        let part = data.split(0, 0.2).unwrap();
        let mask = FeatureMask {
            selected: vec![true, false, true],
        };
        assert!(matches!(
            mask.apply(&part).unwrap_err(),
            TadpoleError::Schema(_)
        ));
    }

    #[test]
    fn mask_loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"selected\": [true, false, true]}}").unwrap();
        let mask = FeatureMask::load(file.path()).unwrap();
        assert_eq!(mask.n_selected(), 2);
    }
}
