//! Preprocessing TADPOLE datasetu.
//!
//! Postupnosť krokov kopíruje pôvodný výskumný pipeline: výber stĺpcov,
//! voliteľné odstránenie korelovaných príznakov, filter baseline návštev,
//! filter chýbajúcej diagnózy, oprava cenzorovaných biomarkerov, zlúčenie
//! diagnostických kategórií, label encoding, imputácia priemerom a min-max
//! normalizácia. Všetky kroky sú čisté funkcie nad tabuľkou.

use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

use crate::data_loading::RawTable;
use crate::error::{Result, TadpoleError};

pub mod imputer;
pub mod label_encoder;
pub mod minmax_scaler;

pub use imputer::MeanImputer;
pub use label_encoder::{LabelDict, LabelEncoder};
pub use minmax_scaler::MinMaxScaler;

/// Spoločné rozhranie pre fit/transform procesory nad numerickou maticou.
pub trait DataProcessor {
    fn get_name(&self) -> &str;
    fn fit(&mut self, data: &DenseMatrix<f64>);
    fn transform(&self, data: &DenseMatrix<f64>) -> DenseMatrix<f64>;
}

/// Štartovací zoznam stĺpcov (kognitívne testy, MRI/PET objemy, CSF
/// biomarkery, genetika, demografia).
pub const SELECTED_COLUMNS: [&str; 21] = [
    "RID",
    "VISCODE",
    "DX_bl",
    "DX",
    "ADAS13",
    "Ventricles",
    "CDRSB",
    "ADAS11",
    "MMSE",
    "RAVLT_immediate",
    "Hippocampus",
    "WholeBrain",
    "Entorhinal",
    "MidTemp",
    "FDG",
    "AV45",
    "ABETA_UPENNBIOMK9_04_19_17",
    "TAU_UPENNBIOMK9_04_19_17",
    "PTAU_UPENNBIOMK9_04_19_17",
    "APOE4",
    "AGE",
];

/// Korelované príznaky určené offline exploračnou analýzou.
/// ADAS11 koreluje s diagnózou, MMSE má veľa chýbajúcich hodnôt,
/// MRI objemy a tau biomarkery sú redundantné voči ostatným.
const CORRELATED_COLUMNS: [&str; 7] = [
    "ADAS11",
    "MMSE",
    "Entorhinal",
    "MidTemp",
    "Hippocampus",
    "TAU_UPENNBIOMK9_04_19_17",
    "PTAU_UPENNBIOMK9_04_19_17",
];

/// CSF biomarkery s cenzorovanými hodnotami ("<200", ">1700", " ").
const BIOMARKER_COLUMNS: [&str; 3] = [
    "ABETA_UPENNBIOMK9_04_19_17",
    "TAU_UPENNBIOMK9_04_19_17",
    "PTAU_UPENNBIOMK9_04_19_17",
];

/// Podtypy zlučované do jednej MCI kategórie.
const MERGED_TO_MCI: [&str; 3] = ["LMCI", "EMCI", "SMC"];

pub const SUBJECT_COLUMN: &str = "RID";
pub const VISIT_COLUMN: &str = "VISCODE";
pub const LABEL_COLUMN: &str = "DX_bl";
pub const DIAGNOSIS_COLUMN: &str = "DX";
pub const BASELINE_VISIT: &str = "bl";

/// Stĺpce vylúčené z výslednej feature matice: id subjektu, label a dva
/// príznaky s rizikom leakage (ADAS13 je redundantný voči labelu,
/// Ventricles nepredikuje baseline diagnózu).
pub const EXCLUDED_FROM_FEATURES: [&str; 4] = ["RID", "DX_bl", "ADAS13", "Ventricles"];

/// Vyčistená tabuľka po celom preprocessingu.
#[derive(Debug, Clone)]
pub struct PreparedTable {
    pub headers: Vec<String>,
    pub matrix: DenseMatrix<f64>,
}

/// Kompletný preprocessing: surová tabuľka -> (numerická tabuľka, label dict).
pub fn preprocess(raw: &RawTable, remove_correlated: bool) -> Result<(PreparedTable, LabelDict)> {
    // 1. výber stĺpcov
    let mut table = raw.select_columns(&SELECTED_COLUMNS)?;

    // 2. voliteľné odstránenie korelovaných príznakov
    if remove_correlated {
        for col in CORRELATED_COLUMNS {
            table = table.drop_column(col);
        }
    }

    // 3. len baseline návštevy
    let vis_idx = column_index(&table, VISIT_COLUMN)?;
    table = table.filter_rows(|row| row[vis_idx] == BASELINE_VISIT);
    table = table.drop_column(VISIT_COLUMN);

    // 4. riadky bez diagnózy von, stĺpec DX už ďalej netreba
    let dx_idx = column_index(&table, DIAGNOSIS_COLUMN)?;
    table = table.filter_rows(|row| !row[dx_idx].trim().is_empty());
    table = table.drop_column(DIAGNOSIS_COLUMN);

    if table.num_rows() == 0 {
        return Err(TadpoleError::Schema(
            "po filtrovaní baseline návštev a diagnóz nezostali žiadne riadky".into(),
        ));
    }

    // 5. oprava cenzorovaných biomarkerov; pri remove_correlated zostáva
    //    v tabuľke už len ABETA
    let biomarkers: &[&str] = if remove_correlated {
        &BIOMARKER_COLUMNS[..1]
    } else {
        &BIOMARKER_COLUMNS[..]
    };
    for col in biomarkers {
        if let Some(idx) = table.col_index(col) {
            table = table.map_column(idx, repair_censored);
        }
    }

    // 6. zlúčenie piatich kategórií na tri: AD, MCI, CN
    let label_idx = column_index(&table, LABEL_COLUMN)?;
    table = table.map_column(label_idx, |v| {
        if MERGED_TO_MCI.contains(&v) {
            "MCI".to_string()
        } else {
            v.to_string()
        }
    });

    // 7. label encoding v lexikografickom poradí
    let encoder = LabelEncoder::fit(&table.column_values(label_idx));
    debug!(classes = ?encoder.classes(), rows = table.num_rows(), "kategórie zakódované");

    // stringová tabuľka -> numerická matica
    let headers: Vec<String> = table.headers().to_vec();
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(table.num_rows());
    for i in 0..table.num_rows() {
        let mut row = Vec::with_capacity(headers.len());
        for (j, header) in headers.iter().enumerate() {
            let value = table.value(i, j);
            if j == label_idx {
                row.push(encoder.transform(value)? as f64);
            } else {
                row.push(parse_cell(value, header, i)?);
            }
        }
        rows.push(row);
    }
    let matrix = DenseMatrix::from_2d_vec(&rows)
        .map_err(|e| TadpoleError::Schema(format!("nekonzistentná matica: {}", e)))?;

    // 8.-9. imputácia priemerom a min-max normalizácia; id subjektu a label
    //        sa nemenia
    let skip: Vec<usize> = [SUBJECT_COLUMN, LABEL_COLUMN]
        .iter()
        .filter_map(|c| headers.iter().position(|h| h == c))
        .collect();

    let mut imputer = MeanImputer::new(skip.clone());
    imputer.fit(&matrix);
    let matrix = imputer.transform(&matrix);

    let mut scaler = MinMaxScaler::new(skip);
    scaler.fit(&matrix);
    let matrix = scaler.transform(&matrix);

    Ok((PreparedTable { headers, matrix }, encoder.label_dict()))
}

fn column_index(table: &RawTable, name: &str) -> Result<usize> {
    table
        .col_index(name)
        .ok_or_else(|| TadpoleError::Schema(format!("chýbajúci povinný stĺpec '{}'", name)))
}

/// Cenzorované laboratórne hodnoty (prázdne, "<X", ">X") -> chýbajúca hodnota.
fn repair_censored(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains('<') || trimmed.contains('>') {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Parsovanie bunky na f64; prázdna hodnota je NaN, nečíselná je chyba schémy.
fn parse_cell(value: &str, column: &str, row: usize) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed == "NA" {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| {
        TadpoleError::Schema(format!(
            "hodnota '{}' v stĺpci '{}' (riadok {}) nie je číslo",
            value,
            column,
            row + 1
        ))
    })
}
