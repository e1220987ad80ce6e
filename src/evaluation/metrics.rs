//! Klasifikačné metriky: balanced accuracy a macro one-vs-one AUC.
//!
//! Smartcore ani jednu z nich neposkytuje, počítajú sa preto priamo
//! z confusion matice resp. z rank štatistiky (Mann-Whitney).

use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{Result, TadpoleError};

/// Confusion matica: matrix[skutočná trieda][predikovaná trieda] = počet.
pub fn confusion_matrix(y_true: &[u32], y_pred: &[u32], n_classes: usize) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0usize; n_classes]; n_classes];
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        if (t as usize) < n_classes && (p as usize) < n_classes {
            matrix[t as usize][p as usize] += 1;
        }
    }
    matrix
}

/// Balanced accuracy = priemer recall-ov cez triedy prítomné v y_true.
/// Každá trieda má rovnakú váhu bez ohľadu na počet vzoriek.
pub fn balanced_accuracy(y_true: &[u32], y_pred: &[u32]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let n_classes = y_true
        .iter()
        .chain(y_pred.iter())
        .max()
        .map_or(0, |&m| m as usize + 1);
    let cm = confusion_matrix(y_true, y_pred, n_classes);

    let mut recall_sum = 0.0;
    let mut present = 0usize;
    for (class, row) in cm.iter().enumerate() {
        let support: usize = row.iter().sum();
        if support == 0 {
            continue;
        }
        recall_sum += row[class] as f64 / support as f64;
        present += 1;
    }

    if present > 0 {
        recall_sum / present as f64
    } else {
        0.0
    }
}

/// Binárna AUC z Mann-Whitney rank štatistiky s priemerovaním rankov
/// pri zhodných skóre.
pub fn roc_auc_binary(is_positive: &[bool], scores: &[f64]) -> f64 {
    let n = scores.len();
    let n_pos = is_positive.iter().filter(|&&p| p).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(std::cmp::Ordering::Equal));

    // priemerné ranky pre skupiny zhodných skóre
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let rank_sum_pos: f64 = is_positive
        .iter()
        .zip(ranks.iter())
        .filter(|(&p, _)| p)
        .map(|(_, &r)| r)
        .sum();

    (rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0) / (n_pos * n_neg) as f64
}

/// Macro one-vs-one AUC: pre každú dvojicu tried (a, b) sa na vzorkách
/// patriacich do a alebo b spriemeruje AUC(a|p_a) a AUC(b|p_b); výsledok
/// je nevážený priemer cez všetky dvojice (Hand-Till štýl, zodpovedá
/// sklearn multi_class='ovo', average='macro').
pub fn macro_ovo_auc(y_true: &[u32], proba: &DenseMatrix<f64>) -> Result<f64> {
    let (rows, n_classes) = proba.shape();
    if rows != y_true.len() {
        return Err(TadpoleError::Schema(format!(
            "pravdepodobnosti majú {} riadkov, y má {}",
            rows,
            y_true.len()
        )));
    }
    if n_classes < 2 {
        return Err(TadpoleError::Schema(
            "mAUC vyžaduje aspoň dve triedy".into(),
        ));
    }

    let mut pair_sum = 0.0;
    let mut pair_count = 0usize;
    for a in 0..n_classes as u32 {
        for b in (a + 1)..n_classes as u32 {
            let subset: Vec<usize> = (0..rows)
                .filter(|&i| y_true[i] == a || y_true[i] == b)
                .collect();
            let has_a = subset.iter().any(|&i| y_true[i] == a);
            let has_b = subset.iter().any(|&i| y_true[i] == b);
            if !has_a || !has_b {
                continue;
            }

            let labels_a: Vec<bool> = subset.iter().map(|&i| y_true[i] == a).collect();
            let scores_a: Vec<f64> = subset
                .iter()
                .map(|&i| *proba.get((i, a as usize)))
                .collect();
            let auc_a = roc_auc_binary(&labels_a, &scores_a);

            let labels_b: Vec<bool> = subset.iter().map(|&i| y_true[i] == b).collect();
            let scores_b: Vec<f64> = subset
                .iter()
                .map(|&i| *proba.get((i, b as usize)))
                .collect();
            let auc_b = roc_auc_binary(&labels_b, &scores_b);

            pair_sum += (auc_a + auc_b) / 2.0;
            pair_count += 1;
        }
    }

    if pair_count == 0 {
        return Err(TadpoleError::Schema(
            "mAUC: v dátach nie je žiadna dvojica tried".into(),
        ));
    }
    Ok(pair_sum / pair_count as f64)
}
