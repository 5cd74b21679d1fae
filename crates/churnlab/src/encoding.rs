//! Feature encoding: raw customer records into a fixed-schema numeric table.
//!
//! The column order is a contract. Feature-importance output is reported
//! against it positionally, so both classifiers and the evaluator must see
//! exactly this layout.

use crate::math::{Array1, Array2};
use crate::simulation::{ContractType, CustomerRecord};

/// Column order consumed by the models and reported by the evaluator.
/// MonthToMonth is the implicit reference category: both indicators false.
pub const FEATURE_NAMES: [&str; 6] = [
    "age",
    "monthly_charge",
    "tenure_months",
    "support_calls",
    "is_one_year",
    "is_two_year",
];

/// Model-ready table: features, labels (1 = churn), and the column names in
/// the order the matrix was laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDataset {
    pub x: Array2<f64>,
    pub y: Array1<u8>,
    pub feature_names: Vec<String>,
}

/// Encode records into the fixed schema, preserving row order.
///
/// The generator never produces missing values, so the drop path below is
/// defensive only: a record carrying a non-finite monthly charge is dropped
/// entirely rather than imputed.
pub fn encode(records: &[CustomerRecord]) -> EncodedDataset {
    let n_cols = FEATURE_NAMES.len();
    let mut data = Vec::with_capacity(records.len() * n_cols);
    let mut labels = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        if !record.monthly_charge.is_finite() {
            dropped += 1;
            continue;
        }
        data.extend_from_slice(&[
            record.age as f64,
            record.monthly_charge,
            record.tenure_months as f64,
            record.support_calls as f64,
            indicator(record.contract_type == ContractType::OneYear),
            indicator(record.contract_type == ContractType::TwoYear),
        ]);
        labels.push(record.churned as u8);
    }

    if dropped > 0 {
        log::warn!("encoding dropped {} records with non-finite fields", dropped);
    }

    let x = Array2::from_shape_vec((labels.len(), n_cols), data)
        .expect("encode: row buffer does not match the fixed schema");

    EncodedDataset {
        x,
        y: Array1::from_vec(labels),
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}
