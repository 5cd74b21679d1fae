//! Integration tests for the feature encoder and its schema contract.

use rand::rngs::StdRng;
use rand::SeedableRng;

use churnlab::encoding::{encode, FEATURE_NAMES};
use churnlab::simulation::{generate, ContractType, CustomerRecord};

fn record(id: u32, contract_type: ContractType) -> CustomerRecord {
    CustomerRecord {
        id,
        age: 40,
        monthly_charge: 75.50,
        tenure_months: 12,
        support_calls: 3,
        contract_type,
        churned: false,
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[test]
fn feature_name_order_is_the_fixed_contract() {
    let names: Vec<&str> = FEATURE_NAMES.to_vec();
    assert_eq!(
        names,
        vec![
            "age",
            "monthly_charge",
            "tenure_months",
            "support_calls",
            "is_one_year",
            "is_two_year"
        ]
    );
}

#[test]
fn contract_type_expands_into_two_indicators() {
    let records = vec![
        record(1, ContractType::MonthToMonth),
        record(2, ContractType::OneYear),
        record(3, ContractType::TwoYear),
    ];
    let encoded = encode(&records);

    assert_eq!(encoded.x.shape(), (3, 6));
    // MonthToMonth is the reference category: both indicators zero.
    assert_eq!(encoded.x.row_slice(0)[4..6], [0.0, 0.0]);
    assert_eq!(encoded.x.row_slice(1)[4..6], [1.0, 0.0]);
    assert_eq!(encoded.x.row_slice(2)[4..6], [0.0, 1.0]);
}

#[test]
fn numeric_fields_map_positionally() {
    let encoded = encode(&[record(1, ContractType::OneYear)]);
    assert_eq!(encoded.x.row_slice(0)[..4], [40.0, 75.50, 12.0, 3.0]);
}

// ---------------------------------------------------------------------------
// Determinism, order preservation, defensive drop
// ---------------------------------------------------------------------------

#[test]
fn encoding_the_same_population_twice_is_identical() {
    let mut rng = StdRng::seed_from_u64(42);
    let records = generate(300, &mut rng).unwrap();
    assert_eq!(encode(&records), encode(&records));
}

#[test]
fn row_order_and_labels_are_preserved() {
    let mut rng = StdRng::seed_from_u64(5);
    let records = generate(200, &mut rng).unwrap();
    let encoded = encode(&records);

    assert_eq!(encoded.x.nrows(), 200);
    assert_eq!(encoded.y.len(), 200);
    for (i, r) in records.iter().enumerate() {
        assert_eq!(encoded.x[(i, 1)], r.monthly_charge);
        assert_eq!(encoded.y[i], r.churned as u8);
    }
}

#[test]
fn non_finite_fields_drop_the_record_rather_than_impute() {
    let mut records = vec![
        record(1, ContractType::MonthToMonth),
        record(2, ContractType::OneYear),
        record(3, ContractType::TwoYear),
    ];
    records[1].monthly_charge = f64::NAN;

    let encoded = encode(&records);
    assert_eq!(encoded.x.nrows(), 2);
    assert_eq!(encoded.y.len(), 2);
    // The surviving rows keep their relative order.
    assert_eq!(encoded.x.row_slice(1)[4..6], [0.0, 1.0]);
}
