//! Synthetic customer population with a feature-dependent churn label.
//!
//! The generator draws five independent feature fields from fixed
//! distributions and then derives `churned` from an affine combination of
//! the features. The combination is a label-generation model, not a
//! classifier: it exists purely to give the trained models a known,
//! feature-dependent ground truth to be judged against.

use rand::Rng;
use serde::Serialize;

use crate::error::PipelineError;

/// Subscription contract kind. Month-to-month is the most common draw and
/// the only one that raises the churn probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractType {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::MonthToMonth => "Month-to-month",
            ContractType::OneYear => "One year",
            ContractType::TwoYear => "Two year",
        }
    }
}

/// One row of the synthetic population. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub id: u32,
    /// Uniform over [18, 80).
    pub age: u32,
    /// Uniform over [20, 120], rounded to 2 decimals.
    pub monthly_charge: f64,
    /// Uniform over [1, 60].
    pub tenure_months: u32,
    /// Uniform over [0, 10].
    pub support_calls: u32,
    pub contract_type: ContractType,
    pub churned: bool,
}

/// Churn probability as a fixed affine combination of the drawn features,
/// clamped (not renormalized) to [0, 1]. Mass is allowed to pile up at the
/// boundary; that is the modeling choice, not a bug.
pub fn churn_probability(
    contract_type: ContractType,
    support_calls: u32,
    monthly_charge: f64,
    tenure_months: u32,
) -> f64 {
    let mut p = 0.20;
    if contract_type == ContractType::MonthToMonth {
        p += 0.20;
    }
    p += 0.03 * support_calls as f64;
    p += 0.002 * monthly_charge;
    p -= 0.005 * tenure_months as f64;
    p.clamp(0.0, 1.0)
}

/// Generate `n` customer records from the given seeded rng. The rng is
/// threaded by the caller so the whole run stays reproducible for a fixed
/// seed.
pub fn generate<R: Rng>(n: usize, rng: &mut R) -> Result<Vec<CustomerRecord>, PipelineError> {
    if n == 0 {
        return Err(PipelineError::InvalidArgument {
            stage: "simulation::generate",
            reason: "population size must be positive".to_string(),
        });
    }

    let mut records = Vec::with_capacity(n);
    for id in 1..=n as u32 {
        let age = rng.gen_range(18..80);
        let monthly_charge = (rng.gen_range(20.0..=120.0f64) * 100.0).round() / 100.0;
        let tenure_months = rng.gen_range(1..=60);
        let support_calls = rng.gen_range(0..=10);
        let contract_type = draw_contract(rng);

        let p = churn_probability(contract_type, support_calls, monthly_charge, tenure_months);
        let churned = rng.gen::<f64>() < p;

        records.push(CustomerRecord {
            id,
            age,
            monthly_charge,
            tenure_months,
            support_calls,
            contract_type,
            churned,
        });
    }

    log::debug!(
        "generated {} customers, {} churned",
        records.len(),
        records.iter().filter(|r| r.churned).count()
    );

    Ok(records)
}

/// Categorical draw with fixed weights 0.60 / 0.25 / 0.15.
fn draw_contract<R: Rng>(rng: &mut R) -> ContractType {
    let u: f64 = rng.gen();
    if u < 0.60 {
        ContractType::MonthToMonth
    } else if u < 0.85 {
        ContractType::OneYear
    } else {
        ContractType::TwoYear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_composition_matches_the_model() {
        // 0.20 + 0.20 + 0.03*4 + 0.002*50 - 0.005*10 = 0.57
        let p = churn_probability(ContractType::MonthToMonth, 4, 50.0, 10);
        assert!((p - 0.57).abs() < 1e-12, "p = {}", p);
    }

    #[test]
    fn probability_is_clamped_not_renormalized() {
        // 25 support calls push the sum past 1; the policy clamps, letting
        // mass pile up at the boundary.
        let p = churn_probability(ContractType::MonthToMonth, 25, 120.0, 1);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn probability_never_goes_negative() {
        let p = churn_probability(ContractType::TwoYear, 0, 20.0, 60);
        assert!(p >= 0.0);
    }
}
