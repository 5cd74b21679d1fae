//! CSV export of the synthetic population.

use std::path::Path;

use anyhow::{Context, Result};

use crate::simulation::CustomerRecord;

/// Write the raw population to CSV, one row per customer, serde field names
/// as the header.
pub fn write_population_csv<P: AsRef<Path>>(path: P, records: &[CustomerRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create CSV file: {}", path.as_ref().display()))?;

    for record in records {
        writer
            .serialize(record)
            .context("Failed to serialize customer record")?;
    }
    writer.flush().context("Failed to flush CSV writer")?;

    log::info!(
        "wrote {} customers to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::generate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn export_writes_header_and_rows() {
        let mut rng = StdRng::seed_from_u64(9);
        let records = generate(10, &mut rng).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("population.csv");
        write_population_csv(&path, &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("monthly_charge"));
        assert!(header.contains("contract_type"));
        assert_eq!(lines.count(), 10);
    }
}
