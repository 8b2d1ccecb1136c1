//! Helpers shared by the report builders.

use std::collections::BTreeSet;

use amr_model::{CleanedRecord, CountBasis};

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, `None` when `whole` is zero.
pub(crate) fn percent(part: u64, whole: u64, decimals: i32) -> Option<f64> {
    (whole > 0).then(|| round_to(part as f64 / whole as f64 * 100.0, decimals))
}

/// Accumulates either a row count or a set of distinct patient keys.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tally<'a> {
    rows: u64,
    patients: BTreeSet<&'a str>,
}

impl<'a> Tally<'a> {
    pub(crate) fn add(&mut self, record: &'a CleanedRecord) {
        self.rows += 1;
        if let Some(key) = record.patient_key.as_deref() {
            self.patients.insert(key);
        }
    }

    pub(crate) fn count(&self, basis: CountBasis) -> u64 {
        match basis {
            CountBasis::Rows => self.rows,
            CountBasis::Patients => self.patients.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_guards_zero() {
        assert_eq!(percent(1, 3, 1), Some(33.3));
        assert_eq!(percent(2, 3, 2), Some(66.67));
        assert_eq!(percent(0, 0, 1), None);
    }

    #[test]
    fn tally_counts_rows_or_patients() {
        let mut a = CleanedRecord::new(0);
        a.patient_key = Some("P1".to_string());
        let b = CleanedRecord {
            row: 1,
            ..a.clone()
        };
        let keyless = CleanedRecord::new(2);

        let mut tally = Tally::default();
        for record in [&a, &b, &keyless] {
            tally.add(record);
        }
        assert_eq!(tally.count(CountBasis::Rows), 3);
        assert_eq!(tally.count(CountBasis::Patients), 1);
    }
}
