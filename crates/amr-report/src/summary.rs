//! Headline figures for a cleaned table.

use std::collections::BTreeSet;

use amr_model::{CanonicalField, CleanedTable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub total_rows: usize,
    /// Distinct patient keys, or `total_rows` without a key column.
    pub unique_patients: usize,
    pub distinct_pathogens: usize,
    pub distinct_specimens: usize,
}

fn distinct(table: &CleanedTable, field: CanonicalField) -> usize {
    table
        .records
        .iter()
        .filter_map(|record| record.value(field))
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn summary_metrics(table: &CleanedTable) -> SummaryMetrics {
    let total_rows = table.height();
    let unique_patients = if table.is_bound(CanonicalField::PatientKey) {
        distinct(table, CanonicalField::PatientKey)
    } else {
        total_rows
    };
    SummaryMetrics {
        total_rows,
        unique_patients,
        distinct_pathogens: distinct(table, CanonicalField::Pathogen),
        distinct_specimens: distinct(table, CanonicalField::Specimen),
    }
}
