//! Value counts with percent of total.

use std::collections::HashMap;

use amr_model::{CanonicalField, CleanedTable};
use amr_transform::{FineAgeBand, RecordAgeBands};
use serde::Serialize;

use crate::common::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
    /// Share of all counted (non-missing) values, 2 decimals.
    pub percent: f64,
}

/// Counts of one field's values under a display heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCounts {
    pub heading: String,
    pub entries: Vec<ValueCount>,
}

impl ValueCounts {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

/// Count the non-missing values of `field`, most frequent first (ties by
/// value). Empty when the field is not bound.
pub fn value_counts(table: &CleanedTable, field: CanonicalField) -> ValueCounts {
    let mut counts: HashMap<String, u64> = HashMap::new();
    if table.is_bound(field) {
        for value in table.records.iter().filter_map(|record| record.value(field)) {
            *counts.entry(value).or_default() += 1;
        }
    }
    let total: u64 = counts.values().sum();
    let mut entries: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value,
            count,
            percent: percent_of(count, total),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    ValueCounts {
        heading: field.label().to_string(),
        entries,
    }
}

/// Pathogen frequencies.
pub fn organisms_counts(table: &CleanedTable) -> ValueCounts {
    value_counts(table, CanonicalField::Pathogen)
}

/// Rows per five-year age band, youngest band first; empty bands are omitted.
///
/// Ages above `max_age_years` (or below zero) fall outside every band and
/// are not counted.
pub fn age_band_counts(table: &CleanedTable, max_age_years: f64) -> ValueCounts {
    let mut counts = [0u64; FineAgeBand::COUNT];
    for band in table
        .records
        .iter()
        .filter_map(|record| record.fine_band(max_age_years))
    {
        counts[band.index()] += 1;
    }
    let total: u64 = counts.iter().sum();
    let entries = FineAgeBand::all()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(band, count)| ValueCount {
            value: band.label().to_string(),
            count,
            percent: percent_of(count, total),
        })
        .collect();
    ValueCounts {
        heading: "Age band".to_string(),
        entries,
    }
}

fn percent_of(count: u64, total: u64) -> f64 {
    round_to(count as f64 / total as f64 * 100.0, 2)
}
