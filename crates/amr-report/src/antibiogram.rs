//! Pathogen by antibiotic percent-susceptible matrix.

use std::collections::{BTreeMap, BTreeSet};

use amr_model::{CanonicalField, CleanedTable, SirResult};
use serde::Serialize;

use crate::common::round_to;

/// Percent susceptible per pathogen (rows) and antibiotic (columns).
///
/// Labels are sorted. A cell with no interpreted result holds 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AntibiogramMatrix {
    pub pathogens: Vec<String>,
    pub antibiotics: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl AntibiogramMatrix {
    pub fn is_empty(&self) -> bool {
        self.pathogens.is_empty()
    }

    pub fn get(&self, pathogen: &str, antibiotic: &str) -> Option<f64> {
        let row = self.pathogens.iter().position(|p| p == pathogen)?;
        let col = self.antibiotics.iter().position(|a| a == antibiotic)?;
        Some(self.cells[row][col])
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct SirTotals {
    susceptible: u64,
    interpreted: u64,
}

/// Build the antibiogram over every pathogen and antibiotic pair with at
/// least one S, I or R result.
///
/// Empty unless pathogen, antibiotic and SIR columns are all bound.
pub fn antibiogram_matrix(table: &CleanedTable) -> AntibiogramMatrix {
    if !table.all_bound(&[
        CanonicalField::Pathogen,
        CanonicalField::Antibiotic,
        CanonicalField::SirResult,
    ]) {
        return AntibiogramMatrix::default();
    }

    let mut totals: BTreeMap<(&str, &str), SirTotals> = BTreeMap::new();
    for record in &table.records {
        let (Some(pathogen), Some(antibiotic), Some(sir)) = (
            record.pathogen.as_deref(),
            record.antibiotic.as_deref(),
            record.sir,
        ) else {
            continue;
        };
        if !sir.is_interpreted() {
            continue;
        }
        let entry = totals.entry((pathogen, antibiotic)).or_default();
        entry.interpreted += 1;
        if sir == SirResult::Susceptible {
            entry.susceptible += 1;
        }
    }

    let pathogens: Vec<String> = totals
        .keys()
        .map(|(p, _)| *p)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    let antibiotics: Vec<String> = totals
        .keys()
        .map(|(_, a)| *a)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let cells = pathogens
        .iter()
        .map(|pathogen| {
            antibiotics
                .iter()
                .map(|antibiotic| {
                    totals
                        .get(&(pathogen.as_str(), antibiotic.as_str()))
                        .map_or(0.0, |t| {
                            round_to(t.susceptible as f64 / t.interpreted as f64 * 100.0, 1)
                        })
                })
                .collect()
        })
        .collect();

    AntibiogramMatrix {
        pathogens,
        antibiotics,
        cells,
    }
}
