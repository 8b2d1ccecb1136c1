//! Bug-drug-specimen susceptibility cross tabulation.

use std::collections::BTreeMap;

use amr_model::{BugDrugSirRow, CanonicalField, CleanedTable, ReportOptions, SirResult};

use crate::common::{Tally, percent};

const REQUIRED: [CanonicalField; 4] = [
    CanonicalField::Pathogen,
    CanonicalField::Specimen,
    CanonicalField::Antibiotic,
    CanonicalField::SirResult,
];

#[derive(Debug, Default)]
struct SirTallies<'a> {
    susceptible: Tally<'a>,
    intermediate: Tally<'a>,
    resistant: Tally<'a>,
}

/// S/I/R counts per pathogen, specimen and antibiotic.
///
/// Counts rows or distinct patients per `options.count_basis`; rows below
/// `options.min_total` are dropped. Sorted by pathogen, specimen and
/// antibiotic, then total descending. Empty unless all four source columns
/// are bound.
pub fn bug_drug_specimen(table: &CleanedTable, options: &ReportOptions) -> Vec<BugDrugSirRow> {
    if !table.all_bound(&REQUIRED) {
        return Vec::new();
    }

    let mut groups: BTreeMap<(&str, &str, &str), SirTallies<'_>> = BTreeMap::new();
    for record in &table.records {
        let (Some(pathogen), Some(specimen), Some(antibiotic), Some(sir)) = (
            record.pathogen.as_deref(),
            record.specimen.as_deref(),
            record.antibiotic.as_deref(),
            record.sir,
        ) else {
            continue;
        };
        if !sir.is_interpreted() {
            continue;
        }
        let tallies = groups.entry((pathogen, specimen, antibiotic)).or_default();
        match sir {
            SirResult::Susceptible => tallies.susceptible.add(record),
            SirResult::Intermediate => tallies.intermediate.add(record),
            SirResult::Resistant => tallies.resistant.add(record),
            SirResult::Unknown => {}
        }
    }

    let basis = options.count_basis;
    let mut rows: Vec<BugDrugSirRow> = groups
        .into_iter()
        .map(|((pathogen, specimen, antibiotic), tallies)| {
            let s = tallies.susceptible.count(basis);
            let i = tallies.intermediate.count(basis);
            let r = tallies.resistant.count(basis);
            let total = s + i + r;
            BugDrugSirRow {
                pathogen: pathogen.to_string(),
                sample_type: specimen.to_string(),
                antimicrobial: antibiotic.to_string(),
                s,
                i,
                r,
                total,
                pct_s: percent(s, total, 1),
                pct_i: percent(i, total, 1),
                pct_r: percent(r, total, 1),
            }
        })
        .filter(|row| row.total >= options.min_total)
        .collect();

    rows.sort_by(|a, b| {
        a.pathogen
            .cmp(&b.pathogen)
            .then_with(|| a.sample_type.cmp(&b.sample_type))
            .then_with(|| a.antimicrobial.cmp(&b.antimicrobial))
            .then_with(|| b.total.cmp(&a.total))
    });
    rows
}
