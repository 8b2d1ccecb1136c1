//! Distinct patients per SIR result and patient type.

use std::collections::BTreeMap;

use amr_model::{CanonicalField, CleanedTable, CountBasis};
use serde::Serialize;

use crate::common::Tally;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCount {
    /// One value per grouping field.
    pub group: Vec<String>,
    pub unique_patients: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientTable {
    pub group_by: Vec<CanonicalField>,
    pub counts: Vec<ClientCount>,
}

impl ClientTable {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count distinct patient keys per combination of `group_by` values, or rows
/// when the table has no patient key column. Rows missing any grouping value
/// are skipped; groups are sorted by value.
fn clients_by(table: &CleanedTable, group_by: &[CanonicalField]) -> ClientTable {
    if !table.all_bound(group_by) {
        return ClientTable::default();
    }
    let basis = if table.is_bound(CanonicalField::PatientKey) {
        CountBasis::Patients
    } else {
        CountBasis::Rows
    };

    let mut groups: BTreeMap<Vec<String>, Tally<'_>> = BTreeMap::new();
    for record in &table.records {
        let group: Option<Vec<String>> = group_by.iter().map(|field| record.value(*field)).collect();
        if let Some(group) = group {
            groups.entry(group).or_default().add(record);
        }
    }

    ClientTable {
        group_by: group_by.to_vec(),
        counts: groups
            .into_iter()
            .map(|(group, tally)| ClientCount {
                group,
                unique_patients: tally.count(basis),
            })
            .collect(),
    }
}

pub fn clients_by_sir(table: &CleanedTable) -> ClientTable {
    clients_by(table, &[CanonicalField::SirResult])
}

pub fn clients_by_patient_type(table: &CleanedTable) -> ClientTable {
    clients_by(table, &[CanonicalField::PatientType])
}

pub fn clients_by_patient_type_and_sir(table: &CleanedTable) -> ClientTable {
    clients_by(table, &[CanonicalField::PatientType, CanonicalField::SirResult])
}
