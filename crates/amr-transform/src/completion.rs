//! Cross-row imputation within a patient.
//!
//! Rows sharing a patient key describe one patient, so their demographic and
//! identifying fields are filled from each other. A value is only ever copied
//! from a row of the same patient; numeric fields are never defaulted.

use std::collections::HashMap;

use amr_model::{
    AgeUnit, CanonicalField, CleanedRecord, CleanedTable, Gender, PatientType, SirResult, UNKNOWN,
};
use tracing::{debug, info_span};

/// Row indices of each patient, patients in order of first appearance and
/// rows in input order. Rows without a key belong to no group.
fn patient_groups(records: &[CleanedRecord]) -> Vec<Vec<usize>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (pos, record) in records.iter().enumerate() {
        let Some(key) = record.patient_key.as_deref() else {
            continue;
        };
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(pos);
    }
    groups
}

/// Fill the gaps of one field across a group with the group's first reported
/// value, falling back to `sentinel` when no row reported one.
///
/// Once every gap holds the first value, forward and backward filling have
/// nothing left to do, so a single pass covers them.
fn fill_group<T, F>(
    records: &mut [CleanedRecord],
    members: &[usize],
    access: F,
    sentinel: Option<T>,
) -> usize
where
    T: Clone,
    F: Fn(&mut CleanedRecord) -> &mut Option<T>,
{
    let first = members
        .iter()
        .find_map(|&pos| access(&mut records[pos]).clone());
    let Some(fill) = first.or(sentinel) else {
        return 0;
    };
    let mut filled = 0;
    for &pos in members {
        let slot = access(&mut records[pos]);
        if slot.is_none() {
            *slot = Some(fill.clone());
            filled += 1;
        }
    }
    filled
}

fn unknown_text() -> Option<String> {
    Some(UNKNOWN.to_string())
}

fn fill_field(records: &mut [CleanedRecord], members: &[usize], field: CanonicalField) -> usize {
    match field {
        CanonicalField::Gender => {
            fill_group(records, members, |r| &mut r.gender, Some(Gender::Unknown))
        }
        CanonicalField::PatientType => fill_group(
            records,
            members,
            |r| &mut r.patient_type,
            Some(PatientType::Unknown),
        ),
        CanonicalField::Specimen => {
            fill_group(records, members, |r| &mut r.specimen, unknown_text())
        }
        CanonicalField::Pathogen => {
            fill_group(records, members, |r| &mut r.pathogen, unknown_text())
        }
        CanonicalField::Facility => {
            fill_group(records, members, |r| &mut r.facility, unknown_text())
        }
        CanonicalField::FacilityId => {
            fill_group(records, members, |r| &mut r.facility_id, unknown_text())
        }
        CanonicalField::SirResult => {
            fill_group(records, members, |r| &mut r.sir, Some(SirResult::Unknown))
        }
        CanonicalField::AgeUnit => {
            fill_group(records, members, |r| &mut r.age_unit, Some(AgeUnit::Unknown))
        }
        CanonicalField::AgeValue => fill_group(records, members, |r| &mut r.age_value, None),
        CanonicalField::Year => fill_group(records, members, |r| &mut r.year, None),
        CanonicalField::Antibiotic
        | CanonicalField::SampleDate
        | CanonicalField::PatientKey => 0,
    }
}

/// Impute missing fields across rows sharing a patient key.
///
/// Does nothing when the table has no patient key column. Only fields bound
/// by the column resolver are touched, and present values are never
/// overwritten.
pub fn complete_patient_fields(table: &mut CleanedTable) {
    if !table.is_bound(CanonicalField::PatientKey) {
        return;
    }
    let span = info_span!("complete", rows = table.height());
    let _guard = span.enter();

    let fields: Vec<CanonicalField> = CanonicalField::IMPUTED_CATEGORICAL
        .into_iter()
        .chain(CanonicalField::IMPUTED_NUMERIC)
        .filter(|field| table.is_bound(*field))
        .collect();

    let groups = patient_groups(&table.records);
    for field in fields {
        let filled: usize = groups
            .iter()
            .map(|members| fill_field(&mut table.records, members, field))
            .sum();
        if filled > 0 {
            debug!(field = %field, cells = filled, "filled from patient rows");
        }
    }
    debug!(patients = groups.len(), "patient completion complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(row: usize, key: Option<&str>) -> CleanedRecord {
        CleanedRecord {
            patient_key: key.map(str::to_string),
            ..CleanedRecord::new(row)
        }
    }

    #[test]
    fn groups_follow_first_appearance() {
        let records = vec![
            keyed(0, Some("B")),
            keyed(1, Some("A")),
            keyed(2, None),
            keyed(3, Some("B")),
        ];
        assert_eq!(patient_groups(&records), vec![vec![0, 3], vec![1]]);
    }

    #[test]
    fn first_value_wins_over_later_ones() {
        let mut records = vec![keyed(0, Some("A")), keyed(1, Some("A")), keyed(2, Some("A"))];
        records[1].gender = Some(Gender::Female);
        records[2].gender = Some(Gender::Male);
        let filled = fill_group(&mut records, &[0, 1, 2], |r| &mut r.gender, None);
        assert_eq!(filled, 1);
        assert_eq!(records[0].gender, Some(Gender::Female));
        assert_eq!(records[2].gender, Some(Gender::Male));
    }

    #[test]
    fn numeric_fields_have_no_default() {
        let mut records = vec![keyed(0, Some("A"))];
        assert_eq!(fill_field(&mut records, &[0], CanonicalField::AgeValue), 0);
        assert_eq!(records[0].age_value, None);
    }
}
