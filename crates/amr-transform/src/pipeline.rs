//! Row-by-row cleaning of a raw table.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use amr_model::{CanonicalField, CleanedRecord, CleanedTable, CleaningOptions, RawTable};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::age::parse_age;
use crate::columns::{ColumnBindings, resolve_columns};
use crate::completion::complete_patient_fields;
use crate::normalization::{
    clean_antibiotic, clean_gender, clean_identifier, clean_pathogen, clean_patient_type,
    clean_sir, clean_specimen, clean_year, parse_sample_date, text::is_na_like,
};

/// Classify every bound field of one raw row.
pub fn clean_row(raw: &RawTable, row: usize, bindings: &ColumnBindings) -> CleanedRecord {
    let mut record = CleanedRecord::new(row);
    let cell = |field: CanonicalField| bindings.column(field).map(|col| raw.cell(row, col));

    if let Some(value) = cell(CanonicalField::Year) {
        record.year = clean_year(value);
    }
    if let Some(value) = cell(CanonicalField::AgeValue) {
        if let Some(age) = parse_age(value) {
            record.age_value = Some(age.value);
            record.age_unit = Some(age.unit);
        }
    }
    if let Some(value) = cell(CanonicalField::Gender) {
        record.gender = clean_gender(value);
    }
    if let Some(value) = cell(CanonicalField::PatientType) {
        record.patient_type = clean_patient_type(value);
    }
    if let Some(value) = cell(CanonicalField::Specimen) {
        record.specimen = clean_specimen(value);
    }
    if let Some(value) = cell(CanonicalField::Pathogen) {
        record.pathogen = clean_pathogen(value);
    }
    if let Some(value) = cell(CanonicalField::Antibiotic) {
        record.antibiotic = clean_antibiotic(value);
    }
    if let Some(value) = cell(CanonicalField::SirResult) {
        record.sir = clean_sir(value);
    }
    if let Some(value) = cell(CanonicalField::SampleDate) {
        record.sample_date = parse_sample_date(value);
    }
    if let Some(value) = cell(CanonicalField::PatientKey) {
        record.patient_key = clean_identifier(value);
    }
    if let Some(value) = cell(CanonicalField::Facility) {
        record.facility = clean_identifier(value);
    }
    if let Some(value) = cell(CanonicalField::FacilityId) {
        record.facility_id = clean_identifier(value);
    }
    record
}

/// Count, per bound field, the rows whose source cell held a value that no
/// classifier rule accepted.
fn unclassified_counts(
    raw: &RawTable,
    bindings: &ColumnBindings,
    records: &[CleanedRecord],
) -> BTreeMap<CanonicalField, usize> {
    let mut counts = BTreeMap::new();
    for (field, col) in &bindings.fields {
        let missed = records
            .iter()
            .filter(|record| {
                !record.has_value(*field) && !is_na_like(raw.cell(record.row, *col))
            })
            .count();
        if missed > 0 {
            counts.insert(*field, missed);
        }
    }
    counts
}

/// Clean a raw table.
///
/// Rows are classified independently (on the rayon pool when
/// `options.parallel` is set). Patient completion, when enabled, runs after
/// every row has been classified.
pub fn clean_table(raw: Arc<RawTable>, options: &CleaningOptions) -> CleanedTable {
    let span = info_span!("clean", rows = raw.height(), columns = raw.width());
    let _guard = span.enter();
    let start = Instant::now();

    let bindings = resolve_columns(&raw.headers);
    for field in bindings.unresolved() {
        debug!(field = %field, "no source column");
    }

    let table_ref = raw.as_ref();
    let records: Vec<CleanedRecord> = if options.parallel {
        (0..table_ref.height())
            .into_par_iter()
            .map(|row| clean_row(table_ref, row, &bindings))
            .collect()
    } else {
        (0..table_ref.height())
            .map(|row| clean_row(table_ref, row, &bindings))
            .collect()
    };

    for (field, count) in unclassified_counts(table_ref, &bindings, &records) {
        debug!(field = %field, rows = count, "unclassified values");
    }

    let ColumnBindings { normalized, fields } = bindings;
    let mut table = CleanedTable {
        raw: Arc::clone(&raw),
        source_columns: normalized,
        bindings: fields,
        records,
    };

    if options.complete_patients {
        complete_patient_fields(&mut table);
    }

    info!(
        rows = table.height(),
        bound_fields = table.bindings.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "cleaning complete"
    );
    table
}
