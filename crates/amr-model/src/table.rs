//! Raw and cleaned tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::enums::{AgeUnit, DAYS_PER_YEAR, Gender, PatientType, SirResult};
use crate::field::CanonicalField;

/// One uploaded dataset: original header names and every cell rendered as text.
///
/// An empty cell is a missing value. No other invariants hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices, convenient for fixtures.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, empty when the row is shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

/// Canonical values derived from one raw row.
///
/// A field that was not bound by the column resolver stays `None` here and is
/// absent from the exported table; see [`CleanedTable::is_bound`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedRecord {
    /// Index of the source row in the raw table.
    pub row: usize,
    pub year: Option<i32>,
    pub age_value: Option<f64>,
    pub age_unit: Option<AgeUnit>,
    pub gender: Option<Gender>,
    pub patient_type: Option<PatientType>,
    pub specimen: Option<String>,
    pub pathogen: Option<String>,
    pub antibiotic: Option<String>,
    pub sir: Option<SirResult>,
    pub sample_date: Option<NaiveDate>,
    pub patient_key: Option<String>,
    pub facility: Option<String>,
    pub facility_id: Option<String>,
}

impl CleanedRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            ..Self::default()
        }
    }

    /// Render the canonical value of `field` as text.
    pub fn value(&self, field: CanonicalField) -> Option<String> {
        match field {
            CanonicalField::Year => self.year.map(|year| year.to_string()),
            CanonicalField::AgeValue => self.age_value.map(format_numeric),
            CanonicalField::AgeUnit => self.age_unit.map(|unit| unit.as_str().to_string()),
            CanonicalField::Gender => self.gender.map(|g| g.as_str().to_string()),
            CanonicalField::PatientType => self.patient_type.map(|p| p.as_str().to_string()),
            CanonicalField::Specimen => self.specimen.clone(),
            CanonicalField::Pathogen => self.pathogen.clone(),
            CanonicalField::Antibiotic => self.antibiotic.clone(),
            CanonicalField::SirResult => self.sir.map(|s| s.as_str().to_string()),
            CanonicalField::SampleDate => self
                .sample_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            CanonicalField::PatientKey => self.patient_key.clone(),
            CanonicalField::Facility => self.facility.clone(),
            CanonicalField::FacilityId => self.facility_id.clone(),
        }
    }

    /// Age in fractional years, when both magnitude and unit are known.
    pub fn age_years(&self) -> Option<f64> {
        let value = self.age_value.filter(|value| !value.is_nan())?;
        let days = self.age_unit?.days()?;
        Some(value * days / DAYS_PER_YEAR)
    }

    pub fn has_value(&self, field: CanonicalField) -> bool {
        match field {
            CanonicalField::Year => self.year.is_some(),
            CanonicalField::AgeValue => self.age_value.is_some(),
            CanonicalField::AgeUnit => self.age_unit.is_some(),
            CanonicalField::Gender => self.gender.is_some(),
            CanonicalField::PatientType => self.patient_type.is_some(),
            CanonicalField::Specimen => self.specimen.is_some(),
            CanonicalField::Pathogen => self.pathogen.is_some(),
            CanonicalField::Antibiotic => self.antibiotic.is_some(),
            CanonicalField::SirResult => self.sir.is_some(),
            CanonicalField::SampleDate => self.sample_date.is_some(),
            CanonicalField::PatientKey => self.patient_key.is_some(),
            CanonicalField::Facility => self.facility.is_some(),
            CanonicalField::FacilityId => self.facility_id.is_some(),
        }
    }
}

/// Column order used when only cleaned and key columns are exported.
pub const CLEAN_EXPORT_ORDER: [CanonicalField; 13] = [
    CanonicalField::Year,
    CanonicalField::PatientKey,
    CanonicalField::AgeValue,
    CanonicalField::AgeUnit,
    CanonicalField::Gender,
    CanonicalField::PatientType,
    CanonicalField::SampleDate,
    CanonicalField::Specimen,
    CanonicalField::Pathogen,
    CanonicalField::Antibiotic,
    CanonicalField::SirResult,
    CanonicalField::Facility,
    CanonicalField::FacilityId,
];

/// Output of the cleaning pipeline: the raw table, the resolved bindings and
/// one cleaned record per retained row.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub raw: Arc<RawTable>,
    /// Normalized names of the raw columns, index-aligned with `raw.headers`.
    pub source_columns: Vec<String>,
    /// Raw column index bound to each resolved field.
    pub bindings: BTreeMap<CanonicalField, usize>,
    pub records: Vec<CleanedRecord>,
}

impl CleanedTable {
    pub fn height(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the column resolver located a source column for `field`.
    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    pub fn all_bound(&self, fields: &[CanonicalField]) -> bool {
        fields.iter().all(|field| self.is_bound(*field))
    }

    /// Bound fields in output column order.
    pub fn bound_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| self.is_bound(*field))
            .collect()
    }

    /// Copy of the table keeping only records accepted by `keep`.
    pub fn filtered<F>(&self, mut keep: F) -> CleanedTable
    where
        F: FnMut(&CleanedRecord) -> bool,
    {
        CleanedTable {
            raw: Arc::clone(&self.raw),
            source_columns: self.source_columns.clone(),
            bindings: self.bindings.clone(),
            records: self
                .records
                .iter()
                .filter(|record| keep(record))
                .cloned()
                .collect(),
        }
    }

    /// Exported header row.
    ///
    /// With `clean_only`, only the derived columns of bound fields are
    /// emitted. Otherwise the normalized source columns come first, a derived
    /// column replaces a source column of the same name in place, and the
    /// remaining derived columns follow.
    pub fn headers(&self, clean_only: bool) -> Vec<String> {
        self.layout(clean_only)
            .into_iter()
            .map(|column| match column {
                ExportColumn::Source(idx) => self.source_columns[idx].clone(),
                ExportColumn::Derived(field) => field.column_name().to_string(),
            })
            .collect()
    }

    /// Exported data rows matching [`CleanedTable::headers`].
    pub fn rows(&self, clean_only: bool) -> Vec<Vec<String>> {
        let layout = self.layout(clean_only);
        self.records
            .iter()
            .map(|record| {
                layout
                    .iter()
                    .map(|column| match column {
                        ExportColumn::Source(idx) => self.raw.cell(record.row, *idx).to_string(),
                        ExportColumn::Derived(field) => record.value(*field).unwrap_or_default(),
                    })
                    .collect()
            })
            .collect()
    }

    fn layout(&self, clean_only: bool) -> Vec<ExportColumn> {
        if clean_only {
            return CLEAN_EXPORT_ORDER
                .into_iter()
                .filter(|field| self.is_bound(*field))
                .map(ExportColumn::Derived)
                .collect();
        }
        let derived = self.bound_fields();
        let mut placed = Vec::new();
        let mut layout: Vec<ExportColumn> = self
            .source_columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                match derived.iter().find(|field| field.column_name() == name) {
                    Some(field) if !placed.contains(field) => {
                        placed.push(*field);
                        ExportColumn::Derived(*field)
                    }
                    _ => ExportColumn::Source(idx),
                }
            })
            .collect();
        layout.extend(
            derived
                .into_iter()
                .filter(|field| !placed.contains(field))
                .map(ExportColumn::Derived),
        );
        layout
    }
}

#[derive(Debug, Clone, Copy)]
enum ExportColumn {
    Source(usize),
    Derived(CanonicalField),
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
