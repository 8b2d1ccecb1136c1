//! Record selection applied before reporting.

use std::collections::BTreeSet;

use amr_model::{CanonicalField, CleanedRecord, CleanedTable, Gender, PatientType};
use serde::{Deserialize, Serialize};

/// Optional allow-lists per field. `None` accepts everything; a set accepts
/// only records whose value is in it.
///
/// A constraint on a field the table never bound is ignored, so a filter
/// built for one dataset can be applied to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub years: Option<BTreeSet<i32>>,
    pub facility_ids: Option<BTreeSet<String>>,
    pub facilities: Option<BTreeSet<String>>,
    pub patient_types: Option<BTreeSet<PatientType>>,
    pub specimens: Option<BTreeSet<String>>,
    pub antibiotics: Option<BTreeSet<String>>,
    pub genders: Option<BTreeSet<Gender>>,
}

fn allows<T: Ord>(allowed: Option<&BTreeSet<T>>, value: Option<&T>) -> bool {
    match allowed {
        None => true,
        Some(set) => value.is_some_and(|v| set.contains(v)),
    }
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = Some(years.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_facility_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.facility_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_facilities<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.facilities = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_patient_types(mut self, types: impl IntoIterator<Item = PatientType>) -> Self {
        self.patient_types = Some(types.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_specimens<S: Into<String>>(mut self, specimens: impl IntoIterator<Item = S>) -> Self {
        self.specimens = Some(specimens.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_antibiotics<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.antibiotics = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_genders(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
        self.genders = Some(genders.into_iter().collect());
        self
    }

    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check a record against every constraint whose field is in `bound`.
    pub fn matches(&self, record: &CleanedRecord, bound: &[CanonicalField]) -> bool {
        let active = |field: CanonicalField| bound.contains(&field);
        (!active(CanonicalField::Year) || allows(self.years.as_ref(), record.year.as_ref()))
            && (!active(CanonicalField::FacilityId)
                || allows(self.facility_ids.as_ref(), record.facility_id.as_ref()))
            && (!active(CanonicalField::Facility)
                || allows(self.facilities.as_ref(), record.facility.as_ref()))
            && (!active(CanonicalField::PatientType)
                || allows(self.patient_types.as_ref(), record.patient_type.as_ref()))
            && (!active(CanonicalField::Specimen)
                || allows(self.specimens.as_ref(), record.specimen.as_ref()))
            && (!active(CanonicalField::Antibiotic)
                || allows(self.antibiotics.as_ref(), record.antibiotic.as_ref()))
            && (!active(CanonicalField::Gender)
                || allows(self.genders.as_ref(), record.gender.as_ref()))
    }

    /// Copy of `table` keeping only matching records.
    pub fn apply(&self, table: &CleanedTable) -> CleanedTable {
        let bound = table.bound_fields();
        table.filtered(|record| self.matches(record, &bound))
    }
}
