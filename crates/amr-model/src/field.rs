//! Canonical fields produced by the cleaning pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed output attributes the cleaning pipeline may populate.
///
/// Declaration order is the output column order of the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Year,
    AgeValue,
    AgeUnit,
    Gender,
    PatientType,
    Specimen,
    Pathogen,
    Antibiotic,
    SirResult,
    SampleDate,
    PatientKey,
    Facility,
    FacilityId,
}

impl CanonicalField {
    /// All fields in output column order.
    pub const ALL: [CanonicalField; 13] = [
        CanonicalField::Year,
        CanonicalField::AgeValue,
        CanonicalField::AgeUnit,
        CanonicalField::Gender,
        CanonicalField::PatientType,
        CanonicalField::Specimen,
        CanonicalField::Pathogen,
        CanonicalField::Antibiotic,
        CanonicalField::SirResult,
        CanonicalField::SampleDate,
        CanonicalField::PatientKey,
        CanonicalField::Facility,
        CanonicalField::FacilityId,
    ];

    /// Name of the derived column in the cleaned table.
    pub fn column_name(self) -> &'static str {
        match self {
            CanonicalField::Year => "year_clean",
            CanonicalField::AgeValue => "age_value",
            CanonicalField::AgeUnit => "age_type",
            CanonicalField::Gender => "gender_clean",
            CanonicalField::PatientType => "patienttype_clean",
            CanonicalField::Specimen => "specimen_clean",
            CanonicalField::Pathogen => "pathogen_clean",
            CanonicalField::Antibiotic => "antibiotic_clean",
            CanonicalField::SirResult => "sir_clean",
            CanonicalField::SampleDate => "sample_date_clean",
            CanonicalField::PatientKey => "patient_id_key",
            CanonicalField::Facility => "facility_clean",
            CanonicalField::FacilityId => "hcf_id_clean",
        }
    }

    /// Ordered list of normalized header names accepted for this field.
    ///
    /// Age magnitude and unit are both derived from the same source column.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Year => &["year"],
            CanonicalField::AgeValue | CanonicalField::AgeUnit => &["age", "age_value"],
            CanonicalField::Gender => &["gender", "sex"],
            CanonicalField::PatientType => &["patienttype", "patient_type"],
            CanonicalField::Specimen => &["specimen"],
            CanonicalField::Pathogen => &["pathogen", "organism"],
            CanonicalField::Antibiotic => &["antibiotic", "antibiotics", "ab"],
            CanonicalField::SirResult => &["sir", "resultmicsir", "resultzonesir", "resultetestsir"],
            CanonicalField::SampleDate => &[
                "sample_date",
                "dateofhospitalisation_visit",
                "date",
                "collection_date",
            ],
            CanonicalField::PatientKey => &["patient_id", "patientid", "pid"],
            CanonicalField::Facility => {
                &["facility", "hospital", "site", "location", "clinic", "ward"]
            }
            CanonicalField::FacilityId => {
                &["hcf_id", "hcfid", "facility_id", "site_id", "hospital_id"]
            }
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Year => "Year",
            CanonicalField::AgeValue => "Age value",
            CanonicalField::AgeUnit => "Age unit",
            CanonicalField::Gender => "Gender",
            CanonicalField::PatientType => "Patient type",
            CanonicalField::Specimen => "Specimen",
            CanonicalField::Pathogen => "Pathogen",
            CanonicalField::Antibiotic => "Antibiotic",
            CanonicalField::SirResult => "SIR result",
            CanonicalField::SampleDate => "Sample date",
            CanonicalField::PatientKey => "Patient key",
            CanonicalField::Facility => "Facility",
            CanonicalField::FacilityId => "Facility ID",
        }
    }

    /// Categorical fields imputed across a patient's rows, falling back to
    /// [`UNKNOWN`](crate::UNKNOWN) when no row reports a value.
    pub const IMPUTED_CATEGORICAL: [CanonicalField; 8] = [
        CanonicalField::Gender,
        CanonicalField::PatientType,
        CanonicalField::Specimen,
        CanonicalField::Pathogen,
        CanonicalField::Facility,
        CanonicalField::FacilityId,
        CanonicalField::SirResult,
        CanonicalField::AgeUnit,
    ];

    /// Numeric fields imputed across a patient's rows, never defaulted.
    pub const IMPUTED_NUMERIC: [CanonicalField; 2] =
        [CanonicalField::AgeValue, CanonicalField::Year];
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
