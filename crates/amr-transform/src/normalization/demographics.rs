//! Gender, patient type and identifier cleaning.

use amr_model::{Gender, PatientType};

use super::text::{is_na_like, letters_only};

const OUTPATIENT_TOKENS: &[&str] = &["outpatient", "outpatients", "outpt", "opd"];
const INPATIENT_TOKENS: &[&str] = &["inpatient", "inpatients", "inpt", "ipd"];

/// Classify a gender cell by its first letter.
pub fn clean_gender(raw: &str) -> Option<Gender> {
    let letters = letters_only(raw);
    match letters.chars().next()? {
        'm' => Some(Gender::Male),
        'f' => Some(Gender::Female),
        _ => None,
    }
}

/// Classify an inpatient/outpatient label, tolerating common misspellings.
pub fn clean_patient_type(raw: &str) -> Option<PatientType> {
    let letters = letters_only(raw);
    if OUTPATIENT_TOKENS.contains(&letters.as_str()) || letters.starts_with("outpat") {
        return Some(PatientType::Outpatient);
    }
    if INPATIENT_TOKENS.contains(&letters.as_str()) || letters.starts_with("inpat") {
        return Some(PatientType::Inpatient);
    }
    if letters.starts_with("out") {
        return Some(PatientType::Outpatient);
    }
    if letters.starts_with("in") {
        return Some(PatientType::Inpatient);
    }
    None
}

/// Trimmed identifier text (patient key, facility, facility id).
pub fn clean_identifier(raw: &str) -> Option<String> {
    if is_na_like(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}
