//! Specimen type classification.

use super::rules::{SubstringRule, first_match};
use super::text::{collapse_whitespace, is_na_like, title_case};

/// Precedence-ordered specimen rules over the normalized text.
pub const SPECIMEN_RULES: &[SubstringRule] = &[
    SubstringRule::all(&["blood"], "Blood"),
    SubstringRule::all(&["urine"], "Urine"),
    SubstringRule::all(&["sputum"], "Sputum"),
    SubstringRule::all(&["throat", "swab"], "Throat swab"),
    SubstringRule::all(&["tracheal"], "Tracheal aspirate"),
    SubstringRule::all(&["catheter", "tip"], "Catheter tip"),
    SubstringRule::all(&["shunt", "tip"], "Shunt tip"),
    SubstringRule::all(&["ascitic"], "Ascitic fluid"),
    SubstringRule::all(&["hydrocele"], "Hydrocele fluid"),
    SubstringRule::any(&["genital", "urogenital"], "Genital swab"),
    SubstringRule::any(&["pus", "purulent"], "Pus"),
    SubstringRule::all(&["lowresp"], "Lower respiratory (unspecified)"),
];

fn normalize(raw: &str) -> String {
    collapse_whitespace(&raw.to_lowercase().replace(['_', '-'], " "))
}

/// Classify a specimen cell.
///
/// Text matching no rule falls back to its title-cased normalized form.
pub fn clean_specimen(raw: &str) -> Option<String> {
    if is_na_like(raw) {
        return None;
    }
    let value = normalize(raw);
    if let Some(label) = SPECIMEN_RULES
        .iter()
        .map(|rule| rule.label)
        .find(|label| normalize(label) == value)
    {
        return Some(label.to_string());
    }
    if let Some(label) = first_match(SPECIMEN_RULES, &value) {
        return Some(label.to_string());
    }
    Some(title_case(&value))
}
