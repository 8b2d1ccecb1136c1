//! Pathogen (organism) name classification.

use super::rules::{SubstringRule, first_match};
use super::text::{alphanumeric_words, is_na_like, title_case};

/// Lab shorthand codes, matched against the text with all spaces removed.
pub const PATHOGEN_CODES: &[(&str, &str)] = &[
    ("klepne", "Klebsiella pneumoniae"),
    ("klepoxy", "Klebsiella oxytoca"),
    ("staaur", "Staphylococcus aureus"),
    ("staepi", "Staphylococcus epidermidis"),
    ("stasap", "Staphylococcus saprophyticus"),
    ("pseaer", "Pseudomonas aeruginosa"),
    ("entclo", "Enterobacter cloacae"),
    ("stenmal", "Stenotrophomonas maltophilia"),
    ("esccol", "Escherichia coli"),
    ("nlf", "Non-lactose fermenters (unspecified)"),
    ("nlfc", "Non-lactose fermenters (unspecified)"),
    ("lfc", "Lactose fermenters (unspecified)"),
];

/// Genus and species rules, first match wins.
pub const PATHOGEN_RULES: &[SubstringRule] = &[
    SubstringRule::all_any(&["klebsiella"], &["pneumon", "pnuemon"], "Klebsiella pneumoniae"),
    SubstringRule::all(&["klebsiella", "oxytoca"], "Klebsiella oxytoca"),
    SubstringRule::all_any(&["coli"], &["escherich", "eschericia"], "Escherichia coli"),
    SubstringRule::all(&["staphylococcus", "aure"], "Staphylococcus aureus"),
    SubstringRule::all_any(&["staphylococcus"], &["epiderm", "epi"], "Staphylococcus epidermidis"),
    SubstringRule::all(&["staphylococcus", "saproph"], "Staphylococcus saprophyticus"),
    SubstringRule::all(&["streptococcus", "pneumon"], "Streptococcus pneumoniae"),
    SubstringRule::all(&["salmonella typhi"], "Salmonella Typhi"),
    SubstringRule::all(&["salmonella", "group d"], "Salmonella Group D"),
    SubstringRule::all(&["pseudomonas", "aeruginosa"], "Pseudomonas aeruginosa"),
    SubstringRule::all(&["enterobacter cloacae"], "Enterobacter cloacae"),
    SubstringRule::all(&["enterobacter"], "Enterobacter spp"),
    SubstringRule::all(&["neisseria", "gonorrhoe"], "Neisseria gonorrhoeae"),
    SubstringRule::all_any(&["neisseria"], &["spp", "species"], "Neisseria spp"),
];

fn canonical_label(value: &str) -> Option<&'static str> {
    PATHOGEN_CODES
        .iter()
        .map(|(_, label)| *label)
        .chain(PATHOGEN_RULES.iter().map(|rule| rule.label))
        .find(|label| alphanumeric_words(label) == value)
}

/// Classify an organism name or lab code.
///
/// Text matching no code or rule falls back to the title-cased raw value.
pub fn clean_pathogen(raw: &str) -> Option<String> {
    if is_na_like(raw) {
        return None;
    }
    let value = alphanumeric_words(raw);
    if let Some(label) = canonical_label(&value) {
        return Some(label.to_string());
    }
    let compact = value.replace(' ', "");
    if let Some((_, label)) = PATHOGEN_CODES.iter().find(|(code, _)| *code == compact) {
        return Some((*label).to_string());
    }
    if let Some(label) = first_match(PATHOGEN_RULES, &value) {
        return Some(label.to_string());
    }
    Some(title_case(raw.trim()))
}
