//! Antibiotic name canonicalization.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::rules::{SubstringRule, first_match};
use super::text::collapse_whitespace;

/// Lowercased abbreviations, synonyms and misspellings mapped to the
/// canonical drug name. Keys use spaces where the source used hyphens.
pub const ANTIBIOTIC_SYNONYMS: &[(&str, &str)] = &[
    // Penicillins
    ("ampicillin", "Ampicillin"),
    ("amp", "Ampicillin"),
    ("amoxicillin", "Amoxicillin"),
    ("amoxicillin clavulanic acid", "Amoxicillin-clavulanate"),
    ("amoxicillin clavulanate", "Amoxicillin-clavulanate"),
    ("augmentin", "Amoxicillin-clavulanate"),
    ("augumentin", "Amoxicillin-clavulanate"),
    ("amc", "Amoxicillin-clavulanate"),
    ("aug", "Amoxicillin-clavulanate"),
    ("penicillin", "Penicillin"),
    ("pen", "Penicillin"),
    ("penicillin g", "Penicillin G"),
    ("pg", "Penicillin G"),
    ("oxacillin", "Oxacillin"),
    ("oxa", "Oxacillin"),
    ("ox", "Oxacillin"),
    ("cloxacillin", "Cloxacillin"),
    // Cephalosporins
    ("ceftriaxone", "Ceftriaxone"),
    ("ceftriazone", "Ceftriaxone"),
    ("cerftriazone", "Ceftriaxone"),
    ("ctr", "Ceftriaxone"),
    ("cro", "Ceftriaxone"),
    ("cefotaxime", "Cefotaxime"),
    ("ctx", "Cefotaxime"),
    ("ceftazidime", "Ceftazidime"),
    ("caz", "Ceftazidime"),
    ("cefepime", "Cefepime"),
    ("cefepime fep", "Cefepime"),
    ("fep", "Cefepime"),
    ("cpm", "Cefepime"),
    ("cefuroxime", "Cefuroxime"),
    ("cxn", "Cefuroxime"),
    ("cefoxitin", "Cefoxitin"),
    ("fox", "Cefoxitin"),
    ("cefixime", "Cefixime"),
    ("cfm", "Cefixime"),
    ("cefpirome", "Cefpirome"),
    ("cpo", "Cefpirome"),
    // Carbapenems
    ("imipenem", "Imipenem"),
    ("ipm", "Imipenem"),
    ("imi", "Imipenem"),
    ("meropenem", "Meropenem"),
    ("meropenom", "Meropenem"),
    ("mem", "Meropenem"),
    ("ertapenem", "Ertapenem"),
    ("etp", "Ertapenem"),
    ("etrp", "Ertapenem"),
    // Aminoglycosides
    ("gentamicin", "Gentamicin"),
    ("gentamycin", "Gentamicin"),
    ("gen", "Gentamicin"),
    ("gm", "Gentamicin"),
    ("amikacin", "Amikacin"),
    ("amk", "Amikacin"),
    ("ak", "Amikacin"),
    ("akm", "Amikacin"),
    ("streptomycin", "Streptomycin"),
    ("sm", "Streptomycin"),
    // Quinolones
    ("ciprofloxacin", "Ciprofloxacin"),
    ("cip", "Ciprofloxacin"),
    ("norfloxacin", "Norfloxacin"),
    ("nor", "Norfloxacin"),
    ("nalidixic acid", "Nalidixic acid"),
    ("nalidixic", "Nalidixic acid"),
    ("na", "Nalidixic acid"),
    // Macrolides and lincosamides
    ("erythromycin", "Erythromycin"),
    ("ery", "Erythromycin"),
    ("e", "Erythromycin"),
    ("azithromycin", "Azithromycin"),
    ("azm", "Azithromycin"),
    ("azt", "Azithromycin"),
    ("clindamycin", "Clindamycin"),
    ("clin", "Clindamycin"),
    ("clm", "Clindamycin"),
    ("cd", "Clindamycin"),
    // Other classes
    ("chloramphenicol", "Chloramphenicol"),
    ("chl", "Chloramphenicol"),
    ("c", "Chloramphenicol"),
    ("co trimoxazole", "Co-trimoxazole"),
    ("cotrimoxazole", "Co-trimoxazole"),
    ("sxt", "Co-trimoxazole"),
    ("cot", "Co-trimoxazole"),
    ("vancomycin", "Vancomycin"),
    ("vanocomycin", "Vancomycin"),
    ("van", "Vancomycin"),
    ("va", "Vancomycin"),
    ("colistin", "Colistin"),
    ("col", "Colistin"),
    ("nitrofurantoin", "Nitrofurantoin"),
    ("nit", "Nitrofurantoin"),
    ("tigecycline", "Tigecycline"),
    ("tgc", "Tigecycline"),
    ("tetracycline", "Tetracycline"),
    ("tet", "Tetracycline"),
    ("linezolid", "Linezolid"),
    ("lz", "Linezolid"),
];

static SYNONYM_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ANTIBIOTIC_SYNONYMS.iter().copied().collect());

/// Token pairs naming a combination or a specific variant.
const COMPOUND_RULES: &[(&str, &str, &str)] = &[
    ("amoxicillin", "clavulanic", "Amoxicillin-clavulanate"),
    ("penicillin", "g", "Penicillin G"),
];

/// Loose stem matches tried last, in order.
const STEM_RULES: &[SubstringRule] = &[
    SubstringRule::all(&["cipro"], "Ciprofloxacin"),
    SubstringRule::all(&["gentamyc"], "Gentamicin"),
    SubstringRule::all(&["ceftriax"], "Ceftriaxone"),
    SubstringRule::all(&["cefepim"], "Cefepime"),
    SubstringRule::all(&["cefotax"], "Cefotaxime"),
    SubstringRule::all(&["ceftazid"], "Ceftazidime"),
    SubstringRule::all(&["cefurox"], "Cefuroxime"),
    SubstringRule::all(&["meropen"], "Meropenem"),
    SubstringRule::any(&["imipen", "ipm"], "Imipenem"),
    SubstringRule::all(&["ertapen"], "Ertapenem"),
    SubstringRule::all(&["vancom"], "Vancomycin"),
    SubstringRule::all(&["azithro"], "Azithromycin"),
    SubstringRule::all(&["erythro"], "Erythromycin"),
    SubstringRule::all(&["clinda"], "Clindamycin"),
    SubstringRule::all(&["chloramph"], "Chloramphenicol"),
    SubstringRule::any(&["co trim", "cotrim", "sxt"], "Co-trimoxazole"),
    SubstringRule::all(&["nalidix"], "Nalidixic acid"),
    SubstringRule::all(&["norflox"], "Norfloxacin"),
];

fn synonym(key: &str) -> Option<&'static str> {
    SYNONYM_INDEX.get(key).copied()
}

/// Canonicalize an antibiotic name or lab abbreviation.
///
/// Only blank cells count as missing here: `NA` is the lab code for
/// nalidixic acid.
pub fn clean_antibiotic(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let value = collapse_whitespace(&raw.to_lowercase().replace('-', " "));
    if let Some(label) = synonym(&value) {
        return Some(label.to_string());
    }
    let tokens: Vec<&str> = value.split(' ').collect();
    if let Some((_, _, label)) = COMPOUND_RULES
        .iter()
        .find(|(first, second, _)| tokens.contains(first) && tokens.contains(second))
    {
        return Some((*label).to_string());
    }
    if let Some(label) = tokens.iter().find_map(|token| synonym(token)) {
        return Some(label.to_string());
    }
    first_match(STEM_RULES, &value).map(str::to_string)
}
