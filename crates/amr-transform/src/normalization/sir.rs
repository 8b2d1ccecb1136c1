//! Susceptibility result (S/I/R) interpretation.

use std::sync::LazyLock;

use amr_model::SirResult;
use regex::Regex;

use super::text::is_na_like;

/// A lone s, i or r token anywhere in the text.
static ISOLATED_SIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([sir])\b").expect("Invalid SIR regex"));

/// Combined results read as Intermediate.
const AMBIGUOUS_INTERMEDIATE: &[&str] = &["i/s", "s/i"];

fn from_letter(letter: char) -> Option<SirResult> {
    match letter {
        's' => Some(SirResult::Susceptible),
        'i' => Some(SirResult::Intermediate),
        'r' => Some(SirResult::Resistant),
        _ => None,
    }
}

/// Interpret a raw susceptibility cell.
///
/// The dual result `I/S` (or `S/I`) resolves to Intermediate.
pub fn clean_sir(raw: &str) -> Option<SirResult> {
    if is_na_like(raw) {
        return None;
    }
    let value = raw.trim().to_lowercase();
    if AMBIGUOUS_INTERMEDIATE.contains(&value.as_str()) {
        return Some(SirResult::Intermediate);
    }
    if let Some(result) = value.chars().next().and_then(from_letter) {
        return Some(result);
    }
    ISOLATED_SIR
        .captures(&value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(from_letter)
}
