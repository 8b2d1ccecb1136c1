//! Small string helpers shared by the classifiers.

/// Tokens treated as an explicitly missing value.
const NA_TOKENS: &[&str] = &["", "na", "n/a", "nan", "none", "null"];

/// True for blank or na-like text (case-insensitive).
pub fn is_na_like(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    NA_TOKENS.contains(&lowered.as_str())
}

/// Lowercased ASCII letters of `value`, everything else dropped.
pub fn letters_only(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, replace every non-alphanumeric character with a space and
/// collapse whitespace.
pub fn alphanumeric_words(value: &str) -> String {
    let spaced: String = value
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { ' ' })
        .collect();
    collapse_whitespace(&spaced)
}

/// Capitalize the first letter of every word, lowercase the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"e.coli"` becomes `"E.Coli"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_cased = true;
        } else {
            out.push(ch);
            previous_cased = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_tokens() {
        assert!(is_na_like(""));
        assert!(is_na_like("  N/A "));
        assert!(is_na_like("NaN"));
        assert!(!is_na_like("nalidixic"));
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("citrobacter freundii"), "Citrobacter Freundii");
        assert_eq!(title_case("CSF fluid"), "Csf Fluid");
        assert_eq!(title_case("e.coli"), "E.Coli");
        assert_eq!(title_case(title_case("e.coli").as_str()), "E.Coli");
    }

    #[test]
    fn alphanumeric_words_strips_punctuation() {
        assert_eq!(alphanumeric_words(" KLEB.-pneumoniae!! "), "kleb pneumoniae");
        assert_eq!(letters_only("M."), "m");
        assert_eq!(collapse_whitespace("  a \t b  "), "a b");
    }
}
