//! Header-to-field resolution.

use std::collections::BTreeMap;

use amr_model::CanonicalField;

/// Normalize a header for matching: trim, join whitespace runs with `_`,
/// lowercase.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Result of resolving a header set against the canonical fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnBindings {
    /// Normalized headers, index-aligned with the input.
    pub normalized: Vec<String>,
    /// Source column index bound to each resolved field.
    pub fields: BTreeMap<CanonicalField, usize>,
}

impl ColumnBindings {
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Fields no header could be bound to.
    pub fn unresolved(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.is_bound(*field))
            .collect()
    }
}

/// Bind each canonical field to the first source column matching one of its
/// candidates, trying candidates in priority order.
///
/// Never fails; an empty header set resolves nothing.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnBindings {
    let normalized: Vec<String> = headers
        .iter()
        .map(|header| normalize_header(header.as_ref()))
        .collect();

    let fields = CanonicalField::ALL
        .into_iter()
        .filter_map(|field| {
            field
                .candidates()
                .iter()
                .find_map(|candidate| normalized.iter().position(|name| name == candidate))
                .map(|idx| (field, idx))
        })
        .collect();

    ColumnBindings { normalized, fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("  Patient   ID "), "patient_id");
        assert_eq!(normalize_header("SAMPLE\tDATE"), "sample_date");
        assert_eq!(normalize_header(""), "");
    }
}
