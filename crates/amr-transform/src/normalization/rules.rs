//! Ordered substring rules.
//!
//! Classifiers with "first match wins" precedence keep their rules as plain
//! data so the order is auditable and each rule can be tested on its own.

/// Maps text to `label` when it contains every `all` needle and, if `any`
/// is non-empty, at least one `any` needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstringRule {
    pub all: &'static [&'static str],
    pub any: &'static [&'static str],
    pub label: &'static str,
}

impl SubstringRule {
    pub const fn all(all: &'static [&'static str], label: &'static str) -> Self {
        Self { all, any: &[], label }
    }

    pub const fn any(any: &'static [&'static str], label: &'static str) -> Self {
        Self { all: &[], any, label }
    }

    pub const fn all_any(
        all: &'static [&'static str],
        any: &'static [&'static str],
        label: &'static str,
    ) -> Self {
        Self { all, any, label }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.all.iter().all(|needle| text.contains(needle))
            && (self.any.is_empty() || self.any.iter().any(|needle| text.contains(needle)))
    }
}

/// Label of the first rule matching `text`.
pub fn first_match(rules: &[SubstringRule], text: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.label)
}
