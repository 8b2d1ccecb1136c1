//! Row types of the standardized report tables.

use serde::{Deserialize, Serialize};

/// One row of the sample indicator table.
///
/// Codes follow `SAMPHH{1|2}(.[1-8])?`; child rows under a parent sum to the
/// parent's number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub code: String,
    pub description: String,
    pub number: u64,
}

impl IndicatorRow {
    /// True for a parent (total) row such as `SAMPHH1`.
    pub fn is_parent(&self) -> bool {
        !self.code.contains('.')
    }

    /// Parent code of a child row (`SAMPHH1.3` -> `SAMPHH1`).
    pub fn parent_code(&self) -> Option<&str> {
        self.code.split_once('.').map(|(parent, _)| parent)
    }
}

/// Susceptibility counts for one pathogen, specimen and antimicrobial.
///
/// `s + i + r == total`; percentages are `None` when `total` is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugDrugSirRow {
    pub pathogen: String,
    pub sample_type: String,
    pub antimicrobial: String,
    pub s: u64,
    pub i: u64,
    pub r: u64,
    pub total: u64,
    pub pct_s: Option<f64>,
    pub pct_i: Option<f64>,
    pub pct_r: Option<f64>,
}
