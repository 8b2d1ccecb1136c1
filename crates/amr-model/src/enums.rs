//! Fixed value domains for the categorical canonical fields.
//!
//! Classifiers only ever produce the concrete variants. The `Unknown`
//! variants exist for patient completion, which writes the sentinel when no
//! row of a patient reported a value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel written by patient completion for unresolvable categorical cells.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatientType {
    Inpatient,
    Outpatient,
    Unknown,
}

impl PatientType {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientType::Inpatient => "Inpatient",
            PatientType::Outpatient => "Outpatient",
            PatientType::Unknown => UNKNOWN,
        }
    }
}

/// Antimicrobial susceptibility test interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SirResult {
    Susceptible,
    Intermediate,
    Resistant,
    Unknown,
}

impl SirResult {
    pub fn as_str(self) -> &'static str {
        match self {
            SirResult::Susceptible => "S",
            SirResult::Intermediate => "I",
            SirResult::Resistant => "R",
            SirResult::Unknown => UNKNOWN,
        }
    }

    /// True for an actual S, I or R interpretation.
    pub fn is_interpreted(self) -> bool {
        !matches!(self, SirResult::Unknown)
    }
}

/// Unit of an age magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Unknown,
}

/// Days per year used for every age conversion.
pub const DAYS_PER_YEAR: f64 = 365.25;
/// Days per month (one twelfth of [`DAYS_PER_YEAR`]).
pub const DAYS_PER_MONTH: f64 = 30.4375;

impl AgeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeUnit::Years => "Years",
            AgeUnit::Months => "Months",
            AgeUnit::Weeks => "Weeks",
            AgeUnit::Days => "Days",
            AgeUnit::Hours => "Hours",
            AgeUnit::Unknown => UNKNOWN,
        }
    }

    /// Fixed day equivalent of one unit, `None` for the sentinel.
    pub fn days(self) -> Option<f64> {
        match self {
            AgeUnit::Years => Some(DAYS_PER_YEAR),
            AgeUnit::Months => Some(DAYS_PER_MONTH),
            AgeUnit::Weeks => Some(7.0),
            AgeUnit::Days => Some(1.0),
            AgeUnit::Hours => Some(1.0 / 24.0),
            AgeUnit::Unknown => None,
        }
    }
}

macro_rules! impl_display_and_parse {
    ($($ty:ident => [$($variant:ident),+]),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl $ty {
                /// Every value of the domain, sentinel last.
                pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

                /// Parse an exact canonical label (case-insensitive).
                pub fn from_label(label: &str) -> Option<Self> {
                    let trimmed = label.trim();
                    Self::ALL
                        .iter()
                        .copied()
                        .find(|value| value.as_str().eq_ignore_ascii_case(trimmed))
                }
            }
        )+
    };
}

impl_display_and_parse! {
    Gender => [Male, Female, Unknown],
    PatientType => [Inpatient, Outpatient, Unknown],
    SirResult => [Susceptible, Intermediate, Resistant, Unknown],
    AgeUnit => [Years, Months, Weeks, Days, Hours, Unknown],
}
