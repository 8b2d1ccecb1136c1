//! Field classifiers.
//!
//! Every classifier is total: it maps one raw cell to a canonical value or
//! `None`, and passes canonical values through unchanged.

pub mod antibiotic;
pub mod datetime;
pub mod demographics;
pub mod pathogen;
pub mod rules;
pub mod sir;
pub mod specimen;
pub mod text;

pub use antibiotic::{ANTIBIOTIC_SYNONYMS, clean_antibiotic};
pub use datetime::{clean_year, parse_sample_date};
pub use demographics::{clean_gender, clean_identifier, clean_patient_type};
pub use pathogen::{PATHOGEN_CODES, clean_pathogen};
pub use rules::{SubstringRule, first_match};
pub use sir::clean_sir;
pub use specimen::{SPECIMEN_RULES, clean_specimen};
