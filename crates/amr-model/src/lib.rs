//! Canonical data model for AMR surveillance record cleaning.
//!
//! - **field**: the fixed set of canonical fields and their source header candidates
//! - **enums**: value domains for the categorical fields
//! - **table**: raw input tables and cleaned output tables
//! - **report**: indicator and bug-drug-specimen row types
//! - **options**: cleaning/report configuration

pub mod enums;
pub mod error;
pub mod field;
pub mod options;
pub mod report;
pub mod table;

pub use enums::{AgeUnit, DAYS_PER_MONTH, DAYS_PER_YEAR, Gender, PatientType, SirResult, UNKNOWN};
pub use error::{AmrError, Result};
pub use field::CanonicalField;
pub use options::{AmrConfig, CleaningOptions, CountBasis, DEFAULT_MAX_AGE_YEARS, ReportOptions};
pub use report::{BugDrugSirRow, IndicatorRow};
pub use table::{CLEAN_EXPORT_ORDER, CleanedRecord, CleanedTable, RawTable, format_numeric};
