//! AMR record cleaning.
//!
//! - **normalization**: per-field classifiers mapping one raw value to a canonical value
//! - **age**: free-text age parsing and age banding
//! - **columns**: header-to-field resolution
//! - **pipeline**: row-by-row cleaning of a raw table
//! - **completion**: cross-row imputation within a patient
//! - **cache**: memoized cleaning keyed by input fingerprint

pub mod age;
pub mod cache;
pub mod columns;
pub mod completion;
pub mod normalization;
pub mod pipeline;

pub use age::{
    Age, BroadAgeBand, FineAgeBand, RecordAgeBands, age_to_years, broad_band, fine_band,
    parse_age,
};
pub use cache::{CleaningCache, fingerprint};
pub use columns::{ColumnBindings, normalize_header, resolve_columns};
pub use completion::complete_patient_fields;
pub use pipeline::{clean_row, clean_table};
