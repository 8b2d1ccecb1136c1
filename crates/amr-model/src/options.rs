//! Configuration options for cleaning and reporting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default ceiling (years) for the five-year age bands.
pub const DEFAULT_MAX_AGE_YEARS: f64 = 120.0;

/// Options for the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Ages above this many years (or below zero) are dropped before
    /// five-year banding.
    pub max_age_years: f64,

    /// Impute categorical and numeric fields across rows of one patient.
    /// Default: true.
    pub complete_patients: bool,

    /// Classify rows on the rayon thread pool.
    /// Default: true.
    pub parallel: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            max_age_years: DEFAULT_MAX_AGE_YEARS,
            complete_patients: true,
            parallel: true,
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age_years(mut self, years: f64) -> Self {
        self.max_age_years = years;
        self
    }

    pub fn with_patient_completion(mut self, enable: bool) -> Self {
        self.complete_patients = enable;
        self
    }

    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }
}

/// What a report count measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountBasis {
    /// Count records.
    #[default]
    Rows,
    /// Count distinct patient keys (records without a key are not counted).
    Patients,
}

/// Options for the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub count_basis: CountBasis,

    /// Bug-drug-specimen rows with a smaller total are dropped.
    pub min_total: u64,

    /// Export only the cleaned and key columns of the cleaned table.
    pub keep_only_clean_columns: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            count_basis: CountBasis::Rows,
            min_total: 0,
            keep_only_clean_columns: true,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count_basis(mut self, basis: CountBasis) -> Self {
        self.count_basis = basis;
        self
    }

    pub fn with_min_total(mut self, min_total: u64) -> Self {
        self.min_total = min_total;
        self
    }

    pub fn with_clean_columns_only(mut self, enable: bool) -> Self {
        self.keep_only_clean_columns = enable;
        self
    }
}

/// Complete configuration, usually read from `amr.toml`.
///
/// ```toml
/// [cleaning]
/// max_age_years = 110
///
/// [report]
/// count_basis = "patients"
/// min_total = 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmrConfig {
    pub cleaning: CleaningOptions,
    pub report: ReportOptions,
}

impl AmrConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
