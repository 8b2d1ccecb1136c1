use std::path::PathBuf;

use amr_model::CanonicalField;
use amr_report::ReportBundle;

/// Everything a run produced, for the terminal summary.
#[derive(Debug)]
pub struct RunResult {
    /// Input file name, or `demo` for the built-in dataset.
    pub source: String,
    pub output_dir: PathBuf,
    pub input_rows: usize,
    /// Rows left after the record filter.
    pub reported_rows: usize,
    /// Resolved fields and the original header each one was read from.
    pub bound: Vec<(CanonicalField, String)>,
    pub unresolved: Vec<CanonicalField>,
    pub outputs: Vec<OutputFile>,
    pub reports: ReportBundle,
}

#[derive(Debug, Clone)]
pub struct OutputFile {
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
}
