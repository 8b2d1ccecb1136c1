//! Aggregation and reporting over cleaned AMR records.
//!
//! Every builder is a pure function of a (possibly filtered)
//! [`CleanedTable`](amr_model::CleanedTable). A report whose source columns
//! were not bound comes back empty rather than failing.

mod common;

pub mod antibiogram;
pub mod ast;
pub mod bug_drug;
pub mod bundle;
pub mod clients;
pub mod counts;
pub mod export;
pub mod filter;
pub mod indicators;
pub mod summary;

pub use antibiogram::{AntibiogramMatrix, antibiogram_matrix};
pub use ast::{AstTable, ast_table};
pub use bug_drug::bug_drug_specimen;
pub use bundle::ReportBundle;
pub use clients::{
    ClientCount, ClientTable, clients_by_patient_type, clients_by_patient_type_and_sir,
    clients_by_sir,
};
pub use counts::{ValueCount, ValueCounts, age_band_counts, organisms_counts, value_counts};
pub use export::{CleanedExport, TabularReport};
pub use filter::RecordFilter;
pub use indicators::{SpecimenCategory, indicator_table, is_positive_culture};
pub use summary::{SummaryMetrics, summary_metrics};
