//! Every report for one (filtered) cleaned table.

use amr_model::{AmrConfig, BugDrugSirRow, CleanedTable, IndicatorRow};
use serde::Serialize;
use tracing::{debug, info_span};

use crate::antibiogram::{AntibiogramMatrix, antibiogram_matrix};
use crate::ast::{AstTable, ast_table};
use crate::bug_drug::bug_drug_specimen;
use crate::clients::{
    ClientTable, clients_by_patient_type, clients_by_patient_type_and_sir, clients_by_sir,
};
use crate::counts::{ValueCounts, age_band_counts, organisms_counts};
use crate::indicators::indicator_table;
use crate::summary::{SummaryMetrics, summary_metrics};

#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub summary: SummaryMetrics,
    pub organisms: ValueCounts,
    pub age_bands: ValueCounts,
    pub ast: AstTable,
    pub antibiogram: AntibiogramMatrix,
    pub indicators: Vec<IndicatorRow>,
    pub bug_drug: Vec<BugDrugSirRow>,
    pub clients_by_sir: ClientTable,
    pub clients_by_patient_type: ClientTable,
    pub clients_by_patient_type_and_sir: ClientTable,
}

impl ReportBundle {
    /// Age bands use `config.cleaning.max_age_years` as their ceiling; every
    /// other report follows `config.report`.
    pub fn build(table: &CleanedTable, config: &AmrConfig) -> Self {
        let options = &config.report;
        let span = info_span!("report", rows = table.height());
        let _guard = span.enter();

        let bundle = Self {
            summary: summary_metrics(table),
            organisms: organisms_counts(table),
            age_bands: age_band_counts(table, config.cleaning.max_age_years),
            ast: ast_table(table),
            antibiogram: antibiogram_matrix(table),
            indicators: indicator_table(table, options.count_basis),
            bug_drug: bug_drug_specimen(table, options),
            clients_by_sir: clients_by_sir(table),
            clients_by_patient_type: clients_by_patient_type(table),
            clients_by_patient_type_and_sir: clients_by_patient_type_and_sir(table),
        };
        debug!(
            pathogens = bundle.antibiogram.pathogens.len(),
            antibiotics = bundle.antibiogram.antibiotics.len(),
            bug_drug_rows = bundle.bug_drug.len(),
            "reports built"
        );
        bundle
    }
}
