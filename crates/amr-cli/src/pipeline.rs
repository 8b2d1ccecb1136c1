//! Clean, report and write: one run over one raw table.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, trace, warn};

use amr_model::{
    AmrConfig, CanonicalField, CleanedTable, CleaningOptions, IndicatorRow, RawTable,
    ReportOptions,
};
use amr_report::{CleanedExport, RecordFilter, ReportBundle, SummaryMetrics, TabularReport};
use amr_transform::clean_table;

use crate::logging::redact_value;
use crate::types::{OutputFile, RunResult};

pub const CLEANED_DATA_FILE: &str = "cleaned_data.csv";
pub const ORGANISMS_FILE: &str = "organisms_list.csv";
pub const AGE_BANDS_FILE: &str = "age_bands.csv";
pub const AST_FILE: &str = "interpreted_ast_clean.csv";
pub const ANTIBIOGRAM_FILE: &str = "antibiogram_matrix.csv";
pub const INDICATORS_FILE: &str = "indicators.csv";
pub const BUG_DRUG_FILE: &str = "bug_drug_specimen.csv";
pub const CLIENTS_BY_SIR_FILE: &str = "clients_by_SIR.csv";
pub const CLIENTS_BY_PATIENT_TYPE_FILE: &str = "clients_by_PatientType.csv";
pub const CLIENTS_BY_PATIENT_TYPE_SIR_FILE: &str = "clients_by_PType_SIR.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Rows whose patient key is echoed at trace level.
const TRACE_SAMPLE_ROWS: usize = 5;

/// Settings for one run, after merging the config file with CLI flags.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub config: AmrConfig,
    pub filter: RecordFilter,
}

impl RunSettings {
    pub fn new(config: AmrConfig) -> Self {
        Self {
            config,
            filter: RecordFilter::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    source: &'a str,
    input_rows: usize,
    reported_rows: usize,
    columns: BTreeMap<&'static str, &'a str>,
    unresolved: Vec<&'static str>,
    summary: SummaryMetrics,
    indicators: &'a [IndicatorRow],
    cleaning: &'a CleaningOptions,
    report: &'a ReportOptions,
    filter: &'a RecordFilter,
}

/// Clean `raw`, build every report and write them under `output_dir`.
pub fn run_pipeline(
    source: &str,
    raw: RawTable,
    settings: &RunSettings,
    output_dir: &Path,
) -> Result<RunResult> {
    let span = info_span!("run", source = %source);
    let _guard = span.enter();
    let config = &settings.config;
    let input_rows = raw.height();

    let cleaned = clean_table(Arc::new(raw), &config.cleaning);
    let bound = bound_headers(&cleaned);
    let unresolved: Vec<CanonicalField> = CanonicalField::ALL
        .into_iter()
        .filter(|field| !cleaned.is_bound(*field))
        .collect();
    if !cleaned.is_bound(CanonicalField::PatientKey) {
        warn!("no patient id column found; counts fall back to rows");
    }
    for record in cleaned.records.iter().take(TRACE_SAMPLE_ROWS) {
        trace!(
            row = record.row,
            patient_key = redact_value(record.patient_key.as_deref().unwrap_or_default()),
            "cleaned row"
        );
    }

    let reported = if settings.filter.is_empty() {
        cleaned
    } else {
        let filtered = settings.filter.apply(&cleaned);
        info!(
            before = cleaned.height(),
            after = filtered.height(),
            "record filter applied"
        );
        filtered
    };
    let reports = ReportBundle::build(&reported, config);

    let write_start = Instant::now();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;
    let clean_only = config.report.keep_only_clean_columns;
    let outputs = vec![
        write_report(
            output_dir,
            CLEANED_DATA_FILE,
            &CleanedExport::new(&reported, clean_only),
        )?,
        write_report(output_dir, ORGANISMS_FILE, &reports.organisms)?,
        write_report(output_dir, AGE_BANDS_FILE, &reports.age_bands)?,
        write_report(output_dir, AST_FILE, &reports.ast)?,
        write_report(output_dir, ANTIBIOGRAM_FILE, &reports.antibiogram)?,
        write_report(output_dir, INDICATORS_FILE, reports.indicators.as_slice())?,
        write_report(output_dir, BUG_DRUG_FILE, reports.bug_drug.as_slice())?,
        write_report(output_dir, CLIENTS_BY_SIR_FILE, &reports.clients_by_sir)?,
        write_report(
            output_dir,
            CLIENTS_BY_PATIENT_TYPE_FILE,
            &reports.clients_by_patient_type,
        )?,
        write_report(
            output_dir,
            CLIENTS_BY_PATIENT_TYPE_SIR_FILE,
            &reports.clients_by_patient_type_and_sir,
        )?,
    ];

    let document = SummaryDocument {
        source,
        input_rows,
        reported_rows: reported.height(),
        columns: bound
            .iter()
            .map(|(field, header)| (field.column_name(), header.as_str()))
            .collect(),
        unresolved: unresolved.iter().map(|field| field.column_name()).collect(),
        summary: reports.summary,
        indicators: &reports.indicators,
        cleaning: &config.cleaning,
        report: &config.report,
        filter: &settings.filter,
    };
    let summary_path = output_dir.join(SUMMARY_FILE);
    let file = File::create(&summary_path)
        .with_context(|| format!("create {}", summary_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &document)
        .with_context(|| format!("write {}", summary_path.display()))?;
    info!(
        output_dir = %output_dir.display(),
        files = outputs.len() + 1,
        duration_ms = write_start.elapsed().as_millis(),
        "outputs written"
    );

    Ok(RunResult {
        source: source.to_string(),
        output_dir: output_dir.to_path_buf(),
        input_rows,
        reported_rows: reported.height(),
        bound,
        unresolved,
        outputs,
        reports,
    })
}

/// Each bound field with the original header it was read from.
fn bound_headers(table: &CleanedTable) -> Vec<(CanonicalField, String)> {
    table
        .bound_fields()
        .into_iter()
        .filter_map(|field| {
            let column = *table.bindings.get(&field)?;
            let header = table.raw.headers.get(column)?;
            Some((field, header.clone()))
        })
        .collect()
}

fn write_report<R>(dir: &Path, name: &str, report: &R) -> Result<OutputFile>
where
    R: TabularReport + ?Sized,
{
    let path = dir.join(name);
    report
        .write_csv(&path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(OutputFile {
        path,
        rows: report.rows().len(),
    })
}
