use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use amr_cli::pipeline::{RunSettings, run_pipeline};
use amr_cli::types::RunResult;
use amr_ingest::{demo_table, read_table_auto};
use amr_model::{AmrConfig, CanonicalField, CountBasis};
use amr_report::RecordFilter;

use crate::cli::{CleanArgs, CountBasisArg, DemoArgs, RunArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_clean(args: &CleanArgs) -> Result<RunResult> {
    let settings = settings_from_args(&args.run)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let source = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input")
        .to_string();

    let load_span = info_span!("load", path = %args.input.display());
    let load_start = Instant::now();
    let raw = load_span.in_scope(|| read_table_auto(&args.input))?;
    info!(
        rows = raw.height(),
        columns = raw.width(),
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );
    run_pipeline(&source, raw, &settings, &output_dir)
}

pub fn run_demo(args: &DemoArgs) -> Result<RunResult> {
    let settings = settings_from_args(&args.run)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("amr_demo_output"));
    run_pipeline("demo", demo_table(), &settings, &output_dir)
}

pub fn run_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Matched headers"),
    ]);
    apply_table_style(&mut table);
    for field in CanonicalField::ALL {
        table.add_row(vec![
            field.label().to_string(),
            field.column_name().to_string(),
            field.candidates().join(", "),
        ]);
    }
    println!("{table}");
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        .join("amr_output")
}

/// Config file values first, then CLI flags on top.
fn settings_from_args(args: &RunArgs) -> Result<RunSettings> {
    let mut config = match &args.config {
        Some(path) => AmrConfig::load(path)
            .with_context(|| format!("load config: {}", path.display()))?,
        None => AmrConfig::default(),
    };
    if let Some(basis) = args.count_basis {
        config.report.count_basis = match basis {
            CountBasisArg::Rows => CountBasis::Rows,
            CountBasisArg::Patients => CountBasis::Patients,
        };
    }
    if let Some(min_total) = args.min_total {
        config.report.min_total = min_total;
    }
    if args.all_columns {
        config.report.keep_only_clean_columns = false;
    }
    if args.no_complete {
        config.cleaning.complete_patients = false;
    }
    if args.serial {
        config.cleaning.parallel = false;
    }

    let mut filter = RecordFilter::new();
    if !args.years.is_empty() {
        filter = filter.with_years(args.years.iter().copied());
    }
    if !args.facility_ids.is_empty() {
        filter = filter.with_facility_ids(args.facility_ids.iter().cloned());
    }
    if !args.specimens.is_empty() {
        filter = filter.with_specimens(args.specimens.iter().cloned());
    }
    Ok(RunSettings::new(config).with_filter(filter))
}
