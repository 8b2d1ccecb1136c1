//! Command-line arguments for `amr`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "amr",
    version,
    about = "Clean AMR surveillance lab exports and build standard report tables",
    long_about = "Clean antimicrobial-resistance laboratory exports into a canonical table.\n\n\
                  Resolves columns by header name, normalizes ages, pathogens, antibiotics,\n\
                  specimens and susceptibility results, completes patient-level fields\n\
                  across rows, and writes antibiogram, indicator and bug-drug tables as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v debug, -vv trace, -q warnings, -qq errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient-level cell values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a CSV export and write the report tables.
    Clean(CleanArgs),

    /// Run the pipeline on the built-in demonstration dataset.
    Demo(DemoArgs),

    /// List canonical fields and the headers each one is matched against.
    Fields,
}

#[derive(Args)]
pub struct CleanArgs {
    /// CSV file exported from the laboratory system.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT directory>/amr_output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Output directory (default: ./amr_demo_output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Flags shared by every command that runs the pipeline.
#[derive(Args)]
pub struct RunArgs {
    /// TOML file with `[cleaning]` and `[report]` tables.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Count report entries by rows or by distinct patients.
    #[arg(long = "count-basis", value_enum)]
    pub count_basis: Option<CountBasisArg>,

    /// Drop bug-drug-specimen rows with fewer results than this.
    #[arg(long = "min-total", value_name = "N")]
    pub min_total: Option<u64>,

    /// Keep the original columns in cleaned_data.csv.
    #[arg(long = "all-columns")]
    pub all_columns: bool,

    /// Skip filling patient-level fields across rows.
    #[arg(long = "no-complete")]
    pub no_complete: bool,

    /// Classify rows on a single thread.
    #[arg(long = "serial")]
    pub serial: bool,

    /// Only report these sample years (repeatable).
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,

    /// Only report these facility ids (repeatable).
    #[arg(long = "facility-id", value_name = "ID")]
    pub facility_ids: Vec<String>,

    /// Only report these canonical specimen labels (repeatable).
    #[arg(long = "specimen", value_name = "LABEL")]
    pub specimens: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CountBasisArg {
    Rows,
    Patients,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing::level_filters::LevelFilter;

    use super::Cli;

    #[test]
    fn default_verbosity_shows_info() {
        let cli = Cli::try_parse_from(["amr", "fields"]).unwrap();
        assert_eq!(cli.verbosity.tracing_level_filter(), LevelFilter::INFO);
        assert!(!cli.verbosity.is_present());

        let quiet = Cli::try_parse_from(["amr", "-q", "fields"]).unwrap();
        assert_eq!(quiet.verbosity.tracing_level_filter(), LevelFilter::WARN);
        let verbose = Cli::try_parse_from(["amr", "-v", "fields"]).unwrap();
        assert_eq!(verbose.verbosity.tracing_level_filter(), LevelFilter::DEBUG);
    }
}
