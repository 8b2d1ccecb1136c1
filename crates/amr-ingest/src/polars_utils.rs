//! Polars interop.
//!
//! Uploaded spreadsheets often arrive as typed frames; every cell is
//! rendered back to text so the classifiers see one uniform representation.

use std::io::Cursor;

use amr_model::{RawTable, format_numeric};
use anyhow::{Context, Result};
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};

/// Text form of one frame cell: null and NaN become empty, floats lose
/// trailing zeros, strings are trimmed.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) if v.is_nan() => String::new(),
        AnyValue::Float64(v) if v.is_nan() => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        scalar @ (AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_)
        | AnyValue::Boolean(_)) => scalar.to_string(),
        other => other.to_string(),
    }
}

/// Render every cell of a frame as text.
pub fn raw_table_from_frame(df: &DataFrame) -> RawTable {
    let headers: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let columns = df.get_columns();
    let rows = (0..df.height())
        .map(|idx| {
            columns
                .iter()
                .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect();
    RawTable::new(headers, rows)
}

/// Parse UTF-8 CSV text with polars, every column as a string.
///
/// No row is treated as a header; ragged lines are truncated or null-filled
/// so the caller can apply its own header and blank-row rules.
pub fn read_csv_frame(text: Vec<u8>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(text))
        .finish()
        .context("Failed to read CSV with polars")?;
    Ok(df)
}
