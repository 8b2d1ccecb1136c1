use std::borrow::Cow;
use std::path::Path;

use amr_model::RawTable;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::polars_utils::{raw_table_from_frame, read_csv_frame};

/// Files above this size are parsed through polars' multi-threaded reader.
pub const STREAMING_THRESHOLD_BYTES: u64 = 10 * 1024 * 1024;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decode as UTF-8, falling back to Latin-1 for legacy exports. A leading
/// UTF-8 byte order mark is dropped either way.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("input is not valid UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

/// First non-blank row becomes the header; blank rows are skipped, short
/// rows padded and surplus cells dropped.
fn table_from_rows<I>(rows: I) -> RawTable
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows_iter = rows
        .into_iter()
        .filter(|row| row.iter().any(|value| !value.is_empty()));
    let Some(header_row) = rows_iter.next() else {
        return RawTable::default();
    };
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let rows = rows_iter
        .map(|mut row| {
            row.resize(headers.len(), String::new());
            row
        })
        .collect();
    RawTable::new(headers, rows)
}

/// Lines before the header that hold nothing but separators.
fn skip_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if line.chars().all(|ch| ch == ',' || ch.is_whitespace()) {
            rest = tail;
        } else {
            break;
        }
    }
    rest
}

/// Parse CSV bytes (for example an uploaded file) into a raw table.
///
/// The first non-blank row is the header. Blank rows are skipped, short rows
/// are padded with empty cells and surplus cells are dropped.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<RawTable> {
    let text = decode(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record {}", idx + 1))?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(table_from_rows(raw_rows))
}

/// Same rules as [`read_csv_bytes`], with polars doing the parsing.
fn read_csv_bytes_polars(bytes: &[u8]) -> Result<RawTable> {
    let text = decode(bytes);
    let body = skip_leading_blank_lines(&text);
    if body.trim().is_empty() {
        return Ok(RawTable::default());
    }
    let frame = read_csv_frame(body.as_bytes().to_vec())?;
    let parsed = raw_table_from_frame(&frame);
    Ok(table_from_rows(parsed.rows.into_iter().map(|row| {
        row.iter().map(|value| normalize_cell(value)).collect()
    })))
}

pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).with_context(|| format!("read csv: {}", path.display()))?;
    read_csv_bytes(&bytes).with_context(|| format!("parse csv: {}", path.display()))
}

/// Read a CSV file, using polars for files above [`STREAMING_THRESHOLD_BYTES`].
pub fn read_table_auto(path: &Path) -> Result<RawTable> {
    read_table_with_threshold(path, STREAMING_THRESHOLD_BYTES)
}

/// [`read_table_auto`] with an explicit size cutoff for the polars reader.
///
/// Both readers decode, clean headers and skip blank rows the same way, so
/// the cutoff only changes which parser runs.
pub fn read_table_with_threshold(path: &Path, threshold_bytes: u64) -> Result<RawTable> {
    let bytes = std::fs::read(path).with_context(|| format!("read csv: {}", path.display()))?;
    let size = bytes.len() as u64;
    let table = if size > threshold_bytes {
        read_csv_bytes_polars(&bytes)
    } else {
        read_csv_bytes(&bytes)
    }
    .with_context(|| format!("parse csv: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        bytes = size,
        polars = size > threshold_bytes,
        "loaded input table"
    );
    Ok(table)
}
