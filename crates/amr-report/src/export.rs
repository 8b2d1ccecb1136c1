//! Tabular export of reports and the cleaned table.

use std::fs::File;
use std::path::Path;

use amr_model::{AmrError, BugDrugSirRow, CleanedTable, IndicatorRow, Result, format_numeric};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::antibiogram::AntibiogramMatrix;
use crate::ast::AstTable;
use crate::clients::ClientTable;
use crate::counts::ValueCounts;

/// A report that can be laid out as a header row and string rows.
pub trait TabularReport {
    fn headers(&self) -> Vec<String>;

    fn rows(&self) -> Vec<Vec<String>>;

    /// Serialize as CSV with a header row.
    fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_records(&mut writer, &self.headers(), &self.rows())?;
        writer
            .into_inner()
            .map_err(|err| AmrError::Message(err.to_string()))
    }

    /// Write as a CSV file.
    fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_writer(File::create(path)?);
        write_records(&mut writer, &self.headers(), &self.rows())?;
        writer.flush()?;
        Ok(())
    }

    /// Convert into a polars frame with one string column per header.
    fn to_dataframe(&self) -> Result<DataFrame> {
        let headers = self.headers();
        let rows = self.rows();
        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<&str> = rows
                    .iter()
                    .map(|row| row.get(idx).map_or("", String::as_str))
                    .collect();
                Series::new(name.as_str().into(), values).into()
            })
            .collect();
        DataFrame::new(columns).map_err(|err| AmrError::Frame(err.to_string()))
    }
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    Ok(())
}

fn optional_number(value: Option<f64>) -> String {
    value.map(format_numeric).unwrap_or_default()
}

impl TabularReport for ValueCounts {
    fn headers(&self) -> Vec<String> {
        vec![self.heading.clone(), "Count".to_string(), "Percent".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|entry| {
                vec![
                    entry.value.clone(),
                    entry.count.to_string(),
                    format_numeric(entry.percent),
                ]
            })
            .collect()
    }
}

impl TabularReport for AntibiogramMatrix {
    fn headers(&self) -> Vec<String> {
        std::iter::once("Pathogen".to_string())
            .chain(self.antibiotics.iter().cloned())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.pathogens
            .iter()
            .zip(&self.cells)
            .map(|(pathogen, cells)| {
                std::iter::once(pathogen.clone())
                    .chain(cells.iter().map(|cell| format_numeric(*cell)))
                    .collect()
            })
            .collect()
    }
}

impl TabularReport for [IndicatorRow] {
    fn headers(&self) -> Vec<String> {
        ["Code", "Description", "Number"].map(String::from).to_vec()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|row| vec![row.code.clone(), row.description.clone(), row.number.to_string()])
            .collect()
    }
}

impl TabularReport for [BugDrugSirRow] {
    fn headers(&self) -> Vec<String> {
        [
            "Pathogen",
            "SampleType",
            "Antimicrobial",
            "S",
            "I",
            "R",
            "Total",
            "%S",
            "%I",
            "%R",
        ]
        .map(String::from)
        .to_vec()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|row| {
                vec![
                    row.pathogen.clone(),
                    row.sample_type.clone(),
                    row.antimicrobial.clone(),
                    row.s.to_string(),
                    row.i.to_string(),
                    row.r.to_string(),
                    row.total.to_string(),
                    optional_number(row.pct_s),
                    optional_number(row.pct_i),
                    optional_number(row.pct_r),
                ]
            })
            .collect()
    }
}

impl TabularReport for AstTable {
    fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|field| field.column_name().to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }
}

impl TabularReport for ClientTable {
    fn headers(&self) -> Vec<String> {
        self.group_by
            .iter()
            .map(|field| field.column_name().to_string())
            .chain(std::iter::once("UniquePatients".to_string()))
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.counts
            .iter()
            .map(|count| {
                count
                    .group
                    .iter()
                    .cloned()
                    .chain(std::iter::once(count.unique_patients.to_string()))
                    .collect()
            })
            .collect()
    }
}

/// The cleaned table laid out for export.
#[derive(Debug, Clone, Copy)]
pub struct CleanedExport<'a> {
    pub table: &'a CleanedTable,
    /// Only the derived columns of bound fields.
    pub clean_only: bool,
}

impl<'a> CleanedExport<'a> {
    pub fn new(table: &'a CleanedTable, clean_only: bool) -> Self {
        Self { table, clean_only }
    }
}

impl TabularReport for CleanedExport<'_> {
    fn headers(&self) -> Vec<String> {
        self.table.headers(self.clean_only)
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.table.rows(self.clean_only)
    }
}
