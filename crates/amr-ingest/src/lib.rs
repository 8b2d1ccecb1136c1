//! Tabular input for the AMR cleaning pipeline.
//!
//! The core only needs "rows as a table"; this crate turns CSV files, CSV
//! uploads and polars frames into a [`RawTable`](amr_model::RawTable).

pub mod csv_table;
pub mod demo;
pub mod polars_utils;

pub use csv_table::{
    STREAMING_THRESHOLD_BYTES, read_csv_bytes, read_csv_table, read_table_auto,
    read_table_with_threshold,
};
pub use demo::demo_table;
pub use polars_utils::{any_to_string, raw_table_from_frame, read_csv_frame};
