use amr_ingest::{any_to_string, raw_table_from_frame};
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

#[test]
fn renders_scalars_as_text() {
    assert_eq!(any_to_string(AnyValue::Null), "");
    assert_eq!(any_to_string(AnyValue::Int64(2025)), "2025");
    assert_eq!(any_to_string(AnyValue::Float64(2025.0)), "2025");
    assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
    assert_eq!(any_to_string(AnyValue::Float64(f64::NAN)), "");
    assert_eq!(any_to_string(AnyValue::String(" urine ")), "urine");
}

#[test]
fn converts_typed_frame() {
    let columns: Vec<Column> = vec![
        Series::new("YEAR".into(), &[Some(2025i64), None]).into_column(),
        Series::new("SEX".into(), &[Some("M"), Some("F")]).into_column(),
    ];
    let df = DataFrame::new(columns).expect("frame");
    let table = raw_table_from_frame(&df);
    assert_eq!(table.headers, vec!["YEAR", "SEX"]);
    assert_eq!(table.rows, vec![vec!["2025", "M"], vec!["", "F"]]);
}
