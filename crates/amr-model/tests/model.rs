//! Tests for amr-model types.

use std::collections::BTreeMap;
use std::sync::Arc;

use amr_model::{
    AgeUnit, AmrConfig, CanonicalField, CleanedRecord, CleanedTable, CountBasis, Gender,
    IndicatorRow, RawTable, SirResult, format_numeric,
};

#[test]
fn labels_parse_back_to_values() {
    for gender in Gender::ALL {
        assert_eq!(Gender::from_label(gender.as_str()), Some(*gender));
    }
    for sir in SirResult::ALL {
        assert_eq!(SirResult::from_label(sir.as_str()), Some(*sir));
    }
    assert_eq!(AgeUnit::from_label(" years "), Some(AgeUnit::Years));
    assert_eq!(Gender::from_label("m"), None);
}

#[test]
fn month_is_one_twelfth_of_a_year() {
    let year = AgeUnit::Years.days().unwrap();
    let month = AgeUnit::Months.days().unwrap();
    assert!((month * 12.0 - year).abs() < 1e-12);
    assert_eq!(AgeUnit::Unknown.days(), None);
}

#[test]
fn format_numeric_strips_trailing_zeros() {
    assert_eq!(format_numeric(28.0), "28");
    assert_eq!(format_numeric(1.583), "1.583");
    assert_eq!(format_numeric(6.50), "6.5");
    assert_eq!(format_numeric(100.0), "100");
}

#[test]
fn config_defaults_fill_missing_keys() {
    let config = AmrConfig::from_toml_str(
        r#"
        [report]
        count_basis = "patients"
        min_total = 30
        "#,
    )
    .expect("parse config");
    assert_eq!(config.report.count_basis, CountBasis::Patients);
    assert_eq!(config.report.min_total, 30);
    assert!(config.report.keep_only_clean_columns);
    assert!((config.cleaning.max_age_years - 120.0).abs() < f64::EPSILON);
    assert!(config.cleaning.complete_patients);
}

#[test]
fn config_rejects_bad_types() {
    let result = AmrConfig::from_toml_str("[cleaning]\nmax_age_years = \"old\"\n");
    assert!(result.is_err());
}

#[test]
fn indicator_row_parent_codes() {
    let parent = IndicatorRow {
        code: "SAMPHH2".to_string(),
        description: "Total".to_string(),
        number: 4,
    };
    let child = IndicatorRow {
        code: "SAMPHH2.3".to_string(),
        description: "Child".to_string(),
        number: 1,
    };
    assert!(parent.is_parent());
    assert!(!child.is_parent());
    assert_eq!(child.parent_code(), Some("SAMPHH2"));
    assert_eq!(parent.parent_code(), None);
}

fn sample_table() -> CleanedTable {
    let raw = RawTable::from_rows(&["SEX", "age_value", "Note"], &[&["M", "28YRS", "x"]]);
    let mut bindings = BTreeMap::new();
    bindings.insert(CanonicalField::Gender, 0);
    bindings.insert(CanonicalField::AgeValue, 1);
    bindings.insert(CanonicalField::AgeUnit, 1);
    let mut record = CleanedRecord::new(0);
    record.gender = Some(Gender::Male);
    record.age_value = Some(28.0);
    record.age_unit = Some(AgeUnit::Years);
    CleanedTable {
        raw: Arc::new(raw),
        source_columns: vec!["sex".into(), "age_value".into(), "note".into()],
        bindings,
        records: vec![record],
    }
}

#[test]
fn export_replaces_colliding_source_column() {
    let table = sample_table();
    assert_eq!(
        table.headers(false),
        vec!["sex", "age_value", "note", "age_type", "gender_clean"]
    );
    assert_eq!(
        table.rows(false),
        vec![vec!["M", "28", "x", "Years", "Male"]]
    );
}

#[test]
fn clean_only_export_uses_key_column_order() {
    let table = sample_table();
    assert_eq!(
        table.headers(true),
        vec!["age_value", "age_type", "gender_clean"]
    );
    assert_eq!(table.rows(true), vec![vec!["28", "Years", "Male"]]);
}

#[test]
fn unbound_fields_are_absent() {
    let table = sample_table();
    assert!(!table.is_bound(CanonicalField::Specimen));
    assert!(!table.headers(false).contains(&"specimen_clean".to_string()));
    let filtered = table.filtered(|record| record.gender == Some(Gender::Female));
    assert!(filtered.is_empty());
    assert_eq!(filtered.headers(true), table.headers(true));
}

#[test]
fn bug_drug_row_serializes_missing_percentages_as_null() {
    let row = amr_model::BugDrugSirRow {
        pathogen: "Escherichia coli".to_string(),
        sample_type: "Urine".to_string(),
        antimicrobial: "Ciprofloxacin".to_string(),
        s: 0,
        i: 0,
        r: 0,
        total: 0,
        pct_s: None,
        pct_i: None,
        pct_r: None,
    };
    let json = serde_json::to_value(&row).expect("serialize row");
    assert_eq!(json["total"], 0);
    assert!(json["pct_s"].is_null());
    assert_eq!(
        serde_json::to_value(CountBasis::Patients).expect("serialize basis"),
        "patients"
    );
}
