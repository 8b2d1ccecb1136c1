//! Invariants of the report builders over arbitrary small tables.

use std::sync::Arc;

use amr_model::{CleanedTable, CleaningOptions, CountBasis, RawTable, ReportOptions};
use amr_report::{antibiogram_matrix, bug_drug_specimen, indicator_table};
use amr_transform::clean_table;
use proptest::prelude::*;

const HEADERS: [&str; 5] = ["PATIENT_ID", "SPECIMEN", "PATHOGEN", "ANTIBIOTIC", "SIR"];

fn row() -> impl Strategy<Value = Vec<String>> {
    (
        prop::sample::select(vec!["", "P1", "P2", "P3"]),
        prop::sample::select(vec!["", "blood", "urine", "sputum", "pus", "csf", "genital swab"]),
        prop::sample::select(vec!["", "KLEPNE", "esccol", "unk", "Citrobacter"]),
        prop::sample::select(vec!["", "CIP", "AMK", "mem"]),
        prop::sample::select(vec!["", "S", "I", "R", "I/S", "x"]),
    )
        .prop_map(|(pid, specimen, pathogen, antibiotic, sir)| {
            [pid, specimen, pathogen, antibiotic, sir]
                .map(str::to_string)
                .to_vec()
        })
}

fn table(rows: Vec<Vec<String>>) -> CleanedTable {
    let raw = RawTable::new(HEADERS.map(str::to_string).to_vec(), rows);
    clean_table(Arc::new(raw), &CleaningOptions::default())
}

fn basis() -> impl Strategy<Value = CountBasis> {
    prop_oneof![Just(CountBasis::Rows), Just(CountBasis::Patients)]
}

proptest! {
    #[test]
    fn indicator_children_sum_to_parent(rows in prop::collection::vec(row(), 0..30), basis in basis()) {
        let table = table(rows);
        let indicators = indicator_table(&table, basis);
        prop_assert_eq!(indicators.len(), 18);
        for parent in indicators.iter().filter(|r| r.is_parent()) {
            let children: Vec<_> = indicators
                .iter()
                .filter(|r| r.parent_code() == Some(parent.code.as_str()))
                .collect();
            prop_assert_eq!(children.len(), 8);
            prop_assert_eq!(children.iter().map(|r| r.number).sum::<u64>(), parent.number);
        }
    }

    #[test]
    fn antibiogram_cells_are_percentages(rows in prop::collection::vec(row(), 0..30)) {
        let matrix = antibiogram_matrix(&table(rows));
        prop_assert_eq!(matrix.cells.len(), matrix.pathogens.len());
        for cells in &matrix.cells {
            prop_assert_eq!(cells.len(), matrix.antibiotics.len());
            for cell in cells {
                prop_assert!((0.0..=100.0).contains(cell));
            }
        }
    }

    #[test]
    fn bug_drug_rows_are_consistent(rows in prop::collection::vec(row(), 0..30), basis in basis()) {
        let options = ReportOptions::default().with_count_basis(basis);
        for row in bug_drug_specimen(&table(rows), &options) {
            prop_assert_eq!(row.s + row.i + row.r, row.total);
            match (row.pct_s, row.pct_i, row.pct_r) {
                (Some(s), Some(i), Some(r)) => prop_assert!((s + i + r - 100.0).abs() <= 0.15),
                (None, None, None) => prop_assert_eq!(row.total, 0),
                _ => prop_assert!(false, "mixed percentage presence"),
            }
        }
    }
}
