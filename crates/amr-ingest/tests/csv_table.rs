use std::fs;

use amr_ingest::{
    demo_table, read_csv_bytes, read_csv_table, read_table_auto, read_table_with_threshold,
};

#[test]
fn reads_headers_and_rows() {
    let table = read_csv_bytes(b"AGE, SEX ,Specimen\n28YRS,M,urine\n6DYS,F,blood\n")
        .expect("read csv");
    assert_eq!(table.headers, vec!["AGE", "SEX", "Specimen"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["6DYS", "F", "blood"]);
}

#[test]
fn skips_blank_rows_and_pads_short_rows() {
    let table = read_csv_bytes(b"\n,,\nA,B,C\n1,2\n,,\n3,4,5,6\n").expect("read csv");
    assert_eq!(table.headers, vec!["A", "B", "C"]);
    assert_eq!(table.rows, vec![vec!["1", "2", ""], vec!["3", "4", "5"]]);
}

#[test]
fn collapses_header_whitespace_and_strips_bom() {
    let table = read_csv_bytes("\u{feff}Patient   ID,Sample Date\nA1,2025-01-01\n".as_bytes())
        .expect("read csv");
    assert_eq!(table.headers, vec!["Patient ID", "Sample Date"]);
}

#[test]
fn falls_back_to_latin1() {
    // "Hôpital" encoded as Latin-1.
    let bytes = b"FACILITY\nH\xf4pital\n";
    let table = read_csv_bytes(bytes).expect("read csv");
    assert_eq!(table.rows[0][0], "Hôpital");
}

#[test]
fn empty_input_is_an_empty_table() {
    let table = read_csv_bytes(b"").expect("read csv");
    assert!(table.headers.is_empty());
    assert!(table.is_empty());
}

#[test]
fn reads_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("lab.csv");
    fs::write(&path, "SIR,ANTIBIOTIC\nS,CIP\n").expect("write file");
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.cell(0, 1), "CIP");
    let auto = read_table_auto(&path).expect("read auto");
    assert_eq!(auto, table);
}

#[test]
fn strips_bom_before_latin1_fallback() {
    let bytes = b"\xef\xbb\xbfFACILITY\nH\xf4pital\n";
    let table = read_csv_bytes(bytes).expect("read csv");
    assert_eq!(table.headers, vec!["FACILITY"]);
    assert_eq!(table.rows[0][0], "Hôpital");
}

#[test]
fn polars_reader_follows_the_same_rules() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("legacy.csv");
    let mut bytes = b"\xef\xbb\xbf\n,,\n Patient   ID ,FACILITY,SIR\n".to_vec();
    bytes.extend_from_slice(b"P1,H\xf4pital,R\n,,\nP2, Clinic ,S\n\n");
    fs::write(&path, &bytes).expect("write file");

    let small = read_table_with_threshold(&path, u64::MAX).expect("read with csv");
    let large = read_table_with_threshold(&path, 0).expect("read with polars");
    assert_eq!(small.headers, vec!["Patient ID", "FACILITY", "SIR"]);
    assert_eq!(
        small.rows,
        vec![vec!["P1", "Hôpital", "R"], vec!["P2", "Clinic", "S"]]
    );
    assert_eq!(large, small);
    assert_eq!(read_table_auto(&path).expect("read auto"), small);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(read_csv_table(&dir.path().join("absent.csv")).is_err());
}

#[test]
fn demo_table_has_six_rows() {
    let table = demo_table();
    assert_eq!(table.width(), 12);
    assert_eq!(table.height(), 6);
    assert_eq!(table.cell(3, 9), "S-Susceptible");
}
