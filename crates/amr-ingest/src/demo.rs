//! Built-in demonstration dataset.

use amr_model::RawTable;

const HEADERS: [&str; 12] = [
    "YEAR",
    "PATIENT_ID",
    "AGE",
    "GENDER",
    "PATIENTTYPE",
    "SAMPLE_DATE",
    "SPECIMEN",
    "PATHOGEN",
    "ANTIBIOTIC",
    "SIR",
    "FACILITY",
    "HCF_ID",
];

const ROWS: [[&str; 12]; 6] = [
    [
        "2025", "Bu25-1-03", "1yr 7 months", "M", "OUTPATIENT", "07/01/2025", "urine", "KLEPNE",
        "CIP", "S", "Central Hospital", "CH-01",
    ],
    [
        "2025", "Bu25-1-04", "28YRS", "F", "INPATENT", "2025-02-11", "BLOOD",
        "Escherichia coli", "ceftriaxone", "R", "Central Hospital", "CH-01",
    ],
    [
        "2025", "AA-1", "6DYS", "m", "Outpatient", "2025-03-09", "throat swab",
        "Staphylococcus aureus", "gentamicin", "I/S", "West Clinic", "WC-02",
    ],
    [
        "2025", "AA-2", "3MONTHS", ".", "Inpatient", "2025-03-11", "LOWRESP-", "PSEAER",
        "MEROPENOM", "S-Susceptible", "West Clinic", "WC-02",
    ],
    [
        "2025", "AA-3", "45yrs", "F", "OUTPATIENT", "2025-04-01", "urine",
        "Klebsiella pneumoniae", "CIP", "R", "Central Hospital", "CH-01",
    ],
    [
        "2025", "AA-4", "10YRS", "M", "Inpatient", "2025-04-02", "sputum",
        "Citrobacter freundii", "AMK", "S", "West Clinic", "WC-02",
    ],
];

/// Six mixed-quality rows exercising every field classifier.
pub fn demo_table() -> RawTable {
    RawTable::new(
        HEADERS.iter().map(|h| (*h).to_string()).collect(),
        ROWS.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    )
}
