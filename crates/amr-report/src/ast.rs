//! Interpreted antimicrobial susceptibility test listing.

use amr_model::{CanonicalField, CleanedTable, SirResult};
use serde::Serialize;

/// Projection columns, in output order.
const AST_COLUMNS: [CanonicalField; 9] = [
    CanonicalField::SampleDate,
    CanonicalField::Year,
    CanonicalField::FacilityId,
    CanonicalField::Facility,
    CanonicalField::PatientKey,
    CanonicalField::Specimen,
    CanonicalField::Pathogen,
    CanonicalField::Antibiotic,
    CanonicalField::SirResult,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AstTable {
    pub columns: Vec<CanonicalField>,
    pub rows: Vec<Vec<String>>,
}

impl AstTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows with both an antibiotic and an interpreted S/I/R result, projected
/// onto the bound columns of [`AST_COLUMNS`].
///
/// Empty unless the antibiotic and SIR columns are bound.
pub fn ast_table(table: &CleanedTable) -> AstTable {
    if !table.all_bound(&[CanonicalField::Antibiotic, CanonicalField::SirResult]) {
        return AstTable::default();
    }
    let columns: Vec<CanonicalField> = AST_COLUMNS
        .into_iter()
        .filter(|field| table.is_bound(*field))
        .collect();
    let rows = table
        .records
        .iter()
        .filter(|record| {
            record.antibiotic.is_some() && record.sir.is_some_and(SirResult::is_interpreted)
        })
        .map(|record| {
            columns
                .iter()
                .map(|field| record.value(*field).unwrap_or_default())
                .collect()
        })
        .collect();
    AstTable { columns, rows }
}
