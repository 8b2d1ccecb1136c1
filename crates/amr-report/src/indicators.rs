//! Sample indicator table (`SAMPHH1`, `SAMPHH2` and their children).
//!
//! Every row falls into exactly one specimen category, so child rows sum to
//! their parent by construction.

use std::fmt;

use amr_model::{CleanedRecord, CleanedTable, CountBasis, IndicatorRow, UNKNOWN};
use amr_transform::normalization::clean_specimen;

use crate::common::Tally;

/// Coarse specimen buckets of the indicator table, in child-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecimenCategory {
    Blood,
    Urine,
    LowerRespiratory,
    UpperRespiratory,
    Pus,
    SterileFluid,
    Genital,
    Other,
}

impl SpecimenCategory {
    pub const ALL: [SpecimenCategory; 8] = [
        SpecimenCategory::Blood,
        SpecimenCategory::Urine,
        SpecimenCategory::LowerRespiratory,
        SpecimenCategory::UpperRespiratory,
        SpecimenCategory::Pus,
        SpecimenCategory::SterileFluid,
        SpecimenCategory::Genital,
        SpecimenCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpecimenCategory::Blood => "Blood",
            SpecimenCategory::Urine => "Urine",
            SpecimenCategory::LowerRespiratory => "Lower respiratory",
            SpecimenCategory::UpperRespiratory => "Throat/upper respiratory swab",
            SpecimenCategory::Pus => "Pus",
            SpecimenCategory::SterileFluid => "Sterile body fluids",
            SpecimenCategory::Genital => "Genital swab",
            SpecimenCategory::Other => "Other",
        }
    }

    /// 1-based child index in indicator codes.
    pub fn code_index(self) -> usize {
        self as usize + 1
    }

    /// Bucket a specimen through the specimen classifier, so raw and
    /// canonical labels land in the same category. Missing and free-text
    /// specimens are `Other`.
    pub fn classify(specimen: Option<&str>) -> SpecimenCategory {
        let label = specimen.and_then(clean_specimen);
        match label.as_deref() {
            Some("Blood") => SpecimenCategory::Blood,
            Some("Urine") => SpecimenCategory::Urine,
            Some("Sputum" | "Tracheal aspirate" | "Lower respiratory (unspecified)") => {
                SpecimenCategory::LowerRespiratory
            }
            Some("Throat swab") => SpecimenCategory::UpperRespiratory,
            Some("Pus") => SpecimenCategory::Pus,
            Some("Ascitic fluid" | "Hydrocele fluid") => SpecimenCategory::SterileFluid,
            Some("Genital swab") => SpecimenCategory::Genital,
            _ => SpecimenCategory::Other,
        }
    }
}

impl fmt::Display for SpecimenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pathogen reported and not a blank or unknown marker.
pub fn is_positive_culture(record: &CleanedRecord) -> bool {
    record.pathogen.as_deref().is_some_and(|pathogen| {
        let lowered = pathogen.trim().to_lowercase();
        !(lowered.is_empty() || lowered == UNKNOWN.to_lowercase() || lowered == "unk")
    })
}

fn indicator_block(
    parent_code: &str,
    parent_description: &str,
    tallies: &[Tally<'_>; 8],
    basis: CountBasis,
) -> Vec<IndicatorRow> {
    let children: Vec<IndicatorRow> = SpecimenCategory::ALL
        .into_iter()
        .map(|category| IndicatorRow {
            code: format!("{parent_code}.{}", category.code_index()),
            description: format!("{parent_description}: {}", category.label()),
            number: tallies[category as usize].count(basis),
        })
        .collect();
    let parent = IndicatorRow {
        code: parent_code.to_string(),
        description: parent_description.to_string(),
        number: children.iter().map(|row| row.number).sum(),
    };
    std::iter::once(parent).chain(children).collect()
}

/// Sample counts (`SAMPHH1`) and positive-culture counts (`SAMPHH2`), each a
/// parent row followed by eight category rows.
///
/// With [`CountBasis::Patients`] each category counts distinct patient keys
/// and the parent is the sum of its categories.
pub fn indicator_table(table: &CleanedTable, basis: CountBasis) -> Vec<IndicatorRow> {
    let mut samples: [Tally<'_>; 8] = Default::default();
    let mut positives: [Tally<'_>; 8] = Default::default();
    for record in &table.records {
        let category = SpecimenCategory::classify(record.specimen.as_deref()) as usize;
        samples[category].add(record);
        if is_positive_culture(record) {
            positives[category].add(record);
        }
    }
    let mut rows = indicator_block("SAMPHH1", "Samples received", &samples, basis);
    rows.extend(indicator_block(
        "SAMPHH2",
        "Samples with positive culture",
        &positives,
        basis,
    ));
    rows
}
