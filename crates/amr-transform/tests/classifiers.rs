//! Tests for the per-field classifiers.

use amr_model::{Gender, PatientType, SirResult};
use amr_transform::normalization::{
    ANTIBIOTIC_SYNONYMS, PATHOGEN_CODES, SPECIMEN_RULES, clean_antibiotic, clean_gender,
    clean_identifier, clean_pathogen, clean_patient_type, clean_sir, clean_specimen, clean_year,
    parse_sample_date,
};
use chrono::NaiveDate;

#[test]
fn gender_uses_leading_letter() {
    assert_eq!(clean_gender("M"), Some(Gender::Male));
    assert_eq!(clean_gender(" female "), Some(Gender::Female));
    assert_eq!(clean_gender("F."), Some(Gender::Female));
    assert_eq!(clean_gender("--"), None);
    assert_eq!(clean_gender("x"), None);
    assert_eq!(clean_gender(""), None);
}

#[test]
fn patient_type_tokens_and_prefixes() {
    assert_eq!(clean_patient_type("OPD"), Some(PatientType::Outpatient));
    assert_eq!(clean_patient_type("Out-Patient"), Some(PatientType::Outpatient));
    assert_eq!(clean_patient_type("outpt"), Some(PatientType::Outpatient));
    assert_eq!(clean_patient_type("IPD"), Some(PatientType::Inpatient));
    assert_eq!(clean_patient_type("In patients"), Some(PatientType::Inpatient));
    assert_eq!(clean_patient_type("internal"), Some(PatientType::Inpatient));
    assert_eq!(clean_patient_type("emergency"), None);
}

#[test]
fn specimen_rules_in_precedence_order() {
    assert_eq!(clean_specimen("BLOOD CULTURE").as_deref(), Some("Blood"));
    assert_eq!(clean_specimen("mid_stream urine").as_deref(), Some("Urine"));
    assert_eq!(clean_specimen("Throat-Swab").as_deref(), Some("Throat swab"));
    assert_eq!(clean_specimen("catheter  tip").as_deref(), Some("Catheter tip"));
    assert_eq!(clean_specimen("Urogenital swab").as_deref(), Some("Genital swab"));
    assert_eq!(clean_specimen("purulent discharge").as_deref(), Some("Pus"));
    assert_eq!(
        clean_specimen("LOWRESP").as_deref(),
        Some("Lower respiratory (unspecified)")
    );
    // blood precedes pus
    assert_eq!(clean_specimen("blood and pus").as_deref(), Some("Blood"));
}

#[test]
fn specimen_falls_back_to_title_case() {
    assert_eq!(clean_specimen("CSF fluid").as_deref(), Some("Csf Fluid"));
    assert_eq!(clean_specimen("CSF_fluid").as_deref(), Some("Csf Fluid"));
    assert_eq!(clean_specimen("csf-fluid").as_deref(), Some("Csf Fluid"));
    assert_eq!(clean_specimen(" csf  fluid ").as_deref(), Some("Csf Fluid"));
    assert_eq!(clean_specimen("   "), None);
    assert_eq!(clean_specimen("N/A"), None);
}

#[test]
fn sir_interpretation() {
    assert_eq!(clean_sir("S"), Some(SirResult::Susceptible));
    assert_eq!(clean_sir(" resistant "), Some(SirResult::Resistant));
    assert_eq!(clean_sir("Intermediate"), Some(SirResult::Intermediate));
    assert_eq!(clean_sir("I/S"), Some(SirResult::Intermediate));
    assert_eq!(clean_sir("s/i"), Some(SirResult::Intermediate));
    assert_eq!(clean_sir("MIC 4 - R"), Some(SirResult::Resistant));
    assert_eq!(clean_sir("nan"), None);
    assert_eq!(clean_sir("positive"), None);
}

#[test]
fn antibiotic_exact_and_abbreviations() {
    assert_eq!(clean_antibiotic("CIP").as_deref(), Some("Ciprofloxacin"));
    assert_eq!(clean_antibiotic("Augmentin").as_deref(), Some("Amoxicillin-clavulanate"));
    assert_eq!(
        clean_antibiotic("Amoxicillin-Clavulanic Acid").as_deref(),
        Some("Amoxicillin-clavulanate")
    );
    assert_eq!(clean_antibiotic("co-trimoxazole").as_deref(), Some("Co-trimoxazole"));
    assert_eq!(clean_antibiotic("MEM").as_deref(), Some("Meropenem"));
}

#[test]
fn antibiotic_compound_and_token_lookup() {
    assert_eq!(
        clean_antibiotic("clavulanic acid + amoxicillin").as_deref(),
        Some("Amoxicillin-clavulanate")
    );
    assert_eq!(clean_antibiotic("G penicillin").as_deref(), Some("Penicillin G"));
    assert_eq!(clean_antibiotic("VAN 30ug").as_deref(), Some("Vancomycin"));
}

#[test]
fn antibiotic_stem_fallbacks() {
    assert_eq!(clean_antibiotic("Ciprofloxacine").as_deref(), Some("Ciprofloxacin"));
    assert_eq!(clean_antibiotic("ceftriaxon").as_deref(), Some("Ceftriaxone"));
    assert_eq!(clean_antibiotic("trimethoprim/sxt").as_deref(), Some("Co-trimoxazole"));
    assert_eq!(clean_antibiotic("unknown drug"), None);
    assert_eq!(clean_antibiotic(""), None);
}

#[test]
fn antibiotic_na_is_nalidixic_acid() {
    assert_eq!(clean_antibiotic("NA").as_deref(), Some("Nalidixic acid"));
    assert_eq!(clean_antibiotic(" na ").as_deref(), Some("Nalidixic acid"));
    assert_eq!(clean_antibiotic("   "), None);
    assert_eq!(clean_antibiotic("N/A"), None);
}

#[test]
fn pathogen_codes_and_rules() {
    assert_eq!(clean_pathogen("KLEPNE").as_deref(), Some("Klebsiella pneumoniae"));
    assert_eq!(clean_pathogen("sta aur").as_deref(), Some("Staphylococcus aureus"));
    assert_eq!(
        clean_pathogen("NLF").as_deref(),
        Some("Non-lactose fermenters (unspecified)")
    );
    assert_eq!(
        clean_pathogen("Klebsiella pnuemoniae").as_deref(),
        Some("Klebsiella pneumoniae")
    );
    assert_eq!(clean_pathogen("E. coli (Escherichia)").as_deref(), Some("Escherichia coli"));
    assert_eq!(clean_pathogen("Salmonella typhi").as_deref(), Some("Salmonella Typhi"));
    assert_eq!(clean_pathogen("Enterobacter aerogenes").as_deref(), Some("Enterobacter spp"));
    assert_eq!(clean_pathogen("Neisseria species").as_deref(), Some("Neisseria spp"));
}

#[test]
fn pathogen_falls_back_to_title_case() {
    assert_eq!(
        clean_pathogen("citrobacter FREUNDII").as_deref(),
        Some("Citrobacter Freundii")
    );
    assert_eq!(clean_pathogen("null"), None);
}

#[test]
fn year_from_dates_and_tokens() {
    assert_eq!(clean_year("2023"), Some(2023));
    assert_eq!(clean_year("15/03/2022"), Some(2022));
    assert_eq!(clean_year("2021-12-31"), Some(2021));
    assert_eq!(clean_year("FY2019/20"), Some(2019));
    assert_eq!(clean_year("2023.0"), Some(2023));
    assert_eq!(clean_year("unknown"), None);
}

#[test]
fn sample_dates_never_fail() {
    assert_eq!(
        parse_sample_date("05/06/2024"),
        NaiveDate::from_ymd_opt(2024, 6, 5)
    );
    assert_eq!(
        parse_sample_date("2024-06-05"),
        NaiveDate::from_ymd_opt(2024, 6, 5)
    );
    assert_eq!(
        parse_sample_date("5 Jun 2024"),
        NaiveDate::from_ymd_opt(2024, 6, 5)
    );
    assert_eq!(parse_sample_date("31/02/2024"), None);
    assert_eq!(parse_sample_date("soon"), None);
}

#[test]
fn identifiers_are_trimmed() {
    assert_eq!(clean_identifier("  AA-1 ").as_deref(), Some("AA-1"));
    assert_eq!(clean_identifier("NaN"), None);
    assert_eq!(clean_identifier(""), None);
}

#[test]
fn classifiers_are_idempotent_on_canonical_labels() {
    for (_, label) in ANTIBIOTIC_SYNONYMS {
        assert_eq!(clean_antibiotic(label).as_deref(), Some(*label), "antibiotic {label}");
    }
    for (_, label) in PATHOGEN_CODES {
        assert_eq!(clean_pathogen(label).as_deref(), Some(*label), "pathogen {label}");
    }
    for rule in SPECIMEN_RULES {
        assert_eq!(
            clean_specimen(rule.label).as_deref(),
            Some(rule.label),
            "specimen {}",
            rule.label
        );
    }
    for gender in [Gender::Male, Gender::Female] {
        assert_eq!(clean_gender(gender.as_str()), Some(gender));
    }
    for ptype in [PatientType::Inpatient, PatientType::Outpatient] {
        assert_eq!(clean_patient_type(ptype.as_str()), Some(ptype));
    }
    for sir in [SirResult::Susceptible, SirResult::Intermediate, SirResult::Resistant] {
        assert_eq!(clean_sir(sir.as_str()), Some(sir));
    }
}

#[test]
fn fallback_labels_are_stable() {
    for raw in ["CSF fluid", "citrobacter freundii", "e.coli"] {
        let once = clean_specimen(raw);
        assert_eq!(once.as_deref().and_then(clean_specimen), once);
        let once = clean_pathogen(raw);
        assert_eq!(once.as_deref().and_then(clean_pathogen), once);
    }
}
