//! Tests for age parsing and banding.

use amr_model::{AgeUnit, CleanedRecord};
use amr_transform::{
    Age, BroadAgeBand, FineAgeBand, RecordAgeBands, age_to_years, broad_band, fine_band,
    parse_age,
};
use proptest::prelude::*;

#[test]
fn parse_single_units() {
    assert_eq!(parse_age("28YRS"), Some(Age::new(28.0, AgeUnit::Years)));
    assert_eq!(parse_age("6DYS"), Some(Age::new(6.0, AgeUnit::Days)));
    assert_eq!(parse_age("3 months"), Some(Age::new(3.0, AgeUnit::Months)));
    assert_eq!(parse_age("3m"), Some(Age::new(3.0, AgeUnit::Months)));
    assert_eq!(parse_age("2 wks"), Some(Age::new(2.0, AgeUnit::Weeks)));
    assert_eq!(parse_age("12hrs"), Some(Age::new(12.0, AgeUnit::Hours)));
    assert_eq!(parse_age("4monthsm"), Some(Age::new(4.0, AgeUnit::Months)));
}

#[test]
fn bare_integer_is_years() {
    assert_eq!(parse_age("45"), Some(Age::new(45.0, AgeUnit::Years)));
    assert_eq!(parse_age(" 7 "), Some(Age::new(7.0, AgeUnit::Years)));
}

#[test]
fn composite_ages_use_coarsest_unit() {
    let age = parse_age("1yr 7 months").unwrap();
    assert_eq!(age.unit, AgeUnit::Years);
    assert!((age.value - 1.583).abs() < 1e-9);

    let age = parse_age("2 weeks 3 days").unwrap();
    assert_eq!(age.unit, AgeUnit::Weeks);
    assert!((age.value - 2.4).abs() < 1e-9);

    let age = parse_age("1 day 12 hours").unwrap();
    assert_eq!(age.unit, AgeUnit::Days);
    assert!((age.value - 1.5).abs() < 1e-9);
}

#[test]
fn unparsable_ages_are_missing() {
    assert_eq!(parse_age("garbage"), None);
    assert_eq!(parse_age(""), None);
    assert_eq!(parse_age("NA"), None);
    assert_eq!(parse_age("null"), None);
    assert_eq!(parse_age("12.5"), None);
}

#[test]
fn conversion_to_years() {
    assert_eq!(age_to_years(2.0, AgeUnit::Years), Some(2.0));
    assert_eq!(age_to_years(6.0, AgeUnit::Months), Some(0.5));
    assert_eq!(age_to_years(365.25, AgeUnit::Days), Some(1.0));
    assert_eq!(age_to_years(1.0, AgeUnit::Unknown), None);
    assert_eq!(age_to_years(f64::NAN, AgeUnit::Years), None);
}

#[test]
fn broad_band_edges_are_right_closed() {
    assert_eq!(broad_band(Some(0.0)), BroadAgeBand::UnderOne);
    assert_eq!(broad_band(Some(1.0)), BroadAgeBand::UnderOne);
    assert_eq!(broad_band(Some(1.5)), BroadAgeBand::OneToFive);
    assert_eq!(broad_band(Some(15.0)), BroadAgeBand::FiveToFifteen);
    assert_eq!(broad_band(Some(65.0)), BroadAgeBand::FortyFiveToSixtyFive);
    assert_eq!(broad_band(Some(90.0)), BroadAgeBand::SixtyFivePlus);
    assert_eq!(broad_band(Some(130.0)), BroadAgeBand::Unknown);
    assert_eq!(broad_band(Some(-2.0)), BroadAgeBand::Unknown);
    assert_eq!(broad_band(None), BroadAgeBand::Unknown);
    assert_eq!(BroadAgeBand::OneToFive.label(), "1–5y");
}

#[test]
fn fine_band_edges_are_left_closed() {
    let label = |years: f64| fine_band(years, 120.0).map(FineAgeBand::label);
    assert_eq!(label(0.0), Some("0–1 Years"));
    assert_eq!(label(0.99), Some("0–1 Years"));
    assert_eq!(label(1.0), Some("1–4 Years"));
    assert_eq!(label(4.99), Some("1–4 Years"));
    assert_eq!(label(5.0), Some("5–9 Years"));
    assert_eq!(label(84.9), Some("80–84 Years"));
    assert_eq!(label(85.0), Some("85+ Years"));
    assert_eq!(label(120.0), Some("85+ Years"));
    assert_eq!(label(120.5), None);
    assert_eq!(label(-0.1), None);
    assert_eq!(fine_band(100.0, 90.0), None);
}

fn record_with_age(value: f64, unit: AgeUnit) -> CleanedRecord {
    CleanedRecord {
        age_value: Some(value),
        age_unit: Some(unit),
        ..CleanedRecord::new(0)
    }
}

#[test]
fn record_age_helpers() {
    let infant = record_with_age(6.0, AgeUnit::Months);
    assert!((infant.age_years().unwrap() - 0.5).abs() < 1e-3);
    assert_eq!(infant.broad_band(), BroadAgeBand::UnderOne);
    assert_eq!(infant.fine_band(120.0).map(FineAgeBand::label), Some("0–1 Years"));

    let missing_unit = CleanedRecord {
        age_value: Some(40.0),
        ..CleanedRecord::new(1)
    };
    assert_eq!(missing_unit.age_years(), None);
    assert_eq!(missing_unit.broad_band(), BroadAgeBand::Unknown);
    assert_eq!(missing_unit.fine_band(120.0), None);
}

#[test]
fn record_fine_band_applies_ceiling() {
    let old = record_with_age(130.0, AgeUnit::Years);
    assert_eq!(old.fine_band(120.0), None);
    assert_eq!(old.fine_band(150.0).map(FineAgeBand::label), Some("85+ Years"));
    assert_eq!(old.broad_band(), BroadAgeBand::Unknown);

    let adult = record_with_age(100.0, AgeUnit::Years);
    assert_eq!(adult.fine_band(90.0), None);
    assert!(adult.fine_band(120.0).is_some());
}

#[test]
fn fine_bands_are_ordered() {
    let bands: Vec<FineAgeBand> = FineAgeBand::all().collect();
    assert_eq!(bands.len(), 19);
    assert_eq!(bands[0].lower_years(), 0.0);
    assert_eq!(bands[1].lower_years(), 1.0);
    assert_eq!(bands[18].lower_years(), 85.0);
    for band in bands {
        assert_eq!(fine_band(band.lower_years(), 120.0), Some(band));
    }
}

fn unit_spellings() -> impl Strategy<Value = (&'static str, AgeUnit)> {
    prop::sample::select(vec![
        ("y", AgeUnit::Years),
        ("yrs", AgeUnit::Years),
        ("years", AgeUnit::Years),
        ("mo", AgeUnit::Months),
        ("mnths", AgeUnit::Months),
        ("months", AgeUnit::Months),
        ("wk", AgeUnit::Weeks),
        ("weeks", AgeUnit::Weeks),
        ("d", AgeUnit::Days),
        ("dys", AgeUnit::Days),
        ("days", AgeUnit::Days),
        ("hr", AgeUnit::Hours),
        ("hours", AgeUnit::Hours),
    ])
}

proptest! {
    #[test]
    fn parsed_ages_convert_back_to_years(n in 0u32..2000, (spelling, unit) in unit_spellings(), spaced in any::<bool>()) {
        let raw = if spaced { format!("{n} {spelling}") } else { format!("{n}{spelling}") };
        let age = parse_age(&raw).expect("unit spelling parses");
        prop_assert_eq!(age.unit, unit);
        let expected = age_to_years(f64::from(n), unit).unwrap();
        let actual = age.years().unwrap();
        prop_assert!((actual - expected).abs() < 1e-6, "{raw}: {actual} vs {expected}");
    }

    #[test]
    fn broad_band_is_total(years in proptest::option::of(any::<f64>())) {
        prop_assert!(BroadAgeBand::ALL.contains(&broad_band(years)));
    }

    #[test]
    fn fine_band_is_total(years in any::<f64>(), ceiling in 0.0f64..200.0) {
        if let Some(band) = fine_band(years, ceiling) {
            prop_assert!(years >= 0.0 && years <= ceiling);
            prop_assert!(years >= band.lower_years());
        }
    }

    #[test]
    fn parse_age_never_panics(raw in "\\PC*") {
        if let Some(age) = parse_age(&raw) {
            prop_assert!(age.value >= 0.0);
            prop_assert!(age.unit != AgeUnit::Unknown);
        }
    }
}
