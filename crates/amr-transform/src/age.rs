//! Free-text age parsing and age banding.
//!
//! Lab exports record ages as anything from `"28"` to `"1yr 7 months"` or
//! `"6DYS"`. [`parse_age`] reduces them to a magnitude and a unit; the
//! banders work on fractional years from [`age_to_years`].

use std::fmt;
use std::sync::LazyLock;

use amr_model::{AgeUnit, CleanedRecord, DAYS_PER_YEAR};
use regex::Regex;

use crate::normalization::text::{collapse_whitespace, is_na_like};

/// A parsed age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Age {
    pub value: f64,
    pub unit: AgeUnit,
}

impl Age {
    pub fn new(value: f64, unit: AgeUnit) -> Self {
        Self { value, unit }
    }

    /// Fractional years.
    pub fn years(&self) -> Option<f64> {
        age_to_years(self.value, self.unit)
    }
}

/// Unit spellings rewritten to short codes, longest forms first within each
/// unit so `months` is never split by the bare `m` rule that runs last.
static UNIT_NORMALIZERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\byears?\b|\byrs?\b|\by\b", "y"),
        (r"\bmonths?\b|\bmnths?\b|\bmths?\b|\bmos?\b|\bmo\b", "mo"),
        (r"\bweeks?\b|\bwks?\b|\bwk\b|\bw\b", "w"),
        (r"\bdays?\b|\bdys?\b|\bdy\b|\bd\b", "d"),
        (r"\bhours?\b|\bhrs?\b|\bhr\b|\bh\b", "h"),
        (r"(\d+)\s*m\b", "${1} mo"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("Invalid age unit regex"),
            replacement,
        )
    })
    .collect()
});

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-z\s]").expect("Invalid age character regex"));

static AGE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(y|mo|w|d|h)\b").expect("Invalid age pair regex")
});

fn unit_for_code(code: &str) -> Option<AgeUnit> {
    match code {
        "y" => Some(AgeUnit::Years),
        "mo" => Some(AgeUnit::Months),
        "w" => Some(AgeUnit::Weeks),
        "d" => Some(AgeUnit::Days),
        "h" => Some(AgeUnit::Hours),
        _ => None,
    }
}

/// Insert a space wherever a digit meets a letter (`"28yrs"` -> `"28 yrs"`).
fn split_digit_letter(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut previous: Option<char> = None;
    for ch in value.chars() {
        if let Some(prev) = previous {
            let boundary = (prev.is_ascii_digit() && ch.is_ascii_lowercase())
                || (prev.is_ascii_lowercase() && ch.is_ascii_digit());
            if boundary {
                out.push(' ');
            }
        }
        out.push(ch);
        previous = Some(ch);
    }
    out
}

fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let spaced = split_digit_letter(&lowered);
    let stripped = DISALLOWED.replace_all(&spaced, " ");
    let mut value = collapse_whitespace(&stripped).replace("monthsm", "months");
    for (pattern, replacement) in UNIT_NORMALIZERS.iter() {
        value = pattern.replace_all(&value, *replacement).into_owned();
    }
    value
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Parse a free-text age into a magnitude and unit.
///
/// Every `<number> <unit>` component is summed in days and reported in the
/// coarsest unit present (3 decimals for years, 1 otherwise). A bare integer
/// is read as years. Anything else yields `None`.
pub fn parse_age(raw: &str) -> Option<Age> {
    if is_na_like(raw) {
        return None;
    }
    let value = normalize(raw);

    let mut total_days = 0.0;
    let mut coarsest: Option<AgeUnit> = None;
    for caps in AGE_PAIR.captures_iter(&value) {
        let (Some(number), Some(unit)) = (
            caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()),
            caps.get(2).and_then(|m| unit_for_code(m.as_str())),
        ) else {
            continue;
        };
        total_days += number * unit.days().unwrap_or_default();
        // AgeUnit orders Years before Months before Weeks.
        coarsest = Some(coarsest.map_or(unit, |current| current.min(unit)));
    }

    match coarsest {
        Some(unit) => {
            let per_unit = unit.days()?;
            let decimals = if unit == AgeUnit::Years { 3 } else { 1 };
            Some(Age::new(round_to(total_days / per_unit, decimals), unit))
        }
        None if !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit()) => {
            value.parse().ok().map(|years| Age::new(years, AgeUnit::Years))
        }
        None => None,
    }
}

/// Convert a magnitude in `unit` to fractional years.
pub fn age_to_years(value: f64, unit: AgeUnit) -> Option<f64> {
    if value.is_nan() {
        return None;
    }
    unit.days().map(|days| value * days / DAYS_PER_YEAR)
}

/// Seven broad age bands plus `Unknown`.
///
/// Intervals are closed on the right: `<1y` covers `[0, 1]`, `1–5y` covers
/// `(1, 5]` and so on up to `65+y`, which ends at 120 years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BroadAgeBand {
    UnderOne,
    OneToFive,
    FiveToFifteen,
    FifteenToTwentyFive,
    TwentyFiveToFortyFive,
    FortyFiveToSixtyFive,
    SixtyFivePlus,
    Unknown,
}

/// Upper bounds of the broad bands, in years.
const BROAD_UPPER_BOUNDS: [f64; 7] = [1.0, 5.0, 15.0, 25.0, 45.0, 65.0, 120.0];

impl BroadAgeBand {
    pub const ALL: [BroadAgeBand; 8] = [
        BroadAgeBand::UnderOne,
        BroadAgeBand::OneToFive,
        BroadAgeBand::FiveToFifteen,
        BroadAgeBand::FifteenToTwentyFive,
        BroadAgeBand::TwentyFiveToFortyFive,
        BroadAgeBand::FortyFiveToSixtyFive,
        BroadAgeBand::SixtyFivePlus,
        BroadAgeBand::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BroadAgeBand::UnderOne => "<1y",
            BroadAgeBand::OneToFive => "1–5y",
            BroadAgeBand::FiveToFifteen => "5–15y",
            BroadAgeBand::FifteenToTwentyFive => "15–25y",
            BroadAgeBand::TwentyFiveToFortyFive => "25–45y",
            BroadAgeBand::FortyFiveToSixtyFive => "45–65y",
            BroadAgeBand::SixtyFivePlus => "65+y",
            BroadAgeBand::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BroadAgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Broad band of an age in years. Missing, negative, non-finite or
/// over-120 ages are `Unknown`.
pub fn broad_band(years: Option<f64>) -> BroadAgeBand {
    let Some(years) = years.filter(|y| y.is_finite() && *y >= 0.0) else {
        return BroadAgeBand::Unknown;
    };
    BROAD_UPPER_BOUNDS
        .iter()
        .position(|upper| years <= *upper)
        .map_or(BroadAgeBand::Unknown, |idx| BroadAgeBand::ALL[idx])
}

/// One of the 19 five-year bands `[0,1)`, `[1,5)`, `[5,10)` … `[80,85)`,
/// `[85,∞)`, stored as its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FineAgeBand(u8);

const FINE_BAND_LABELS: [&str; 19] = [
    "0–1 Years",
    "1–4 Years",
    "5–9 Years",
    "10–14 Years",
    "15–19 Years",
    "20–24 Years",
    "25–29 Years",
    "30–34 Years",
    "35–39 Years",
    "40–44 Years",
    "45–49 Years",
    "50–54 Years",
    "55–59 Years",
    "60–64 Years",
    "65–69 Years",
    "70–74 Years",
    "75–79 Years",
    "80–84 Years",
    "85+ Years",
];

impl FineAgeBand {
    pub const COUNT: usize = FINE_BAND_LABELS.len();

    /// Band by index, `None` past the last band.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then(|| Self(index as u8))
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn label(self) -> &'static str {
        FINE_BAND_LABELS[self.index()]
    }

    /// Inclusive lower bound in years.
    pub fn lower_years(self) -> f64 {
        match self.0 {
            0 => 0.0,
            1 => 1.0,
            n => f64::from(n - 1) * 5.0,
        }
    }

    /// Every band in ascending order.
    pub fn all() -> impl Iterator<Item = FineAgeBand> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }
}

impl fmt::Display for FineAgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five-year band of an age in years.
///
/// Ages below zero or above `max_years` are excluded rather than clamped.
pub fn fine_band(years: f64, max_years: f64) -> Option<FineAgeBand> {
    if !years.is_finite() || years < 0.0 || years > max_years {
        return None;
    }
    let index = if years < 1.0 {
        0
    } else if years < 5.0 {
        1
    } else {
        ((years / 5.0).floor() as usize + 1).min(FineAgeBand::COUNT - 1)
    };
    FineAgeBand::from_index(index)
}

/// Age bands of a cleaned row, from its age value and unit.
pub trait RecordAgeBands {
    fn broad_band(&self) -> BroadAgeBand;

    /// `None` when the age is missing or outside `[0, max_years]`.
    fn fine_band(&self, max_years: f64) -> Option<FineAgeBand>;
}

impl RecordAgeBands for CleanedRecord {
    fn broad_band(&self) -> BroadAgeBand {
        broad_band(self.age_years())
    }

    fn fine_band(&self, max_years: f64) -> Option<FineAgeBand> {
        self.age_years().and_then(|years| fine_band(years, max_years))
    }
}
