//! Year and sample date parsing.
//!
//! Ambiguous numeric dates are read day-first; month-first layouts are only
//! tried after every day-first layout failed.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

use super::text::is_na_like;

/// Dates carrying a time component.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Plain dates, in order of preference.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %m %Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d-%b-%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

/// A four digit year starting with 19 or 20 anywhere in the text.
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:19|20)\d{2})").expect("Invalid year regex"));

/// Smallest year accepted from a full date parse.
const MIN_PARSED_YEAR: i32 = 1000;

const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    (date.year() >= MIN_PARSED_YEAR).then_some(date)
}

/// Parse a sample date, day-first for ambiguous layouts.
pub fn parse_sample_date(raw: &str) -> Option<NaiveDate> {
    if is_na_like(raw) {
        return None;
    }
    let value = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .and_then(|dt| plausible(dt.date()))
        })
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|fmt| {
                NaiveDate::parse_from_str(value, fmt)
                    .ok()
                    .and_then(plausible)
            })
        })
}

/// Extract the collection year from a year or date cell.
///
/// A full date within 1900..=2100 wins; otherwise the first `19xx`/`20xx`
/// token in the text is used.
pub fn clean_year(raw: &str) -> Option<i32> {
    if is_na_like(raw) {
        return None;
    }
    if let Some(year) = parse_sample_date(raw)
        .map(|date| date.year())
        .filter(|year| YEAR_RANGE.contains(year))
    {
        return Some(year);
    }
    YEAR_TOKEN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_first_wins_for_ambiguous_dates() {
        assert_eq!(parse_sample_date("03/04/2023"), Some(date(2023, 4, 3)));
        assert_eq!(parse_sample_date("12/25/2023"), Some(date(2023, 12, 25)));
    }

    #[test]
    fn two_digit_years_are_not_read_as_first_century() {
        assert_eq!(parse_sample_date("01/02/23"), Some(date(2023, 2, 1)));
    }

    #[test]
    fn datetimes_keep_their_date() {
        assert_eq!(
            parse_sample_date("2024-01-15 08:30:00"),
            Some(date(2024, 1, 15))
        );
    }
}
