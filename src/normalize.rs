//! Field normalisers shared by every site: prices, discounts, relative dates and counts.
//!
//! All of these return `None` on input they cannot make sense of; none of them fail.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Parse a display price such as `"1 234,56 DT"` or `"1.234.567,89"`.
///
/// Only digits, `,` and `.` are kept. A single comma is the decimal point when
/// there are no periods, or when periods appear at least twice (thousands
/// grouping). Anything else is parsed as-is.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let commas = cleaned.matches(',').count();
    let periods = cleaned.matches('.').count();

    let cleaned = if commas == 1 && periods > 1 {
        cleaned.replace('.', "").replace(',', ".")
    } else if commas == 1 && periods == 0 {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    cleaned.parse::<f64>().ok()
}

/// Percentage saved from `original` to `current`, rounded to two decimals; `0.0` when unknown.
pub fn calculate_discount(current: Option<f64>, original: Option<f64>) -> f64 {
    match (current, original) {
        (Some(current), Some(original)) if original > 0.0 => {
            (((original - current) / original * 100.0) * 100.0).round() / 100.0
        }
        _ => 0.0,
    }
}

/// First run of digits in `text` once commas and whitespace are removed.
///
/// `"1,200 m²"` yields `1200`: the comma is read as a thousands separator.
pub fn extract_number(text: &str) -> Option<i64> {
    let compact: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let start = compact.find(|c: char| c.is_ascii_digit())?;
    let digits: String = compact[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

fn relative_date_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(\d+)\s+(minutes?|hours?|days?|months?)\s+ago")
                .expect("static english pattern"),
            Regex::new(r"il\s+y\s+a\s+(\d+)\s+(minutes?|heures?|jours?|mois)")
                .expect("static french pattern"),
        ]
    })
}

/// Resolve `"3 days ago"` / `"il y a 3 jours"` to a calendar date relative to now.
pub fn parse_relative_date(text: &str) -> Option<NaiveDate> {
    parse_relative_date_from(text, Local::now().naive_local())
}

/// Same as [`parse_relative_date`] with an explicit reference instant.
///
/// A month counts as 30 days.
pub fn parse_relative_date_from(text: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let text = text.to_lowercase();

    let caps = relative_date_patterns()
        .iter()
        .find_map(|pattern| pattern.captures(&text))?;

    let amount: i64 = caps[1].parse().ok()?;
    let unit = &caps[2];

    let offset = if unit.starts_with("minute") {
        Duration::try_minutes(amount)?
    } else if unit.starts_with("hour") || unit.starts_with("heure") {
        Duration::try_hours(amount)?
    } else if unit.starts_with("day") || unit.starts_with("jour") {
        Duration::try_days(amount)?
    } else {
        Duration::try_days(amount.checked_mul(30)?)?
    };

    now.checked_sub_signed(offset).map(|at| at.date())
}
