//! Date extraction for journal headers and tasting lines.
//!
//! Two-digit years always land in the 2000s (`3/85` is March 2085). This
//! differs from the vintage pivot and is kept for compatibility with
//! existing journals.

use chrono::NaiveDate;

use super::patterns::{DATE_ISO, DATE_MDY, DATE_MY};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};
use crate::models::config::ParserConfig;

const DATE_RULES: &[Rule<NaiveDate>] = &[
    Rule { name: "month_day_year", apply: month_day_year },
    Rule { name: "month_year", apply: month_year },
    Rule { name: "iso", apply: iso },
];

/// Date field extractor. The whole (trimmed) input must be the date token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(DATE_RULES, text.trim(), &ParserConfig::DEFAULT)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(DATE_RULES, text.trim(), &ParserConfig::DEFAULT)
    }
}

/// Parse a journal date token such as `12/25/23`, `06/15/2024`, `4/20` or `2024-03-15`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

fn month_day_year(text: &str, _: &ParserConfig) -> Option<NaiveDate> {
    let caps = DATE_MDY.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year = expand_year(caps[3].parse().ok()?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_year(text: &str, _: &ParserConfig) -> Option<NaiveDate> {
    let caps = DATE_MY.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let year = expand_year(caps[2].parse().ok()?);
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn iso(text: &str, _: &ParserConfig) -> Option<NaiveDate> {
    let caps = DATE_ISO.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_year(year: i32) -> i32 {
    if year < 100 { year + 2000 } else { year }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_day_short_year() {
        assert_eq!(parse_date("12/25/23"), Some(ymd(2023, 12, 25)));
    }

    #[test]
    fn test_month_day_full_year() {
        assert_eq!(parse_date("06/15/2024"), Some(ymd(2024, 6, 15)));
    }

    #[test]
    fn test_month_year_defaults_day() {
        assert_eq!(parse_date("4/20"), Some(ymd(2020, 4, 1)));
    }

    #[test]
    fn test_iso() {
        assert_eq!(parse_date("2024-03-15"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_short_and_long_years_agree() {
        assert_eq!(parse_date("3/5/22"), parse_date("3/5/2022"));
        assert_eq!(parse_date("11/13/25"), parse_date("11/13/2025"));
    }

    #[test]
    fn test_no_century_pivot() {
        assert_eq!(parse_date("3/85"), Some(ymd(2085, 3, 1)));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("13/45/22"), None);
        assert_eq!(parse_date("6/5"), None);
    }

    #[test]
    fn test_rule_names() {
        let extractor = DateExtractor::new();
        assert_eq!(extractor.extract("4/20").unwrap().rule, "month_year");
        assert_eq!(extractor.extract("2024-03-15").unwrap().rule, "iso");
    }
}
