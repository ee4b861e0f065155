//! Price extraction for wine lines and receipts.
//!
//! Explicitly marked prices (`$`, `@`) are taken at face value. Bare numbers
//! are only accepted inside the configured plausible price range so that
//! ratings and short years are not mistaken for prices.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{
    PRICE_AT, PRICE_BEFORE_RATING, PRICE_BEFORE_YEAR, PRICE_DOLLAR, PRICE_FLOOR,
    PRICE_PARENTHESIZED, PRICE_TRAILING_BARE, PRICE_TRAILING_COMMA,
};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};
use crate::models::config::ParserConfig;

const PRICE_RULES: &[Rule<Decimal>] = &[
    Rule { name: "dollar", apply: dollar },
    Rule { name: "at_sign", apply: at_sign },
    Rule { name: "before_rating", apply: before_rating },
    Rule { name: "before_year", apply: before_year },
    Rule { name: "trailing_comma", apply: trailing_comma },
    Rule { name: "floor", apply: floor },
    Rule { name: "parenthesized", apply: parenthesized },
    Rule { name: "trailing_bare", apply: trailing_bare },
];

/// Price field extractor.
#[derive(Default)]
pub struct PriceExtractor {
    config: ParserConfig,
}

impl PriceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom plausible price range.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(PRICE_RULES, text, &self.config)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(PRICE_RULES, text, &self.config)
    }
}

/// Parse a bottle price with the default 15-500 plausibility range.
pub fn parse_price(text: &str) -> Option<Decimal> {
    PriceExtractor::new().extract(text).map(|m| m.value)
}

fn capture_amount(pattern: &Regex, text: &str) -> Option<Decimal> {
    let caps = pattern.captures(text)?;
    Decimal::from_str(&caps[1]).ok().map(|d| d.normalize())
}

/// Only the first occurrence of `pattern` is considered.
fn plausible(pattern: &Regex, text: &str, config: &ParserConfig) -> Option<Decimal> {
    capture_amount(pattern, text).filter(|value| config.is_plausible_price(*value))
}

fn dollar(text: &str, _: &ParserConfig) -> Option<Decimal> {
    let caps = PRICE_DOLLAR.captures(text)?;
    Decimal::from_str(&caps[1].replace(',', ".")).ok().map(|d| d.normalize())
}

fn at_sign(text: &str, _: &ParserConfig) -> Option<Decimal> {
    capture_amount(&PRICE_AT, text)
}

fn before_rating(text: &str, config: &ParserConfig) -> Option<Decimal> {
    plausible(&PRICE_BEFORE_RATING, text, config)
}

fn before_year(text: &str, config: &ParserConfig) -> Option<Decimal> {
    plausible(&PRICE_BEFORE_YEAR, text, config)
}

fn trailing_comma(text: &str, config: &ParserConfig) -> Option<Decimal> {
    plausible(&PRICE_TRAILING_COMMA, text, config)
}

fn floor(text: &str, config: &ParserConfig) -> Option<Decimal> {
    plausible(&PRICE_FLOOR, text, config)
}

fn parenthesized(text: &str, config: &ParserConfig) -> Option<Decimal> {
    plausible(&PRICE_PARENTHESIZED, text, config)
}

fn trailing_bare(text: &str, config: &ParserConfig) -> Option<Decimal> {
    plausible(&PRICE_TRAILING_BARE, text, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_dollar_prices() {
        assert_eq!(parse_price("$39.99"), Some(dec("39.99")));
        assert_eq!(parse_price("Wine $50"), Some(dec("50")));
        assert_eq!(parse_price("$ 25.00"), Some(dec("25")));
        assert_eq!(parse_price("Vin $12,50"), Some(dec("12.5")));
    }

    #[test]
    fn test_at_prices() {
        assert_eq!(parse_price("2 @ 39.99"), Some(dec("39.99")));
        assert_eq!(parse_price("3@ 25.00"), Some(dec("25")));
    }

    #[test]
    fn test_marked_prices_skip_range_check() {
        assert_eq!(parse_price("Half bottle $9"), Some(dec("9")));
        assert_eq!(parse_price("1 @ 950.00"), Some(dec("950")));
    }

    #[test]
    fn test_comma_delimited() {
        assert_eq!(parse_price("Chappellet Mountain Cuvee , 35"), Some(dec("35")));
        assert_eq!(
            parse_price("AALTO Tempranillo, Ribera del duero , 55"),
            Some(dec("55"))
        );
        assert_eq!(
            parse_price("ABADIA RETUERTA ESPECIAL, 29.99, 2015"),
            Some(dec("29.99"))
        );
    }

    #[test]
    fn test_year_then_price_colon() {
        assert_eq!(parse_price("Wine 2015, 25:"), Some(dec("25")));
        let m = PriceExtractor::new().extract("Wine 2015, 25:").unwrap();
        assert_eq!(m.rule, "before_rating");
    }

    #[test]
    fn test_floor_price() {
        assert_eq!(parse_price("Wine 7.5, 50+"), Some(dec("50")));
    }

    #[test]
    fn test_parenthesized_and_trailing() {
        assert_eq!(parse_price("Rioja Reserva (45)"), Some(dec("45")));
        assert_eq!(parse_price("Barolo 2016 80"), Some(dec("80")));
        assert_eq!(parse_price("Barolo 2016 80 T"), Some(dec("80")));
    }

    #[test]
    fn test_none() {
        assert_eq!(parse_price("Wine without price"), None);
        assert_eq!(parse_price("Wine 5"), None);
        assert_eq!(parse_price("Merlot (3)"), None);
    }

    #[test]
    fn test_only_first_candidate_per_rule() {
        // ", 12, 2015" is out of range; the parenthesized rule still runs.
        assert_eq!(parse_price("Grand vin, 12, 2015 (40)"), Some(dec("40")));
    }

    #[test]
    fn test_custom_range() {
        let config = ParserConfig { max_price: 40, ..ParserConfig::default() };
        let extractor = PriceExtractor::new().with_config(config);
        assert_eq!(extractor.extract("Chappellet Mountain Cuvee , 55"), None);
    }
}
