//! Bottle quantity extraction.

use regex::Regex;

use super::patterns::{QUANTITY_AT, QUANTITY_FIELD, QUANTITY_PARENTHESIZED, QUANTITY_TIMES};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};
use crate::models::config::ParserConfig;

const QUANTITY_RULES: &[Rule<u32>] = &[
    Rule { name: "parenthesized", apply: parenthesized },
    Rule { name: "times", apply: times },
    Rule { name: "at_sign", apply: at_sign },
    Rule { name: "field", apply: field },
];

/// Quantity field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldExtractor for QuantityExtractor {
    type Output = ExtractionMatch<u32>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(QUANTITY_RULES, text, &ParserConfig::DEFAULT)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(QUANTITY_RULES, text, &ParserConfig::DEFAULT)
    }
}

/// Number of bottles mentioned in `text`, defaulting to 1.
pub fn parse_quantity(text: &str) -> u32 {
    QuantityExtractor::new().extract(text).map_or(1, |m| m.value)
}

fn count(pattern: &Regex, text: &str) -> Option<u32> {
    let caps = pattern.captures(text)?;
    caps[1].parse().ok().filter(|n| *n > 0)
}

fn parenthesized(text: &str, _: &ParserConfig) -> Option<u32> {
    count(&QUANTITY_PARENTHESIZED, text)
}

fn times(text: &str, _: &ParserConfig) -> Option<u32> {
    count(&QUANTITY_TIMES, text)
}

fn at_sign(text: &str, _: &ParserConfig) -> Option<u32> {
    count(&QUANTITY_AT, text)
}

fn field(text: &str, _: &ParserConfig) -> Option<u32> {
    count(&QUANTITY_FIELD, text)
}
