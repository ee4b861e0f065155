//! Vintage year extraction.

use super::patterns::{
    APOSTROPHE_VINTAGE_HINT, APOSTROPHE_YEAR, FOUR_DIGIT_NUMBER, GLUED_SHORT_YEAR,
    SPACED_SHORT_YEAR, WORD_THEN_SHORT_YEAR,
};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};
use crate::models::config::ParserConfig;

const VINTAGE_RULES: &[Rule<i32>] = &[
    Rule { name: "four_digit", apply: four_digit },
    Rule { name: "apostrophe", apply: apostrophe },
    Rule { name: "spaced_two_digit", apply: spaced_two_digit },
    Rule { name: "glued_two_digit", apply: glued_two_digit },
];

/// Vintage year extractor.
#[derive(Default)]
pub struct VintageExtractor {
    config: ParserConfig,
}

impl VintageExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom four-digit vintage window.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }
}

impl FieldExtractor for VintageExtractor {
    type Output = ExtractionMatch<i32>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(VINTAGE_RULES, text, &self.config)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(VINTAGE_RULES, text, &self.config)
    }
}

/// Parse a vintage year with the default 1980-2025 window.
pub fn parse_vintage_year(text: &str) -> Option<i32> {
    VintageExtractor::new().extract(text).map(|m| m.value)
}

/// Number of four-digit vintage years in `text` (repeats counted).
pub fn count_vintage_years(text: &str, config: &ParserConfig) -> usize {
    four_digit_years(text, config).count()
}

/// Cheap check used by the line classifier: does the line look like it
/// carries a vintage in any of the supported shapes?
///
/// Looser than [`parse_vintage_year`]: short-year shapes are not range checked.
pub fn has_vintage_year(text: &str, config: &ParserConfig) -> bool {
    count_vintage_years(text, config) > 0
        || WORD_THEN_SHORT_YEAR.is_match(text)
        || APOSTROPHE_VINTAGE_HINT.is_match(text)
        || GLUED_SHORT_YEAR.is_match(text.trim())
}

fn four_digit_years<'a>(text: &'a str, config: &'a ParserConfig) -> impl Iterator<Item = i32> + 'a {
    FOUR_DIGIT_NUMBER
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<i32>().ok())
        .filter(|year| config.is_vintage(*year))
}

fn four_digit(text: &str, config: &ParserConfig) -> Option<i32> {
    four_digit_years(text, config).next()
}

fn apostrophe(text: &str, _: &ParserConfig) -> Option<i32> {
    let caps = APOSTROPHE_YEAR.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    Some(if year < 50 { 2000 + year } else { 1900 + year })
}

fn spaced_two_digit(text: &str, _: &ParserConfig) -> Option<i32> {
    let caps = SPACED_SHORT_YEAR.captures(text)?;
    expand_short_vintage(caps[1].parse().ok()?)
}

fn glued_two_digit(text: &str, _: &ParserConfig) -> Option<i32> {
    let caps = GLUED_SHORT_YEAR.captures(text)?;
    expand_short_vintage(caps[1].parse().ok()?)
}

/// 10-30 map to the 2000s and 80-99 to the 1900s; anything else is not a vintage.
pub(crate) fn expand_short_vintage(num: i32) -> Option<i32> {
    match num {
        10..=30 => Some(2000 + num),
        80..=99 => Some(1900 + num),
        _ => None,
    }
}
