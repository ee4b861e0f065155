//! Rule-based field extractors for wine journal lines.
//!
//! Every extractor is an ordered table of [`Rule`]s evaluated with
//! [`first_match`]: the first rule that yields a value wins and later rules
//! are never consulted.

pub mod color;
pub mod dates;
pub mod name;
pub mod normalize;
pub mod patterns;
pub mod price;
pub mod quantity;
pub mod tasting;
pub mod vintage;

pub use color::{detect_color, ColorExtractor};
pub use dates::{parse_date, DateExtractor};
pub use name::extract_wine_name;
pub use normalize::fold_accents;
pub use price::{parse_price, PriceExtractor};
pub use quantity::{parse_quantity, QuantityExtractor};
pub use tasting::{extract_embedded_tasting, parse_rating};
pub use vintage::{count_vintage_years, has_vintage_year, parse_vintage_year, VintageExtractor};

use crate::models::config::ParserConfig;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text using the highest-precedence rule that fires.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Every rule that fires, in precedence order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// One pattern rule in an extractor's precedence table.
pub struct Rule<T> {
    /// Stable name, reported in [`ExtractionMatch::rule`].
    pub name: &'static str,
    /// Attempt to produce a value from the text.
    pub apply: fn(&str, &ParserConfig) -> Option<T>,
}

/// A value together with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that fired.
    pub rule: &'static str,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str) -> Self {
        Self { value, rule }
    }
}

/// Evaluate `rules` in order and return the first value produced.
pub fn first_match<T>(
    rules: &[Rule<T>],
    text: &str,
    config: &ParserConfig,
) -> Option<ExtractionMatch<T>> {
    rules
        .iter()
        .find_map(|rule| (rule.apply)(text, config).map(|v| ExtractionMatch::new(v, rule.name)))
}

/// Evaluate every rule and collect all values, preserving precedence order.
pub fn all_matches<T>(
    rules: &[Rule<T>],
    text: &str,
    config: &ParserConfig,
) -> Vec<ExtractionMatch<T>> {
    rules
        .iter()
        .filter_map(|rule| (rule.apply)(text, config).map(|v| ExtractionMatch::new(v, rule.name)))
        .collect()
}
