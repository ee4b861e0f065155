//! Single-shot parser for OCR text from a photographed bottle label.
//!
//! Labels have no line grammar worth classifying. The whole block is
//! searched for a vintage and a colour, and a name is assembled from the
//! lines that survive a noise filter.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info};

use super::rules::patterns::{
    BARE_TWO_DIGITS, LABEL_BARCODE, LABEL_EDGE_PUNCTUATION, LABEL_NOISE, LABEL_ONLY_DIGITS,
    LABEL_PERCENT, LABEL_WINERY, LABEL_WINE_STYLE, LABEL_YEAR, WHITESPACE_RUN,
};
use super::rules::vintage::expand_short_vintage;
use super::rules::{detect_color, FieldExtractor, VintageExtractor};
use super::TextParser;
use crate::models::config::ParserConfig;
use crate::models::wine::{
    Ambiguity, AmbiguityKind, ImportResult, ParseStats, ParsedBatch, ParsedPurchaseItem,
};

const UNKNOWN_WINE: &str = "Unknown Wine";

/// Label OCR parser. Always yields one batch with one item.
#[derive(Debug, Clone)]
pub struct LabelParser {
    config: ParserConfig,
    today: NaiveDate,
}

impl LabelParser {
    /// Create a parser with default settings, dated today.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            today: Local::now().date_naive(),
        }
    }

    /// Set the heuristic bounds.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the purchase date and the base of the fallback vintage.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn find_vintage(&self, text: &str) -> Option<i32> {
        VintageExtractor::new()
            .with_config(self.config.clone())
            .extract(text)
            .map(|m| m.value)
            .or_else(|| {
                BARE_TWO_DIGITS
                    .captures_iter(text)
                    .filter_map(|caps| caps[1].parse().ok())
                    .find_map(expand_short_vintage)
            })
    }
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextParser for LabelParser {
    fn parse(&self, text: &str) -> ImportResult {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let normalized = normalized.trim();
        let mut ambiguities = Vec::new();

        let vintage_year = match self.find_vintage(normalized) {
            Some(year) => year,
            None => {
                let year = self.today.year().saturating_sub(self.config.label_fallback_age);
                debug!("No vintage on label, defaulting to {}", year);
                ambiguities.push(Ambiguity {
                    kind: AmbiguityKind::VintageParse,
                    message: "Could not find vintage year, defaulting to recent".to_string(),
                    context: normalized.chars().take(100).collect(),
                    suggestion: Some(format!("Using {}", year)),
                });
                year
            }
        };

        let lines: Vec<&str> = normalized
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let significant: Vec<&str> = lines.iter().copied().filter(|l| is_significant(l)).collect();

        let name = match significant.as_slice() {
            [] => normalized
                .lines()
                .next()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .unwrap_or(UNKNOWN_WINE)
                .to_string(),
            [only] => only.to_string(),
            many => combine_lines(many),
        };

        let mut name = clean_label_name(&name);
        if name.chars().count() < 3 {
            name = significant.join(" ").chars().take(100).collect();
        }

        info!("Parsed label {} {} ({} significant lines)", vintage_year, name, significant.len());

        ImportResult {
            batches: vec![ParsedBatch {
                purchase_date: self.today,
                theme: None,
                items: vec![ParsedPurchaseItem {
                    name,
                    color: detect_color(normalized),
                    vintage_year,
                    price: None,
                    quantity: 1,
                    seller_notes: None,
                    tastings: Vec::new(),
                }],
            }],
            ambiguities,
            stats: ParseStats {
                lines: lines.len(),
                skipped_lines: lines.len() - significant.len(),
                ..ParseStats::default()
            },
        }
    }
}

/// Drop artifacts, numbers, alcohol/volume statements, warnings, barcodes
/// and bottler boilerplate.
fn is_significant(line: &str) -> bool {
    if line.chars().count() < 3 || LABEL_ONLY_DIGITS.is_match(line) || LABEL_NOISE.is_match(line) {
        return false;
    }
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    !LABEL_BARCODE.is_match(&compact)
}

/// Winery line plus the most wine-like other line, or the first three lines.
fn combine_lines(lines: &[&str]) -> String {
    let Some(winery) = lines.iter().copied().find(|l| LABEL_WINERY.is_match(l)) else {
        return lines.iter().take(3).copied().collect::<Vec<_>>().join(" ");
    };

    let others: Vec<&str> = lines.iter().copied().filter(|l| *l != winery).collect();
    match others
        .iter()
        .copied()
        .find(|l| LABEL_WINE_STYLE.is_match(l))
        .or_else(|| others.first().copied())
    {
        Some(style) => format!("{} {}", winery, style),
        None => winery.to_string(),
    }
}

fn clean_label_name(name: &str) -> String {
    let name = LABEL_YEAR.replace_all(name, "");
    let name = LABEL_PERCENT.replace_all(&name, "");
    let name = WHITESPACE_RUN.replace_all(&name, " ");
    LABEL_EDGE_PUNCTUATION.replace_all(name.trim(), "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wine::WineColor;

    fn parse(text: &str) -> ImportResult {
        LabelParser::new()
            .with_today(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
            .parse(text)
    }

    #[test]
    fn test_winery_and_varietal() {
        let text = "CHATEAU MONTELENA\nNapa Valley\nCabernet Sauvignon\n2019\n14.5% alc/vol\n750 ml";
        let result = parse(text);

        assert_eq!(result.batches.len(), 1);
        let item = &result.batches[0].items[0];
        assert_eq!(item.name, "CHATEAU MONTELENA Cabernet Sauvignon");
        assert_eq!(item.vintage_year, 2019);
        assert_eq!(item.color, WineColor::Red);
        assert_eq!(item.quantity, 1);
        assert!(item.tastings.is_empty());
        assert!(result.ambiguities.is_empty());
    }

    #[test]
    fn test_first_three_lines_without_winery() {
        let result = parse("Sassicaia\nBolgheri\nToscana\nRosso\n2017");
        assert_eq!(result.batches[0].items[0].name, "Sassicaia Bolgheri Toscana");
    }

    #[test]
    fn test_two_digit_fallback() {
        let result = parse("Domaine Tempier\nBandol\nMillesime-19");
        let item = &result.batches[0].items[0];
        assert_eq!(item.vintage_year, 2019);
        assert_eq!(item.name, "Domaine Tempier Bandol");
        assert!(result.ambiguities.is_empty());
    }

    #[test]
    fn test_missing_vintage_defaults_and_flags() {
        let result = parse("Some Producer\nSome Wine");
        let item = &result.batches[0].items[0];

        assert_eq!(item.vintage_year, 2022);
        assert_eq!(result.ambiguities.len(), 1);
        let ambiguity = &result.ambiguities[0];
        assert_eq!(ambiguity.kind, AmbiguityKind::VintageParse);
        assert_eq!(ambiguity.suggestion.as_deref(), Some("Using 2022"));
        assert_eq!(ambiguity.context, "Some Producer\nSome Wine");
    }

    #[test]
    fn test_extreme_fallback_age_saturates() {
        let config = ParserConfig {
            label_fallback_age: i32::MIN,
            ..ParserConfig::default()
        };
        let result = LabelParser::new()
            .with_config(config)
            .with_today(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
            .parse("Some Producer\nSome Wine");

        assert_eq!(result.batches[0].items[0].vintage_year, i32::MAX);
        assert_eq!(result.ambiguities.len(), 1);
    }

    #[test]
    fn test_noise_only() {
        let result = parse("750 ml\n13% alc");
        let item = &result.batches[0].items[0];
        assert_eq!(item.name, "750 ml");
    }

    #[test]
    fn test_empty_label() {
        let result = parse("");
        assert_eq!(result.batches[0].items[0].name, UNKNOWN_WINE);
        assert_eq!(result.ambiguities.len(), 1);
    }

    #[test]
    fn test_barcode_and_boilerplate_dropped() {
        let result = parse("Produced by Someone\n0 12345 67890 5\nDomaine Weinbach\nRiesling Grand Cru\n2018");
        let item = &result.batches[0].items[0];
        assert_eq!(item.name, "Domaine Weinbach Riesling Grand Cru");
        assert_eq!(item.color, WineColor::White);
    }
}
