//! Configuration structures for parsing and importing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WinelogError};
use crate::journal::ParseMode;

/// Main configuration for winelog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinelogConfig {
    /// Text parser configuration.
    pub parser: ParserConfig,

    /// Import boundary configuration.
    pub import: ImportConfig,

    /// CLI output configuration.
    pub output: OutputConfig,
}

/// Heuristic bounds used by the extractors and classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Oldest year accepted as an unambiguous four-digit vintage.
    pub min_vintage: i32,

    /// Newest year accepted as an unambiguous four-digit vintage.
    pub max_vintage: i32,

    /// Lowest plausible bottle price for unmarked numbers.
    pub min_price: u32,

    /// Highest plausible bottle price for unmarked numbers.
    pub max_price: u32,

    /// Description lines must be longer than this to be kept.
    pub min_description_len: usize,

    /// Years subtracted from today when a label carries no vintage.
    pub label_fallback_age: i32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParserConfig {
    pub const DEFAULT: Self = Self {
        min_vintage: 1980,
        max_vintage: 2025,
        min_price: 15,
        max_price: 500,
        min_description_len: 10,
        label_fallback_age: 2,
    };

    /// Whether `year` lies in the four-digit vintage window.
    pub fn is_vintage(&self, year: i32) -> bool {
        (self.min_vintage..=self.max_vintage).contains(&year)
    }

    /// Whether a whole-number price candidate is plausible.
    pub fn is_plausible_price(&self, value: rust_decimal::Decimal) -> bool {
        value >= self.min_price.into() && value <= self.max_price.into()
    }
}

/// Rules applied when parsed results are committed to a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Drop tastings with rating 0 and no notes.
    pub skip_empty_tastings: bool,

    /// Skip tastings the vintage already has for the same date (and rating).
    pub dedupe_tastings: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            skip_empty_tastings: true,
            dedupe_tastings: true,
        }
    }
}

/// CLI output preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parse mode used when none is given on the command line.
    pub default_mode: ParseMode,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_mode: ParseMode::Standard,
            pretty_json: true,
        }
    }
}

impl WinelogConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every window is non-empty.
    pub fn validate(&self) -> Result<()> {
        let parser = &self.parser;
        if parser.min_vintage > parser.max_vintage {
            return Err(WinelogError::Config(format!(
                "min_vintage {} is after max_vintage {}",
                parser.min_vintage, parser.max_vintage
            )));
        }
        if parser.min_price > parser.max_price {
            return Err(WinelogError::Config(format!(
                "min_price {} exceeds max_price {}",
                parser.min_price, parser.max_price
            )));
        }
        if parser.label_fallback_age < 0 {
            return Err(WinelogError::Config(format!(
                "label_fallback_age {} is negative",
                parser.label_fallback_age
            )));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_windows() {
        let config = ParserConfig::default();
        assert!(config.is_vintage(1980));
        assert!(config.is_vintage(2025));
        assert!(!config.is_vintage(1979));
        assert!(!config.is_vintage(2030));

        assert!(config.is_plausible_price(Decimal::from(15)));
        assert!(config.is_plausible_price(Decimal::from(500)));
        assert!(!config.is_plausible_price(Decimal::from(5)));
        assert!(!config.is_plausible_price(Decimal::from(2015)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: WinelogConfig =
            serde_json::from_str(r#"{ "parser": { "max_vintage": 2026 } }"#).unwrap();
        assert_eq!(config.parser.max_vintage, 2026);
        assert_eq!(config.parser.min_vintage, 1980);
        assert!(config.import.skip_empty_tastings);
        assert_eq!(config.output.default_mode, ParseMode::Standard);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = WinelogConfig::default();
        config.output.default_mode = ParseMode::Receipt;
        config.save(&path).unwrap();

        let loaded = WinelogConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "parser": { "min_vintage": 2030 } }"#).unwrap();

        let err = WinelogConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, WinelogError::Config(_)));
        assert!(err.to_string().contains("min_vintage 2030"));
    }

    #[test]
    fn test_negative_fallback_age_is_rejected() {
        let mut config = WinelogConfig::default();
        config.parser.label_fallback_age = -1;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("label_fallback_age -1"));
    }
}
