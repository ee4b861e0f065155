//! Wine journal, receipt and label text parsing.

mod assembler;
pub mod classifier;
mod explain;
mod label;
mod parser;
pub mod rules;

pub use assembler::Assembler;
pub use classifier::{ClassifiedLine, LineClassifier, LineKind, SkipReason};
pub use explain::{explain_text, LineReport, RuleHit};
pub use label::LabelParser;
pub use parser::JournalParser;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WinelogError;
use crate::models::config::ParserConfig;
use crate::models::wine::ImportResult;

/// Trait for text parsers. Parsing is total: malformed input degrades to
/// a partial or empty result.
pub trait TextParser {
    /// Parse text into purchase batches.
    fn parse(&self, text: &str) -> ImportResult;
}

/// Input format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Hand-typed journal entries.
    #[default]
    Standard,
    /// OCR'd store receipts.
    Receipt,
    /// OCR'd bottle labels.
    Label,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Standard => "standard",
            ParseMode::Receipt => "receipt",
            ParseMode::Label => "label",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = WinelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ParseMode::Standard),
            "receipt" => Ok(ParseMode::Receipt),
            "label" => Ok(ParseMode::Label),
            other => Err(WinelogError::UnknownMode(other.to_string())),
        }
    }
}

/// Parse `text` in the given mode.
pub fn parse_text(text: &str, mode: ParseMode, config: &ParserConfig) -> ImportResult {
    match mode {
        ParseMode::Standard | ParseMode::Receipt => {
            JournalParser::new().with_config(config.clone()).parse(text)
        }
        ParseMode::Label => LabelParser::new().with_config(config.clone()).parse(text),
    }
}

/// Parse journal-format text with default settings.
pub fn parse_standard_text(text: &str) -> ImportResult {
    JournalParser::new().parse(text)
}

/// Parse OCR'd receipt text with default settings.
pub fn parse_receipt_text(text: &str) -> ImportResult {
    JournalParser::new().parse(text)
}

/// Parse OCR'd label text with default settings.
pub fn parse_label_text(text: &str) -> ImportResult {
    LabelParser::new().parse(text)
}
