//! Line-oriented parser for journal and receipt text.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{info, trace};

use super::assembler::Assembler;
use super::classifier::{LineClassifier, LineKind};
use super::TextParser;
use crate::models::config::ParserConfig;
use crate::models::wine::ImportResult;

/// Journal and receipt parser.
///
/// Both formats go through the same classifier; receipt shapes (5-digit
/// codes, `N @ price` lines, `REGULAR` list prices) are recognised per line.
#[derive(Debug, Clone)]
pub struct JournalParser {
    config: ParserConfig,
    today: NaiveDate,
}

impl JournalParser {
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

    /// Set the date used for implicit batches and inline tastings.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Default for JournalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextParser for JournalParser {
    fn parse(&self, text: &str) -> ImportResult {
        let start = Instant::now();
        let classifier = LineClassifier::new(self.config.clone());
        let mut assembler = Assembler::new(self.config.clone(), self.today);
        let mut prev: Option<LineKind> = None;

        for (index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let classified = classifier.classify(line, prev);
            trace!("line {}: {:?}", index + 1, classified);
            assembler.apply(&classified);
            prev = Some(classified.kind());
        }

        let (batches, stats) = assembler.finish();
        let result = ImportResult {
            batches,
            ambiguities: Vec::new(),
            stats,
        };

        info!(
            "Parsed {} lines into {} batches, {} items in {}ms",
            stats.lines,
            result.batches.len(),
            result.item_count(),
            start.elapsed().as_millis()
        );

        result
    }
}
