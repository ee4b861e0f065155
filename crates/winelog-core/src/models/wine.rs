//! Structured records produced by the journal, receipt and label parsers.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wine colour category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineColor {
    /// Red wine (also the fallback when nothing else matches).
    #[default]
    Red,
    /// White wine.
    White,
    /// Rosé.
    Rose,
    /// Sparkling wine of any colour.
    Sparkling,
}

impl WineColor {
    /// Lower-case name used in JSON and CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            WineColor::Red => "red",
            WineColor::White => "white",
            WineColor::Rose => "rose",
            WineColor::Sparkling => "sparkling",
        }
    }
}

impl fmt::Display for WineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dated impression of a wine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTasting {
    /// Tasting date. Synthesised as "today" for tastings embedded in a wine line.
    pub date: NaiveDate,

    /// Rating on a 0-10 scale; 0 means notes only.
    pub rating: f32,

    /// Free-text impression, captured verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ParsedTasting {
    /// A tasting with neither a rating nor notes carries no information.
    pub fn is_empty(&self) -> bool {
        self.rating == 0.0 && self.notes.is_none()
    }
}

/// One wine entry within a purchase batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPurchaseItem {
    /// Cleaned wine name.
    pub name: String,

    /// Inferred colour.
    pub color: WineColor,

    /// Four-digit vintage year.
    pub vintage_year: i32,

    /// Price paid per bottle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Bottles bought (at least 1).
    pub quantity: u32,

    /// Seller copy gathered from description lines following the wine line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_notes: Option<String>,

    /// Tastings in input order.
    #[serde(default)]
    pub tastings: Vec<ParsedTasting>,
}

/// One purchase occasion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBatch {
    /// Purchase date from the date header, or today for orphaned items.
    pub purchase_date: NaiveDate,

    /// Optional theme text following the header date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Items in input order; never empty once emitted.
    pub items: Vec<ParsedPurchaseItem>,
}

/// Category of a low-confidence guess.
///
/// Only the label assembler guesses today, and only the vintage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityKind {
    VintageParse,
}

/// A place where the parser guessed and a human should review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambiguity {
    #[serde(rename = "type")]
    pub kind: AmbiguityKind,
    pub message: String,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Counts of lines and candidates the parser dropped.
///
/// Dropping is silent in the output itself; these counters make it visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical input lines seen.
    pub lines: usize,

    /// Lines classified as skip (blank lines included).
    pub skipped_lines: usize,

    /// Lines skipped because they carried two or more vintages.
    pub multi_vintage_lines: usize,

    /// Wine lines rejected before an item was opened (no vintage or no name).
    pub rejected_wine_lines: usize,

    /// Items dropped at finalisation because their vintage never resolved.
    pub items_without_vintage: usize,

    /// Batches closed with no items.
    pub empty_batches: usize,

    /// Tasting lines seen while no item was open.
    pub orphaned_tastings: usize,

    /// Description lines seen while no item was open.
    pub orphaned_descriptions: usize,
}

/// Shared result shape of every parse entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub batches: Vec<ParsedBatch>,
    pub ambiguities: Vec<Ambiguity>,
    #[serde(default)]
    pub stats: ParseStats,
}

impl ImportResult {
    /// Iterate over every item across all batches.
    pub fn items(&self) -> impl Iterator<Item = &ParsedPurchaseItem> {
        self.batches.iter().flat_map(|b| b.items.iter())
    }

    /// Total item count.
    pub fn item_count(&self) -> usize {
        self.batches.iter().map(|b| b.items.len()).sum()
    }

    /// Total tasting count.
    pub fn tasting_count(&self) -> usize {
        self.items().map(|i| i.tastings.len()).sum()
    }
}
