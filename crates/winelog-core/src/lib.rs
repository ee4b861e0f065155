//! Core library for wine journal, receipt and label text ingestion.
//!
//! This crate provides:
//! - Rule-based field extractors (dates, vintages, prices, quantities, colour, names)
//! - A line classifier and assembly state machine for journal and receipt text
//! - A single-shot assembler for bottle label OCR
//! - The import boundary: preview summaries, empty-tasting filtering and a catalog contract

#![recursion_limit = "256"]

pub mod error;
pub mod import;
pub mod journal;
pub mod models;

pub use error::{CatalogError, Result, WinelogError};
pub use import::{
    execute_import, retain_informative_tastings, CatalogStore, ImportStats, ImportSummary,
    MemoryCatalog,
};
pub use journal::{
    explain_text, parse_label_text, parse_receipt_text, parse_standard_text, parse_text,
    JournalParser, LabelParser, LineReport, ParseMode, RuleHit, TextParser,
};
pub use models::config::{ImportConfig, OutputConfig, ParserConfig, WinelogConfig};
pub use models::wine::{
    Ambiguity, AmbiguityKind, ImportResult, ParseStats, ParsedBatch, ParsedPurchaseItem,
    ParsedTasting, WineColor,
};
