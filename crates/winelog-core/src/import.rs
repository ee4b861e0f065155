//! Import boundary: committing parsed results to a wine catalog.
//!
//! The parser never touches storage. This module defines what a catalog
//! must provide ([`CatalogStore`]), how parsed batches are committed to it
//! ([`execute_import`]) and an in-memory catalog with JSON snapshots.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::models::config::ImportConfig;
use crate::models::wine::{ImportResult, WineColor};

pub type WineId = u64;
pub type VintageId = u64;
pub type BatchId = u64;

/// Preview counts for a parse result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_count: usize,
    pub item_count: usize,
    pub tasting_count: usize,
    pub ambiguity_count: usize,
}

impl ImportSummary {
    pub fn from_result(result: &ImportResult) -> Self {
        Self {
            batch_count: result.batches.len(),
            item_count: result.item_count(),
            tasting_count: result.tasting_count(),
            ambiguity_count: result.ambiguities.len(),
        }
    }
}

/// Remove tastings with neither a rating nor notes. Returns how many were removed.
pub fn retain_informative_tastings(result: &mut ImportResult) -> usize {
    let mut removed = 0;
    for item in result.batches.iter_mut().flat_map(|b| b.items.iter_mut()) {
        let before = item.tastings.len();
        item.tastings.retain(|t| !t.is_empty());
        removed += before - item.tastings.len();
    }
    removed
}

/// Storage collaborator used by [`execute_import`].
pub trait CatalogStore {
    /// Find a wine by name, ignoring case.
    fn find_wine(&self, name: &str) -> Option<WineId>;

    fn create_wine(&mut self, name: &str, color: WineColor) -> WineId;

    /// Find the vintage of `wine` for `year`.
    fn find_vintage(&self, wine: WineId, year: i32) -> Option<VintageId>;

    fn create_vintage(
        &mut self,
        wine: WineId,
        year: i32,
        seller_notes: Option<&str>,
    ) -> std::result::Result<VintageId, CatalogError>;

    /// Set seller notes on a vintage that has none. Returns whether notes were written.
    fn backfill_seller_notes(
        &mut self,
        vintage: VintageId,
        notes: &str,
    ) -> std::result::Result<bool, CatalogError>;

    fn create_batch(&mut self, purchase_date: NaiveDate, theme: Option<&str>) -> BatchId;

    fn create_item(
        &mut self,
        batch: BatchId,
        vintage: VintageId,
        price: Option<Decimal>,
        quantity: u32,
    ) -> std::result::Result<(), CatalogError>;

    /// Whether `vintage` already has a tasting on `date` (with `rating`, when given).
    fn has_tasting(&self, vintage: VintageId, date: NaiveDate, rating: Option<f32>) -> bool;

    fn create_tasting(
        &mut self,
        vintage: VintageId,
        date: NaiveDate,
        rating: f32,
        notes: Option<&str>,
    ) -> std::result::Result<(), CatalogError>;
}

/// Counters reported by [`execute_import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub wines_created: usize,
    pub wines_matched: usize,
    pub vintages_created: usize,
    pub vintages_matched: usize,
    pub purchase_batches_created: usize,
    pub purchase_items_created: usize,
    pub tastings_created: usize,
    pub tastings_skipped_empty: usize,
    pub tastings_skipped_duplicate: usize,
}

/// Commit every batch, item and tasting of `result` to `store`.
///
/// Wines are matched by case-insensitive name and vintages by (wine, year);
/// anything missing is created.
pub fn execute_import<S: CatalogStore>(
    store: &mut S,
    result: &ImportResult,
    config: &ImportConfig,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for batch in &result.batches {
        let batch_id = store.create_batch(batch.purchase_date, batch.theme.as_deref());
        stats.purchase_batches_created += 1;

        for item in &batch.items {
            let wine = match store.find_wine(&item.name) {
                Some(id) => {
                    stats.wines_matched += 1;
                    id
                }
                None => {
                    debug!("Creating wine {}", item.name);
                    stats.wines_created += 1;
                    store.create_wine(&item.name, item.color)
                }
            };

            let vintage = match store.find_vintage(wine, item.vintage_year) {
                Some(id) => {
                    stats.vintages_matched += 1;
                    if let Some(notes) = &item.seller_notes {
                        store.backfill_seller_notes(id, notes)?;
                    }
                    id
                }
                None => {
                    stats.vintages_created += 1;
                    store.create_vintage(wine, item.vintage_year, item.seller_notes.as_deref())?
                }
            };

            store.create_item(batch_id, vintage, item.price, item.quantity)?;
            stats.purchase_items_created += 1;

            for tasting in &item.tastings {
                if config.skip_empty_tastings && tasting.is_empty() {
                    stats.tastings_skipped_empty += 1;
                    continue;
                }
                let rating = (tasting.rating > 0.0).then_some(tasting.rating);
                if config.dedupe_tastings && store.has_tasting(vintage, tasting.date, rating) {
                    stats.tastings_skipped_duplicate += 1;
                    continue;
                }
                store.create_tasting(vintage, tasting.date, tasting.rating, tasting.notes.as_deref())?;
                stats.tastings_created += 1;
            }
        }
    }

    info!(
        "Imported {} batches: {} wines created, {} matched, {} tastings created",
        stats.purchase_batches_created,
        stats.wines_created,
        stats.wines_matched,
        stats.tastings_created
    );

    Ok(stats)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineRecord {
    pub id: WineId,
    pub name: String,
    pub color: WineColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VintageRecord {
    pub id: VintageId,
    pub wine_id: WineId,
    pub vintage_year: i32,
    pub seller_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: BatchId,
    pub purchase_date: NaiveDate,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItemRecord {
    pub batch_id: BatchId,
    pub wine_id: WineId,
    pub vintage_id: VintageId,
    pub price_paid: Option<Decimal>,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TastingRecord {
    pub vintage_id: VintageId,
    pub tasting_date: NaiveDate,
    pub rating: f32,
    pub notes: Option<String>,
}

/// In-memory catalog, persisted as a JSON snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryCatalog {
    pub wines: Vec<WineRecord>,
    pub vintages: Vec<VintageRecord>,
    pub batches: Vec<BatchRecord>,
    pub items: Vec<PurchaseItemRecord>,
    pub tastings: Vec<TastingRecord>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a snapshot, or start empty if the file does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save the snapshot to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn vintage_mut(&mut self, id: VintageId) -> std::result::Result<&mut VintageRecord, CatalogError> {
        self.vintages
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(CatalogError::UnknownVintage(id))
    }

    fn vintage(&self, id: VintageId) -> std::result::Result<&VintageRecord, CatalogError> {
        self.vintages
            .iter()
            .find(|v| v.id == id)
            .ok_or(CatalogError::UnknownVintage(id))
    }
}

fn next_id(len: usize) -> u64 {
    len as u64 + 1
}

impl CatalogStore for MemoryCatalog {
    fn find_wine(&self, name: &str) -> Option<WineId> {
        let name = name.to_lowercase();
        self.wines
            .iter()
            .find(|w| w.name.to_lowercase() == name)
            .map(|w| w.id)
    }

    fn create_wine(&mut self, name: &str, color: WineColor) -> WineId {
        let id = next_id(self.wines.len());
        self.wines.push(WineRecord {
            id,
            name: name.to_string(),
            color,
        });
        id
    }

    fn find_vintage(&self, wine: WineId, year: i32) -> Option<VintageId> {
        self.vintages
            .iter()
            .find(|v| v.wine_id == wine && v.vintage_year == year)
            .map(|v| v.id)
    }

    fn create_vintage(
        &mut self,
        wine: WineId,
        year: i32,
        seller_notes: Option<&str>,
    ) -> std::result::Result<VintageId, CatalogError> {
        if !self.wines.iter().any(|w| w.id == wine) {
            return Err(CatalogError::UnknownWine(wine));
        }
        let id = next_id(self.vintages.len());
        self.vintages.push(VintageRecord {
            id,
            wine_id: wine,
            vintage_year: year,
            seller_notes: seller_notes.map(str::to_string),
        });
        Ok(id)
    }

    fn backfill_seller_notes(
        &mut self,
        vintage: VintageId,
        notes: &str,
    ) -> std::result::Result<bool, CatalogError> {
        let record = self.vintage_mut(vintage)?;
        if record.seller_notes.is_some() {
            return Ok(false);
        }
        record.seller_notes = Some(notes.to_string());
        Ok(true)
    }

    fn create_batch(&mut self, purchase_date: NaiveDate, theme: Option<&str>) -> BatchId {
        let id = next_id(self.batches.len());
        self.batches.push(BatchRecord {
            id,
            purchase_date,
            theme: theme.map(str::to_string),
        });
        id
    }

    fn create_item(
        &mut self,
        batch: BatchId,
        vintage: VintageId,
        price: Option<Decimal>,
        quantity: u32,
    ) -> std::result::Result<(), CatalogError> {
        if !self.batches.iter().any(|b| b.id == batch) {
            return Err(CatalogError::UnknownBatch(batch));
        }
        let wine_id = self.vintage(vintage)?.wine_id;
        self.items.push(PurchaseItemRecord {
            batch_id: batch,
            wine_id,
            vintage_id: vintage,
            price_paid: price,
            quantity,
        });
        Ok(())
    }

    fn has_tasting(&self, vintage: VintageId, date: NaiveDate, rating: Option<f32>) -> bool {
        self.tastings.iter().any(|t| {
            t.vintage_id == vintage
                && t.tasting_date == date
                && rating.is_none_or(|r| t.rating == r)
        })
    }

    fn create_tasting(
        &mut self,
        vintage: VintageId,
        date: NaiveDate,
        rating: f32,
        notes: Option<&str>,
    ) -> std::result::Result<(), CatalogError> {
        self.vintage(vintage)?;
        self.tastings.push(TastingRecord {
            vintage_id: vintage,
            tasting_date: date,
            rating,
            notes: notes.map(str::to_string),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wine::{ParsedBatch, ParsedPurchaseItem, ParsedTasting};
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tasting(rating: f32, notes: Option<&str>) -> ParsedTasting {
        ParsedTasting {
            date: ymd(2025, 10, 25),
            rating,
            notes: notes.map(str::to_string),
        }
    }

    fn item(name: &str, year: i32, tastings: Vec<ParsedTasting>) -> ParsedPurchaseItem {
        ParsedPurchaseItem {
            name: name.to_string(),
            color: WineColor::Red,
            vintage_year: year,
            price: Some(Decimal::from(40)),
            quantity: 2,
            seller_notes: Some("Seller copy.".to_string()),
            tastings,
        }
    }

    fn result(items: Vec<ParsedPurchaseItem>) -> ImportResult {
        ImportResult {
            batches: vec![ParsedBatch {
                purchase_date: ymd(2025, 10, 14),
                theme: Some("Reds".to_string()),
                items,
            }],
            ..ImportResult::default()
        }
    }

    #[test]
    fn test_summary() {
        let r = result(vec![
            item("Barolo", 2016, vec![tasting(8.0, None)]),
            item("Rioja", 2015, vec![]),
        ]);
        assert_eq!(
            ImportSummary::from_result(&r),
            ImportSummary {
                batch_count: 1,
                item_count: 2,
                tasting_count: 1,
                ambiguity_count: 0,
            }
        );
    }

    #[test]
    fn test_retain_informative_tastings() {
        let mut r = result(vec![item(
            "Barolo",
            2016,
            vec![tasting(0.0, None), tasting(0.0, Some("same")), tasting(7.5, None)],
        )]);
        assert_eq!(retain_informative_tastings(&mut r), 1);
        assert_eq!(r.tasting_count(), 2);
    }

    #[test]
    fn test_execute_creates_then_matches() {
        let mut catalog = MemoryCatalog::new();
        let config = ImportConfig::default();
        let r = result(vec![item("Barolo", 2016, vec![tasting(8.0, Some("tar"))])]);

        let first = execute_import(&mut catalog, &r, &config).unwrap();
        assert_eq!(first.wines_created, 1);
        assert_eq!(first.vintages_created, 1);
        assert_eq!(first.purchase_batches_created, 1);
        assert_eq!(first.purchase_items_created, 1);
        assert_eq!(first.tastings_created, 1);

        let mut again = result(vec![item("BAROLO", 2016, vec![tasting(8.0, Some("tar"))])]);
        again.batches[0].items[0].seller_notes = None;
        let second = execute_import(&mut catalog, &again, &config).unwrap();
        assert_eq!(second.wines_matched, 1);
        assert_eq!(second.vintages_matched, 1);
        assert_eq!(second.tastings_created, 0);
        assert_eq!(second.tastings_skipped_duplicate, 1);

        assert_eq!(catalog.wines.len(), 1);
        assert_eq!(catalog.batches.len(), 2);
        assert_eq!(catalog.items.len(), 2);
        assert_eq!(catalog.items[0].price_paid, Some(Decimal::from(40)));
    }

    #[test]
    fn test_execute_skips_empty_tastings() {
        let mut catalog = MemoryCatalog::new();
        let r = result(vec![item(
            "Barolo",
            2016,
            vec![tasting(0.0, None), tasting(0.0, Some("same"))],
        )]);

        let stats = execute_import(&mut catalog, &r, &ImportConfig::default()).unwrap();
        assert_eq!(stats.tastings_skipped_empty, 1);
        assert_eq!(stats.tastings_created, 1);
        assert_eq!(catalog.tastings[0].notes.as_deref(), Some("same"));
    }

    #[test]
    fn test_unrated_tasting_dedupes_on_date_only() {
        let mut catalog = MemoryCatalog::new();
        let r = result(vec![item(
            "Barolo",
            2016,
            vec![tasting(8.0, None), tasting(0.0, Some("still closed"))],
        )]);

        let stats = execute_import(&mut catalog, &r, &ImportConfig::default()).unwrap();
        assert_eq!(stats.tastings_created, 1);
        assert_eq!(stats.tastings_skipped_duplicate, 1);

        let mut catalog = MemoryCatalog::new();
        let config = ImportConfig { dedupe_tastings: false, ..ImportConfig::default() };
        let stats = execute_import(&mut catalog, &r, &config).unwrap();
        assert_eq!(stats.tastings_created, 2);
    }

    #[test]
    fn test_backfill_seller_notes() {
        let mut catalog = MemoryCatalog::new();
        let config = ImportConfig::default();

        let mut bare = result(vec![item("Barolo", 2016, vec![])]);
        bare.batches[0].items[0].seller_notes = None;
        execute_import(&mut catalog, &bare, &config).unwrap();
        assert_eq!(catalog.vintages[0].seller_notes, None);

        execute_import(&mut catalog, &result(vec![item("Barolo", 2016, vec![])]), &config).unwrap();
        assert_eq!(catalog.vintages[0].seller_notes.as_deref(), Some("Seller copy."));

        let mut other = result(vec![item("Barolo", 2016, vec![])]);
        other.batches[0].items[0].seller_notes = Some("Different copy.".to_string());
        execute_import(&mut catalog, &other, &config).unwrap();
        assert_eq!(catalog.vintages[0].seller_notes.as_deref(), Some("Seller copy."));
    }

    #[test]
    fn test_catalog_integrity() {
        let mut catalog = MemoryCatalog::new();
        assert_eq!(catalog.create_vintage(7, 2016, None), Err(CatalogError::UnknownWine(7)));
        assert_eq!(
            catalog.create_tasting(3, ymd(2025, 1, 1), 7.0, None),
            Err(CatalogError::UnknownVintage(3))
        );
        let wine = catalog.create_wine("Barolo", WineColor::Red);
        let vintage = catalog.create_vintage(wine, 2016, None).unwrap();
        assert_eq!(
            catalog.create_item(9, vintage, None, 1),
            Err(CatalogError::UnknownBatch(9))
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = MemoryCatalog::open(&path).unwrap();
        assert!(catalog.wines.is_empty());

        let r = result(vec![item("Barolo", 2016, vec![tasting(8.0, None)])]);
        execute_import(&mut catalog, &r, &ImportConfig::default()).unwrap();
        catalog.save(&path).unwrap();

        let loaded = MemoryCatalog::from_file(&path).unwrap();
        assert_eq!(loaded, catalog);
    }
}
