use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use winelog_core::{
    execute_import, parse_label_text, retain_informative_tastings, ImportConfig, ImportSummary,
    JournalParser, MemoryCatalog, ParsedTasting, TextParser,
};

const JOURNAL: &str = "10/14/25 Mid-range unusual whites

Delille Chaleur White 2022 $40 (3)
11/13/25: 8.5. big viscous tart honey, tart bitter finish.
10/25/25: same
//
6/20
ABADIA RETUERTA ESPECIAL, 29.99, 2015
MUCH IN THE STYLE OF REALLY FINE RED BORDEAUX.";

fn parse(text: &str) -> winelog_core::ImportResult {
    JournalParser::new()
        .with_today(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        .parse(text)
}

#[test]
fn preview_summary() {
    let result = parse(JOURNAL);
    assert_eq!(
        ImportSummary::from_result(&result),
        ImportSummary {
            batch_count: 2,
            item_count: 2,
            tasting_count: 2,
            ambiguity_count: 0,
        }
    );
}

#[test]
fn empty_tastings_survive_parsing_but_not_import() {
    let mut result = parse(JOURNAL);
    let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    result.batches[0].items[0].tastings.push(ParsedTasting {
        date,
        rating: 0.0,
        notes: None,
    });
    assert_eq!(result.tasting_count(), 3);

    let mut catalog = MemoryCatalog::new();
    let stats = execute_import(&mut catalog, &result, &ImportConfig::default()).unwrap();
    assert_eq!(stats.tastings_skipped_empty, 1);
    assert_eq!(stats.tastings_created, 2);
    assert!(catalog.tastings.iter().all(|t| t.rating > 0.0 || t.notes.is_some()));

    let mut filtered = result.clone();
    assert_eq!(retain_informative_tastings(&mut filtered), 1);
    assert_eq!(filtered.tasting_count(), 2);
}

#[test]
fn reimport_matches_existing_records() {
    let result = parse(JOURNAL);
    let mut catalog = MemoryCatalog::new();
    let config = ImportConfig::default();

    let first = execute_import(&mut catalog, &result, &config).unwrap();
    assert_eq!(first.wines_created, 2);
    assert_eq!(first.vintages_created, 2);
    assert_eq!(first.purchase_batches_created, 2);
    assert_eq!(first.purchase_items_created, 2);

    let second = execute_import(&mut catalog, &result, &config).unwrap();
    assert_eq!(second.wines_created, 0);
    assert_eq!(second.wines_matched, 2);
    assert_eq!(second.vintages_matched, 2);
    assert_eq!(second.tastings_created, 0);
    assert_eq!(second.tastings_skipped_duplicate, 2);
    assert_eq!(catalog.wines.len(), 2);
    assert_eq!(catalog.items.len(), 4);
}

#[test]
fn label_result_imports_as_one_item() {
    let result = parse_label_text("Domaine Weinbach\nRiesling Grand Cru\n2018\n13% alc/vol");
    assert_eq!(ImportSummary::from_result(&result).item_count, 1);

    let mut catalog = MemoryCatalog::new();
    let stats = execute_import(&mut catalog, &result, &ImportConfig::default()).unwrap();
    assert_eq!(stats.wines_created, 1);
    assert_eq!(catalog.wines[0].name, "Domaine Weinbach Riesling Grand Cru");
    assert_eq!(catalog.vintages[0].vintage_year, 2018);
}
