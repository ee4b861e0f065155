//! Import command - commit parsed records to a catalog snapshot.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use winelog_core::{
    execute_import, parse_text, ImportStats, ImportSummary, MemoryCatalog, ParseMode,
};

use super::{load_config, read_input};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Input text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Parse mode: standard, receipt or label (default from config)
    #[arg(short, long, value_name = "MODE")]
    mode: Option<ParseMode>,

    /// Catalog snapshot file (created if missing)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Report what would be imported without saving the catalog
    #[arg(long)]
    dry_run: bool,
}

fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("winelog")
        .join("catalog.json")
}

pub fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mode = args.mode.unwrap_or(config.output.default_mode);
    let catalog_path = args.catalog.unwrap_or_else(default_catalog_path);

    let text = read_input(&args.input)?;
    let result = parse_text(&text, mode, &config.parser);

    let summary = ImportSummary::from_result(&result);
    if summary.item_count == 0 {
        anyhow::bail!("No wines found in {}", args.input.display());
    }

    println!(
        "{} Parsed {} batches, {} items, {} tastings",
        style("ℹ").blue(),
        summary.batch_count,
        summary.item_count,
        summary.tasting_count
    );
    if summary.ambiguity_count > 0 {
        println!(
            "{} {} values were guessed and need review",
            style("!").yellow(),
            summary.ambiguity_count
        );
    }

    let mut catalog = MemoryCatalog::open(&catalog_path)?;
    let stats = execute_import(&mut catalog, &result, &config.import)?;

    if args.dry_run {
        println!(
            "{} Dry run, catalog {} left unchanged",
            style("ℹ").blue(),
            catalog_path.display()
        );
    } else {
        if let Some(parent) = catalog_path.parent() {
            fs::create_dir_all(parent)?;
        }
        catalog.save(&catalog_path)?;
        info!("Saved catalog to {}", catalog_path.display());
        println!(
            "{} Catalog written to {}",
            style("✓").green(),
            catalog_path.display()
        );
    }

    print_stats(&stats);

    Ok(())
}

fn print_stats(stats: &ImportStats) {
    println!();
    println!(
        "  Wines:     {} created, {} matched",
        stats.wines_created, stats.wines_matched
    );
    println!(
        "  Vintages:  {} created, {} matched",
        stats.vintages_created, stats.vintages_matched
    );
    println!("  Batches:   {} created", stats.purchase_batches_created);
    println!("  Items:     {} created", stats.purchase_items_created);
    println!(
        "  Tastings:  {} created, {} empty skipped, {} duplicates skipped",
        stats.tastings_created, stats.tastings_skipped_empty, stats.tastings_skipped_duplicate
    );
}
