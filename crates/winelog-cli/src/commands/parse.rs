//! Parse command - extract purchases and tastings from a single text file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use serde::Serialize;
use winelog_core::{
    explain_text, parse_text, ImportResult, ImportSummary, LineReport, ParseMode, ParseStats,
};

use super::{load_config, read_input};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Parse mode: standard, receipt or label (default from config)
    #[arg(short, long, value_name = "MODE")]
    mode: Option<ParseMode>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print batch, item and tasting counts
    #[arg(long)]
    summary: bool,

    /// Print counts of skipped and dropped lines
    #[arg(long)]
    stats: bool,

    /// List each line's classification and every extraction rule that fires on it
    #[arg(long, conflicts_with_all = ["summary", "stats"])]
    explain: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per purchased wine
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let mode = args.mode.unwrap_or(config.output.default_mode);

    let text = read_input(&args.input)?;

    if args.explain {
        if mode == ParseMode::Label {
            anyhow::bail!("--explain is only available in standard and receipt modes");
        }
        info!("Explaining {} in {} mode", input_name(&args.input), mode);
        let reports = explain_text(&text, &config.parser);
        let output = format_explain(&reports, args.format, config.output.pretty_json)?;
        return emit(args.output.as_deref(), &output);
    }

    info!("Parsing {} in {} mode", input_name(&args.input), mode);

    let result = parse_text(&text, mode, &config.parser);
    let output = format_result(&result, args.format, config.output.pretty_json)?;
    emit(args.output.as_deref(), &output)?;

    if args.summary {
        print_summary(&result);
    }

    if args.stats {
        print_stats(&result.stats);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn emit(output_path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    if let Some(output_path) = output_path {
        fs::write(output_path, output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn input_name(input: &Path) -> String {
    if input == Path::new("-") {
        "stdin".to_string()
    } else {
        input.display().to_string()
    }
}

fn print_summary(result: &ImportResult) {
    let summary = ImportSummary::from_result(result);
    eprintln!();
    eprintln!(
        "{} {} batches, {} items, {} tastings",
        style("ℹ").blue(),
        summary.batch_count,
        summary.item_count,
        summary.tasting_count
    );

    if !result.ambiguities.is_empty() {
        eprintln!("{}", style("Needs review:").yellow());
        for ambiguity in &result.ambiguities {
            match &ambiguity.suggestion {
                Some(suggestion) => eprintln!("  - {} ({})", ambiguity.message, suggestion),
                None => eprintln!("  - {}", ambiguity.message),
            }
        }
    }
}

fn print_stats(stats: &ParseStats) {
    eprintln!();
    eprintln!("{} Line statistics:", style("ℹ").blue());
    for (label, value) in [
        ("lines", stats.lines),
        ("skipped lines", stats.skipped_lines),
        ("multi-vintage lines", stats.multi_vintage_lines),
        ("rejected wine lines", stats.rejected_wine_lines),
        ("items without vintage", stats.items_without_vintage),
        ("empty batches", stats.empty_batches),
        ("orphaned tastings", stats.orphaned_tastings),
        ("orphaned descriptions", stats.orphaned_descriptions),
    ] {
        eprintln!("  {:<22} {}", label, value);
    }
}

pub fn format_result(
    result: &ImportResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ImportResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "purchase_date",
        "theme",
        "name",
        "color",
        "vintage_year",
        "price",
        "quantity",
        "tastings",
        "best_rating",
        "seller_notes",
    ])?;

    for batch in &result.batches {
        for item in &batch.items {
            let best_rating = item
                .tastings
                .iter()
                .map(|t| t.rating)
                .filter(|r| *r > 0.0)
                .fold(None, |best: Option<f32>, r| Some(best.map_or(r, |b| b.max(r))));

            wtr.write_record([
                &batch.purchase_date.to_string(),
                batch.theme.as_deref().unwrap_or(""),
                &item.name,
                item.color.as_str(),
                &item.vintage_year.to_string(),
                &item.price.map(|p| p.to_string()).unwrap_or_default(),
                &item.quantity.to_string(),
                &item.tastings.len().to_string(),
                &best_rating.map(|r| r.to_string()).unwrap_or_default(),
                item.seller_notes.as_deref().unwrap_or(""),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ImportResult) -> String {
    let mut output = String::new();

    if result.batches.is_empty() {
        output.push_str("No purchases found.\n");
    }

    for batch in &result.batches {
        match &batch.theme {
            Some(theme) => {
                let _ = writeln!(output, "Batch {} - {}", batch.purchase_date, theme);
            }
            None => {
                let _ = writeln!(output, "Batch {}", batch.purchase_date);
            }
        }

        for item in &batch.items {
            let _ = write!(
                output,
                "  {} {} [{}]",
                item.name, item.vintage_year, item.color
            );
            if let Some(price) = item.price {
                let _ = write!(output, " ${}", price);
            }
            if item.quantity > 1 {
                let _ = write!(output, " x{}", item.quantity);
            }
            output.push('\n');

            if let Some(notes) = &item.seller_notes {
                let _ = writeln!(output, "    {}", notes);
            }

            for tasting in &item.tastings {
                let rating = if tasting.rating > 0.0 {
                    format!("{:.1}", tasting.rating)
                } else {
                    "-".to_string()
                };
                let _ = writeln!(
                    output,
                    "    {}  {:>4}  {}",
                    tasting.date,
                    rating,
                    tasting.notes.as_deref().unwrap_or("")
                );
            }
        }
        output.push('\n');
    }

    output
}

pub fn format_explain(
    reports: &[LineReport],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::Csv => format_explain_csv(reports),
        OutputFormat::Text => Ok(format_explain_text(reports)),
    }
}

/// Serialized name of a unit enum variant, e.g. `date_header`.
fn variant_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn format_explain_csv(reports: &[LineReport]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["line", "kind", "skip_reason", "field", "rule", "value", "text"])?;

    for report in reports {
        let number = report.number.to_string();
        let kind = variant_name(&report.kind);
        let reason = report.skip_reason.as_ref().map(variant_name).unwrap_or_default();

        if report.hits.is_empty() {
            wtr.write_record([&number, &kind, &reason, "", "", "", &report.text])?;
        }
        for hit in &report.hits {
            wtr.write_record([
                &number, &kind, &reason, hit.field, hit.rule, &hit.value, &report.text,
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_explain_text(reports: &[LineReport]) -> String {
    let mut output = String::new();

    for report in reports {
        let kind = match &report.skip_reason {
            Some(reason) => format!("skip:{}", variant_name(reason)),
            None => variant_name(&report.kind),
        };
        let _ = writeln!(output, "{:>4}  {:<22} {}", report.number, kind, report.text);

        for hit in &report.hits {
            let _ = writeln!(
                output,
                "        {:<9} {:<17} {}",
                hit.field, hit.rule, hit.value
            );
        }
    }

    output
}
