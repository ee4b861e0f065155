//! Assembly state machine turning classified lines into batches.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::classifier::{ClassifiedLine, SkipReason, DIVIDER};
use super::rules::{
    detect_color, extract_embedded_tasting, extract_wine_name, parse_quantity, FieldExtractor,
    PriceExtractor, VintageExtractor,
};
use crate::models::config::ParserConfig;
use crate::models::wine::{ParseStats, ParsedBatch, ParsedPurchaseItem, ParsedTasting, WineColor};

/// An item still receiving lines.
#[derive(Debug, Clone)]
struct ItemDraft {
    name: String,
    color: WineColor,
    /// `None` until resolved; receipt wines may get it from the next line.
    vintage: Option<i32>,
    price: Option<Decimal>,
    quantity: u32,
    seller_notes: Option<String>,
    tastings: Vec<ParsedTasting>,
    descriptions: Vec<String>,
}

impl ItemDraft {
    fn flush_descriptions(&mut self) {
        if !self.descriptions.is_empty() {
            self.seller_notes = Some(join_notes(&self.descriptions));
            self.descriptions.clear();
        }
    }
}

#[derive(Debug, Clone)]
struct BatchDraft {
    purchase_date: NaiveDate,
    theme: Option<String>,
    items: Vec<ParsedPurchaseItem>,
    current: Option<ItemDraft>,
}

impl BatchDraft {
    fn new(purchase_date: NaiveDate, theme: Option<String>) -> Self {
        Self {
            purchase_date,
            theme,
            items: Vec::new(),
            current: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum ScanState {
    #[default]
    NoBatch,
    InBatch(BatchDraft),
}

/// Folds classified lines into purchase batches.
///
/// Feed every line through [`Assembler::apply`] in input order, then call
/// [`Assembler::finish`].
#[derive(Debug, Clone)]
pub struct Assembler {
    config: ParserConfig,
    today: NaiveDate,
    state: ScanState,
    batches: Vec<ParsedBatch>,
    stats: ParseStats,
}

impl Assembler {
    pub fn new(config: ParserConfig, today: NaiveDate) -> Self {
        Self {
            config,
            today,
            state: ScanState::NoBatch,
            batches: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Advance the state machine by one classified line.
    pub fn apply(&mut self, line: &ClassifiedLine<'_>) {
        self.stats.lines += 1;

        match line {
            ClassifiedLine::DateHeader { date, theme } => {
                self.finalize_batch();
                self.state = ScanState::InBatch(BatchDraft::new(*date, theme.clone()));
            }
            ClassifiedLine::Wine { text } => self.open_item(text, text, false),
            ClassifiedLine::ReceiptWine { rest, line, .. } => self.open_item(rest, line, true),
            ClassifiedLine::ReceiptYear { year } => {
                if let Some(item) = self.current_item() {
                    if item.vintage.is_none() {
                        item.vintage = Some(*year);
                    }
                }
            }
            ClassifiedLine::ReceiptPrice { quantity, price } => {
                if let Some(item) = self.current_item() {
                    item.price = Some(*price);
                    item.quantity = (*quantity).max(1);
                }
            }
            ClassifiedLine::Tasting(tasting) => match self.current_item() {
                Some(item) => item.tastings.push(tasting.clone()),
                None => {
                    debug!("Dropping tasting dated {} with no open item", tasting.date);
                    self.stats.orphaned_tastings += 1;
                }
            },
            ClassifiedLine::Description { text } => {
                let min_len = self.config.min_description_len;
                match self.current_item() {
                    Some(item) => {
                        let text = text.trim();
                        if text.chars().count() > min_len
                            && !item.descriptions.iter().any(|d| d == text)
                        {
                            item.descriptions.push(text.to_string());
                        }
                    }
                    None => self.stats.orphaned_descriptions += 1,
                }
            }
            ClassifiedLine::Skip(reason) => {
                self.stats.skipped_lines += 1;
                match reason {
                    SkipReason::MultipleVintages => self.stats.multi_vintage_lines += 1,
                    SkipReason::Divider => {
                        if let Some(item) = self.current_item() {
                            item.flush_descriptions();
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Close any open item and batch and return the result.
    pub fn finish(mut self) -> (Vec<ParsedBatch>, ParseStats) {
        self.finalize_batch();
        (self.batches, self.stats)
    }

    fn current_item(&mut self) -> Option<&mut ItemDraft> {
        match &mut self.state {
            ScanState::InBatch(batch) => batch.current.as_mut(),
            ScanState::NoBatch => None,
        }
    }

    /// `source` carries the name and vintage; `line` is the whole line used
    /// for price, quantity and inline tasting.
    fn open_item(&mut self, source: &str, line: &str, is_receipt: bool) {
        self.finalize_item();

        let today = self.today;
        if matches!(self.state, ScanState::NoBatch) {
            debug!("Opening implicit batch dated {}", today);
            self.state = ScanState::InBatch(BatchDraft::new(today, None));
        }
        let ScanState::InBatch(batch) = &mut self.state else {
            return;
        };

        let vintage = VintageExtractor::new()
            .with_config(self.config.clone())
            .extract(source)
            .map(|m| m.value);
        if vintage.is_none() && !is_receipt {
            debug!("Rejecting wine line without vintage: {}", line);
            self.stats.rejected_wine_lines += 1;
            return;
        }

        let name = extract_wine_name(source);
        if name.chars().count() < 2 {
            debug!("Rejecting wine line without name: {}", line);
            self.stats.rejected_wine_lines += 1;
            return;
        }

        let price = PriceExtractor::new()
            .with_config(self.config.clone())
            .extract(line)
            .map(|m| m.value);

        batch.current = Some(ItemDraft {
            color: detect_color(source),
            vintage,
            price,
            quantity: parse_quantity(line),
            seller_notes: None,
            tastings: extract_embedded_tasting(line, today).into_iter().collect(),
            descriptions: Vec::new(),
            name,
        });
    }

    fn finalize_item(&mut self) {
        let ScanState::InBatch(batch) = &mut self.state else {
            return;
        };
        let Some(mut draft) = batch.current.take() else {
            return;
        };

        let Some(vintage_year) = draft.vintage else {
            debug!("Dropping {} with no vintage", draft.name);
            self.stats.items_without_vintage += 1;
            return;
        };

        draft.flush_descriptions();
        debug!("Finalised {} {}", vintage_year, draft.name);
        batch.items.push(ParsedPurchaseItem {
            name: draft.name,
            color: draft.color,
            vintage_year,
            price: draft.price,
            quantity: draft.quantity,
            seller_notes: draft.seller_notes,
            tastings: draft.tastings,
        });
    }

    fn finalize_batch(&mut self) {
        self.finalize_item();

        if let ScanState::InBatch(batch) = std::mem::take(&mut self.state) {
            if batch.items.is_empty() {
                debug!("Dropping empty batch dated {}", batch.purchase_date);
                self.stats.empty_batches += 1;
            } else {
                debug!(
                    "Finalised batch dated {} with {} items",
                    batch.purchase_date,
                    batch.items.len()
                );
                self.batches.push(ParsedBatch {
                    purchase_date: batch.purchase_date,
                    theme: batch.theme,
                    items: batch.items,
                });
            }
        }
    }
}

/// Join buffered description lines, dropping a trailing divider remnant.
fn join_notes(descriptions: &[String]) -> String {
    let notes = descriptions.join(" ");
    let notes = notes.trim();
    notes.strip_suffix(DIVIDER).unwrap_or(notes).trim().to_string()
}
