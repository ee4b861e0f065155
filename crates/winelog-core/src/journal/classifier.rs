//! Line classification for journal and receipt text.
//!
//! Each line is classified on its own with a single line of lookback (the
//! kind of the previous line). Decisions are never revisited.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use super::rules::patterns::{
    DATE_HEADER, DESCRIPTION_STARTERS, RATED_TASTING, RECEIPT_PRICE, RECEIPT_PRICE_OCR,
    RECEIPT_WINE, RECEIPT_YEAR, REGULAR_PRICE_LINE, SKIP_LINES, UNRATED_TASTING,
    VINTAGE_COLON, VINTAGE_DATE_FRAGMENT, VINTAGE_RATING_DATE_FRAGMENT, VINTAGE_TASTING,
};
use super::rules::{count_vintage_years, has_vintage_year, parse_date, parse_rating};
use crate::models::config::ParserConfig;
use crate::models::wine::ParsedTasting;

/// Section divider that closes a seller-notes block.
pub const DIVIDER: &str = "//";

/// Kind of a classified line, used as lookback for the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    DateHeader,
    Wine,
    ReceiptWine,
    ReceiptYear,
    ReceiptPrice,
    Tasting,
    Description,
    Skip,
}

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Empty or whitespace-only.
    Blank,
    /// Matched a known banner, total or placeholder line.
    Pattern,
    /// Two or more vintages on one line.
    MultipleVintages,
    /// The `//` section divider.
    Divider,
    /// A `YYYY:` heading or a truncated vintage tasting.
    TastingFragment,
    /// A `REGULAR NN` list price.
    RegularPrice,
    /// Nothing recognised.
    Unclassified,
}

/// A line with its structural meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedLine<'a> {
    DateHeader {
        date: NaiveDate,
        theme: Option<String>,
    },
    Wine {
        text: &'a str,
    },
    ReceiptWine {
        code: &'a str,
        rest: &'a str,
        line: &'a str,
    },
    ReceiptYear {
        year: i32,
    },
    ReceiptPrice {
        quantity: u32,
        price: Decimal,
    },
    Tasting(ParsedTasting),
    Description {
        text: &'a str,
    },
    Skip(SkipReason),
}

impl ClassifiedLine<'_> {
    pub fn kind(&self) -> LineKind {
        match self {
            Self::DateHeader { .. } => LineKind::DateHeader,
            Self::Wine { .. } => LineKind::Wine,
            Self::ReceiptWine { .. } => LineKind::ReceiptWine,
            Self::ReceiptYear { .. } => LineKind::ReceiptYear,
            Self::ReceiptPrice { .. } => LineKind::ReceiptPrice,
            Self::Tasting(_) => LineKind::Tasting,
            Self::Description { .. } => LineKind::Description,
            Self::Skip(_) => LineKind::Skip,
        }
    }
}

/// Rule-ordered line classifier.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    config: ParserConfig,
}

impl LineClassifier {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Classify one line given the kind of the line before it.
    pub fn classify<'a>(&self, line: &'a str, prev: Option<LineKind>) -> ClassifiedLine<'a> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return ClassifiedLine::Skip(SkipReason::Blank);
        }
        if SKIP_LINES.is_match(trimmed) {
            return ClassifiedLine::Skip(SkipReason::Pattern);
        }
        if count_vintage_years(trimmed, &self.config) >= 2 {
            return ClassifiedLine::Skip(SkipReason::MultipleVintages);
        }
        if trimmed == DIVIDER {
            return ClassifiedLine::Skip(SkipReason::Divider);
        }

        if let Some(header) = date_header(trimmed) {
            return header;
        }
        if let Some(tasting) = dated_tasting(trimmed).or_else(|| vintage_tasting(trimmed)) {
            return ClassifiedLine::Tasting(tasting);
        }

        if VINTAGE_COLON.is_match(trimmed) && trimmed.chars().count() < 20 {
            return ClassifiedLine::Skip(SkipReason::TastingFragment);
        }
        if VINTAGE_RATING_DATE_FRAGMENT.is_match(trimmed) || VINTAGE_DATE_FRAGMENT.is_match(trimmed)
        {
            return ClassifiedLine::Skip(SkipReason::TastingFragment);
        }

        if let Some(caps) = RECEIPT_WINE.captures(trimmed) {
            if let (Some(code), Some(rest)) = (caps.get(1), caps.get(2)) {
                return ClassifiedLine::ReceiptWine {
                    code: code.as_str(),
                    rest: rest.as_str(),
                    line: trimmed,
                };
            }
        }

        let after_receipt_wine = prev == Some(LineKind::ReceiptWine);
        if after_receipt_wine {
            if let Some(year) = RECEIPT_YEAR
                .captures(trimmed)
                .and_then(|caps| caps[1].parse::<i32>().ok())
                .filter(|year| self.config.is_vintage(*year))
            {
                return ClassifiedLine::ReceiptYear { year };
            }
        }

        if let Some(line) = receipt_price(&RECEIPT_PRICE, trimmed) {
            return line;
        }
        if REGULAR_PRICE_LINE.is_match(trimmed) {
            return ClassifiedLine::Skip(SkipReason::RegularPrice);
        }
        if DESCRIPTION_STARTERS.is_match(trimmed) {
            return ClassifiedLine::Description { text: trimmed };
        }
        // OCR sometimes reads "@" as "0".
        if after_receipt_wine {
            if let Some(line) = receipt_price(&RECEIPT_PRICE_OCR, trimmed) {
                return line;
            }
        }

        if has_vintage_year(trimmed, &self.config) {
            return ClassifiedLine::Wine { text: trimmed };
        }
        if trimmed.chars().count() > 20 && trimmed == trimmed.to_uppercase() {
            return ClassifiedLine::Description { text: trimmed };
        }
        if matches!(prev, Some(LineKind::Wine | LineKind::ReceiptWine)) {
            return ClassifiedLine::Description { text: trimmed };
        }

        ClassifiedLine::Skip(SkipReason::Unclassified)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `D/D[/YY[YY]] [theme]` with no colon anywhere on the line.
fn date_header(trimmed: &str) -> Option<ClassifiedLine<'static>> {
    if trimmed.contains(':') {
        return None;
    }
    let caps = DATE_HEADER.captures(trimmed)?;
    let date = parse_date(&caps[1])?;
    let theme = non_empty(&caps[2]).filter(|theme| !theme.eq_ignore_ascii_case("order"));
    Some(ClassifiedLine::DateHeader { date, theme })
}

/// `D/D[/YY]: rating. notes` or the unrated `D/D[/YY]: notes`.
fn dated_tasting(trimmed: &str) -> Option<ParsedTasting> {
    if let Some(caps) = RATED_TASTING.captures(trimmed) {
        if let (Some(date), Some(rating)) = (parse_date(&caps[1]), parse_rating(&caps[2])) {
            return Some(ParsedTasting {
                date,
                rating,
                notes: non_empty(&caps[3]),
            });
        }
    }

    let caps = UNRATED_TASTING.captures(trimmed)?;
    let date = parse_date(&caps[1])?;
    Some(ParsedTasting {
        date,
        rating: 0.0,
        notes: non_empty(&caps[2]),
    })
}

/// `YYYY: M/D, rating notes`, dated in the leading year.
fn vintage_tasting(trimmed: &str) -> Option<ParsedTasting> {
    let caps = VINTAGE_TASTING.captures(trimmed)?;
    let rating = parse_rating(&caps[4])?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    Some(ParsedTasting {
        date,
        rating,
        notes: non_empty(&caps[5]),
    })
}

fn receipt_price(pattern: &regex::Regex, trimmed: &str) -> Option<ClassifiedLine<'static>> {
    let caps = pattern.captures(trimmed)?;
    let quantity = caps[1].parse().ok()?;
    let price = Decimal::from_str(&caps[2]).ok()?.normalize();
    Some(ClassifiedLine::ReceiptPrice { quantity, price })
}
