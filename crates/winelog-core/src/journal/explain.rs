//! Per-line rule report for journal and receipt text.
//!
//! [`explain_text`] classifies lines exactly as [`JournalParser`](super::JournalParser)
//! does and lists every extractor rule that fires on each line, not only the
//! winning one.

use std::fmt::Display;

use serde::Serialize;

use super::classifier::{ClassifiedLine, LineClassifier, LineKind, SkipReason};
use super::rules::{
    ColorExtractor, DateExtractor, ExtractionMatch, FieldExtractor, PriceExtractor,
    QuantityExtractor, VintageExtractor,
};
use crate::models::config::ParserConfig;

/// One rule that produced a value on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub field: &'static str,
    pub rule: &'static str,
    pub value: String,
}

/// Classification and rule hits for one non-blank input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
    pub kind: LineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    pub hits: Vec<RuleHit>,
}

impl LineReport {
    /// Hits for one field, in precedence order. The first one is what the parser uses.
    pub fn hits_for(&self, field: &str) -> impl Iterator<Item = &RuleHit> {
        self.hits.iter().filter(move |hit| hit.field == field)
    }
}

/// Report every non-blank line of `text` with its classification and rule hits.
pub fn explain_text(text: &str, config: &ParserConfig) -> Vec<LineReport> {
    let classifier = LineClassifier::new(config.clone());
    let dates = DateExtractor::new();
    let vintages = VintageExtractor::new().with_config(config.clone());
    let prices = PriceExtractor::new().with_config(config.clone());
    let quantities = QuantityExtractor::new();
    let colors = ColorExtractor::new();

    let mut reports = Vec::new();
    let mut prev: Option<LineKind> = None;

    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let classified = classifier.classify(line, prev);
        prev = Some(classified.kind());

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let skip_reason = match &classified {
            ClassifiedLine::Skip(reason) => Some(*reason),
            _ => None,
        };

        // Date rules need the whole token, so only the leading word is tried.
        let leading = trimmed.split_whitespace().next().unwrap_or_default();

        let mut hits = Vec::new();
        collect(&mut hits, "date", &dates, leading);
        collect(&mut hits, "vintage", &vintages, trimmed);
        collect(&mut hits, "price", &prices, trimmed);
        collect(&mut hits, "quantity", &quantities, trimmed);
        collect(&mut hits, "color", &colors, trimmed);

        reports.push(LineReport {
            number: index + 1,
            text: trimmed.to_string(),
            kind: classified.kind(),
            skip_reason,
            hits,
        });
    }

    reports
}

fn collect<E, T>(hits: &mut Vec<RuleHit>, field: &'static str, extractor: &E, text: &str)
where
    E: FieldExtractor<Output = ExtractionMatch<T>>,
    T: Display,
{
    hits.extend(extractor.extract_all(text).into_iter().map(|m| RuleHit {
        field,
        rule: m.rule,
        value: m.value.to_string(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hit(field: &'static str, rule: &'static str, value: &str) -> RuleHit {
        RuleHit {
            field,
            rule,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_blank_lines_are_omitted_but_counted() {
        let text = "10/14/25 Mid-range whites\n\n\nDelille Chaleur White 2022 $40";
        let reports = explain_text(text, &ParserConfig::default());

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].number, 1);
        assert_eq!(reports[0].kind, LineKind::DateHeader);
        assert_eq!(reports[1].number, 4);
        assert_eq!(reports[1].kind, LineKind::Wine);
    }

    #[test]
    fn test_wine_line_lists_every_field() {
        let reports = explain_text("Delille Chaleur White 2022 $40 (3)", &ParserConfig::default());
        let report = &reports[0];

        assert_eq!(report.hits_for("vintage").next(), Some(&hit("vintage", "four_digit", "2022")));
        assert_eq!(report.hits_for("price").next(), Some(&hit("price", "dollar", "40")));
        assert!(report.hits.contains(&hit("quantity", "parenthesized", "3")));
        assert!(report.hits.contains(&hit("color", "white", "white")));
        assert_eq!(report.hits_for("date").count(), 0);
        assert_eq!(report.skip_reason, None);
    }

    #[test]
    fn test_losing_rules_are_reported() {
        // "Blanc de Blancs" fires the sparkling rule first, the white rule second.
        let reports = explain_text("Blanc de Blancs Chardonnay 2015 $60", &ParserConfig::default());
        let colors: Vec<_> = reports[0].hits_for("color").map(|h| h.rule).collect();

        assert_eq!(colors, vec!["sparkling", "white"]);
    }

    #[test]
    fn test_date_header_hit() {
        let reports = explain_text("6/15/2024 Summer order", &ParserConfig::default());

        assert_eq!(
            reports[0].hits_for("date").next(),
            Some(&hit("date", "month_day_year", "2024-06-15"))
        );
    }

    #[test]
    fn test_skipped_lines_carry_reason() {
        let reports = explain_text("//\nsee above", &ParserConfig::default());

        assert_eq!(reports[0].kind, LineKind::Skip);
        assert_eq!(reports[0].skip_reason, Some(SkipReason::Divider));
        assert_eq!(reports[1].skip_reason, Some(SkipReason::Pattern));
    }

    #[test]
    fn test_config_window_applies() {
        let mut config = ParserConfig::default();
        config.max_vintage = 2030;
        let wide = explain_text("Future Cuvee 2028 $40", &config);
        let narrow = explain_text("Future Cuvee 2028 $40", &ParserConfig::default());

        assert_eq!(wide[0].hits_for("vintage").next().map(|h| h.value.as_str()), Some("2028"));
        assert_eq!(narrow[0].hits_for("vintage").count(), 0);
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let reports = explain_text("//", &ParserConfig::default());
        let json = serde_json::to_string(&reports[0]).unwrap();

        assert!(json.contains("\"kind\":\"skip\""));
        assert!(json.contains("\"skip_reason\":\"divider\""));
    }
}
