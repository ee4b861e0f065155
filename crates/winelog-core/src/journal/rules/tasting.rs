//! Ratings and tastings written inline on a wine line.

use chrono::NaiveDate;

use super::patterns::EMBEDDED_TASTING;
use crate::models::wine::ParsedTasting;

/// Parse a 1-10 rating. Anything outside that range is rejected.
pub fn parse_rating(text: &str) -> Option<f32> {
    text.parse::<f32>()
        .ok()
        .filter(|rating| (1.0..=10.0).contains(rating))
}

/// Extract a `"price: rating, notes"` tasting from a wine line.
///
/// The line carries no date, so the tasting is dated `today`.
pub fn extract_embedded_tasting(text: &str, today: NaiveDate) -> Option<ParsedTasting> {
    let caps = EMBEDDED_TASTING.captures(text)?;
    let rating = parse_rating(&caps[1])?;
    Some(ParsedTasting {
        date: today,
        rating,
        notes: Some(caps[2].trim().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8.5"), Some(8.5));
        assert_eq!(parse_rating("10"), Some(10.0));
        assert_eq!(parse_rating("1"), Some(1.0));
        assert_eq!(parse_rating("0"), None);
        assert_eq!(parse_rating("25"), None);
        assert_eq!(parse_rating("x"), None);
    }

    #[test]
    fn test_embedded_tasting() {
        let tasting =
            extract_embedded_tasting("Cedarville SYrah, 2015, 25: 8.5, Nice red fruit", today())
                .unwrap();
        assert_eq!(tasting.date, today());
        assert_eq!(tasting.rating, 8.5);
        assert_eq!(tasting.notes.as_deref(), Some("Nice red fruit"));
    }

    #[test]
    fn test_embedded_tasting_period_separator() {
        let tasting = extract_embedded_tasting("Wine 2019, 30: 7. Tight, needs time", today())
            .unwrap();
        assert_eq!(tasting.rating, 7.0);
        assert_eq!(tasting.notes.as_deref(), Some("Tight, needs time"));
    }

    #[test]
    fn test_out_of_range_rating() {
        assert!(extract_embedded_tasting("Wine 2019: 25, notes", today()).is_none());
    }

    #[test]
    fn test_no_tasting() {
        assert!(extract_embedded_tasting("ABADIA RETUERTA ESPECIAL, 29.99, 2015", today()).is_none());
    }
}
