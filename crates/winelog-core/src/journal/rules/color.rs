//! Wine colour detection from grape, region and style keywords.

use super::normalize::fold_accents;
use super::patterns::{BRUT, RED_WORDS, ROSE_PLACE_NAME, ROSE_WORDS, SPARKLING_WORDS, WHITE_WORDS};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};
use crate::models::config::ParserConfig;
use crate::models::wine::WineColor;

/// Rules see accent-folded, lower-cased text.
const COLOR_RULES: &[Rule<WineColor>] = &[
    Rule { name: "sparkling", apply: sparkling },
    Rule { name: "rose", apply: rose },
    Rule { name: "white", apply: white },
    Rule { name: "red", apply: red },
];

/// Colour extractor. Returns `None` when no keyword is recognised.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorExtractor;

impl ColorExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldExtractor for ColorExtractor {
    type Output = ExtractionMatch<WineColor>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(COLOR_RULES, &fold_accents(text), &ParserConfig::DEFAULT)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(COLOR_RULES, &fold_accents(text), &ParserConfig::DEFAULT)
    }
}

/// Detect the colour of a wine, defaulting to red.
pub fn detect_color(text: &str) -> WineColor {
    ColorExtractor::new()
        .extract(text)
        .map_or(WineColor::Red, |m| m.value)
}

fn sparkling(text: &str, _: &ParserConfig) -> Option<WineColor> {
    // "brut nature" alone does not make a wine sparkling.
    let brut = BRUT.captures_iter(text).any(|caps| caps.get(1).is_none());
    (SPARKLING_WORDS.is_match(text) || brut).then_some(WineColor::Sparkling)
}

fn rose(text: &str, _: &ParserConfig) -> Option<WineColor> {
    (ROSE_WORDS.is_match(text) && !ROSE_PLACE_NAME.is_match(text)).then_some(WineColor::Rose)
}

fn white(text: &str, _: &ParserConfig) -> Option<WineColor> {
    WHITE_WORDS.is_match(text).then_some(WineColor::White)
}

fn red(text: &str, _: &ParserConfig) -> Option<WineColor> {
    RED_WORDS.is_match(text).then_some(WineColor::Red)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_varieties() {
        assert_eq!(detect_color("Cabernet Sauvignon"), WineColor::Red);
        assert_eq!(detect_color("Pinot Noir"), WineColor::Red);
        assert_eq!(detect_color("Merlot Reserve"), WineColor::Red);
        assert_eq!(detect_color("Syrah"), WineColor::Red);
        assert_eq!(detect_color("Shiraz"), WineColor::Red);
    }

    #[test]
    fn test_red_regions() {
        assert_eq!(detect_color("Châteauneuf-du-Pape"), WineColor::Red);
        assert_eq!(detect_color("Barolo"), WineColor::Red);
        assert_eq!(detect_color("Brunello di Montalcino"), WineColor::Red);
        assert_eq!(detect_color("Douro Reserve"), WineColor::Red);
        assert_eq!(detect_color("Haut-Médoc"), WineColor::Red);
    }

    #[test]
    fn test_white() {
        assert_eq!(detect_color("Chardonnay"), WineColor::White);
        assert_eq!(detect_color("Sauvignon Blanc"), WineColor::White);
        assert_eq!(detect_color("Riesling"), WineColor::White);
        assert_eq!(detect_color("Alvarinho"), WineColor::White);
        assert_eq!(detect_color("Chablis"), WineColor::White);
        assert_eq!(detect_color("Grüner Veltliner"), WineColor::White);
        assert_eq!(detect_color("ALBARIÑO"), WineColor::White);
    }

    #[test]
    fn test_sparkling() {
        assert_eq!(detect_color("Champagne"), WineColor::Sparkling);
        assert_eq!(detect_color("Prosecco"), WineColor::Sparkling);
        assert_eq!(detect_color("Cremant d'Alsace"), WineColor::Sparkling);
        assert_eq!(detect_color("Crémant de Loire"), WineColor::Sparkling);
        assert_eq!(detect_color("Brut Reserve"), WineColor::Sparkling);
    }

    #[test]
    fn test_brut_nature_alone_is_not_sparkling() {
        assert_eq!(detect_color("Brut Nature Chardonnay"), WineColor::White);
        assert_eq!(detect_color("Brut Nature, Extra Brut"), WineColor::Sparkling);
    }

    #[test]
    fn test_rose() {
        assert_eq!(detect_color("Rosé"), WineColor::Rose);
        assert_eq!(detect_color("Rose Wine"), WineColor::Rose);
        assert_eq!(detect_color("Pink Lady"), WineColor::Rose);
    }

    #[test]
    fn test_decomposed_accents() {
        assert_eq!(detect_color("Rose\u{301}"), WineColor::Rose);
        assert_eq!(detect_color("Gewu\u{308}rztraminer"), WineColor::White);
        assert_eq!(detect_color("Co\u{302}tes du Rho\u{302}ne"), WineColor::Red);
        assert_eq!(
            detect_color("Rose\u{301} de Provence"),
            detect_color("Rosé de Provence")
        );
    }

    #[test]
    fn test_rose_place_name_is_not_rose() {
        assert_eq!(detect_color("Rosé de Loire Cabernet"), WineColor::Red);
    }

    #[test]
    fn test_sparkling_beats_white() {
        assert_eq!(detect_color("Blanc de Blancs Chardonnay"), WineColor::Sparkling);
    }

    #[test]
    fn test_unknown_defaults_to_red() {
        assert_eq!(detect_color("Some Unknown Wine"), WineColor::Red);
        assert!(ColorExtractor::new().extract("Some Unknown Wine").is_none());
    }
}
