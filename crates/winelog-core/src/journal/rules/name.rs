//! Wine name cleanup.
//!
//! A wine line carries the name together with codes, years, prices,
//! quantities, ratings and asides. [`extract_wine_name`] strips those in a
//! fixed order; each step trims the intermediate result.

use regex::Regex;

use super::patterns::{
    APOSTROPHE_YEAR, COMMA_AMOUNT_COMMA, COMMA_AMOUNT_END, DECIMAL_RATING, DOLLAR_AMOUNT,
    EMPTY_PARENS, GLUED_SHORT_YEAR_SUFFIX, IDENTITY_NUMBER, INLINE_RATING_NOTES_TAIL,
    INLINE_TASTING_TAIL, LEADING_ASTERISKS, LEADING_COMMA_SPACE, NAME_YEAR, PARENTHESIZED_PRICE,
    PARENTHESIZED_QUANTITY, PRODUCT_CODE_PREFIX, QUANTITY_LABEL, RECOMMENDED_ASIDE, REGULAR_AMOUNT,
    REGULAR_PAREN, SIC_ASIDE, TIMES_QUANTITY, TRAILING_COMMA_SPACE, TRAILING_COMMA_TWO_DIGITS,
    TRAILING_EMPTY_COMMAS, TRAILING_PRICE, TRAILING_PUNCTUATION, TRAILING_RATING,
    TRAILING_TWO_DIGITS, UNIT_PRICE, WHITESPACE_RUN,
};

/// Extract the display name of a wine from a journal or receipt line.
pub fn extract_wine_name(text: &str) -> String {
    let mut name = text.trim().to_string();

    name = strip(&name, &PRODUCT_CODE_PREFIX);

    // Inline "price: rating, notes" and ", rating, Notes" tails.
    name = strip(&name, &INLINE_TASTING_TAIL);
    name = strip(&name, &INLINE_RATING_NOTES_TAIL);

    name = strip(&name, &NAME_YEAR);
    name = strip(&name, &APOSTROPHE_YEAR);
    name = replace(&name, &GLUED_SHORT_YEAR_SUFFIX, "${1}");

    // "BIN 389", "OPUS 20" and friends keep their number.
    if !IDENTITY_NUMBER.is_match(&name) {
        name = strip(&name, &TRAILING_TWO_DIGITS);
    }

    name = strip(&name, &DOLLAR_AMOUNT);
    name = replace(&name, &COMMA_AMOUNT_COMMA, ",");
    name = strip(&name, &COMMA_AMOUNT_END);
    if !IDENTITY_NUMBER.is_match(&name) {
        name = strip(&name, &TRAILING_PRICE);
    }
    name = strip(&name, &PARENTHESIZED_PRICE);

    for pattern in [&*PARENTHESIZED_QUANTITY, &*TIMES_QUANTITY, &*UNIT_PRICE, &*QUANTITY_LABEL] {
        name = strip(&name, pattern);
    }

    name = strip(&name, &DECIMAL_RATING);
    name = strip_trailing_rating(&name);

    for pattern in [
        &*REGULAR_PAREN,
        &*REGULAR_AMOUNT,
        &*RECOMMENDED_ASIDE,
        &*SIC_ASIDE,
        &*EMPTY_PARENS,
    ] {
        name = strip(&name, pattern);
    }

    name = replace(&name, &WHITESPACE_RUN, " ");
    name = strip(&name, &LEADING_ASTERISKS);

    for _ in 0..3 {
        name = strip(&name, &TRAILING_EMPTY_COMMAS);
        name = strip(&name, &TRAILING_PUNCTUATION);
        name = strip(&name, &TRAILING_COMMA_SPACE);
    }
    name = strip(&name, &LEADING_COMMA_SPACE);
    strip(&name, &TRAILING_COMMA_TWO_DIGITS)
}

fn strip(text: &str, pattern: &Regex) -> String {
    replace(text, pattern, "")
}

fn replace(text: &str, pattern: &Regex, rep: &str) -> String {
    pattern.replace_all(text, rep).trim().to_string()
}

/// Drop a trailing single-digit rating such as `" 7"` or `" 8.5,"`.
///
/// The rating must not be glued to a preceding letter or digit: the
/// whitespace before it either starts the text, follows a non-alphanumeric
/// character, or is at least two characters wide.
fn strip_trailing_rating(text: &str) -> String {
    let Some(m) = TRAILING_RATING.find(text) else {
        return text.to_string();
    };
    let start = m.start();
    let detached = text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_ascii_alphanumeric());
    let wide_gap = text[start..].chars().nth(1).is_some_and(char::is_whitespace);
    if detached || wide_gap {
        text[..start].trim().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_product_code() {
        assert_eq!(extract_wine_name("14041 PENFOLDS BIN 389"), "PENFOLDS BIN 389");
    }

    #[test]
    fn test_removes_vintage() {
        assert_eq!(extract_wine_name("Chateau Example 2019"), "Chateau Example");
        assert_eq!(extract_wine_name("Rioja Reserva '15"), "Rioja Reserva");
        assert_eq!(extract_wine_name("CHARDONNAY20"), "CHARDONNAY");
    }

    #[test]
    fn test_removes_prices() {
        assert_eq!(extract_wine_name("Wine $50"), "Wine");
        assert_eq!(
            extract_wine_name("ABADIA RETUERTA ESPECIAL, 29.99"),
            "ABADIA RETUERTA ESPECIAL"
        );
        assert_eq!(
            extract_wine_name("ABADIA RETUERTA ESPECIAL, 29.99, 2015"),
            "ABADIA RETUERTA ESPECIAL"
        );
        assert_eq!(
            extract_wine_name("Chappellet Mountain Cuvee , 35"),
            "Chappellet Mountain Cuvee"
        );
        assert_eq!(
            extract_wine_name("AALTO Tempranillo, Ribera del duero , 55"),
            "AALTO Tempranillo, Ribera del duero"
        );
    }

    #[test]
    fn test_removes_ratings() {
        assert_eq!(extract_wine_name("Wine 7.5"), "Wine");
        assert_eq!(extract_wine_name("Wine (Napa) 7"), "Wine (Napa)");
        assert_eq!(extract_wine_name("Wine  8."), "Wine");
    }

    #[test]
    fn test_keeps_digit_after_word() {
        assert_eq!(extract_wine_name("Cuvee R 5"), "Cuvee R 5");
        assert_eq!(extract_wine_name("Wine 7"), "Wine 7");
    }

    #[test]
    fn test_removes_quantities() {
        assert_eq!(extract_wine_name("Wine (3)"), "Wine");
        assert_eq!(extract_wine_name("Wine x2"), "Wine");
        assert_eq!(extract_wine_name("PINTAS CHARACTER 2 @ 39.99"), "PINTAS CHARACTER");
    }

    #[test]
    fn test_removes_inline_tasting() {
        assert_eq!(
            extract_wine_name("Cedarville SYrah, 2015, 25: 8.5, Nice red fruit"),
            "Cedarville SYrah"
        );
    }

    #[test]
    fn test_removes_asides() {
        assert_eq!(
            extract_wine_name("*Sassicaia 2017 (Gerald highly rec'd)"),
            "Sassicaia"
        );
        assert_eq!(extract_wine_name("Quinta Nova (Regular $45) 2018"), "Quinta Nova");
    }
}
