//! Common regex patterns for wine journal, receipt and label extraction.

use lazy_static::lazy_static;
use regex::{Regex, RegexSet};

lazy_static! {
    // Dates: M/D/YY[YY], M/YY, YYYY-MM-DD (whole-token)
    pub static ref DATE_MDY: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$"
    ).unwrap();

    pub static ref DATE_MY: Regex = Regex::new(
        r"^(\d{1,2})/(\d{2})$"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})$"
    ).unwrap();

    // Vintage years
    pub static ref FOUR_DIGIT_NUMBER: Regex = Regex::new(
        r"\b(\d{4})\b"
    ).unwrap();

    pub static ref APOSTROPHE_YEAR: Regex = Regex::new(
        r"'(\d{2})\b"
    ).unwrap();

    pub static ref SPACED_SHORT_YEAR: Regex = Regex::new(
        r"(?i)[A-Z]\s+(\d{2})(?:\s|$|,)"
    ).unwrap();

    pub static ref GLUED_SHORT_YEAR: Regex = Regex::new(
        r"(?i)[A-Z](\d{2})$"
    ).unwrap();

    pub static ref WORD_THEN_SHORT_YEAR: Regex = Regex::new(
        r"(?i)\b[A-Z]{3,}\s*'?\d{2}\b"
    ).unwrap();

    pub static ref APOSTROPHE_VINTAGE_HINT: Regex = Regex::new(
        r"'(1[89]|[012]\d)\b"
    ).unwrap();

    pub static ref BARE_TWO_DIGITS: Regex = Regex::new(
        r"\b(\d{2})\b"
    ).unwrap();

    // Prices, in precedence order
    pub static ref PRICE_DOLLAR: Regex = Regex::new(
        r"\$\s*(\d+(?:[.,]\d{2})?)"
    ).unwrap();

    pub static ref PRICE_AT: Regex = Regex::new(
        r"@\s*(\d+(?:\.\d{2})?)"
    ).unwrap();

    pub static ref PRICE_BEFORE_RATING: Regex = Regex::new(
        r"\d{4},\s*(\d{2,3}):"
    ).unwrap();

    pub static ref PRICE_BEFORE_YEAR: Regex = Regex::new(
        r",\s*(\d+(?:\.\d{2})?),\s*\d{4}"
    ).unwrap();

    pub static ref PRICE_TRAILING_COMMA: Regex = Regex::new(
        r",\s*(\d{2,3})\s*$"
    ).unwrap();

    pub static ref PRICE_FLOOR: Regex = Regex::new(
        r"\b(\d{2,3})\+"
    ).unwrap();

    pub static ref PRICE_PARENTHESIZED: Regex = Regex::new(
        r"\((\d{2,3})\)"
    ).unwrap();

    pub static ref PRICE_TRAILING_BARE: Regex = Regex::new(
        r"\s(\d{2,3})(?:\s*$|\s+T\s*$)"
    ).unwrap();

    // Quantities
    pub static ref QUANTITY_PARENTHESIZED: Regex = Regex::new(
        r"\((\d)\)"
    ).unwrap();

    pub static ref QUANTITY_TIMES: Regex = Regex::new(
        r"[xX](\d+)"
    ).unwrap();

    pub static ref QUANTITY_AT: Regex = Regex::new(
        r"(\d+)\s*@"
    ).unwrap();

    pub static ref QUANTITY_FIELD: Regex = Regex::new(
        r"(?i)Quantity:\s*(\d+)"
    ).unwrap();

    // Colour keywords (matched against accent-folded, lower-cased text)
    pub static ref SPARKLING_WORDS: Regex = Regex::new(
        r"champagne|prosecco|cremant|cava|sparkling|spumante|blancs?\s+de\s+blancs?|methode|mousseux|agnes"
    ).unwrap();

    pub static ref BRUT: Regex = Regex::new(
        r"brut(\s+nature)?"
    ).unwrap();

    pub static ref ROSE_WORDS: Regex = Regex::new(
        r"\brose\b|\bpink\b"
    ).unwrap();

    pub static ref ROSE_PLACE_NAME: Regex = Regex::new(
        r"rose\s*(?:de|di|du)"
    ).unwrap();

    pub static ref WHITE_WORDS: Regex = Regex::new(
        r"chardonnay|sauvignon\s*blanc|riesling|pinot\s*gri[os]|viognier|gewurz|muscadet|albarino|alvarinho|chenin|sancerre|chablis|pouilly|meursault|montrachet|puligny|chassagne|vire|macon|fuisse|gruner|pecorino|arneis|vermentino|greco|falanghina|fiano|soave|gavi|vouvray|white|blanc\b|bianco|weiss|stoan|godello|furmint|marsanne|roussanne"
    ).unwrap();

    pub static ref RED_WORDS: Regex = Regex::new(
        r"cabernet|merlot|pinot\s*noir|syrah|shiraz|malbec|zinfandel|zin\b|sangiovese|nebbiolo|tempranillo|grenache|barolo|barbaresco|brunello|chianti|valpolicella|amarone|rioja|ribera|douro|chateauneuf|gigondas|bandol|cotes?\s*du\s*rhone|hermitage|crozes|st[.\s]*julien|margaux|pauillac|st[.\s]*estephe|pomerol|medoc|haut[-\s]*medoc|graves|pessac|fronsac|bourg|blaye|tannat|aglianico|primitivo|nero\s*d'avola|montepulciano|barbera|dolcetto|lagrein|petite?\s*sirah|mourvedre|carignan|gamay|beaujolais|fleurie|morgon|moulin|touriga|tinta|sfursat|rosso|rouge|tinto|rot\b|susumaniello|madiran|taurasi|baga|cab\b|cab/|meunier"
    ).unwrap();

    // Name cleanup
    pub static ref PRODUCT_CODE_PREFIX: Regex = Regex::new(
        r"^\d{5}\s+"
    ).unwrap();

    pub static ref INLINE_TASTING_TAIL: Regex = Regex::new(
        r":\s*\d+(?:\.\d+)?[.,]\s*.*"
    ).unwrap();

    pub static ref INLINE_RATING_NOTES_TAIL: Regex = Regex::new(
        r"(?i),\s*\d+(?:\.\d+)?,\s*[A-Z].*"
    ).unwrap();

    // Fixed window: stripped names key catalog matching and must not vary with config.
    pub static ref NAME_YEAR: Regex = Regex::new(
        r"\b(?:19[89]\d|20[0-2]\d|2030)\b"
    ).unwrap();

    pub static ref GLUED_SHORT_YEAR_SUFFIX: Regex = Regex::new(
        r"(?i)([A-Z])\d{2}$"
    ).unwrap();

    pub static ref IDENTITY_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:BIN|CRU|OPUS|LOT|BLOCK|NO|NUMBER|#)\s+\d{2,3}"
    ).unwrap();

    pub static ref TRAILING_TWO_DIGITS: Regex = Regex::new(
        r"\s+\d{2}\s*$"
    ).unwrap();

    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(
        r"\$\s*\d+(?:[.,]\d{2})?"
    ).unwrap();

    pub static ref COMMA_AMOUNT_COMMA: Regex = Regex::new(
        r",\s*\d+(?:\.\d{2})?,"
    ).unwrap();

    pub static ref COMMA_AMOUNT_END: Regex = Regex::new(
        r",\s*\d+(?:\.\d{2})?\s*$"
    ).unwrap();

    pub static ref TRAILING_PRICE: Regex = Regex::new(
        r"\s+\d{2,3}\+?\s*$"
    ).unwrap();

    pub static ref PARENTHESIZED_PRICE: Regex = Regex::new(
        r"\(\d{2,3}\)"
    ).unwrap();

    pub static ref PARENTHESIZED_QUANTITY: Regex = Regex::new(
        r"\(\d\)"
    ).unwrap();

    pub static ref TIMES_QUANTITY: Regex = Regex::new(
        r"[xX]\d+"
    ).unwrap();

    pub static ref UNIT_PRICE: Regex = Regex::new(
        r"\d+\s*@\s*[\d.]+"
    ).unwrap();

    pub static ref QUANTITY_LABEL: Regex = Regex::new(
        r"(?i)Quantity:\s*\d+"
    ).unwrap();

    pub static ref DECIMAL_RATING: Regex = Regex::new(
        r"\b\d\.\d\b"
    ).unwrap();

    pub static ref TRAILING_RATING: Regex = Regex::new(
        r"\s+\d(?:\.\d)?\s*[,.]?\s*$"
    ).unwrap();

    pub static ref REGULAR_PAREN: Regex = Regex::new(
        r"(?i)\(Regular\s*\$?\d*\s*\)"
    ).unwrap();

    pub static ref REGULAR_AMOUNT: Regex = Regex::new(
        r"(?i)Regular\s*\$?\d+"
    ).unwrap();

    pub static ref RECOMMENDED_ASIDE: Regex = Regex::new(
        r"(?i)\([^)]*rec['‘’]?d[^)]*\)"
    ).unwrap();

    pub static ref SIC_ASIDE: Regex = Regex::new(
        r"(?i)\(sic[^)]*\)"
    ).unwrap();

    pub static ref EMPTY_PARENS: Regex = Regex::new(
        r"\(\s*\)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    pub static ref LEADING_ASTERISKS: Regex = Regex::new(
        r"^\*+\s*"
    ).unwrap();

    pub static ref TRAILING_EMPTY_COMMAS: Regex = Regex::new(
        r",\s*,+\s*$"
    ).unwrap();

    pub static ref TRAILING_PUNCTUATION: Regex = Regex::new(
        r"[,\s]+[?,;:.]+\s*$"
    ).unwrap();

    pub static ref TRAILING_COMMA_SPACE: Regex = Regex::new(
        r"[,\s]+$"
    ).unwrap();

    pub static ref LEADING_COMMA_SPACE: Regex = Regex::new(
        r"^[,\s]+"
    ).unwrap();

    pub static ref TRAILING_COMMA_TWO_DIGITS: Regex = Regex::new(
        r",\s+\d{2}\s*$"
    ).unwrap();

    // Embedded tasting inside a wine line: "25: 8.5, notes"
    pub static ref EMBEDDED_TASTING: Regex = Regex::new(
        r":\s*(\d+(?:\.\d+)?)[.,]\s*(.+)$"
    ).unwrap();

    // Line classification
    pub static ref SKIP_LINES: RegexSet = RegexSet::new([
        r"(?i)^see above",
        r"(?i)^xx+$",
        r"^—+$",
        r"^\s*$",
        r"(?i)TOTAL:",
        r"(?i)^Number\s+Price",
        r"(?i)^Whites you recommend",
        r"(?i)^Sancerre\s+\d",
        r"(?i)^\d+\s+Frank family",
        r"(?i)^Reds you recommend",
        r"(?i)^Value Full Reds$",
        r"(?i)^EU Whites$",
        r"(?i)^EU Reds$",
        r"(?i)^Top Reds$",
        r"(?i)^Medium Body Reds$",
        r"(?i)^Italian/Iberian$",
        r"(?i)^Portuguese Wines$",
        r"(?i)^CHARDONNAY$",
        r"(?i)^CABERNET$",
        r"(?i)^BIG REDS & PORT$",
        r"(?i)^STONY WHITES$",
        r"(?i)^Here's the cleaned",
        r"(?i)^\d+\s+TOTAL",
        r"^:\s*\d",
        r"(?i)^ABOVE TO",
    ]).unwrap();

    pub static ref DESCRIPTION_STARTERS: RegexSet = RegexSet::new([
        r"(?i)^(?:FROM |MADE BY|THIS IS|WE |WE'VE |IN A BLIND|FIRST TASTE|HAVING BEEN|USING |CALLED |BASED ON|FEW AMERICAN|THOUGH |IF YOU|LAVISHLY|FAMOUS |BEAUTIFULLY|MODERN |NICELY |MILDLY |SHOWING |STYLED |REPLICATING|PRE-\d|NOSE:|SEE ABOVE|HERE'S|HERE IS|IT'S|AN AMERICAN)",
        r"^[A-Z]{2,}[A-Z\s,.']+\.\s*$",
        r"(?i)^THE\s+\d{4}\s",
        r"(?i)^(?:THE|A|AN)\s+[A-Z][a-z]+\s+(?:IS|WAS|HAS|MAKES|COMES)",
        r"(?i)\bIS\s+(?:A|AN|THE|AS|ONE|PERHAPS|MAYBE|EXCELLENT|ON|NOT|REGARDED)\b",
        r"(?i)\bWAS\s+(?:A|AN|THE|MY|OUR|EXCELLENT)\b",
        r"(?i)\bHIS\s+\d{4}\b",
        r"(?i)BEST\s+NOW",
        r"(?i)NOW-\d{4}\+?\.?\s*$",
        r"(?i)\bTHAT\s+(?:OWNS|CAPTURES|COMES|MAKES|IS|WAS)\b",
        r"(?i)\bPRETTY\s+MUCH\b",
        r"(?i)\bIT'S\s+(?:A|THE|AS|ENTIRELY|BASED|FROM|MADE)\b",
        r"(?i)\bFOR\s+ME,?\s+THIS\b",
        r"(?i)-type\s+\w+\.\s+For",
        r"(?i)^\d{4}\s+IS\s+",
        r"(?i)^IS\s+(?:A|AN|THE|LAVISHLY|FAIRLY|VERY|RATHER|QUITE)",
    ]).unwrap();

    pub static ref DATE_HEADER: Regex = Regex::new(
        r"^(\d{1,2}/\d{1,2}(?:/\d{2,4})?)\s*(.*?)$"
    ).unwrap();

    pub static ref RATED_TASTING: Regex = Regex::new(
        r"^(\d{1,2}/\d{1,2}(?:/\d{2,4})?)\s*[:\s]\s*(\d+(?:\.\d+)?)[.,]?\s*(.*)$"
    ).unwrap();

    pub static ref UNRATED_TASTING: Regex = Regex::new(
        r"^(\d{1,2}/\d{1,2}(?:/\d{2,4})?)\s*:\s*([A-Za-z].*)$"
    ).unwrap();

    pub static ref VINTAGE_TASTING: Regex = Regex::new(
        r"^(20\d{2}):\s*(\d{1,2})/(\d{1,2}),?\s*(\d+(?:\.\d+)?)\+?[,.]?\s*(.*)$"
    ).unwrap();

    pub static ref VINTAGE_COLON: Regex = Regex::new(
        r"^20\d{2}:"
    ).unwrap();

    pub static ref VINTAGE_RATING_DATE_FRAGMENT: Regex = Regex::new(
        r"^20\d{2}:\s*\d(?:\.\d)?\s+\d{1,2}/\d{1,2}"
    ).unwrap();

    pub static ref VINTAGE_DATE_FRAGMENT: Regex = Regex::new(
        r"^20\d{2}:\s*\d{1,2}/\d{1,2}(?:/\d{2,4})?[:\s]"
    ).unwrap();

    pub static ref RECEIPT_WINE: Regex = Regex::new(
        r"^(\d{5})\s+(.+)$"
    ).unwrap();

    /// Range checked against the configured vintage window by the classifier.
    pub static ref RECEIPT_YEAR: Regex = Regex::new(
        r"^(\d{4})\s*$"
    ).unwrap();

    pub static ref RECEIPT_PRICE: Regex = Regex::new(
        r"^(\d+)\s*@\s*(\d+(?:\.\d{2})?)"
    ).unwrap();

    pub static ref RECEIPT_PRICE_OCR: Regex = Regex::new(
        r"^(\d+)\s*[@0]\s*(\d+(?:\.\d{2})?)"
    ).unwrap();

    pub static ref REGULAR_PRICE_LINE: Regex = Regex::new(
        r"(?i)^REGULAR\s+\d+"
    ).unwrap();

    // Label OCR
    pub static ref LABEL_ONLY_DIGITS: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();

    pub static ref LABEL_NOISE: RegexSet = RegexSet::new([
        r"(?i)\d+(?:\.\d+)?%?\s*(?:alc|vol|alcohol)",
        r"(?i)\balc\.?\s*\d",
        r"(?i)\d+\s*ml",
        r"(?i)contains?\s*sulfites",
        r"(?i)government\s*warning",
        r"(?i)^product\s+of",
        r"(?i)^(?:estate\s+bottled|bottled\s+by|produced?\s+(?:by|and)|imported\s+by)",
        r"^(?:19|20)\d{2}$",
    ]).unwrap();

    pub static ref LABEL_BARCODE: Regex = Regex::new(
        r"^\d{8,}$"
    ).unwrap();

    pub static ref LABEL_WINERY: Regex = Regex::new(
        r"(?i)château|chateau|domaine|bodega|cave|cantina|weingut|tenuta|fattoria|podere|vignoble|vigneron|cellars?|winery|vineyards?|estate"
    ).unwrap();

    pub static ref LABEL_WINE_STYLE: Regex = Regex::new(
        r"(?i)cabernet|merlot|pinot|syrah|shiraz|chardonnay|sauvignon|riesling|malbec|zinfandel|sangiovese|nebbiolo|tempranillo|grenache|viognier|reserve|gran?\s*reserva|cuvée|cuvee|grand\s*cru|premier\s*cru|selection|single\s*vineyard"
    ).unwrap();

    pub static ref LABEL_YEAR: Regex = Regex::new(
        r"\b(?:19|20)\d{2}\b"
    ).unwrap();

    pub static ref LABEL_PERCENT: Regex = Regex::new(
        r"\d+(?:\.\d+)?%"
    ).unwrap();

    pub static ref LABEL_EDGE_PUNCTUATION: Regex = Regex::new(
        r"^[,.\s-]+|[,.\s-]+$"
    ).unwrap();
}
