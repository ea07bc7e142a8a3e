//! Text and price folding used for every comparison.
//!
//! Normalized values are comparison keys only; output files always carry
//! the original strings.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Currency marker removed from prices before parsing.
const CURRENCY_MARKER: &str = "ars";

/// Replace NBSP with a space, collapse whitespace runs and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.replace('\u{00A0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold text so comparisons ignore case, diacritics and spacing.
pub fn normalize_text(text: &str) -> String {
    let folded = strip_marks(&normalize_whitespace(text).to_lowercase());

    // Compatibility decomposition can surface spaces or capitals ("¨", "ℌ").
    normalize_whitespace(&folded).to_lowercase()
}

/// NFKD-decompose and drop every combining mark.
fn strip_marks(text: &str) -> String {
    text.nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

/// Fold a human-entered price into a plain `integer[.fraction]` string.
///
/// A lone comma is a decimal comma. With several separators, or with both
/// commas and dots present, the last separator is the decimal point and the
/// others are thousands separators. Prices without digits fold to "".
pub fn normalize_price(price: &str) -> String {
    let lowered = normalize_whitespace(price).to_lowercase();
    let digits: String = lowered
        .replace(CURRENCY_MARKER, "")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let commas = digits.matches(',').count();
    let dots = digits.matches('.').count();

    if commas == 1 && dots == 0 {
        return digits.replace(',', ".");
    }

    if dots > 1 || commas > 1 || (dots > 0 && commas > 0) {
        if let Some(split) = digits.rfind([',', '.']) {
            let integer: String = digits[..split]
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            return format!("{}.{}", integer, &digits[split + 1..]);
        }
    }

    digits
}
