//! Parsing of locale-ambiguous numeric and currency text
//!
//! Cell text goes through a fixed sequence of cleanup steps:
//! - compatibility normalization (NFKC), so full-width digits become ASCII
//! - removal of non-breaking spaces and currency symbols
//! - sign detection: `(12)`, `12-` and `-12` are negative, `+12` is not
//! - decimal/thousands separator resolution between `.` and `,`
//! - removal of surplus grouping dots and `'` grouping marks
//!
//! Whatever remains must parse as a float, otherwise the value is not
//! numeric-like. None of this ever fails loudly: bad input is `None`.

use crate::normalize::coerce_to_display_string;
use crate::table::CellValue;
use unicode_normalization::UnicodeNormalization;

/// Currency symbols removed wherever they occur in the text
pub const CURRENCY_SYMBOLS: [char; 7] = ['$', '€', '£', '¥', '₽', '₱', '₹'];

/// Cleaned numeric text plus the sign that was peeled off it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber {
    /// Canonical decimal-point number text, without the detected sign
    pub digits: String,
    /// Whether a parenthesis, trailing minus or leading minus was found
    pub negative: bool,
}

impl ParsedNumber {
    /// The signed value of the cleaned text
    pub fn value(&self) -> Option<f64> {
        let magnitude: f64 = self.digits.parse().ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

/// Parse a cell into cleaned numeric text.
///
/// Returns `None` for empty/blank cells and for anything that does not look
/// like a number after cleanup.
pub fn parse_numeric_text(value: &CellValue) -> Option<ParsedNumber> {
    let text = coerce_to_display_string(value)?;
    parse_numeric_str(&text)
}

/// Parse already-trimmed display text into cleaned numeric text.
///
/// Digits must be ASCII once NFKC has folded full-width forms. Digits from
/// other scripts (`"١٢٣"`) and `_` grouping are not numbers.
pub fn parse_numeric_str(text: &str) -> Option<ParsedNumber> {
    let cleaned: String = text
        .nfkc()
        .filter(|c| *c != '\u{a0}' && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let (body, negative) = strip_sign(&cleaned);
    let compact: String = body.chars().filter(|c| *c != ' ').collect();

    let resolved = resolve_separators(&compact);
    let collapsed = collapse_grouping_dots(resolved);
    let stripped: String = collapsed.chars().filter(|c| *c != '\'').collect();

    let digits = stripped.trim();
    digits.parse::<f64>().ok()?;

    Some(ParsedNumber {
        digits: digits.to_string(),
        negative,
    })
}

/// Whether a cell can be read as a number
pub fn is_numeric_like(value: &CellValue) -> bool {
    parse_numeric_text(value).is_some()
}

/// Whether display text can be read as a number
pub fn is_numeric_str(text: &str) -> bool {
    parse_numeric_str(text).is_some()
}

/// Convert a cell to a float.
///
/// Numbers pass through unchanged; NaN, empty cells and unparseable text
/// become `None`. Booleans are not numbers here and take the text path,
/// where `"True"`/`"False"` fail.
pub fn convert_numeric_text(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Empty => None,
        CellValue::Integer(i) => Some(*i as f64),
        CellValue::Float(f) if f.is_nan() => None,
        CellValue::Float(f) => Some(*f),
        other => parse_numeric_text(other)?
            .value()
            .filter(|v| !v.is_nan()),
    }
}

/// Peel sign markers off the text: a fully parenthesized value, then a
/// trailing minus, then a leading minus; a leading plus is dropped.
fn strip_sign(text: &str) -> (&str, bool) {
    let mut body = text;
    let mut negative = false;

    if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        body = inner;
        negative = true;
    }

    if let Some(rest) = body.strip_suffix('-') {
        body = rest;
        negative = true;
    }

    if let Some(rest) = body.strip_prefix('-') {
        body = rest;
        negative = true;
    }

    if let Some(rest) = body.strip_prefix('+') {
        body = rest;
    }

    (body, negative)
}

/// Decide which of `.` and `,` is the decimal separator.
///
/// With both present the rightmost one wins. A lone comma followed by at
/// most two characters is a decimal comma. Any other comma is grouping.
fn resolve_separators(text: &str) -> String {
    match (text.rfind('.'), text.rfind(',')) {
        (Some(dot), Some(comma)) if dot > comma => text.replace(',', ""),
        (Some(_), Some(_)) => text.replace('.', "").replace(',', "."),
        _ => {
            if text.matches(',').count() == 1 {
                if let Some((_, fraction)) = text.split_once(',') {
                    if fraction.chars().count() <= 2 {
                        return text.replace(',', ".");
                    }
                }
            }
            text.replace(',', "")
        }
    }
}

/// Keep only the last `.` as decimal point; earlier dots are grouping
fn collapse_grouping_dots(text: String) -> String {
    if text.matches('.').count() <= 1 {
        return text;
    }
    match text.rsplit_once('.') {
        Some((head, tail)) => format!("{}.{}", head.replace('.', ""), tail),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn convert(s: &str) -> Option<f64> {
        convert_numeric_text(&text(s))
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got None"));
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_rightmost_separator_is_decimal() {
        assert_close(convert("1.234,56"), 1234.56);
        assert_close(convert("1,234.56"), 1234.56);
        assert_close(convert("12.345.678,9"), 12345678.9);
        assert_close(convert("12,345,678.9"), 12345678.9);
    }

    #[test]
    fn test_single_comma_disambiguation() {
        assert_close(convert("1,23"), 1.23);
        assert_close(convert("1,5"), 1.5);
        assert_close(convert("1,234"), 1234.0);
        assert_close(convert("1,234,567"), 1234567.0);
    }

    #[test]
    fn test_lone_dot_is_decimal() {
        // Three trailing digits after a single dot are not treated as grouping.
        assert_close(convert("1.234"), 1.234);
    }

    #[test]
    fn test_surplus_dots_collapse_into_grouping() {
        assert_eq!(
            parse_numeric_str("1.234.567").map(|p| p.digits),
            Some("1234.567".to_string())
        );
    }

    #[test]
    fn test_negative_markers() {
        assert_close(convert("(1.234,56)"), -1234.56);
        assert_close(convert("1234-"), -1234.0);
        assert_close(convert("-1234"), -1234.0);
        assert_close(convert("+1234"), 1234.0);
        assert_close(convert("($ 50)"), -50.0);
    }

    #[test]
    fn test_currency_symbols_anywhere() {
        assert_close(convert("€1.234,56"), 1234.56);
        assert_close(convert("$ 1,234.56"), 1234.56);
        assert_close(convert("1.234,56 €"), 1234.56);
        assert_close(convert("₹12,50"), 12.5);
        assert_close(convert("£ 1 000"), 1000.0);
        assert_close(convert("1$2"), 12.0);
    }

    #[test]
    fn test_spaces_and_grouping_marks() {
        assert_close(convert("1\u{a0}234,5"), 1234.5);
        assert_close(convert("1'234.50"), 1234.5);
        assert_close(convert("- 42"), -42.0);
    }

    #[test]
    fn test_full_width_digits() {
        assert_close(convert("１２３"), 123.0);
        assert_close(convert("＄１，５"), 1.5);
    }

    #[test]
    fn test_parse_result_shape() {
        assert_eq!(
            parse_numeric_text(&text("(1.234,56)")),
            Some(ParsedNumber {
                digits: "1234.56".to_string(),
                negative: true,
            })
        );
        assert_eq!(parse_numeric_text(&text("no es numero")), None);
    }

    #[test]
    fn test_non_numeric_text() {
        assert_eq!(convert("no es numero"), None);
        assert_eq!(convert("$"), None);
        assert_eq!(convert("()"), None);
        assert_eq!(convert("12 abc"), None);
        assert_eq!(convert("2024-01-05"), None);
    }

    #[test]
    fn test_only_ascii_digits_after_folding() {
        assert_eq!(convert("١٢٣"), None);
        assert_eq!(convert("१२३"), None);
        assert_eq!(convert("1_000"), None);
    }

    #[test]
    fn test_blank_and_empty_are_absent() {
        assert_eq!(convert_numeric_text(&CellValue::Empty), None);
        assert_eq!(convert("   "), None);
        assert!(!is_numeric_like(&text("   ")));
        assert!(!is_numeric_like(&CellValue::Empty));
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(convert_numeric_text(&CellValue::Integer(7)), Some(7.0));
        assert_eq!(convert_numeric_text(&CellValue::Float(-2.5)), Some(-2.5));
        assert_eq!(convert_numeric_text(&CellValue::Float(f64::NAN)), None);
        assert!(is_numeric_like(&CellValue::Integer(3)));
        assert!(!is_numeric_like(&CellValue::Float(f64::NAN)));
    }

    #[test]
    fn test_booleans_take_the_text_path() {
        assert!(!is_numeric_like(&CellValue::Bool(true)));
        assert_eq!(convert_numeric_text(&CellValue::Bool(false)), None);
    }

    #[test]
    fn test_nan_text_converts_to_absent() {
        assert!(is_numeric_str("nan"));
        assert_eq!(convert("nan"), None);
    }

    proptest! {
        #[test]
        fn test_numeric_like_iff_parse_yields_digits(s in "[-+()$€ 0-9.,'a-c]{0,12}") {
            let cell = CellValue::String(s);
            prop_assert_eq!(is_numeric_like(&cell), parse_numeric_text(&cell).is_some());
        }

        #[test]
        fn test_grouped_integers_round_trip(n in 0u64..1_000_000_000u64) {
            let us = group_digits(n, ',');
            let eu = group_digits(n, '.');
            prop_assert_eq!(convert(&format!("{us}.00")), Some(n as f64));
            prop_assert_eq!(convert(&format!("{eu},00")), Some(n as f64));
            prop_assert_eq!(convert(&format!("({us}.00)")), Some(-(n as f64)));
        }
    }

    fn group_digits(n: u64, separator: char) -> String {
        let digits = n.to_string();
        let mut out = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(c);
        }
        out
    }
}
