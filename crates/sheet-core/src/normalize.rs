//! Canonical text forms for column names and cell values

use crate::table::CellValue;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Normalize a column label for keyword and role matching.
///
/// Decomposes (NFKD), drops combining marks, lowercases and trims, so
/// `"  Comisión Más IVA "` becomes `"comision mas iva"`. Case folding and
/// trimming run last so compatibility decompositions that yield capitals or
/// spaces (`"ᴬ"`, `"¨"`) still reach a fixed point.
pub fn normalize_column_name(name: &str) -> String {
    let stripped: String = name
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();
    stripped.to_lowercase().trim().to_string()
}

/// Normalize a column label that may not be text at all.
///
/// Non-string labels normalize to the empty string and so never match a
/// keyword.
pub fn normalize_cell_name(name: &CellValue) -> String {
    match name {
        CellValue::String(s) => normalize_column_name(s),
        _ => String::new(),
    }
}

/// Render a cell as trimmed display text.
///
/// Empty cells, NaN floats and blank strings yield `None`. Numbers use their
/// decimal form; everything else its trimmed string form.
pub fn coerce_to_display_string(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Empty => None,
        CellValue::Float(f) if f.is_nan() => None,
        CellValue::Integer(_) | CellValue::Float(_) => Some(value.to_string()),
        other => {
            let text = other.to_string();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}
