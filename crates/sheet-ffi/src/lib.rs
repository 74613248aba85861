//! C FFI bindings for sheet-core
//!
//! This crate provides a C-compatible API so a host written in another
//! language (a web backend, a desktop UI) can run the cleaner in-process.
//! Strings returned by these functions must be released with
//! `sheet_free_string`.

use serde::Serialize;
use sheet_core::{
    convert_numeric_text, is_numeric_like, normalize_column_name, parse_csv_str, process_table,
    write_csv_string, CellValue, ColumnSummary, FormatPlan, ProcessingProfile,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// JSON payload returned by `sheet_process_csv`
#[derive(Serialize)]
struct ProcessResponse {
    csv: String,
    converted_columns: Vec<String>,
    date_columns: Vec<String>,
    blanked_dates: usize,
    format_plan: FormatPlan,
    summary: Option<ColumnSummary>,
}

unsafe fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

/// Convert cell text to a number
///
/// # Safety
/// - `text` must be a valid C string or null
/// - `out` must be a valid pointer to a double or null
/// - Returns false (and leaves `out` untouched) if the text is not numeric
#[no_mangle]
pub unsafe extern "C" fn sheet_convert_value(text: *const c_char, out: *mut f64) -> bool {
    let Some(text) = read_str(text) else {
        return false;
    };

    match convert_numeric_text(&CellValue::String(text.to_string())) {
        Some(value) => {
            if !out.is_null() {
                *out = value;
            }
            true
        }
        None => false,
    }
}

/// Check whether cell text can be read as a number
///
/// # Safety
/// - `text` must be a valid C string or null
#[no_mangle]
pub unsafe extern "C" fn sheet_is_numeric_like(text: *const c_char) -> bool {
    read_str(text).is_some_and(|t| is_numeric_like(&CellValue::String(t.to_string())))
}

/// Normalize a column name (lowercase, no accents, trimmed)
///
/// # Safety
/// - `name` must be a valid C string
/// - Returns null on invalid input
/// - Caller must free the returned string with `sheet_free_string`
#[no_mangle]
pub unsafe extern "C" fn sheet_normalize_column_name(name: *const c_char) -> *mut c_char {
    match read_str(name) {
        Some(name) => into_c_string(normalize_column_name(name)),
        None => ptr::null_mut(),
    }
}

/// Clean a CSV document and return a JSON report
///
/// The JSON object holds the cleaned CSV text, converted and date column
/// names, the display format plan and the column summary.
///
/// # Safety
/// - `csv_text` must be a valid C string
/// - `profile_json` must be a valid C string or null (null uses defaults)
/// - Returns null on error
/// - Caller must free the returned string with `sheet_free_string`
#[no_mangle]
pub unsafe extern "C" fn sheet_process_csv(
    csv_text: *const c_char,
    profile_json: *const c_char,
) -> *mut c_char {
    let Some(csv_text) = read_str(csv_text) else {
        return ptr::null_mut();
    };

    let profile = if profile_json.is_null() {
        ProcessingProfile::default()
    } else {
        match read_str(profile_json).map(ProcessingProfile::from_json) {
            Some(Ok(profile)) => profile,
            _ => return ptr::null_mut(),
        }
    };

    process_csv(csv_text, &profile)
        .map(into_c_string)
        .unwrap_or(ptr::null_mut())
}

fn process_csv(csv_text: &str, profile: &ProcessingProfile) -> sheet_core::Result<String> {
    let table = parse_csv_str(csv_text, "<ffi>")?;
    let processed = process_table(table, profile);

    let response = ProcessResponse {
        csv: write_csv_string(&processed.table)?,
        converted_columns: processed.converted_columns,
        date_columns: processed.date_columns,
        blanked_dates: processed.blanked_dates,
        format_plan: processed.format_plan,
        summary: processed.summary,
    };

    Ok(serde_json::to_string(&response)?)
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a sheet_* function or null
#[no_mangle]
pub unsafe extern "C" fn sheet_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
