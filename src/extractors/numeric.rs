// src/extractors/numeric.rs
//! Locale-aware numeric cell parsing.
//!
//! The status page publishes figures with a comma as decimal separator
//! (`"9,86"`) and uses a handful of placeholders when a gauge has no
//! reading. Every cell maps to an `f64`; anything that cannot be read
//! becomes `NaN` so one missing reading never costs the rest of the row.

use once_cell::sync::Lazy;
use regex::Regex;

/// Cell texts meaning "no reading available" (compared case-insensitively).
pub const NO_DATA_SENTINELS: &[&str] = &["*", "n/d"];

// Longest leading float literal: optional sign, digits with an optional
// fraction (or a bare fraction), optional exponent.
static LEADING_FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Failed to compile LEADING_FLOAT_RE")
});

static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d+").expect("Failed to compile LEADING_INT_RE")
});

/// Returns true when `text` is blank or one of the [`NO_DATA_SENTINELS`].
pub fn is_no_data(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || NO_DATA_SENTINELS
            .iter()
            .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
}

/// Parses a comma-decimal number, returning `NaN` when nothing numeric leads the text.
///
/// The first comma is read as the decimal point, then the longest leading
/// float literal is taken, so trailing units (`"12,5 hm3"`) are ignored.
pub fn parse_locale_number(text: &str) -> f64 {
    if is_no_data(text) {
        return f64::NAN;
    }

    let normalized = text.trim().replacen(',', ".", 1);
    LEADING_FLOAT_RE
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parses the leading decimal integer of a cell, `None` if there is none.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT_RE
        .find(text.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}
