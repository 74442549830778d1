//! Compact number formatting for display counters (reviews, units sold).
//!
//! Values below one thousand are shown as whole numbers; larger values are
//! shown in thousands with at most one decimal and a `k` suffix
//! (`1500 → "1.5k"`, `2000 → "2k"`).
//!
//! Raw values come from HTML attributes and JSON, so they are untrusted text.
//! Anything that does not start with a finite number formats as `0`.

/// Threshold from which values are abbreviated in thousands.
const THOUSAND: f64 = 1000.0;

/// Format a numeric value compactly.
///
/// Non-finite input is treated as `0`. Rounding is half away from zero.
pub fn format_count(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };

    if value >= THOUSAND {
        // v / 1000 to one decimal place == round(v / 100) / 10
        let tenths = (value / 100.0).round();
        let text = format!("{:.1}", tenths / 10.0);
        let text = text.strip_suffix(".0").unwrap_or(&text);
        return format!("{text}k");
    }

    let whole = value.round();
    if whole == 0.0 {
        // avoid rendering "-0"
        return "0".to_string();
    }
    format!("{whole:.0}")
}

/// Format a raw attribute/JSON value, substituting `0` when it is absent or
/// unparseable.
///
/// Malformed non-empty input is reported at `debug` level so upstream data
/// problems remain traceable without surfacing anything to the shopper.
pub fn format_raw(raw: Option<&str>) -> String {
    let value = match raw {
        None => 0.0,
        Some(text) if text.trim().is_empty() => 0.0,
        Some(text) => parse_lenient(text).unwrap_or_else(|| {
            tracing::debug!(raw = text, "non-numeric counter value, defaulting to 0");
            0.0
        }),
    };
    format_count(value)
}

/// Parse the leading decimal number of `text`.
///
/// Leading/trailing whitespace is ignored and trailing garbage after a
/// numeric prefix is dropped (`"12 reviews"` parses as `12`). Returns `None`
/// when no finite number can be read.
pub fn parse_lenient(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = trimmed.parse::<f64>() {
        return v.is_finite().then_some(v);
    }

    let prefix = numeric_prefix(trimmed);
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return "";
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}
