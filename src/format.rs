//! Number and text formatting shared by every report variant.
//!
//! All functions here are total: a missing or non-finite number renders as
//! the zero placeholder, never as `NaN` or a panic.

use chrono::NaiveDate;

/// Format a money amount with two decimal places and thousands separators.
/// Missing values render as `0.00`.
pub fn currency<V: Into<Option<f64>>>(value: V) -> String {
    let value = finite_or_zero(value.into());
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    // -0.004 rounds to 0.00 and must not keep its sign
    let negative = value < 0.0 && whole.bytes().chain(frac.bytes()).any(|b| b != b'0');
    let sign = if negative { "-" } else { "" };

    format!("{sign}{}.{frac}", group_digits(whole))
}

/// Format a count as a whole number with thousands separators.
/// Missing values render as `0`.
pub fn integer<V: Into<Option<f64>>>(value: V) -> String {
    // rounded first, so `{:.0}` prints an exact integer of any magnitude
    let rounded = finite_or_zero(value.into()).round();
    let grouped = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format an amount with thousands separators and at most three fractional
/// digits, trailing zeros trimmed (`1500` -> `1,500`, `12.5` -> `12.5`).
pub fn grouped<V: Into<Option<f64>>>(value: V) -> String {
    let value = finite_or_zero(value.into());
    let fixed = format!("{:.3}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let negative = value < 0.0 && (whole != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };

    if frac.is_empty() {
        format!("{sign}{}", group_digits(whole))
    } else {
        format!("{sign}{}.{frac}", group_digits(whole))
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Insert `,` every three digits, counting from the right.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape an optional string, rendering `None` as empty.
pub fn escape_opt(s: Option<&str>) -> String {
    s.map(escape).unwrap_or_default()
}

/// Turn a `YYYY-MM` period into `March 2025`. Anything else is returned as is.
pub fn period_label(period: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", period.trim()), "%Y-%m-%d")
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|_| period.to_string())
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn slip_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}
