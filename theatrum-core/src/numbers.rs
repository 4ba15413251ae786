//! Numeric coercion helpers centralizing lenient parsing and safe numeric casts.
//!
//! Persisted values are plain text written by earlier page versions (or by hand),
//! so every parser here degrades to zero instead of failing.

use num_traits::cast::cast;
use serde_json::Value;

/// Parse a quantity the way the site always has: leading whitespace, optional
/// sign, then the longest run of decimal digits. Anything unparsable or
/// negative becomes 0; oversized values saturate.
#[must_use]
pub fn parse_qty(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse::<u64>().map_or(u32::MAX, saturate_u64_to_u32)
}

/// Parse a decimal prefix (`"12.50abc"` → 12.5). Invalid, non-finite and
/// negative inputs all yield 0.0.
#[must_use]
pub fn parse_decimal(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut valid_end = 0;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                valid_end = end + 1;
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                if matches!(bytes.get(end + 1), Some(b'-' | b'+')) {
                    end += 1;
                }
            }
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }
    let parsed = trimmed[..valid_end].parse::<f64>().unwrap_or(0.0);
    non_negative_finite(parsed)
}

/// Coerce an arbitrary JSON value into a quantity.
#[must_use]
pub fn qty_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(saturate_u64_to_u32)
            .or_else(|| n.as_f64().map(truncate_f64_to_u32))
            .unwrap_or(0),
        Value::String(s) => parse_qty(s),
        _ => 0,
    }
}

/// Coerce an arbitrary JSON value into a non-negative decimal.
#[must_use]
pub fn decimal_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map_or(0.0, non_negative_finite),
        Value::String(s) => parse_decimal(s),
        _ => 0.0,
    }
}

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

fn truncate_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = f64::from(u32::MAX);
    cast::<f64, u32>(value.min(max).trunc()).unwrap_or(0)
}

fn saturate_u64_to_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn non_negative_finite(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
