//! Field validators shared by the converters.
//!
//! Validators never fail: a value that cannot be parsed or is out of range
//! yields the caller's default (or `false` for the predicates).

use serde_json::Value;

/// Characters the controller rejects in object names.
const FORBIDDEN_NAME_CHARS: [char; 3] = [';', ':', '&'];

/// Dotted-quad IPv4 check: exactly four segments, each an integer 0-255.
pub fn validate_ip_address(s: &str) -> bool {
    let segments: Vec<&str> = s.split('.').collect();
    segments.len() == 4 && segments.iter().all(|seg| seg.parse::<u8>().is_ok())
}

/// Length (in characters) within `min_len..=max_len` and no forbidden characters.
pub fn validate_name(s: &str, min_len: usize, max_len: usize) -> bool {
    let len = s.chars().count();
    len >= min_len && len <= max_len && !s.contains(FORBIDDEN_NAME_CHARS)
}

pub fn validate_port(value: Option<&Value>, default: u16) -> u16 {
    value
        .and_then(parse_int)
        .filter(|port| (1..=65535).contains(port))
        .and_then(|port| u16::try_from(port).ok())
        .unwrap_or(default)
}

pub fn validate_timeout(value: Option<&Value>, min: u32, max: u32, default: u32) -> u32 {
    int_in_range(value, min, max).unwrap_or(default)
}

pub fn validate_retries(value: Option<&Value>, min: u32, max: u32, default: u32) -> u32 {
    int_in_range(value, min, max).unwrap_or(default)
}

fn int_in_range(value: Option<&Value>, min: u32, max: u32) -> Option<u32> {
    value
        .and_then(parse_int)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| (min..=max).contains(v))
}

/// Integer from a JSON number or numeric string.
///
/// Floats are accepted only when they have no fractional part.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Number from a JSON number or numeric string.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
