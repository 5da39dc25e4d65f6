//! Lexical rules for the numeric and boolean scalar forms.
//!
//! Parsing failures are fatal for the document ([`LoadError::MalformedScalar`]);
//! no decoder substitutes a default. Rendering is the exact mirror, so a
//! rendered scalar always parses back to an equal value.

use crate::error::LoadError;

/// Canonical rendering of the null scalar.
pub const NULL_TEXT: &str = "~";

fn malformed(tag: &str, detail: impl Into<String>) -> LoadError {
    LoadError::MalformedScalar {
        tag: tag.to_string(),
        detail: detail.into(),
    }
}

/// Parses an integer in the given radix. `_` and `,` separators are
/// ignored; `0x`/`0o` prefixes are accepted for their radix.
pub fn parse_int(text: &str, radix: u32, tag: &str) -> Result<i64, LoadError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ','))
        .collect();
    let (sign, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let rest = match radix {
        16 => rest
            .strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .unwrap_or(rest),
        8 => rest
            .strip_prefix("0o")
            .or_else(|| rest.strip_prefix("0O"))
            .unwrap_or(rest),
        _ => rest,
    };
    i64::from_str_radix(&format!("{sign}{rest}"), radix)
        .map_err(|e| malformed(tag, format!("{text:?}: {e}")))
}

/// Parses a decimal or exponential float. The canonical special forms
/// `.inf`, `-.inf` and `.nan` are accepted as well, so a rendered float
/// always parses back.
pub fn parse_float(text: &str, tag: &str) -> Result<f64, LoadError> {
    match text.trim() {
        ".inf" | "+.inf" => return Ok(f64::INFINITY),
        "-.inf" => return Ok(f64::NEG_INFINITY),
        ".nan" => return Ok(f64::NAN),
        _ => {}
    }
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ','))
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|e| malformed(tag, format!("{text:?}: {e}")))
}

/// Parses a sexagesimal integer: colon-separated base-60 digits, most
/// significant first. `"3:25:45"` is `3*3600 + 25*60 + 45`.
pub fn parse_base60_int(text: &str, tag: &str) -> Result<i64, LoadError> {
    let mut value: i64 = 0;
    for part in text.trim().split(':') {
        let digit: i64 = part
            .parse()
            .map_err(|e| malformed(tag, format!("{text:?}: {e}")))?;
        value = value
            .checked_mul(60)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| malformed(tag, format!("{text:?}: overflow")))?;
    }
    Ok(value)
}

/// Parses a sexagesimal float the same way.
pub fn parse_base60_float(text: &str, tag: &str) -> Result<f64, LoadError> {
    let mut value: f64 = 0.0;
    for part in text.trim().split(':') {
        let digit: f64 = part
            .parse()
            .map_err(|e| malformed(tag, format!("{text:?}: {e}")))?;
        value = value * 60.0 + digit;
    }
    Ok(value)
}

/// Parses the boolean forms the dumper and common documents use.
pub fn parse_bool(text: &str, tag: &str) -> Result<bool, LoadError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(malformed(tag, format!("{text:?} is not a boolean"))),
    }
}

pub fn render_bool(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Shortest decimal rendering that parses back to the same float, with
/// the `.inf`/`-.inf`/`.nan` special forms.
pub fn render_float(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value == f64::INFINITY {
        ".inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        format!("{value:?}")
    }
}
