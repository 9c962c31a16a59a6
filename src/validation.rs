// ✅ Validation Layer - Turns a raw POST body into a NewExpense
//
// Order is fixed: JSON parse → missing fields → amount numeric → date valid.
// Presence and coercion rules follow the loose JavaScript semantics that API
// clients were written against: `0`/`false` count as missing text fields,
// `"12.5"` is a valid amount, `"2025-01-01T10:00:00Z"` is a valid date.

use crate::expense::NewExpense;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Required fields, in the order they are reported when missing
pub const REQUIRED_FIELDS: [&str; 4] = ["amount", "description", "category", "date"];

/// Client-correctable problems with a create request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid field: amount must be a number")]
    InvalidAmount,

    #[error("Invalid field: date must be a valid date string (e.g. 2025-01-01)")]
    InvalidDate,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run the whole validation pipeline over a raw request body
pub fn validate_body(raw: &[u8]) -> Result<NewExpense, ValidationError> {
    let fields = parse_body(raw)?;
    validate_fields(&fields)
}

/// Parse the body into a field map
///
/// An empty body is an empty object. Valid JSON that is not an object
/// (`null`, arrays, scalars) has no fields either.
pub fn parse_body(raw: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    if raw.is_empty() {
        return Ok(Map::new());
    }

    let text = String::from_utf8_lossy(raw);
    let value: Value = serde_json::from_str(&text).map_err(|_| ValidationError::InvalidJson)?;

    match value {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Map::new()),
    }
}

/// Check presence, then coerce amount and date, then build the expense
pub fn validate_fields(fields: &Map<String, Value>) -> Result<NewExpense, ValidationError> {
    let amount = fields.get("amount").filter(|v| is_present_amount(v));
    let description = fields.get("description").filter(|v| is_truthy(v));
    let category = fields.get("category").filter(|v| is_truthy(v));
    let date = fields.get("date").filter(|v| is_truthy(v));

    let (Some(amount), Some(description), Some(category), Some(date)) =
        (amount, description, category, date)
    else {
        let present = [
            amount.is_some(),
            description.is_some(),
            category.is_some(),
            date.is_some(),
        ];
        let missing = REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect();
        return Err(ValidationError::MissingFields(missing));
    };

    let amount = to_number(amount);
    if amount.is_nan() {
        return Err(ValidationError::InvalidAmount);
    }

    let date = parse_date(&to_js_string(date)).ok_or(ValidationError::InvalidDate)?;

    Ok(NewExpense {
        amount,
        description: to_js_string(description),
        category: to_js_string(category),
        date,
    })
}

// ============================================================================
// PRESENCE
// ============================================================================

/// `amount` only counts as missing when absent, `null` or `""`
fn is_present_amount(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// JavaScript truthiness for JSON values
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => number_value(n) != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// COERCION
// ============================================================================

/// Value of a JSON number literal; literals beyond the f64 range are ±infinity
fn number_value(n: &Number) -> f64 {
    n.as_f64()
        .or_else(|| n.to_string().parse().ok())
        .unwrap_or(f64::NAN)
}

/// Numeric coercion with JavaScript `Number()` semantics; NaN means "not a number"
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => number_value(n),
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_js_string(value)),
        Value::Object(_) => f64::NAN,
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    // Rust accepts "inf" and "nan" spellings that JavaScript does not
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

/// String coercion with JavaScript `String()` semantics
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        Value::Number(n) => format_js_number(number_value(n)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// JavaScript `Number.prototype.toString()` for base 10
fn format_js_number(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f < 0.0 {
        return format!("-{}", format_js_number(-f));
    }

    // Shortest round-trip digits, as `d.ddde<exp>`
    let scientific = format!("{f:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if n - 1 >= 0 { '+' } else { '-' };
        let rest = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        format!("{first}{rest}e{sign}{}", (n - 1).abs())
    }
}

// ============================================================================
// DATES
// ============================================================================

/// Date-times that carry their own offset
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Date-times without offset, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Human-written calendar dates
const LOOSE_DATE_FORMATS: [&str; 6] = [
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

/// Parse a date or date-time string into the UTC calendar date it denotes
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    parse_iso_date(s)
        .or_else(|| parse_date_time(s))
        .or_else(|| parse_loose_date(s))
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if let Some(date) = parse_iso_day(s) {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if s.len() == 7 {
        return NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok();
    }

    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}

/// Zero-padded `YYYY-MM-DD` taking any day from 01 to 31; days past the end
/// of the month roll over into the next one (`2025-02-30` is March 2nd)
fn parse_iso_day(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);

    let well_formed = [(year, 4), (month, 2), (day, 2)]
        .iter()
        .all(|(part, len)| part.len() == *len && part.chars().all(|c| c.is_ascii_digit()));
    if !well_formed {
        return None;
    }

    let day: u64 = day.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?
        .checked_add_days(Days::new(day - 1))
}

fn parse_date_time(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
    }

    let naive = s.strip_suffix(|c: char| c == 'Z' || c == 'z').unwrap_or(s);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|dt| dt.and_utc().date_naive())
}

fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    LOOSE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

// ============================================================================
// TESTS
// ============================================================================
