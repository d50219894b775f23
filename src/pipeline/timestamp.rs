use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Shown while the backend has not produced a batch timestamp yet.
pub const UPDATING: &str = "갱신 중...";

/// Naive formats the backend has used at various points; all carry UTC times.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Epoch values at or above this are taken as milliseconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// Display pattern: 2-digit year, unpadded month/day, 24-hour time.
/// "26.2.5. 16:48"
fn format_kst(utc: DateTime<Utc>) -> String {
    utc.with_timezone(&kst()).format("%y.%-m.%-d. %H:%M").to_string()
}

fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

fn parse_epoch(n: &serde_json::Number) -> Option<DateTime<Utc>> {
    let raw = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
    let secs = if raw.abs() >= MILLIS_THRESHOLD {
        raw / 1000
    } else {
        raw
    };
    Utc.timestamp_opt(secs, 0).single()
}

/// Positional rebuild from digit runs: the first five groups are read as
/// year/month/day/hour/minute. No calendar validation; the goal is a
/// readable string, not a valid date.
fn extract_digits(s: &str) -> Option<String> {
    let mut runs: Vec<u64> = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(current.parse().ok()?);
            current.clear();
        }
        if runs.len() == 5 {
            break;
        }
    }
    if !current.is_empty() && runs.len() < 5 {
        runs.push(current.parse().ok()?);
    }
    if runs.len() < 5 {
        return None;
    }
    Some(format!(
        "{:02}.{}.{}. {:02}:{:02}",
        runs[0] % 100,
        runs[1],
        runs[2],
        runs[3],
        runs[4]
    ))
}

/// Convert whatever the backend put in `last_updated` into a display string.
///
/// The field has historically carried ISO 8601, naive UTC strings, epoch
/// numbers, pre-formatted display strings, and garbage. Strategies run in
/// order and the first success wins; the result is always printable, never
/// a parse error or "NaN".
pub fn reconcile(value: Option<&Value>) -> String {
    let value = match value {
        Some(Value::Null) | None => return UPDATING.to_string(),
        Some(v) => v,
    };

    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return UPDATING.to_string();
            }
            if let Some(utc) = parse_datetime_str(trimmed) {
                return format_kst(utc);
            }
            if let Some(rebuilt) = extract_digits(trimmed) {
                return rebuilt;
            }
            // May already be pre-formatted; show it as-is
            trimmed.to_string()
        }
        Value::Number(n) => match parse_epoch(n) {
            Some(utc) => format_kst(utc),
            None => UPDATING.to_string(),
        },
        _ => UPDATING.to_string(),
    }
}
