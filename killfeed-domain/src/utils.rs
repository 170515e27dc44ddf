use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{PipelineError, PipelineResult};

pub const KILLMAIL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn parse_killmail_time(raw: &str) -> PipelineResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), KILLMAIL_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| PipelineError::parse(format!("invalid killmail_time '{}': {}", raw, err)))
}

/// Rounds to whole units and groups digits by thousands: `1234567.4` -> `1,234,567`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}
