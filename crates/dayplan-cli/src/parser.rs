use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use chrono_english::{parse_date_string, Dialect};

/// Parses a start date. ISO dates are taken as-is; anything else goes
/// through natural-language parsing relative to `now`.
pub fn parse_date(input: &str, now: DateTime<Local>) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    let today = now.date_naive();
    let relative = match input.to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        "yesterday" => today.pred_opt(),
        _ => None,
    };
    if let Some(date) = relative {
        return Ok(date);
    }
    parse_date_string(input, now, Dialect::Uk)
        .map(|parsed| parsed.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

/// Parses a wall-clock time such as "14:30", "09:00:15", "9:30 pm" or "7am".
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    let mut normalized = input.to_uppercase();

    match normalized.as_str() {
        "NOON" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()),
        "MIDNIGHT" => return Ok(NaiveTime::MIN),
        _ => {}
    }

    // chrono needs minutes, so "7PM" becomes "7:00 PM".
    if !normalized.contains(':') && (normalized.ends_with("AM") || normalized.ends_with("PM")) {
        let (hour, meridiem) = normalized.split_at(normalized.len() - 2);
        normalized = format!("{}:00 {}", hour.trim(), meridiem);
    }

    const FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];
    FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| {
            anyhow!(
                "Invalid time '{}'. Use 24-hour 'HH:MM' (e.g. '14:30') or 12-hour '2:30 pm'",
                input
            )
        })
}
