use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Salesforce datetime fields look like `2024-01-15T10:30:00.000+0000`.
const SALESFORCE_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const DATE_ONLY: &str = "%Y-%m-%d";
const DISPLAY_DATE: &str = "%-m/%-d/%Y";

/// Ordering position of records that carry no usable date.
pub fn sentinel() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Parses the date shapes the CRM emits. Date-only values are UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_ONLY) {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    DateTime::parse_from_str(raw, SALESFORCE_DATETIME)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Human-readable date for event metadata (`M/D/YYYY`).
pub fn format_display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "No date".to_string();
    };
    match parse_timestamp(raw) {
        Some(parsed) => parsed.format(DISPLAY_DATE).to_string(),
        None => "Invalid date".to_string(),
    }
}
