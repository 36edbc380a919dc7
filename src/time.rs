use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// `Date.prototype.toString` layout sent by the web client, minus the
/// trailing zone name in parentheses.
const CLIENT_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp as sent by a client. Naive forms are read as UTC and a
/// bare date is midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let without_zone_name = raw.find(" (").map_or(raw, |idx| &raw[..idx]);
    if let Ok(dt) = DateTime::parse_from_str(without_zone_name, CLIENT_DATE_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date. Full timestamps are accepted and reduced to their
/// UTC date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
}

/// Human-readable form, e.g. `Sun Jan 01 2023 10:00:00 GMT+0000 (Coordinated Universal Time)`.
///
/// Second granularity: two instants inside the same second render the same.
pub fn render_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%a %b %d %Y %H:%M:%S GMT%z (Coordinated Universal Time)")
        .to_string()
}

/// Column form. Fixed width, so text ordering matches time ordering.
pub fn to_storage(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn date_to_storage(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
