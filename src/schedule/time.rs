//! Round start times: admin input in, UTC timestamps out, friendly text for display

use crate::error::{Result, TournamentError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::fmt::Display;

/// Formats accepted from an admin editing a round time
const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Formats the backend stores when a time was never set through the client
const NAIVE_STORED_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

fn parse_naive(input: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

/// Convert a wall-clock time in `tz` to the UTC form sent to the backend,
/// e.g. `2025-06-01T08:00:00.000Z`.
pub fn to_utc_timestamp<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<String> {
    let input = input.trim();
    let naive = parse_naive(input, &INPUT_FORMATS)
        .ok_or_else(|| TournamentError::InvalidDateTime(input.to_string()))?;

    // A time skipped by a DST change has no instant
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TournamentError::InvalidDateTime(input.to_string()))?;

    Ok(local
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Read a stored round time as an instant.
///
/// RFC 3339 values are exact. Bare `YYYY-MM-DD HH:MM` values carry no zone
/// and are taken as wall-clock time in `tz`.
pub fn parse_stored_time<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(exact) = DateTime::parse_from_rfc3339(raw) {
        return Some(exact.with_timezone(tz));
    }
    parse_naive(raw, &NAIVE_STORED_FORMATS).and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

/// "Fri, Jun 20, 2025, 10:00", or the raw value when it can't be read
pub fn format_round_time<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_stored_time(raw, tz) {
        Some(dt) => dt.format("%a, %b %-d, %Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// The `YYYY-MM-DDTHH:MM` form an admin edits and passes back in
pub fn editable_round_time<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_stored_time(raw, tz) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn cest() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn test_to_utc_from_utc() {
        assert_eq!(
            to_utc_timestamp("2025-06-01T10:00", &Utc).unwrap(),
            "2025-06-01T10:00:00.000Z"
        );
    }

    #[test]
    fn test_to_utc_from_offset_zone() {
        assert_eq!(
            to_utc_timestamp("2025-06-01T10:00", &cest()).unwrap(),
            "2025-06-01T08:00:00.000Z"
        );
    }

    #[test]
    fn test_to_utc_crosses_midnight() {
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            to_utc_timestamp("2025-06-01T22:30", &west).unwrap(),
            "2025-06-02T03:30:00.000Z"
        );
    }

    #[test]
    fn test_to_utc_rejects_garbage() {
        assert!(matches!(
            to_utc_timestamp("next tuesday", &Utc),
            Err(TournamentError::InvalidDateTime(_))
        ));
        assert!(to_utc_timestamp("2025-13-01T10:00", &Utc).is_err());
    }

    #[test]
    fn test_parse_stored_naive_and_rfc3339() {
        let naive = parse_stored_time("2025-06-20 10:00", &cest()).unwrap();
        assert_eq!(naive.to_rfc3339(), "2025-06-20T10:00:00+02:00");

        let exact = parse_stored_time("2025-06-20T08:00:00.000Z", &cest()).unwrap();
        assert_eq!(exact, naive);
    }

    #[test]
    fn test_format_round_time() {
        assert_eq!(
            format_round_time("2025-06-20T08:00:00.000Z", &cest()),
            "Fri, Jun 20, 2025, 10:00"
        );
        assert_eq!(format_round_time("TBD", &Utc), "TBD");
    }

    #[test]
    fn test_editable_round_trip() {
        let stored = to_utc_timestamp("2025-06-01T10:00", &cest()).unwrap();
        assert_eq!(editable_round_time(&stored, &cest()), "2025-06-01T10:00");
    }
}
