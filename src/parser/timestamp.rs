//! Timestamp normalisation to UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// `%z` takes `+0200` as well as `+02:00`
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse `YYYY-MM-DD HH:MM:SS[.fff]` (naive, read as UTC), or the same with a
/// `Z` / `±HH:MM` / `±HHMM` offset. A comma decimal separator is accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = raw.trim().replacen(',', ".", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_space_separated() {
        let ts = parse_timestamp("2023-10-27 10:00:01").unwrap();
        assert_eq!(ts.timestamp(), 1_698_400_801);
    }

    #[test]
    fn comma_fraction() {
        let ts = parse_timestamp("2023-10-27 10:00:01,500").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn offset_converted_to_utc() {
        let ts = parse_timestamp("2023-10-27T12:00:01+02:00").unwrap();
        assert_eq!(ts, parse_timestamp("2023-10-27 10:00:01").unwrap());
    }

    #[test]
    fn offset_without_colon() {
        let expected = parse_timestamp("2023-10-27 10:00:01").unwrap();
        assert_eq!(parse_timestamp("2023-10-27 12:00:01+0200"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-27T12:00:01.000+0200"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-27 12:00:01+02:00"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("garbage line").is_none());
        assert!(parse_timestamp("2023-13-45 10:00:01").is_none());
    }
}
