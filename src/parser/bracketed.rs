//! Delimited-severity layout: `<timestamp> [LEVEL] message`, matched by pattern.

use super::RawFields;
use regex::Regex;
use std::sync::OnceLock;

const TIMESTAMP: &str =
    r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:[.,]\d+)?(?:Z|[+-]\d{2}:?\d{2})?";

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| {
        // Timestamp is either fully bracketed or bare, never half
        Regex::new(&format!(
            r"^(?:\[(?P<bts>{TIMESTAMP})\]|(?P<ts>{TIMESTAMP}))\s*(?:\[(?P<sq>[A-Za-z]+)\]|\((?P<paren>[A-Za-z]+)\)|<(?P<angle>[A-Za-z]+)>)\s*(?P<msg>\S.*)$"
        ))
        .expect("bracketed layout pattern")
    })
}

pub(super) fn extract(line: &str) -> Option<RawFields<'_>> {
    let caps = pattern().captures(line)?;
    let timestamp = caps.name("bts").or_else(|| caps.name("ts"))?;
    let severity = caps
        .name("sq")
        .or_else(|| caps.name("paren"))
        .or_else(|| caps.name("angle"))?;
    Some(RawFields {
        timestamp: timestamp.as_str(),
        severity: severity.as_str(),
        message: caps.name("msg")?.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_brackets() {
        let f = extract("2023-10-27 10:15:00 [ERROR] Failed to connect: timeout").unwrap();
        assert_eq!(f.timestamp, "2023-10-27 10:15:00");
        assert_eq!(f.severity, "ERROR");
        assert_eq!(f.message, "Failed to connect: timeout");
    }

    #[test]
    fn bracketed_timestamp_and_angle_severity() {
        let f = extract("[2023-10-27T10:15:00.250Z] <warn> disk  almost full").unwrap();
        assert_eq!(f.timestamp, "2023-10-27T10:15:00.250Z");
        assert_eq!(f.severity, "warn");
        assert_eq!(f.message, "disk  almost full");
    }

    #[test]
    fn paren_severity() {
        let f = extract("2023-10-27 10:15:00+0200 (Error) retry budget exhausted").unwrap();
        assert_eq!(f.timestamp, "2023-10-27 10:15:00+0200");
        assert_eq!(f.severity, "Error");
        assert_eq!(f.message, "retry budget exhausted");
    }

    #[test]
    fn unbalanced_timestamp_brackets_rejected() {
        assert!(extract("[2023-10-27 10:15:00 [ERROR] x").is_none());
        assert!(extract("2023-10-27 10:15:00] [ERROR] x").is_none());
    }

    #[test]
    fn bracket_later_in_message_is_not_severity() {
        assert!(extract("2023-10-27 10:15:00 INFO user [admin] logged in").is_none());
    }

    #[test]
    fn empty_message_rejected() {
        assert!(extract("2023-10-27 10:15:00 [ERROR]").is_none());
    }
}
