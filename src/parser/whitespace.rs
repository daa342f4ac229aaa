//! Positional layout: `<date> <time> <LEVEL> <message...>`.
//! The message keeps its internal whitespace verbatim.

use super::RawFields;

/// Split off the first whitespace-delimited token; the rest has leading whitespace removed.
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], s[end..].trim_start()))
}

pub(super) fn extract(line: &str) -> Option<RawFields<'_>> {
    let line = line.trim_start();
    let (_date, rest) = split_token(line)?;
    let (_time, rest) = split_token(rest)?;
    let timestamp = line[..line.len() - rest.len()].trim_end();
    let (severity, message) = split_token(rest)?;
    if message.is_empty() {
        return None;
    }
    Some(RawFields {
        timestamp,
        severity,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_fields() {
        let f = extract("2023-10-27 10:05:30 WARNING Low disk space detected on /var/log.").unwrap();
        assert_eq!(f.timestamp, "2023-10-27 10:05:30");
        assert_eq!(f.severity, "WARNING");
        assert_eq!(f.message, "Low disk space detected on /var/log.");
    }

    #[test]
    fn message_whitespace_preserved() {
        let f = extract("2023-10-27 10:05:30 INFO a  b\tc").unwrap();
        assert_eq!(f.message, "a  b\tc");
    }

    #[test]
    fn too_few_fields() {
        assert!(extract("2023-10-27 10:05:30 INFO").is_none());
        assert!(extract("garbage").is_none());
        assert!(extract("").is_none());
    }
}
