//! Fixed calendar format for every timestamp on the wire and on disk.
//!
//! Timestamps are UTC with whole-second precision (`2024-03-01T09:15:00Z`).
//! Values captured through [`now`] are already truncated, so anything stored
//! reads back equal to what was written.

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use chrono::Utc;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Current time truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

/// `#[serde(with = "timestamp::iso8601")]` adapter.
pub mod iso8601 {
    use chrono::DateTime;
    use chrono::Utc;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_and_parse() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let text = format(&ts);
        assert_eq!(text, "2024-03-01T09:05:07Z");
        assert_eq!(parse(&text).unwrap(), ts);
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse("2024-03-01 09:05:07").is_err());
        assert!(parse("1709283907").is_err());
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().timestamp_subsec_nanos(), 0);
    }
}
