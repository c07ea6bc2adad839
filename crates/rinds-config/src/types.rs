use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// An absolute UTC instant parsed from one of:
///
/// - RFC 3339: `"2024-03-01T09:00:00Z"`, `"2024-03-01T09:00:00+02:00"`
/// - MySQL-style datetime, read as UTC: `"2024-03-01 09:00:00"`
/// - bare date, midnight UTC: `"2024-03-01"`
/// - Unix seconds: `"1709283600"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Build from Unix seconds. `None` when out of chrono's range.
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl FromStr for Timestamp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("empty timestamp string");
        }

        if s.bytes().all(|b| b.is_ascii_digit()) || is_negative_int(s) {
            let secs: i64 = s
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid unix timestamp: {s:?}"))?;
            return Self::from_unix(secs)
                .ok_or_else(|| anyhow::anyhow!("unix timestamp out of range: {s:?}"));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            && let Some(naive) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(Self(naive.and_utc()));
        }

        anyhow::bail!(
            "unsupported timestamp {s:?} (expected RFC 3339, \"YYYY-MM-DD HH:MM:SS\", \"YYYY-MM-DD\" or unix seconds)"
        )
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

fn is_negative_int(s: &str) -> bool {
    s.strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_utc() {
        let ts: Timestamp = "2024-03-01T09:00:00Z".parse().unwrap();
        assert_eq!(ts.as_datetime().timestamp(), 1_709_283_600);
        assert_eq!(ts.to_string(), "2024-03-01T09:00:00Z");
    }

    #[test]
    fn rfc3339_offset_normalised_to_utc() {
        let ts: Timestamp = "2024-03-01T11:00:00+02:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:00:00Z");
    }

    #[test]
    fn mysql_datetime() {
        let ts: Timestamp = "2024-03-01 09:00:00".parse().unwrap();
        assert_eq!(ts.as_datetime().timestamp(), 1_709_283_600);
    }

    #[test]
    fn bare_date_is_midnight() {
        let ts: Timestamp = "2024-03-01".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T00:00:00Z");
    }

    #[test]
    fn unix_seconds() {
        let ts: Timestamp = "1709283600".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:00:00Z");
        let before_epoch: Timestamp = "-60".parse().unwrap();
        assert_eq!(before_epoch.as_datetime().timestamp(), -60);
    }

    #[test]
    fn ordering_follows_time() {
        let a: Timestamp = "2024-03-01".parse().unwrap();
        let b: Timestamp = "2024-03-01 00:00:01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Timestamp>().is_err());
        assert!("next tuesday".parse::<Timestamp>().is_err());
        assert!("2024-13-01".parse::<Timestamp>().is_err());
        assert!("-".parse::<Timestamp>().is_err());
    }

    #[test]
    fn deserialize_from_toml_string() {
        #[derive(Deserialize)]
        struct W {
            at: Timestamp,
        }
        let w: W = toml::from_str(r#"at = "2024-03-01 09:00:00""#).unwrap();
        assert_eq!(w.at.to_string(), "2024-03-01T09:00:00Z");
    }
}
