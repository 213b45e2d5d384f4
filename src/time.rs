use std::fmt;

use serde::{Deserialize, Serialize};
use ::time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// A point in time, persisted as RFC 3339 text (`2024-03-01T09:30:00Z`).
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "::time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self(OffsetDateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
impl From<OffsetDateTime> for Timestamp {
    fn from(when: OffsetDateTime) -> Self {
        Self(when)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == OffsetDateTime::UNIX_EPOCH {
            return write!(fmt, "<epoch>");
        }

        match self.0.format(&Rfc3339) {
            Ok(s) => write!(fmt, "{}", s),
            Err(_) => write!(fmt, "{}", self.0.unix_timestamp()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use ::time::macros::datetime;

    #[test]
    fn serializes_as_rfc3339() {
        let ts = Timestamp::from(datetime!(2024-03-01 09:30:00 UTC));

        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-01T09:30:00Z\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn accepts_browser_style_timestamps() {
        let ts: Timestamp = serde_json::from_str("\"2024-03-01T09:30:00.123Z\"").unwrap();
        assert_eq!(ts, Timestamp::from(datetime!(2024-03-01 09:30:00.123 UTC)));
    }

    #[test]
    fn epoch_display() {
        assert_eq!(Timestamp::default().to_string(), "<epoch>");
    }
}
