//! API-wide timestamp policy: one output format for every emitted timestamp, and one
//! default zone for client timestamps that carry no offset (never UTC, never the host zone).

use crate::error::ConfigLoadError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimestampFormat {
    /// `2024-03-01T00:00:00-05:00`
    #[default]
    Iso8601,
    /// chrono strftime pattern
    Pattern(String),
}

impl FromStr for TimestampFormat {
    type Err = ConfigLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iso8601" | "xmlschema" | "rfc3339" => Ok(TimestampFormat::Iso8601),
            _ => {
                if s.is_empty() || StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
                    return Err(ConfigLoadError::Invalid(format!("invalid timestamp format: {:?}", s)));
                }
                Ok(TimestampFormat::Pattern(s.to_string()))
            }
        }
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = ConfigLoadError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimestampFormat> for String {
    fn from(f: TimestampFormat) -> String {
        f.to_string()
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::Iso8601 => f.write_str("iso8601"),
            TimestampFormat::Pattern(p) => f.write_str(p),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimestampParseError {
    #[error("unrecognized timestamp: {0}")]
    Unrecognized(String),
    #[error("{0} does not exist in {1}")]
    NonexistentLocalTime(String, &'static str),
}

#[derive(Clone, Debug)]
pub struct TimeFormatPolicy {
    zone: Tz,
    format: TimestampFormat,
}

impl TimeFormatPolicy {
    pub fn init(default_zone_id: &str, default_format: TimestampFormat) -> Result<Self, ConfigLoadError> {
        let zone: Tz = default_zone_id
            .parse()
            .map_err(|_| ConfigLoadError::Invalid(format!("unknown time zone: {}", default_zone_id)))?;
        Ok(TimeFormatPolicy {
            zone,
            format: default_format,
        })
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn format(&self) -> &TimestampFormat {
        &self.format
    }

    /// Render in the canonical format, shifted into the default zone.
    pub fn format_timestamp<Z: TimeZone>(&self, t: &DateTime<Z>) -> String {
        let local = t.with_timezone(&self.zone);
        match &self.format {
            TimestampFormat::Iso8601 => local.fixed_offset().to_rfc3339_opts(SecondsFormat::Secs, false),
            TimestampFormat::Pattern(p) => local.format(p).to_string(),
        }
    }

    /// Parse a client-supplied timestamp. Explicit offsets are kept; zone-less times and
    /// bare dates (taken as midnight) are read in the default zone.
    pub fn parse_client_timestamp(&self, s: &str) -> Result<DateTime<FixedOffset>, TimestampParseError> {
        let s = s.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(t);
        }
        // compact offsets such as `-0500`; `%.f` also matches no fraction at all
        if let Some(t) = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"]
            .iter()
            .find_map(|f| DateTime::parse_from_str(s, f).ok())
        {
            return Ok(t);
        }
        let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| TimestampParseError::Unrecognized(s.to_string()))?;
        self.localize(naive)
    }

    fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<FixedOffset>, TimestampParseError> {
        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(t) => Ok(t.fixed_offset()),
            // repeated hour on the fall-back transition
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.fixed_offset()),
            LocalResult::None => Err(TimestampParseError::NonexistentLocalTime(naive.to_string(), self.zone.name())),
        }
    }
}
