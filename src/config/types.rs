//! Config document types. Known sections are typed; every other top-level key is kept
//! as opaque JSON for the storage and search clients.

use crate::time::TimestampFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { bind: default_bind() }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeConfig {
    /// IANA zone applied to client timestamps that carry no offset.
    #[serde(default = "default_zone")]
    pub zone: String,
    #[serde(default)]
    pub format: TimestampFormat,
}

impl Default for TimeConfig {
    fn default() -> Self {
        TimeConfig {
            zone: default_zone(),
            format: TimestampFormat::default(),
        }
    }
}

fn default_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

/// Whole config document. Read-only once loaded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ApiConfig {
    /// Look up an opaque value by dotted path, e.g. `get("mongodb.database")`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.extra.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }
}
