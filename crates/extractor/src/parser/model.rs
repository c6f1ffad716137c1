//! Model — LogRecord, OsFamily, and per-line parse errors.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operating-system family derived from a user-agent string.
///
/// Serializes as the exact display strings downstream consumers expect
/// ("Mac OS", "iOS", ...), not as Rust variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsFamily {
    Windows,
    #[serde(rename = "Mac OS")]
    MacOs,
    Linux,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Unknown,
}

impl OsFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "Mac OS",
            OsFamily::Linux => "Linux",
            OsFamily::Android => "Android",
            OsFamily::Ios => "iOS",
            OsFamily::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed access-log line.
///
/// Only constructed from a line that fully matched the grammar and whose
/// timestamp parsed; there are no partial records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Remote host token, dotted-quad or hostname.
    pub ip_address: String,

    /// Request time, UTC offset preserved as written in the log.
    pub timestamp: DateTime<FixedOffset>,

    /// Request verb, not validated against a fixed set.
    pub method: String,

    /// Request path, unescaped.
    pub url: String,

    /// HTTP status, expected 100-599, not range-validated.
    pub status_code: i32,

    /// Referrer header value; `-` means none.
    pub referrer: String,

    /// Raw user-agent header value.
    pub user_agent: String,

    /// Derived from `user_agent`, see [`OsFamily::classify`].
    pub os_family: OsFamily,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line does not match the access-log grammar")]
    GrammarMismatch,

    #[error("bad timestamp {text:?}: {source}")]
    BadTimestamp {
        text: String,
        source: chrono::ParseError,
    },

    #[error("bad status code {0:?}")]
    BadStatus(String),
}
