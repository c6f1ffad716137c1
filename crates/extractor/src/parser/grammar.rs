//! Grammar — the fixed access-log line pattern and field extraction.

use chrono::DateTime;
use regex::Regex;

use super::model::{LogRecord, OsFamily, ParseError};

/// Pattern for `IP - - [TIMESTAMP] "METHOD URL PROTOCOL" STATUS SIZE "REFERRER" "USER_AGENT"`.
/// Seven capture groups; the protocol and byte-size tokens are consumed but
/// not captured. Anchored at line start, like the original matcher.
const LINE_PATTERN: &str = r#"^(?P<ip_address>\S+) - - \[(?P<timestamp>.*?)\] "(?P<method>\S+) (?P<url>\S+) \S+" (?P<status_code>\d+) \S+ "(?P<referrer>.*?)" "(?P<user_agent>.*?)""#;

/// Timestamp layout inside the brackets, e.g. `10/Oct/2023:13:55:36 -0700`.
const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Compiled access-log grammar.
///
/// Built once at construction and immutable afterwards; one instance can be
/// shared across threads performing independent parses.
#[derive(Debug)]
pub struct AccessLogGrammar {
    pattern: Regex,
}

impl AccessLogGrammar {
    pub fn new() -> Self {
        Self {
            // LINE_PATTERN is a constant; compilation is covered by tests.
            pattern: Regex::new(LINE_PATTERN).expect("access-log pattern compiles"),
        }
    }

    /// Apply the grammar to one line.
    ///
    /// Returns a full [`LogRecord`] or a per-line [`ParseError`]; never
    /// panics, never produces a partial record.
    pub fn parse_line(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = self
            .pattern
            .captures(line)
            .ok_or(ParseError::GrammarMismatch)?;

        let timestamp_text = &caps["timestamp"];
        let timestamp = DateTime::parse_from_str(timestamp_text, TIMESTAMP_FORMAT).map_err(|source| {
            ParseError::BadTimestamp {
                text: timestamp_text.to_string(),
                source,
            }
        })?;

        let status_text = &caps["status_code"];
        let status_code: i32 = status_text
            .parse()
            .map_err(|_| ParseError::BadStatus(status_text.to_string()))?;

        let user_agent = caps["user_agent"].to_string();
        let os_family = OsFamily::classify(&user_agent);

        Ok(LogRecord {
            ip_address: caps["ip_address"].to_string(),
            timestamp,
            method: caps["method"].to_string(),
            url: caps["url"].to_string(),
            status_code,
            referrer: caps["referrer"].to_string(),
            user_agent,
            os_family,
        })
    }
}

impl Default for AccessLogGrammar {
    fn default() -> Self {
        Self::new()
    }
}
