//! Os — ordered substring classification of user-agent strings.

use super::model::OsFamily;

/// Marker table in priority order. The tokens are not mutually exclusive in
/// arbitrary user-agent strings, so the first match wins.
const OS_MARKERS: &[(&str, OsFamily)] = &[
    ("Windows", OsFamily::Windows),
    ("Mac", OsFamily::MacOs),
    ("Linux", OsFamily::Linux),
    ("Android", OsFamily::Android),
    ("iPhone", OsFamily::Ios),
];

impl OsFamily {
    /// Classify a raw user-agent string. Pure and total: every input,
    /// including the empty string, maps to exactly one family.
    ///
    /// The check order is a compatibility contract. "Mac" is checked before
    /// "iPhone", so iPhone agents advertising "like Mac OS X" classify as
    /// Mac OS rather than iOS.
    pub fn classify(user_agent: &str) -> OsFamily {
        for (marker, family) in OS_MARKERS {
            if user_agent.contains(marker) {
                return *family;
            }
        }
        OsFamily::Unknown
    }
}
