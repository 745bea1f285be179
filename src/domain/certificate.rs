//! Certificate content.
//!
//! Pure mapping from (recipient, level) to the lines printed on a
//! certificate. The requested level is clamped to the title table's
//! range before lookup.

use chrono::{DateTime, Utc};

/// Lowest level a certificate can be issued for.
pub const MIN_LEVEL: i64 = 1;

/// Highest level a certificate can be issued for.
pub const MAX_LEVEL: i64 = 20;

/// Ordered title table, indexed by `level - 1`.
const LEVEL_TITLES: [&str; 20] = [
    "Newcomer",
    "Beginner",
    "Apprentice",
    "Student",
    "Conversationalist",
    "Explorer",
    "Storyteller",
    "Wordsmith",
    "Navigator",
    "Interpreter",
    "Orator",
    "Scholar",
    "Diplomat",
    "Linguist",
    "Mentor",
    "Sage",
    "Virtuoso",
    "Polyglot",
    "Master",
    "Grandmaster",
];

/// Clamp a requested level into `[MIN_LEVEL, MAX_LEVEL]`.
pub fn clamp_level(requested: i64) -> i64 {
    requested.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Title for a level already clamped into range.
pub fn title_for_level(level: i64) -> &'static str {
    LEVEL_TITLES[(clamp_level(level) - 1) as usize]
}

/// The content of one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub recipient: String,
    pub level: i64,
    pub title: &'static str,
    pub issued_on: String,
}

impl Certificate {
    /// Assemble a certificate, clamping the requested level.
    pub fn new(recipient: impl Into<String>, requested_level: i64, issued_at: DateTime<Utc>) -> Self {
        let level = clamp_level(requested_level);
        Self {
            recipient: recipient.into(),
            level,
            title: title_for_level(level),
            issued_on: issued_at.format("%Y-%m-%d").to_string(),
        }
    }

    /// Attachment filename embedding the clamped level.
    pub fn filename(&self) -> String {
        format!("certificate_level_{}.pdf", self.level)
    }

    /// The headline printed under the header.
    pub fn headline(&self) -> String {
        format!("Certificate: Level {} \u{2014} {}", self.level, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamps_below_range_to_min() {
        let cert = Certificate::new("Erik", 0, Utc::now());
        assert_eq!(cert.level, 1);
        assert_eq!(cert.title, "Newcomer");
        assert_eq!(cert.filename(), "certificate_level_1.pdf");
    }

    #[test]
    fn clamps_above_range_to_max() {
        let cert = Certificate::new("Erik", 99, Utc::now());
        assert_eq!(cert.level, 20);
        assert_eq!(cert.title, "Grandmaster");
        assert_eq!(cert.filename(), "certificate_level_20.pdf");
    }

    #[test]
    fn in_range_level_is_unchanged() {
        let cert = Certificate::new("Erik", 7, Utc::now());
        assert_eq!(cert.level, 7);
        assert_eq!(cert.title, "Storyteller");
    }

    #[test]
    fn headline_names_level_and_title() {
        let cert = Certificate::new("Erik", 20, Utc::now());
        assert_eq!(cert.headline(), "Certificate: Level 20 \u{2014} Grandmaster");
    }

    proptest! {
        #[test]
        fn clamp_is_total_and_in_range(requested in i64::MIN..i64::MAX) {
            let level = clamp_level(requested);
            prop_assert!((MIN_LEVEL..=MAX_LEVEL).contains(&level));
            // lookup never panics for a clamped level
            let _ = title_for_level(level);
        }
    }
}
