use serde::{Deserialize, Serialize};
use std::fmt;

/// Which record collection (and which date field) a trend or report covers.
///
/// Resolved once from the caller's metric key; unrecognized keys become
/// [`Metric::Unknown`] and produce empty series rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Users,
    Offers,
    Redemption,
    Unknown,
}

impl Metric {
    /// Case-insensitive lookup against the fixed metric keys.
    pub fn parse(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "users" => Metric::Users,
            "offers" => Metric::Offers,
            "redemption" => Metric::Redemption,
            _ => Metric::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Users => "users",
            Metric::Offers => "offers",
            Metric::Redemption => "redemption",
            Metric::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Metric::parse("users"), Metric::Users);
        assert_eq!(Metric::parse("USERS"), Metric::Users);
        assert_eq!(Metric::parse("Offers"), Metric::Offers);
        assert_eq!(Metric::parse("ReDeMpTiOn"), Metric::Redemption);
    }

    #[test]
    fn test_unrecognized_keys() {
        assert_eq!(Metric::parse("redemptions"), Metric::Unknown);
        assert_eq!(Metric::parse(""), Metric::Unknown);
        assert_eq!(Metric::parse("bogus-metric"), Metric::Unknown);
        assert_eq!(Metric::parse(" users"), Metric::Unknown);
    }

    #[test]
    fn test_display_round_trips_known_keys() {
        for metric in [Metric::Users, Metric::Offers, Metric::Redemption] {
            assert_eq!(Metric::parse(&metric.to_string()), metric);
        }
    }
}
