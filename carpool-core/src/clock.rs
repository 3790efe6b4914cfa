//! Wall-clock helpers for pickup windows and vehicle availability.
//!
//! Times are carried as [`time::Time`] and rendered as `HH:MM`. Parsing also
//! accepts `HH:MM:SS` so that payloads produced by other systems load
//! unchanged.

use time::Time;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const HOURS_MINUTES: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const HOURS_MINUTES_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Parse a clock time written as `HH:MM` or `HH:MM:SS`.
///
/// # Examples
/// ```
/// use carpool_core::clock::parse_clock;
/// use time::macros::time;
///
/// assert_eq!(parse_clock("09:30").ok(), Some(time!(09:30)));
/// assert_eq!(parse_clock("17:05:00").ok(), Some(time!(17:05)));
/// assert!(parse_clock("25:00").is_err());
/// ```
pub fn parse_clock(text: &str) -> Result<Time, time::error::Parse> {
    Time::parse(text, HOURS_MINUTES).or_else(|_| Time::parse(text, HOURS_MINUTES_SECONDS))
}

/// Render a clock time as `HH:MM`.
///
/// # Examples
/// ```
/// use carpool_core::clock::display_clock;
/// use time::macros::time;
///
/// assert_eq!(display_clock(time!(07:05)), "07:05");
/// ```
#[must_use]
pub fn display_clock(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

/// Render an optional clock time, using `--:--` when absent.
#[must_use]
pub fn display_optional_clock(value: Option<Time>) -> String {
    value.map_or_else(|| "--:--".to_owned(), display_clock)
}

/// `serde` adapter for mandatory `HH:MM` fields.
#[cfg(feature = "serde")]
pub mod required {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::Time;

    /// Serialise a [`Time`] as `HH:MM`.
    pub fn serialize<S: Serializer>(value: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::display_clock(*value))
    }

    /// Deserialise a [`Time`] from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw).map_err(D::Error::custom)
    }
}

/// `serde` adapter for optional `HH:MM` fields.
#[cfg(feature = "serde")]
pub mod optional {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::Time;

    /// Serialise an optional [`Time`] as `HH:MM` or `null`.
    #[expect(
        clippy::ref_option,
        reason = "serde `with` adapters receive a reference to the field"
    )]
    pub fn serialize<S: Serializer>(value: &Option<Time>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(clock) => serializer.serialize_some(&super::display_clock(*clock)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialise an optional [`Time`]; `null` and missing fields map to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Time>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|text| super::parse_clock(&text).map_err(D::Error::custom))
            .transpose()
    }
}
