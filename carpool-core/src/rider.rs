//! Riders requesting a pickup.

use std::hash::{Hash, Hasher};

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Time;

/// Key inside a rider's preference document that requests group-only trips.
pub const GROUP_PRIORITY_KEY: &str = "priority";

/// A person waiting to be picked up and dropped off.
///
/// Riders are compared and hashed by `id` alone. The optional location uses
/// WGS84 with `x = longitude` and `y = latitude`; wrapping both axes in a
/// single [`Coord`] keeps latitude and longitude co-present.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use time::macros::time;
/// use carpool_core::Rider;
///
/// let rider = Rider::new(7, "Ada")
///     .with_pickup_window(time!(08:30), time!(09:00))
///     .with_location(Coord { x: 2.35, y: 48.85 })
///     .with_group("acme");
///
/// assert_eq!(rider.id, 7);
/// assert_eq!(rider.group.as_deref(), Some("acme"));
/// assert!(rider.location.is_some());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rider {
    /// Unique identifier.
    pub id: u64,
    /// Display name used in conflict messages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Pickup address, opaque to the engine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickup_address: String,
    /// Drop-off address, opaque to the engine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dropoff_address: String,
    /// Earliest pickup time.
    #[cfg_attr(feature = "serde", serde(default, with = "crate::clock::optional"))]
    pub pickup_time: Option<Time>,
    /// Latest drop-off time.
    #[cfg_attr(feature = "serde", serde(default, with = "crate::clock::optional"))]
    pub dropoff_time: Option<Time>,
    /// Pickup coordinates, when geocoded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<Coord<f64>>,
    /// Free-form preferences.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: RiderPreferences,
    /// Group label such as an employer or school.
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: Option<String>,
}

impl Rider {
    /// Construct a rider with no window, location, group or preferences.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pickup_address: String::new(),
            dropoff_address: String::new(),
            pickup_time: None,
            dropoff_time: None,
            location: None,
            preferences: RiderPreferences::default(),
            group: None,
        }
    }

    /// Set pickup and drop-off addresses.
    #[must_use]
    pub fn with_addresses(mut self, pickup: impl Into<String>, dropoff: impl Into<String>) -> Self {
        self.pickup_address = pickup.into();
        self.dropoff_address = dropoff.into();
        self
    }

    /// Set the pickup and drop-off times.
    #[must_use]
    pub fn with_pickup_window(mut self, pickup: Time, dropoff: Time) -> Self {
        self.pickup_time = Some(pickup);
        self.dropoff_time = Some(dropoff);
        self
    }

    /// Set only the pickup time.
    #[must_use]
    pub fn with_pickup_time(mut self, pickup: Time) -> Self {
        self.pickup_time = Some(pickup);
        self
    }

    /// Attach pickup coordinates (`x = longitude`, `y = latitude`).
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach a group label.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attach a raw preference document.
    #[must_use]
    pub fn with_preferences(mut self, raw: impl Into<String>) -> Self {
        self.preferences = RiderPreferences::from(raw.into());
        self
    }

    /// Return the non-empty group label, if any.
    #[must_use]
    pub fn group_label(&self) -> Option<&str> {
        self.group.as_deref().filter(|group| !group.is_empty())
    }

    /// Return whether both riders carry the same non-empty group label.
    #[must_use]
    pub fn shares_group_with(&self, other: &Self) -> bool {
        matches!((self.group_label(), other.group_label()), (Some(lhs), Some(rhs)) if lhs == rhs)
    }

    /// Return whether the riders' travel windows overlap.
    ///
    /// Riders missing either time are treated as compatible. Otherwise the
    /// windows overlap unless one rider is dropped off strictly before the
    /// other is picked up.
    ///
    /// # Examples
    /// ```
    /// use time::macros::time;
    /// use carpool_core::Rider;
    ///
    /// let early = Rider::new(1, "A").with_pickup_window(time!(09:00), time!(09:30));
    /// let late = Rider::new(2, "C").with_pickup_window(time!(09:40), time!(10:00));
    /// let touching = Rider::new(3, "D").with_pickup_window(time!(09:30), time!(09:50));
    ///
    /// assert!(!early.schedule_compatible(&late));
    /// assert!(early.schedule_compatible(&touching));
    /// ```
    #[must_use]
    pub fn schedule_compatible(&self, other: &Self) -> bool {
        match (
            self.pickup_time,
            self.dropoff_time,
            other.pickup_time,
            other.dropoff_time,
        ) {
            (Some(own_pickup), Some(own_dropoff), Some(other_pickup), Some(other_dropoff)) => {
                own_dropoff >= other_pickup && other_dropoff >= own_pickup
            }
            _ => true,
        }
    }
}

impl PartialEq for Rider {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rider {}

impl Hash for Rider {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Raw rider preferences with the flags the engine understands.
///
/// The raw text is kept verbatim so it round-trips through persistence. A
/// JSON object with `"priority": true` marks a rider who only wants to
/// travel with their own group; anything else, including malformed JSON,
/// leaves the flag unset.
///
/// # Examples
/// ```
/// use carpool_core::RiderPreferences;
///
/// assert!(RiderPreferences::from(r#"{"priority": true}"#.to_owned()).group_priority());
/// assert!(!RiderPreferences::from("not json".to_owned()).group_priority());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub struct RiderPreferences {
    raw: String,
    group_priority: bool,
}

impl RiderPreferences {
    /// Return the raw preference text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Return whether the rider insists on travelling with their group only.
    #[must_use]
    pub const fn group_priority(&self) -> bool {
        self.group_priority
    }
}

impl From<String> for RiderPreferences {
    fn from(raw: String) -> Self {
        let group_priority = parse_group_priority(&raw);
        Self {
            raw,
            group_priority,
        }
    }
}

impl From<RiderPreferences> for String {
    fn from(preferences: RiderPreferences) -> Self {
        preferences.raw
    }
}

fn parse_group_priority(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(document) => document
            .get(GROUP_PRIORITY_KEY)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false),
        Err(err) => {
            log::debug!("ignoring unparseable rider preferences: {err}");
            false
        }
    }
}
