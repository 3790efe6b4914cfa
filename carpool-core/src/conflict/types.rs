//! Conflict records produced by the validator.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category of a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ConflictKind {
    /// More riders than seats.
    Capacity,
    /// Two riders' travel windows do not overlap.
    Schedule,
    /// A rider's group preference is not honoured.
    Preference,
    /// The vehicle is out of service or unavailable at a pickup time.
    Availability,
}

impl ConflictKind {
    /// Return whether this kind of conflict invalidates a trip.
    ///
    /// # Examples
    /// ```
    /// use carpool_core::conflict::ConflictKind;
    ///
    /// assert!(ConflictKind::Capacity.is_blocking());
    /// assert!(ConflictKind::Availability.is_blocking());
    /// assert!(!ConflictKind::Schedule.is_blocking());
    /// assert!(!ConflictKind::Preference.is_blocking());
    /// ```
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Capacity | Self::Availability)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Capacity => "Capacity exceeded",
            Self::Schedule => "Schedule conflict",
            Self::Preference => "Preference not honoured",
            Self::Availability => "Vehicle unavailable",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A classified feasibility or preference violation.
///
/// Conflicts are data, not errors: detecting one never stops the others
/// from being reported.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conflict {
    /// Category.
    pub kind: ConflictKind,
    /// One-line explanation.
    pub message: String,
    /// Supporting figures, when useful.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub details: Option<String>,
    /// Offending trip.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub trip_id: Option<u64>,
    /// Offending rider.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rider_id: Option<u64>,
    /// Offending vehicle.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vehicle_id: Option<u64>,
}

impl Conflict {
    /// Construct a conflict without back-references.
    pub fn new(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            trip_id: None,
            rider_id: None,
            vehicle_id: None,
        }
    }

    /// Attach supporting details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach the offending trip.
    #[must_use]
    pub fn for_trip(mut self, trip_id: Option<u64>) -> Self {
        self.trip_id = trip_id;
        self
    }

    /// Attach the offending rider.
    #[must_use]
    pub fn for_rider(mut self, rider_id: u64) -> Self {
        self.rider_id = Some(rider_id);
        self
    }

    /// Attach the offending vehicle.
    #[must_use]
    pub fn for_vehicle(mut self, vehicle_id: u64) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    /// Return whether this conflict invalidates its trip.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
