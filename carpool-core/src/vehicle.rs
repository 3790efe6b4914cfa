//! Vehicles offering seats to riders.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Time;

/// Daily window during which a vehicle can pick riders up.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvailabilityWindow {
    /// First pickup time the driver accepts.
    #[cfg_attr(feature = "serde", serde(with = "crate::clock::required"))]
    pub start: Time,
    /// Last pickup time the driver accepts.
    #[cfg_attr(feature = "serde", serde(with = "crate::clock::required"))]
    pub end: Time,
}

impl AvailabilityWindow {
    /// Construct a window from its inclusive bounds.
    #[must_use]
    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Return whether `at` lies within the window, bounds included.
    ///
    /// # Examples
    /// ```
    /// use time::macros::time;
    /// use carpool_core::AvailabilityWindow;
    ///
    /// let window = AvailabilityWindow::new(time!(08:00), time!(10:00));
    /// assert!(window.contains(time!(08:00)));
    /// assert!(window.contains(time!(10:00)));
    /// assert!(!window.contains(time!(10:01)));
    /// ```
    #[must_use]
    pub fn contains(&self, at: Time) -> bool {
        at >= self.start && at <= self.end
    }
}

/// A vehicle with a fixed number of passenger seats.
///
/// `capacity` excludes the driver.
///
/// # Examples
/// ```
/// use time::macros::time;
/// use carpool_core::Vehicle;
///
/// let vehicle = Vehicle::new(1, "AB-123-CD", 3)
///     .with_availability(time!(07:00), time!(09:00));
/// assert!(vehicle.can_accommodate(3));
/// assert!(!vehicle.can_accommodate(4));
/// assert!(vehicle.is_available_at(time!(08:15)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vehicle {
    /// Unique identifier.
    pub id: u64,
    /// Registration plate, used in conflict messages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub registration: String,
    /// Passenger seats, excluding the driver.
    pub capacity: u32,
    /// Optional daily availability window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub availability: Option<AvailabilityWindow>,
    /// Whether the vehicle is in service at all.
    #[cfg_attr(feature = "serde", serde(default = "default_available"))]
    pub available: bool,
}

#[cfg(feature = "serde")]
const fn default_available() -> bool {
    true
}

impl Vehicle {
    /// Construct an available vehicle without an availability window.
    pub fn new(id: u64, registration: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            registration: registration.into(),
            capacity,
            availability: None,
            available: true,
        }
    }

    /// Restrict pickups to an inclusive daily window.
    #[must_use]
    pub fn with_availability(mut self, start: Time, end: Time) -> Self {
        self.availability = Some(AvailabilityWindow::new(start, end));
        self
    }

    /// Set whether the vehicle is in service.
    #[must_use]
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Return whether `riders` passengers fit in the vehicle.
    #[must_use]
    pub fn can_accommodate(&self, riders: usize) -> bool {
        u64::try_from(riders).is_ok_and(|count| count <= u64::from(self.capacity))
    }

    /// Return the number of passengers beyond capacity, if any.
    #[must_use]
    pub fn overflow(&self, riders: usize) -> Option<usize> {
        let capacity = usize::try_from(self.capacity).unwrap_or(usize::MAX);
        riders.checked_sub(capacity).filter(|excess| *excess > 0)
    }

    /// Return the seats left once `riders` passengers are on board.
    #[must_use]
    pub fn seats_remaining(&self, riders: usize) -> u32 {
        let occupied = u32::try_from(riders).unwrap_or(u32::MAX);
        self.capacity.saturating_sub(occupied)
    }

    /// Return whether the vehicle can pick someone up at `at`.
    ///
    /// An out-of-service vehicle is never available. Without a window, an
    /// in-service vehicle is available all day.
    #[must_use]
    pub fn is_available_at(&self, at: Time) -> bool {
        self.available
            && self
                .availability
                .is_none_or(|window| window.contains(at))
    }
}
