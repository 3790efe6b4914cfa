//! Rule-based detection of capacity, availability, schedule and preference
//! conflicts in a trip.
//!
//! Only capacity and availability conflicts are blocking; schedule and
//! preference conflicts are advisory. See [`ConflictKind::is_blocking`].

mod types;
mod validator;

pub use types::{Conflict, ConflictKind};
pub use validator::ConflictValidator;
