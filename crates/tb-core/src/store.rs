//! Collaborator contracts the analysis engines consume.
//!
//! The engines never touch storage directly; they read through these two
//! narrow traits. This keeps the analysis code independent of where the
//! records live (e.g. `MemoryStore` from tb-store, or test fixtures).

use chrono::NaiveDate;
use thiserror::Error;

use crate::activity::Activity;
use crate::booking::Booking;

/// Errors reported by store implementations.
///
/// The engines propagate these unchanged; a failed lookup aborts the whole
/// analysis call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No activity is stored under the requested id.
    #[error("no activity with id {id}")]
    NotFound { id: i64 },

    /// The requested record belongs to a different user.
    #[error("resource does not belong to {user}")]
    AccessDenied { user: String },

    /// The day range is empty or inverted.
    #[error("first day {first_day} must lie before {first_day_after}")]
    InvalidRange {
        first_day: NaiveDate,
        first_day_after: NaiveDate,
    },
}

/// Read access to a user's bookings.
pub trait BookingStore {
    /// Returns the user's bookings with a booking day in
    /// `[first_day, first_day_after)`, sorted by `(bookingday, starttime)`
    /// ascending.
    ///
    /// When `first_day_after` is `None` the range covers `first_day` alone.
    /// Fails with [`StoreError::InvalidRange`] unless
    /// `first_day < first_day_after`.
    fn bookings_in_range(
        &self,
        user: &str,
        first_day: NaiveDate,
        first_day_after: Option<NaiveDate>,
    ) -> Result<Vec<Booking>, StoreError>;
}

/// Read access to a user's activities.
pub trait ActivityStore {
    /// Looks up an activity by id.
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id and with
    /// [`StoreError::AccessDenied`] when the activity belongs to someone
    /// else.
    fn activity_by_id(&self, user: &str, id: i64) -> Result<Activity, StoreError>;
}
