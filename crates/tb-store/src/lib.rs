//! In-memory store for the timebook backend.
//!
//! Holds one snapshot of activities and bookings and serves them through the
//! `tb_core` store traits. Ids are assigned sequentially on insert, starting
//! at 1.
//!
//! # Thread Safety
//!
//! Reads go through `&self` and are safe for concurrent readers; inserts
//! take `&mut self`, so sharing a store across threads requires external
//! synchronization (e.g. an `RwLock`).

use chrono::NaiveDate;
use tb_core::{Activity, ActivityStore, Booking, BookingStore, StoreError, same_user};

/// In-memory activity and booking storage.
#[derive(Debug)]
pub struct MemoryStore {
    activities: Vec<Activity>,
    bookings: Vec<Booking>,
    next_activity_id: i64,
    next_booking_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            activities: Vec::new(),
            bookings: Vec::new(),
            next_activity_id: 1,
            next_booking_id: 1,
        }
    }

    /// Adds an activity, assigning and returning its id.
    pub fn add_activity(&mut self, activity: Activity) -> i64 {
        let id = self.next_activity_id;
        self.next_activity_id += 1;
        self.activities.push(Activity { id, ..activity });
        tracing::debug!(id, "stored activity");
        id
    }

    /// Adds a booking, assigning and returning its id.
    ///
    /// Referential integrity is not checked here; a booking may point at an
    /// activity id that is resolved (or rejected) later, at analysis time.
    pub fn add_booking(&mut self, booking: Booking) -> i64 {
        let id = self.next_booking_id;
        self.next_booking_id += 1;
        self.bookings.push(Booking { id, ..booking });
        tracing::debug!(id, "stored booking");
        id
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore for MemoryStore {
    fn bookings_in_range(
        &self,
        user: &str,
        first_day: NaiveDate,
        first_day_after: Option<NaiveDate>,
    ) -> Result<Vec<Booking>, StoreError> {
        let end = first_day_after
            .or_else(|| first_day.succ_opt())
            .unwrap_or(first_day);
        if first_day >= end {
            return Err(StoreError::InvalidRange {
                first_day,
                first_day_after: end,
            });
        }

        let mut hits: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| same_user(&b.user, user))
            .filter(|b| b.bookingday >= first_day && b.bookingday < end)
            .cloned()
            .collect();
        hits.sort_by_key(|b| (b.bookingday, b.starttime));
        tracing::trace!(user, %first_day, %end, hits = hits.len(), "booking range query");
        Ok(hits)
    }
}

impl ActivityStore for MemoryStore {
    fn activity_by_id(&self, user: &str, id: i64) -> Result<Activity, StoreError> {
        let activity = self
            .activities
            .iter()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound { id })?;
        if !same_user(&activity.user, user) {
            return Err(StoreError::AccessDenied {
                user: user.to_string(),
            });
        }
        Ok(activity.clone())
    }
}
