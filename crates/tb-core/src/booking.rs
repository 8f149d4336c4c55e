//! Bookings - recorded time intervals attributed to an activity.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// A recorded time interval booked against an activity.
///
/// A booking without an end time is open: work on it is still in progress.
/// Open bookings carry no worked time and flag any day-level evaluation of
/// the day they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier, assigned by the store. Zero until stored.
    #[serde(default)]
    pub id: i64,

    /// Owner of the booking.
    pub user: String,

    /// Calendar day the interval belongs to.
    pub bookingday: NaiveDate,

    /// Start of the interval.
    pub starttime: NaiveTime,

    /// End of the interval; `None` while work is in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endtime: Option<NaiveTime>,

    /// Id of the activity the time is booked against.
    pub activity: i64,

    /// Free-form note.
    #[serde(default)]
    pub comment: String,
}

impl Booking {
    /// Creates a new booking after validation.
    ///
    /// Rejects an empty user, a non-positive activity reference and an end
    /// time at or before the start time.
    pub fn new(
        user: impl Into<String>,
        bookingday: NaiveDate,
        starttime: NaiveTime,
        endtime: Option<NaiveTime>,
        activity: i64,
        comment: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let user = user.into();
        if user.is_empty() {
            return Err(ValidationError::Empty { field: "user" });
        }
        if activity <= 0 {
            return Err(ValidationError::NonPositiveActivity { value: activity });
        }
        if let Some(end) = endtime {
            if end <= starttime {
                return Err(ValidationError::EndNotAfterStart {
                    starttime,
                    endtime: end,
                });
            }
        }
        Ok(Self {
            id: 0,
            user,
            bookingday,
            starttime,
            endtime,
            activity,
            comment: comment.into(),
        })
    }

    /// Returns true while the booking has no end time yet.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.endtime.is_none()
    }

    /// Worked span of a closed booking; `None` for open bookings.
    #[must_use]
    pub fn worked_time(&self) -> Option<Duration> {
        self.endtime.map(|end| end - self.starttime)
    }
}
