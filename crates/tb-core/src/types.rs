//! Shared validation primitives for the domain model.

use chrono::NaiveTime;
use thiserror::Error;

/// Validation errors for domain model constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The referenced activity id was zero or negative.
    #[error("activity reference must be positive, got {value}")]
    NonPositiveActivity { value: i64 },

    /// The booking's end time did not lie after its start time.
    #[error("end time {endtime} must lie after start time {starttime}")]
    EndNotAfterStart {
        starttime: NaiveTime,
        endtime: NaiveTime,
    },
}

/// Ownership comparison for stored records.
///
/// Usernames compare case-insensitively, so `Freya` and `freya` address the
/// same data.
#[must_use]
pub fn same_user(owner: &str, requester: &str) -> bool {
    owner.eq_ignore_ascii_case(requester)
}
