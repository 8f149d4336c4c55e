//! Daily hour and overtime ledger.
//!
//! Walks a day range in calendar order, validates each day's bookings and
//! folds the worked time into two running totals: cumulative worked time and
//! signed overtime against the daily quota. Days with unfinished or
//! overlapping bookings are reported but excluded from the running totals;
//! they are unresolved timesheet entries, not zero-work days.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::booking::Booking;
use crate::store::{BookingStore, StoreError};

/// Flag comment for a day with an open booking.
pub const UNFINISHED_COMMENT: &str = "Day has unfinished bookings!";

/// Flag comment for a day with overlapping bookings.
pub const OVERLAPPING_COMMENT: &str = "Day has overlapping bookings!";

/// Warning for days whose worktime exceeds the overlong threshold.
pub const OVERLONG_COMMENT: &str = "> 10 hours worktime!";

/// Warning for days whose break fell short of the required minimum.
pub const SHORT_BREAK_COMMENT: &str = "Break too short!";

/// Worktime policy evaluated per day.
///
/// The default values implement an 8-hour weekday quota with the statutory
/// break minimums: 30 minutes above 6 hours of work, 45 minutes above 9
/// hours, and a flag for anything beyond 10 hours.
#[derive(Debug, Clone)]
pub struct WorkPolicy {
    /// Expected worktime on a weekday; time beyond it counts as overtime.
    /// Weekend worktime counts as overtime in full.
    pub daily_quota: Duration,

    /// Worktime above this threshold is flagged regardless of breaks.
    pub overlong_worktime: Duration,

    /// Worktime above `long_day` requires at least `long_day_break`.
    pub long_day: Duration,

    /// Minimum break on a long day.
    pub long_day_break: Duration,

    /// Worktime above `regular_day` requires at least `regular_day_break`.
    pub regular_day: Duration,

    /// Minimum break on a regular day.
    pub regular_day_break: Duration,
}

impl Default for WorkPolicy {
    fn default() -> Self {
        Self {
            daily_quota: Duration::minutes(480),
            overlong_worktime: Duration::minutes(600),
            long_day: Duration::minutes(540),
            long_day_break: Duration::minutes(45),
            regular_day: Duration::minutes(360),
            regular_day_break: Duration::minutes(30),
        }
    }
}

/// Why a day was excluded from the running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayIssue {
    /// At least one booking on the day has no end time yet.
    UnfinishedBooking,
    /// Two bookings on the day overlap in time.
    OverlappingBookings,
}

impl DayIssue {
    /// The comment shown on the flagged day.
    #[must_use]
    pub const fn comment(self) -> &'static str {
        match self {
            Self::UnfinishedBooking => UNFINISHED_COMMENT,
            Self::OverlappingBookings => OVERLAPPING_COMMENT,
        }
    }
}

/// Ledger output for one day with bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayRecord {
    /// The day's bookings could not be evaluated; the running totals are
    /// unchanged.
    Flagged { day: NaiveDate, issue: DayIssue },

    /// A fully evaluated day.
    Worked {
        day: NaiveDate,
        /// Earliest booking start of the day.
        starttime: NaiveTime,
        /// Latest booking end of the day.
        endtime: NaiveTime,
        /// Wall-clock span between start and end.
        presence: Duration,
        /// Sum of the booked intervals.
        worktime: Duration,
        /// Presence not covered by any booking.
        breaktime: Duration,
        /// Running worked time including this day.
        total: Duration,
        /// Running signed overtime including this day.
        overtime: Duration,
        /// Policy warning, or empty.
        comment: String,
    },
}

impl DayRecord {
    /// The day the record belongs to.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        match self {
            Self::Flagged { day, .. } | Self::Worked { day, .. } => *day,
        }
    }
}

/// Computes the day-by-day ledger for `[first_day, first_day_after)`.
///
/// Only days with at least one booking produce a record; flagged days do not
/// advance the running totals, so the `total` and `overtime` of a worked
/// record reflect the preceding worked days alone.
pub fn day_ledger<B: BookingStore>(
    bookings: &B,
    user: &str,
    first_day: NaiveDate,
    first_day_after: NaiveDate,
    policy: &WorkPolicy,
) -> Result<Vec<DayRecord>, StoreError> {
    let booked = bookings.bookings_in_range(user, first_day, Some(first_day_after))?;
    tracing::debug!(
        user,
        %first_day,
        %first_day_after,
        bookings = booked.len(),
        "computing day ledger"
    );

    let mut by_day: HashMap<NaiveDate, Vec<Booking>> = HashMap::new();
    for booking in booked {
        by_day.entry(booking.bookingday).or_default().push(booking);
    }

    let mut records = Vec::new();
    let mut overtime = Duration::zero();
    let mut total = Duration::zero();
    let mut day = first_day;
    while day < first_day_after {
        if let Some(record) = by_day
            .get(&day)
            .and_then(|bookings| day_record(day, bookings, overtime, total, policy))
        {
            if let DayRecord::Worked {
                total: new_total,
                overtime: new_overtime,
                ..
            } = &record
            {
                total = *new_total;
                overtime = *new_overtime;
            }
            records.push(record);
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(records)
}

/// Evaluates one day's bookings against the running totals.
///
/// Returns `None` for an empty booking list (such days produce no record).
fn day_record(
    day: NaiveDate,
    bookings: &[Booking],
    overtime: Duration,
    total: Duration,
    policy: &WorkPolicy,
) -> Option<DayRecord> {
    let mut frames: Vec<(NaiveTime, NaiveTime)> = Vec::with_capacity(bookings.len());
    for booking in bookings {
        match booking.endtime {
            Some(end) => frames.push((booking.starttime, end)),
            None => {
                return Some(DayRecord::Flagged {
                    day,
                    issue: DayIssue::UnfinishedBooking,
                });
            }
        }
    }

    let (&(first_start, first_end), rest) = frames.split_first()?;

    if has_overlaps(&frames) {
        return Some(DayRecord::Flagged {
            day,
            issue: DayIssue::OverlappingBookings,
        });
    }

    let mut starttime = first_start;
    let mut endtime = first_end;
    let mut worktime = first_end - first_start;
    for &(start, end) in rest {
        worktime = worktime + (end - start);
        if start < starttime {
            starttime = start;
        }
        if end > endtime {
            endtime = end;
        }
    }

    let presence = endtime - starttime;
    let breaktime = presence - worktime;
    let new_total = total + worktime;
    let new_overtime = overtime + overtime_contribution(day, worktime, policy);

    Some(DayRecord::Worked {
        day,
        starttime,
        endtime,
        presence,
        worktime,
        breaktime,
        total: new_total,
        overtime: new_overtime,
        comment: policy_comment(worktime, breaktime, policy),
    })
}

/// Two frames overlap unless one entirely precedes the other; touching
/// endpoints do not overlap.
fn has_overlaps(frames: &[(NaiveTime, NaiveTime)]) -> bool {
    frames.iter().enumerate().any(|(i, &(start1, end1))| {
        frames
            .iter()
            .skip(i + 1)
            .any(|&(start2, end2)| start1 < end2 && start2 < end1)
    })
}

/// A weekday contributes worktime beyond the quota; a weekend day has no
/// quota and contributes its worktime in full.
fn overtime_contribution(day: NaiveDate, worktime: Duration, policy: &WorkPolicy) -> Duration {
    if is_weekend(day) {
        worktime
    } else {
        worktime - policy.daily_quota
    }
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Break rules apply to every day of the week; the first matching rule wins.
fn policy_comment(worktime: Duration, breaktime: Duration, policy: &WorkPolicy) -> String {
    if worktime > policy.overlong_worktime {
        return OVERLONG_COMMENT.to_string();
    }
    if worktime > policy.long_day && breaktime < policy.long_day_break {
        return SHORT_BREAK_COMMENT.to_string();
    }
    if worktime > policy.regular_day && breaktime < policy.regular_day_break {
        return SHORT_BREAK_COMMENT.to_string();
    }
    String::new()
}
