//! Worked-time breakdown by activity or project.
//!
//! Groups a user's bookings over a day range, sums the worked minutes per
//! group and computes each group's share of the total. Open bookings carry
//! no worked time; a group consisting only of open bookings produces no
//! entry at all.

use chrono::{Duration, NaiveDate};

use crate::activity::Activity;
use crate::booking::Booking;
use crate::store::{ActivityStore, BookingStore, StoreError};

/// Grouping granularity for a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownLevel {
    /// One entry per booked activity.
    Activity,
    /// Activity entries merged per project.
    Project,
}

/// One line of a breakdown result.
///
/// The last entry of every result is a synthetic total: project name
/// `"Total"`, empty project id, the summed minutes and a share of 100%.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    /// Display name of the project.
    pub project_name: String,

    /// Short identifier of the project; empty on the total entry.
    pub project_id: String,

    /// `None` on project-level entries and on the total entry.
    pub activity_name: Option<String>,

    /// `None` on project-level entries and on the total entry.
    pub activity_id: Option<String>,

    /// Worked time of the group.
    pub minutes: Duration,

    /// Share of the total worked time, in percent.
    pub percentage: f64,

    /// Rolled-up booking comments; always empty for multi-day ranges.
    pub comment: String,
}

/// Computes the worked-time breakdown for `[first_day, first_day_after)`.
///
/// Comments are only rolled up when the range covers exactly one calendar
/// day; longer ranges suppress them. Activity lookups happen for every
/// booked activity id, so a dangling reference aborts the call even when
/// the group would have been dropped.
#[allow(clippy::cast_precision_loss)]
pub fn breakdown<A, B>(
    activities: &A,
    bookings: &B,
    user: &str,
    first_day: NaiveDate,
    first_day_after: NaiveDate,
    level: BreakdownLevel,
) -> Result<Vec<BreakdownEntry>, StoreError>
where
    A: ActivityStore,
    B: BookingStore,
{
    let booked = bookings.bookings_in_range(user, first_day, Some(first_day_after))?;
    tracing::debug!(
        user,
        %first_day,
        %first_day_after,
        bookings = booked.len(),
        ?level,
        "computing breakdown"
    );

    let single_day = first_day.succ_opt() == Some(first_day_after);

    let mut entries = Vec::new();
    for (activity_id, group) in group_by_activity(booked) {
        let activity = activities.activity_by_id(user, activity_id)?;
        if let Some(entry) = activity_entry(&activity, &group, single_day) {
            entries.push(entry);
        }
    }

    let mut entries = match level {
        BreakdownLevel::Activity => {
            entries.sort_by(|a, b| {
                a.project_id
                    .cmp(&b.project_id)
                    .then_with(|| a.activity_id.cmp(&b.activity_id))
            });
            entries
        }
        BreakdownLevel::Project => merge_by_project(entries),
    };

    let total = entries
        .iter()
        .fold(Duration::zero(), |acc, entry| acc + entry.minutes);
    let total_minutes = total.num_minutes() as f64;
    for entry in &mut entries {
        entry.percentage = entry.minutes.num_minutes() as f64 * 100.0 / total_minutes;
    }

    entries.push(BreakdownEntry {
        project_name: "Total".to_string(),
        project_id: String::new(),
        activity_name: None,
        activity_id: None,
        minutes: total,
        percentage: 100.0,
        comment: String::new(),
    });
    Ok(entries)
}

/// Groups bookings by activity id, preserving first-encounter order of the
/// groups and the store's ordering within each group.
fn group_by_activity(bookings: Vec<Booking>) -> Vec<(i64, Vec<Booking>)> {
    let mut groups: Vec<(i64, Vec<Booking>)> = Vec::new();
    for booking in bookings {
        match groups.iter_mut().find(|(id, _)| *id == booking.activity) {
            Some((_, group)) => group.push(booking),
            None => groups.push((booking.activity, vec![booking])),
        }
    }
    groups
}

/// Builds the entry for one activity group, or `None` when the group has no
/// closed booking.
fn activity_entry(
    activity: &Activity,
    bookings: &[Booking],
    with_comments: bool,
) -> Option<BreakdownEntry> {
    let closed: Vec<&Booking> = bookings.iter().filter(|b| !b.is_open()).collect();
    if closed.is_empty() {
        return None;
    }

    let minutes = closed
        .iter()
        .filter_map(|b| b.worked_time())
        .fold(Duration::zero(), |acc, worked| acc + worked);
    let comment = if with_comments {
        join_distinct(closed.iter().map(|b| b.comment.as_str()))
    } else {
        String::new()
    };

    Some(BreakdownEntry {
        project_name: activity.project_name.clone(),
        project_id: activity.project_id.clone(),
        activity_name: Some(activity.activity_name.clone()),
        activity_id: Some(activity.activity_id.clone()),
        minutes,
        percentage: 0.0,
        comment,
    })
}

/// Merges activity-level entries into one entry per project, summing minutes
/// and rolling up comments. Activity fields are cleared on the merged
/// entries; the first entry of a project supplies the display name.
fn merge_by_project(entries: Vec<BreakdownEntry>) -> Vec<BreakdownEntry> {
    let mut projects: Vec<(BreakdownEntry, Vec<String>)> = Vec::new();
    for entry in entries {
        match projects
            .iter_mut()
            .find(|(merged, _)| merged.project_id == entry.project_id)
        {
            Some((merged, comments)) => {
                merged.minutes = merged.minutes + entry.minutes;
                comments.push(entry.comment);
            }
            None => {
                let comments = vec![entry.comment.clone()];
                projects.push((
                    BreakdownEntry {
                        activity_name: None,
                        activity_id: None,
                        ..entry
                    },
                    comments,
                ));
            }
        }
    }

    let mut merged: Vec<BreakdownEntry> = projects
        .into_iter()
        .map(|(mut entry, comments)| {
            entry.comment = join_distinct(comments.iter().map(String::as_str));
            entry
        })
        .collect();
    merged.sort_by(|a, b| a.project_id.cmp(&b.project_id));
    merged
}

/// Joins the distinct non-blank items with `", "`, keeping first-encounter
/// order.
fn join_distinct<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !item.trim().is_empty() && !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen.join(", ")
}
