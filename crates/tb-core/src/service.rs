//! Analysis façade producing display-ready rows.
//!
//! Thin mapping layer over the breakdown and ledger engines: every numeric
//! field is rendered through the canonical formatters, flagged ledger days
//! become rows with empty numeric fields and the flag comment. No analysis
//! logic lives here.

use chrono::NaiveDate;
use serde::Serialize;

use crate::breakdown::{self, BreakdownEntry, BreakdownLevel};
use crate::format::{date_to_string, duration_to_string, time_to_string};
use crate::ledger::{self, DayRecord, WorkPolicy};
use crate::store::{ActivityStore, BookingStore, StoreError};

/// One row of a project analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRow {
    pub project_id: String,
    pub project_name: String,
    pub minutes: String,
    pub percentage: String,
    pub comment: String,
}

/// One row of an activity analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    pub project_id: String,
    pub project_name: String,
    pub activity_id: String,
    pub activity_name: String,
    pub minutes: String,
    pub percentage: String,
    pub comment: String,
}

/// One row of an hour analysis.
///
/// Rows for flagged days carry the booking day and the flag comment; every
/// other field is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourRow {
    pub bookingday: String,
    pub starttime: String,
    pub endtime: String,
    pub presence: String,
    pub worktime: String,
    pub breaktime: String,
    pub total: String,
    pub overtime: String,
    pub comment: String,
}

/// Entry point for running analyses over a pair of stores.
pub struct AnalysisService<'a, A, B> {
    activities: &'a A,
    bookings: &'a B,
    policy: WorkPolicy,
}

impl<'a, A, B> AnalysisService<'a, A, B>
where
    A: ActivityStore,
    B: BookingStore,
{
    /// Creates a service reading from the given stores, using the default
    /// worktime policy.
    pub fn new(activities: &'a A, bookings: &'a B) -> Self {
        Self {
            activities,
            bookings,
            policy: WorkPolicy::default(),
        }
    }

    /// Replaces the worktime policy used by the hour analysis.
    #[must_use]
    pub fn with_policy(mut self, policy: WorkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Worked time per project over `[first_day, first_day_after)`, ending
    /// with the total row.
    pub fn run_project_analysis(
        &self,
        user: &str,
        first_day: NaiveDate,
        first_day_after: NaiveDate,
    ) -> Result<Vec<ProjectRow>, StoreError> {
        let entries = breakdown::breakdown(
            self.activities,
            self.bookings,
            user,
            first_day,
            first_day_after,
            BreakdownLevel::Project,
        )?;
        Ok(entries.into_iter().map(project_row).collect())
    }

    /// Worked time per activity over `[first_day, first_day_after)`, ending
    /// with the total row.
    pub fn run_activity_analysis(
        &self,
        user: &str,
        first_day: NaiveDate,
        first_day_after: NaiveDate,
    ) -> Result<Vec<ActivityRow>, StoreError> {
        let entries = breakdown::breakdown(
            self.activities,
            self.bookings,
            user,
            first_day,
            first_day_after,
            BreakdownLevel::Activity,
        )?;
        Ok(entries.into_iter().map(activity_row).collect())
    }

    /// Day-by-day hour and overtime ledger over `[first_day, first_day_after)`.
    pub fn run_hour_analysis(
        &self,
        user: &str,
        first_day: NaiveDate,
        first_day_after: NaiveDate,
    ) -> Result<Vec<HourRow>, StoreError> {
        let records = ledger::day_ledger(
            self.bookings,
            user,
            first_day,
            first_day_after,
            &self.policy,
        )?;
        Ok(records.into_iter().map(hour_row).collect())
    }
}

fn project_row(entry: BreakdownEntry) -> ProjectRow {
    ProjectRow {
        project_id: entry.project_id,
        project_name: entry.project_name,
        minutes: duration_to_string(Some(entry.minutes)),
        percentage: percentage_to_string(entry.percentage),
        comment: entry.comment,
    }
}

fn activity_row(entry: BreakdownEntry) -> ActivityRow {
    ActivityRow {
        project_id: entry.project_id,
        project_name: entry.project_name,
        activity_id: entry.activity_id.unwrap_or_default(),
        activity_name: entry.activity_name.unwrap_or_default(),
        minutes: duration_to_string(Some(entry.minutes)),
        percentage: percentage_to_string(entry.percentage),
        comment: entry.comment,
    }
}

fn hour_row(record: DayRecord) -> HourRow {
    match record {
        DayRecord::Flagged { day, issue } => HourRow {
            bookingday: date_to_string(Some(day)),
            starttime: String::new(),
            endtime: String::new(),
            presence: String::new(),
            worktime: String::new(),
            breaktime: String::new(),
            total: String::new(),
            overtime: String::new(),
            comment: issue.comment().to_string(),
        },
        DayRecord::Worked {
            day,
            starttime,
            endtime,
            presence,
            worktime,
            breaktime,
            total,
            overtime,
            comment,
        } => HourRow {
            bookingday: date_to_string(Some(day)),
            starttime: time_to_string(Some(starttime)),
            endtime: time_to_string(Some(endtime)),
            presence: duration_to_string(Some(presence)),
            worktime: duration_to_string(Some(worktime)),
            breaktime: duration_to_string(Some(breaktime)),
            total: duration_to_string(Some(total)),
            overtime: duration_to_string(Some(overtime)),
            comment,
        },
    }
}

/// Percentages render with one decimal place, e.g. `61.9%`.
fn percentage_to_string(percentage: f64) -> String {
    format!("{percentage:.1}%")
}
