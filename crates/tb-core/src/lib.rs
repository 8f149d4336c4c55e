//! Core domain logic for the timebook backend.
//!
//! This crate contains the fundamental types and logic for:
//! - Domain model: validated bookings and activities
//! - Breakdown: worked minutes per activity or project with percentage shares
//! - Ledger: day-by-day presence, worktime and overtime accounting
//! - The analysis façade mapping engine output to display-ready rows
//!
//! Storage is abstracted behind the [`store`] traits; see the tb-store crate
//! for the in-memory implementation.

pub mod activity;
pub mod booking;
pub mod breakdown;
pub mod format;
pub mod ledger;
pub mod service;
pub mod store;
mod types;

pub use activity::Activity;
pub use booking::Booking;
pub use breakdown::{BreakdownEntry, BreakdownLevel, breakdown};
pub use ledger::{DayIssue, DayRecord, WorkPolicy, day_ledger};
pub use service::{ActivityRow, AnalysisService, HourRow, ProjectRow};
pub use store::{ActivityStore, BookingStore, StoreError};
pub use types::{ValidationError, same_user};
