//! Attendance derivation service.
//!
//! Turns a day of tracked activity into a presence status:
//!
//! - approved leave covering the day → `leave` (terminal)
//! - `>= 4h` active → `present`
//! - `30m..4h` active → `half_day`, auto-detected leave of 0.5 days
//! - `< 30m` active → `absent`, auto-detected leave of 1.0 day
//!
//! Auto-detected leave is created once per employee-day, adjusted in place
//! when the band flips between absent and half day, and kept when a later run
//! finds the day present.

mod classify;
mod deriver;
mod store;

pub use classify::{
    ABSENT_LEAVE_DAYS, ActivityBand, AttendanceOutcome, HALF_DAY_LEAVE_DAYS,
    HALF_DAY_THRESHOLD_SECS, LeaveEffect, PRESENT_THRESHOLD_SECS, classify, plan_leave_effect,
    total_days_for,
};
pub use deriver::{AUTO_LEAVE_REASON, AttendanceDeriver, Reconciliation};
pub use store::AttendanceStore;
