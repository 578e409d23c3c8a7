//! Pure attendance rules: activity thresholds and the leave side effect
//! each outcome implies.

use uuid::Uuid;

use crate::models::{DailyActivity, LeaveRequest, PresenceStatus};

// ============================================================================
// Thresholds
// ============================================================================

/// Active seconds at or above which a day counts as present (4 hours).
pub const PRESENT_THRESHOLD_SECS: i64 = 14_400;

/// Active seconds at or above which a day counts as a half day (30 minutes).
pub const HALF_DAY_THRESHOLD_SECS: i64 = 1_800;

/// `total_days` of an auto-detected full-day absence.
pub const ABSENT_LEAVE_DAYS: f64 = 1.0;

/// `total_days` of an auto-detected half-day absence.
pub const HALF_DAY_LEAVE_DAYS: f64 = 0.5;

// ============================================================================
// Types
// ============================================================================

/// Band selected by active seconds alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityBand {
    Present,
    HalfDay,
    Absent,
}

impl ActivityBand {
    pub fn status(&self) -> PresenceStatus {
        match self {
            Self::Present => PresenceStatus::Present,
            Self::HalfDay => PresenceStatus::HalfDay,
            Self::Absent => PresenceStatus::Absent,
        }
    }
}

/// How a day resolved.
///
/// Approved leave pre-empts activity classification entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceOutcome {
    OnLeave { leave_request_id: Uuid },
    Worked { band: ActivityBand, activity: DailyActivity },
}

impl AttendanceOutcome {
    pub fn status(&self) -> PresenceStatus {
        match self {
            Self::OnLeave { .. } => PresenceStatus::Leave,
            Self::Worked { band, .. } => band.status(),
        }
    }
}

/// Change to apply to the auto-detected leave of a worked day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeaveEffect {
    /// Present day, no auto-detected leave.
    None,
    /// Absence without an auto-detected leave yet.
    Create { total_days: f64 },
    /// Existing auto-detected leave disagrees with the recomputed band.
    Adjust { id: Uuid, total_days: f64 },
    /// Existing auto-detected leave already matches.
    Link { id: Uuid },
    /// Present day that still carries an auto-detected leave from an earlier
    /// run. The leave is kept and stays linked; it is never retracted.
    RetainExisting { id: Uuid },
}

impl LeaveEffect {
    /// Leave request the presence record should reference once applied.
    /// `Create` is resolved by the caller after the insert.
    pub fn linked_id(&self) -> Option<Uuid> {
        match self {
            Self::None | Self::Create { .. } => None,
            Self::Adjust { id, .. } | Self::Link { id } | Self::RetainExisting { id } => Some(*id),
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Two-threshold step function over active seconds; lower bounds inclusive.
pub fn classify(total_active_seconds: i64) -> ActivityBand {
    if total_active_seconds >= PRESENT_THRESHOLD_SECS {
        ActivityBand::Present
    } else if total_active_seconds >= HALF_DAY_THRESHOLD_SECS {
        ActivityBand::HalfDay
    } else {
        ActivityBand::Absent
    }
}

/// Leave days an auto-detected request should carry for a band.
pub fn total_days_for(band: ActivityBand) -> Option<f64> {
    match band {
        ActivityBand::Present => None,
        ActivityBand::HalfDay => Some(HALF_DAY_LEAVE_DAYS),
        ActivityBand::Absent => Some(ABSENT_LEAVE_DAYS),
    }
}

/// Map a band plus the day's existing auto-detected leave to the effect.
pub fn plan_leave_effect(band: ActivityBand, existing: Option<&LeaveRequest>) -> LeaveEffect {
    match (total_days_for(band), existing) {
        (None, None) => LeaveEffect::None,
        (None, Some(leave)) => LeaveEffect::RetainExisting { id: leave.id },
        (Some(total_days), None) => LeaveEffect::Create { total_days },
        (Some(total_days), Some(leave)) if same_days(leave.total_days, total_days) => {
            LeaveEffect::Link { id: leave.id }
        }
        (Some(total_days), Some(leave)) => LeaveEffect::Adjust {
            id: leave.id,
            total_days,
        },
    }
}

fn same_days(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}
