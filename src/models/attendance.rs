//! Presence records and the types describing an attendance derivation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Pagination;

/// Attendance status stored on a presence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Present,
    HalfDay,
    Absent,
    Leave,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::HalfDay => "half_day",
            Self::Absent => "absent",
            Self::Leave => "leave",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Self::Present),
            "half_day" => Some(Self::HalfDay),
            "absent" => Some(Self::Absent),
            "leave" => Some(Self::Leave),
            _ => None,
        }
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated activity of one employee on one calendar day.
///
/// A day without samples is the default value: zero seconds, no timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyActivity {
    pub first_activity_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub total_active_seconds: i64,
}

/// Per-employee-per-day attendance classification.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PresenceRecord {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub first_activity_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub total_active_seconds: i64,
    pub status: PresenceStatus,
    pub leave_request_id: Option<Uuid>,
}

/// Write model for a presence upsert keyed by (employee_id, date).
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceUpsert {
    pub organization_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub status: PresenceStatus,
    pub leave_request_id: Option<Uuid>,
    /// `None` leaves the stored activity columns untouched on update
    /// (zero seconds and null timestamps on insert).
    pub activity: Option<DailyActivity>,
}

/// Query parameters for `POST /attendance/auto-detect`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AutoDetectQuery {
    /// Single employee to reconcile (default: all active employees).
    pub employee_id: Option<Uuid>,
    /// Day to reconcile, `YYYY-MM-DD` (default: today, UTC).
    pub date: Option<NaiveDate>,
    /// Organization to reconcile; only honoured for admin-key callers.
    pub organization_id: Option<Uuid>,
}

/// One failure of a batch reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReconcileFailure {
    /// `None` when the batch failed before any employee was reached.
    pub employee_id: Option<Uuid>,
    pub message: String,
}

/// Aggregate counters of a batch reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ReconcileSummary {
    pub processed: u32,
    pub failed: u32,
    pub present: u32,
    pub half_day: u32,
    pub absent: u32,
    pub leave: u32,
    pub new_leave_requests: u32,
    pub errors: Vec<ReconcileFailure>,
}

impl ReconcileSummary {
    /// Count one successfully reconciled employee.
    pub fn record_success(&mut self, status: PresenceStatus, created_leave: bool) {
        self.processed += 1;
        match status {
            PresenceStatus::Present => self.present += 1,
            PresenceStatus::HalfDay => self.half_day += 1,
            PresenceStatus::Absent => self.absent += 1,
            PresenceStatus::Leave => self.leave += 1,
        }
        if created_leave {
            self.new_leave_requests += 1;
        }
    }

    /// Count one failed employee.
    pub fn record_failure(&mut self, employee_id: Uuid, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ReconcileFailure {
            employee_id: Some(employee_id),
            message: message.into(),
        });
    }

    /// Record a failure that prevented the batch from running at all.
    pub fn record_batch_failure(&mut self, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ReconcileFailure {
            employee_id: None,
            message: message.into(),
        });
    }
}

/// Response body of `POST /attendance/auto-detect`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AutoDetectResponse {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub summary: ReconcileSummary,
}

/// Filters for listing presence records.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListPresenceQuery {
    pub date: Option<NaiveDate>,
    pub employee_id: Option<Uuid>,
    pub status: Option<PresenceStatus>,
    /// Only honoured for admin-key callers.
    pub organization_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Paginated presence listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceListResponse {
    pub records: Vec<PresenceRecord>,
    pub pagination: Pagination,
}
