//! Leave requests and leave types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Leave request status.
///
/// `AutoDetected` rows are written only by attendance derivation; the others
/// come from employees and approvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    AutoDetected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::AutoDetected => "auto_detected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            "auto_detected" => Some(Self::AutoDetected),
            _ => None,
        }
    }
}

/// Leave request covering `[start_date, end_date]`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub total_days: f64,
    pub reason: Option<String>,
}

impl LeaveRequest {
    /// Whether the inclusive date range contains `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Insert model for a single-day auto-detected leave.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAutoLeave {
    pub organization_id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub date: NaiveDate,
    pub total_days: f64,
    pub reason: String,
}

/// Organization-scoped leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LeaveType {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
}

/// Filters for listing auto-detected leave.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListAutoLeaveQuery {
    pub employee_id: Option<Uuid>,
    /// Inclusive lower bound on the leave date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the leave date.
    pub to: Option<NaiveDate>,
    /// Only honoured for admin-key callers.
    pub organization_id: Option<Uuid>,
}

/// Response for auto-detected leave listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct AutoLeaveListResponse {
    pub leave_requests: Vec<LeaveRequest>,
}
