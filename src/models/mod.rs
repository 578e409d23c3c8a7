//! Domain models for the TrackPro server.

use utoipa::ToSchema;

pub mod attendance;
pub mod auth;
pub mod employee;
pub mod leave;

// Re-export commonly used types
pub use attendance::{
    AutoDetectQuery, AutoDetectResponse, DailyActivity, ListPresenceQuery, PresenceListResponse,
    PresenceRecord, PresenceStatus, PresenceUpsert, ReconcileFailure, ReconcileSummary,
};
pub use auth::{AuthenticatedCaller, Role, SessionClaims};
pub use employee::Employee;
pub use leave::{
    AutoLeaveListResponse, LeaveRequest, LeaveStatus, LeaveType, ListAutoLeaveQuery, NewAutoLeave,
};

/// Pagination parameters.
#[derive(Debug, Clone, Default, serde::Deserialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    100
}

impl PaginationParams {
    /// Requested page, 1-based.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(default_page()).max(1)
    }

    /// Calculate the offset for database queries.
    pub fn offset(&self) -> u32 {
        (self.page() - 1) * self.clamped_limit()
    }

    /// Clamp limit to maximum allowed value.
    pub fn clamped_limit(&self) -> u32 {
        self.limit.unwrap_or(default_limit()).clamp(1, 100)
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Clone, serde::Serialize, ToSchema)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination metadata.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };

        Pagination {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
