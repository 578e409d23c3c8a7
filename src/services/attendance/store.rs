//! Storage seam for attendance derivation.
//!
//! Groups the Activity, Leave, Presence and Employee collaborators behind one
//! trait so the deriver can run against PostgreSQL or an in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    DailyActivity, Employee, LeaveRequest, LeaveType, ListAutoLeaveQuery, ListPresenceQuery,
    NewAutoLeave, PaginationParams, PresenceRecord, PresenceUpsert,
};

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    // Activity

    /// Aggregated activity for one employee on one day; default when no samples.
    async fn daily_activity(&self, employee_id: Uuid, date: NaiveDate)
    -> AppResult<DailyActivity>;

    // Leave

    async fn find_approved_leave(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<LeaveRequest>>;

    async fn find_auto_detected_leave(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<LeaveRequest>>;

    async fn find_leave_type_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> AppResult<Option<LeaveType>>;

    /// Insert-or-fetch; the flag tells whether a row was created.
    async fn insert_auto_detected_leave(
        &self,
        leave: &NewAutoLeave,
    ) -> AppResult<(LeaveRequest, bool)>;

    async fn update_leave_total_days(&self, id: Uuid, total_days: f64)
    -> AppResult<LeaveRequest>;

    async fn list_auto_detected_leave(
        &self,
        organization_id: Uuid,
        query: &ListAutoLeaveQuery,
    ) -> AppResult<Vec<LeaveRequest>>;

    // Presence

    async fn find_presence(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<PresenceRecord>>;

    async fn upsert_presence(&self, upsert: &PresenceUpsert) -> AppResult<PresenceRecord>;

    async fn list_presence(
        &self,
        organization_id: Uuid,
        query: &ListPresenceQuery,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<PresenceRecord>, u64)>;

    // Employees

    async fn find_employee(
        &self,
        organization_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Option<Employee>>;

    async fn list_active_employees(&self, organization_id: Uuid) -> AppResult<Vec<Employee>>;
}
