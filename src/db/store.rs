//! PostgreSQL implementation of the attendance store.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    DailyActivity, Employee, LeaveRequest, LeaveStatus, LeaveType, ListAutoLeaveQuery,
    ListPresenceQuery, NewAutoLeave, PaginationParams, PresenceRecord, PresenceUpsert,
};
use crate::services::attendance::AttendanceStore;

use super::DbPool;

#[async_trait]
impl AttendanceStore for DbPool {
    async fn daily_activity(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<DailyActivity> {
        self.get_daily_activity(employee_id, date).await
    }

    async fn find_approved_leave(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<LeaveRequest>> {
        self.find_leave_covering(employee_id, date, LeaveStatus::Approved)
            .await
    }

    async fn find_auto_detected_leave(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<LeaveRequest>> {
        self.find_leave_covering(employee_id, date, LeaveStatus::AutoDetected)
            .await
    }

    async fn find_leave_type_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> AppResult<Option<LeaveType>> {
        self.get_leave_type_by_name(organization_id, name).await
    }

    async fn insert_auto_detected_leave(
        &self,
        leave: &NewAutoLeave,
    ) -> AppResult<(LeaveRequest, bool)> {
        DbPool::insert_auto_detected_leave(self, leave).await
    }

    async fn update_leave_total_days(
        &self,
        id: Uuid,
        total_days: f64,
    ) -> AppResult<LeaveRequest> {
        DbPool::update_leave_total_days(self, id, total_days).await
    }

    async fn list_auto_detected_leave(
        &self,
        organization_id: Uuid,
        query: &ListAutoLeaveQuery,
    ) -> AppResult<Vec<LeaveRequest>> {
        DbPool::list_auto_detected_leave(self, organization_id, query).await
    }

    async fn find_presence(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<PresenceRecord>> {
        self.get_presence(employee_id, date).await
    }

    async fn upsert_presence(&self, upsert: &PresenceUpsert) -> AppResult<PresenceRecord> {
        DbPool::upsert_presence(self, upsert).await
    }

    async fn list_presence(
        &self,
        organization_id: Uuid,
        query: &ListPresenceQuery,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<PresenceRecord>, u64)> {
        DbPool::list_presence(self, organization_id, query, pagination).await
    }

    async fn find_employee(
        &self,
        organization_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Option<Employee>> {
        self.get_employee(organization_id, employee_id).await
    }

    async fn list_active_employees(&self, organization_id: Uuid) -> AppResult<Vec<Employee>> {
        DbPool::list_active_employees(self, organization_id).await
    }
}
