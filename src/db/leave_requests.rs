//! Database queries for leave requests and leave types.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::leave_request::{self, ActiveModel, Entity as LeaveEntity};
use crate::entity::leave_type::{self, Entity as LeaveTypeEntity};
use crate::error::{AppError, AppResult};
use crate::models::{LeaveRequest, LeaveStatus, LeaveType, ListAutoLeaveQuery, NewAutoLeave};

use super::DbPool;

impl DbPool {
    /// First leave request of the employee with `status` whose range contains `date`.
    pub async fn find_leave_covering(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        status: LeaveStatus,
    ) -> AppResult<Option<LeaveRequest>> {
        let result = LeaveEntity::find()
            .filter(leave_request::Column::EmployeeId.eq(employee_id))
            .filter(leave_request::Column::Status.eq(status.as_str()))
            .filter(leave_request::Column::StartDate.lte(date))
            .filter(leave_request::Column::EndDate.gte(date))
            .order_by_asc(leave_request::Column::CreatedAt)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find leave request: {}", e)))?;

        result.map(model_to_leave).transpose()
    }

    /// Active leave type of an organization by exact name.
    pub async fn get_leave_type_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> AppResult<Option<LeaveType>> {
        let result = LeaveTypeEntity::find()
            .filter(leave_type::Column::OrganizationId.eq(organization_id))
            .filter(leave_type::Column::Name.eq(name))
            .filter(leave_type::Column::IsActive.eq(true))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get leave type: {}", e)))?;

        Ok(result.map(|m| LeaveType {
            id: m.id,
            organization_id: m.organization_id,
            name: m.name,
        }))
    }

    /// Insert a single-day auto-detected leave unless one already exists for
    /// that employee and day. Returns the stored row and whether it was created.
    pub async fn insert_auto_detected_leave(
        &self,
        leave: &NewAutoLeave,
    ) -> AppResult<(LeaveRequest, bool)> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            organization_id: Set(leave.organization_id),
            employee_id: Set(leave.employee_id),
            leave_type_id: Set(leave.leave_type_id),
            start_date: Set(leave.date),
            end_date: Set(leave.date),
            status: Set(LeaveStatus::AutoDetected.as_str().to_string()),
            total_days: Set(leave.total_days),
            reason: Set(Some(leave.reason.clone())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The partial unique index on (employee_id, start_date) for auto-detected
        // rows turns a concurrent duplicate into a no-op.
        let inserted = LeaveEntity::insert(model)
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert leave request: {}", e)))?;

        let stored = self
            .find_leave_covering(leave.employee_id, leave.date, LeaveStatus::AutoDetected)
            .await?
            .ok_or_else(|| {
                AppError::Database("Failed to fetch auto-detected leave after insert".to_string())
            })?;

        Ok((stored, inserted > 0))
    }

    /// Update `total_days` of a leave request in place.
    pub async fn update_leave_total_days(
        &self,
        id: Uuid,
        total_days: f64,
    ) -> AppResult<LeaveRequest> {
        let existing = LeaveEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get leave request: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Leave request {}", id)))?;

        let mut active: ActiveModel = existing.into();
        active.total_days = Set(total_days);
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update leave request: {}", e)))?;

        model_to_leave(updated)
    }

    /// Auto-detected leave rows of an organization, newest day first.
    pub async fn list_auto_detected_leave(
        &self,
        organization_id: Uuid,
        query: &ListAutoLeaveQuery,
    ) -> AppResult<Vec<LeaveRequest>> {
        let mut select = LeaveEntity::find()
            .filter(leave_request::Column::OrganizationId.eq(organization_id))
            .filter(leave_request::Column::Status.eq(LeaveStatus::AutoDetected.as_str()));

        if let Some(employee_id) = query.employee_id {
            select = select.filter(leave_request::Column::EmployeeId.eq(employee_id));
        }
        if let Some(from) = query.from {
            select = select.filter(leave_request::Column::StartDate.gte(from));
        }
        if let Some(to) = query.to {
            select = select.filter(leave_request::Column::StartDate.lte(to));
        }

        let rows = select
            .order_by_desc(leave_request::Column::StartDate)
            .order_by_asc(leave_request::Column::EmployeeId)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list leave requests: {}", e)))?;

        rows.into_iter().map(model_to_leave).collect()
    }
}

fn model_to_leave(m: leave_request::Model) -> AppResult<LeaveRequest> {
    let status = LeaveStatus::parse(&m.status).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown leave status '{}' on request {}",
            m.status, m.id
        ))
    })?;

    Ok(LeaveRequest {
        id: m.id,
        organization_id: m.organization_id,
        employee_id: m.employee_id,
        leave_type_id: m.leave_type_id,
        start_date: m.start_date,
        end_date: m.end_date,
        status,
        total_days: m.total_days,
        reason: m.reason,
    })
}
