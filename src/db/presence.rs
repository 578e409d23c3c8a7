//! Database queries for presence records.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::entity::presence_record::{self, ActiveModel, Column, Entity as PresenceEntity};
use crate::error::{AppError, AppResult};
use crate::models::{
    ListPresenceQuery, PaginationParams, PresenceRecord, PresenceStatus, PresenceUpsert,
};

use super::DbPool;

impl DbPool {
    /// Presence record of an employee on a day.
    pub async fn get_presence(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<PresenceRecord>> {
        let result = PresenceEntity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .filter(Column::Date.eq(date))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get presence record: {}", e)))?;

        result.map(model_to_presence).transpose()
    }

    /// Insert or update the presence record keyed by (employee_id, date).
    pub async fn upsert_presence(&self, upsert: &PresenceUpsert) -> AppResult<PresenceRecord> {
        let now = Utc::now();
        let activity = upsert.activity.unwrap_or_default();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            organization_id: Set(upsert.organization_id),
            employee_id: Set(upsert.employee_id),
            date: Set(upsert.date),
            first_activity_at: Set(activity.first_activity_at),
            last_activity_at: Set(activity.last_activity_at),
            total_active_seconds: Set(activity.total_active_seconds),
            status: Set(upsert.status.as_str().to_string()),
            leave_request_id: Set(upsert.leave_request_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let mut update_columns = vec![Column::Status, Column::LeaveRequestId];
        if upsert.activity.is_some() {
            update_columns.extend([
                Column::FirstActivityAt,
                Column::LastActivityAt,
                Column::TotalActiveSeconds,
            ]);
        }

        PresenceEntity::insert(model)
            .on_conflict(
                OnConflict::columns([Column::EmployeeId, Column::Date])
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert presence record: {}", e)))?;

        self.get_presence(upsert.employee_id, upsert.date)
            .await?
            .ok_or_else(|| {
                AppError::Database("Failed to fetch presence record after upsert".to_string())
            })
    }

    /// Presence records of an organization, newest day first.
    pub async fn list_presence(
        &self,
        organization_id: Uuid,
        query: &ListPresenceQuery,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<PresenceRecord>, u64)> {
        let mut select =
            PresenceEntity::find().filter(Column::OrganizationId.eq(organization_id));

        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(employee_id) = query.employee_id {
            select = select.filter(Column::EmployeeId.eq(employee_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count presence records: {}", e)))?;

        let rows = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::EmployeeId)
            .offset(pagination.offset() as u64)
            .limit(pagination.clamped_limit() as u64)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list presence records: {}", e)))?;

        let records = rows
            .into_iter()
            .map(model_to_presence)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((records, total))
    }
}

fn model_to_presence(m: presence_record::Model) -> AppResult<PresenceRecord> {
    let status = PresenceStatus::parse(&m.status).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown presence status '{}' on record {}",
            m.status, m.id
        ))
    })?;

    Ok(PresenceRecord {
        id: m.id,
        organization_id: m.organization_id,
        employee_id: m.employee_id,
        date: m.date,
        first_activity_at: m.first_activity_at,
        last_activity_at: m.last_activity_at,
        total_active_seconds: m.total_active_seconds,
        status,
        leave_request_id: m.leave_request_id,
    })
}
