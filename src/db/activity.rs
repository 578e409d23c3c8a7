//! Database queries for activity samples.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::entity::activity_log::{Column, Entity as ActivityEntity};
use crate::error::{AppError, AppResult};
use crate::models::DailyActivity;

use super::DbPool;

#[derive(Debug, FromQueryResult)]
struct DailyActivityRow {
    total_active_seconds: i64,
    first_activity_at: Option<DateTime<Utc>>,
    last_activity_at: Option<DateTime<Utc>>,
}

impl DbPool {
    /// Sum of active seconds plus first/last sample timestamps for one
    /// employee on one day. A day without samples yields the default.
    pub async fn get_daily_activity(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<DailyActivity> {
        // SUM(BIGINT) is NUMERIC in PostgreSQL; cast back for i64 decoding.
        let row = ActivityEntity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .filter(Column::ActivityDate.eq(date))
            .select_only()
            .column_as(
                Expr::cust("COALESCE(SUM(duration_seconds), 0)::BIGINT"),
                "total_active_seconds",
            )
            .column_as(Expr::cust("MIN(started_at)"), "first_activity_at")
            .column_as(Expr::cust("MAX(ended_at)"), "last_activity_at")
            .into_model::<DailyActivityRow>()
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to aggregate activity: {}", e)))?;

        Ok(row
            .map(|r| DailyActivity {
                first_activity_at: r.first_activity_at,
                last_activity_at: r.last_activity_at,
                total_active_seconds: r.total_active_seconds,
            })
            .unwrap_or_default())
    }
}
