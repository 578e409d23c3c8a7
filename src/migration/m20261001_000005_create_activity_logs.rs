//! Migration: Create activity_logs table.
//!
//! Raw tracked-usage samples, aggregated per employee per day during
//! attendance derivation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE activity_logs (
                    id UUID PRIMARY KEY,
                    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
                    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
                    activity_date DATE NOT NULL,
                    started_at TIMESTAMPTZ NOT NULL,
                    ended_at TIMESTAMPTZ NOT NULL,
                    duration_seconds BIGINT NOT NULL CHECK (duration_seconds >= 0),
                    application VARCHAR(255),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    CHECK (ended_at >= started_at)
                );

                -- Daily aggregation per employee
                CREATE INDEX idx_activity_logs_employee_date
                    ON activity_logs(employee_id, activity_date);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS activity_logs CASCADE;")
            .await?;

        Ok(())
    }
}
