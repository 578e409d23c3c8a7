//! Migration: Create leave_requests table.
//!
//! Holds both employee-submitted leave and rows written by attendance
//! auto-detection (status 'auto_detected').

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
                CREATE TABLE leave_requests (
                    id UUID PRIMARY KEY,
                    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
                    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
                    leave_type_id UUID NOT NULL REFERENCES leave_types(id),
                    start_date DATE NOT NULL,
                    end_date DATE NOT NULL,
                    status VARCHAR(20) NOT NULL DEFAULT 'pending'
                        CHECK (status IN ('pending', 'approved', 'rejected', 'cancelled', 'auto_detected')),
                    total_days DOUBLE PRECISION NOT NULL CHECK (total_days > 0),
                    reason TEXT,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    CHECK (end_date >= start_date)
                );

                -- Covering-date lookups per employee and status
                CREATE INDEX idx_leave_requests_employee_status_dates
                    ON leave_requests(employee_id, status, start_date, end_date);

                -- At most one auto-detected row per employee per day
                CREATE UNIQUE INDEX idx_leave_requests_auto_detected_day
                    ON leave_requests(employee_id, start_date)
                    WHERE status = 'auto_detected';

                CREATE TRIGGER update_leave_requests_updated_at
                    BEFORE UPDATE ON leave_requests
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_leave_requests_updated_at ON leave_requests;
                DROP TABLE IF EXISTS leave_requests CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
