//! Migration: Create presence_records table.

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
                CREATE TABLE presence_records (
                    id UUID PRIMARY KEY,
                    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
                    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
                    date DATE NOT NULL,
                    first_activity_at TIMESTAMPTZ,
                    last_activity_at TIMESTAMPTZ,
                    total_active_seconds BIGINT NOT NULL DEFAULT 0,
                    status VARCHAR(20) NOT NULL
                        CHECK (status IN ('present', 'half_day', 'absent', 'leave')),
                    leave_request_id UUID REFERENCES leave_requests(id) ON DELETE SET NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Upsert key
                CREATE UNIQUE INDEX idx_presence_records_employee_date
                    ON presence_records(employee_id, date);

                -- Organization dashboards by day
                CREATE INDEX idx_presence_records_org_date
                    ON presence_records(organization_id, date DESC);

                CREATE TRIGGER update_presence_records_updated_at
                    BEFORE UPDATE ON presence_records
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
                DROP TRIGGER IF EXISTS update_presence_records_updated_at ON presence_records;
                DROP TABLE IF EXISTS presence_records CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
