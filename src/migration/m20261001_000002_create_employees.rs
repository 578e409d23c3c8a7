//! Migration: Create employees table.

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
                CREATE TABLE employees (
                    id UUID PRIMARY KEY,
                    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
                    email VARCHAR(255) NOT NULL,
                    full_name VARCHAR(255) NOT NULL,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    deleted_at TIMESTAMPTZ
                );

                -- Unique email per organization (active only)
                CREATE UNIQUE INDEX idx_employees_org_email_active
                    ON employees(organization_id, email)
                    WHERE deleted_at IS NULL;

                -- Index for batch reconciliation (active employees of an organization)
                CREATE INDEX idx_employees_org_active
                    ON employees(organization_id)
                    WHERE deleted_at IS NULL AND is_active;

                CREATE TRIGGER update_employees_updated_at
                    BEFORE UPDATE ON employees
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
                DROP TRIGGER IF EXISTS update_employees_updated_at ON employees;
                DROP TABLE IF EXISTS employees CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
