//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_organizations;
mod m20261001_000002_create_employees;
mod m20261001_000003_create_leave_types;
mod m20261001_000004_create_leave_requests;
mod m20261001_000005_create_activity_logs;
mod m20261001_000006_create_presence_records;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_organizations::Migration),
            Box::new(m20261001_000002_create_employees::Migration),
            Box::new(m20261001_000003_create_leave_types::Migration),
            Box::new(m20261001_000004_create_leave_requests::Migration),
            Box::new(m20261001_000005_create_activity_logs::Migration),
            Box::new(m20261001_000006_create_presence_records::Migration),
        ]
    }
}
