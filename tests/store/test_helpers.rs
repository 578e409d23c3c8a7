//! Shared helpers for the PostgreSQL store tests.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use tokio::sync::Mutex;
use uuid::Uuid;

use trackpro_lib::config::Config;
use trackpro_lib::config::defaults::DEFAULT_LEAVE_TYPE;
use trackpro_lib::db::DbPool;
use trackpro_lib::entity::{activity_log, employee, leave_type};

static MIGRATIONS_RUN: OnceLock<()> = OnceLock::new();
// Tests run in parallel; only one of them may apply the migrations.
static MIGRATION_LOCK: Mutex<()> = Mutex::const_new(());

/// Create a fresh DB pool. Migrations run only once.
pub async fn create_test_pool() -> DbPool {
    let mut config = Config::from_env().expect(
        "Failed to load config. Ensure RUST_ENV and DATABASE_URL are set, \
         and that PostgreSQL is running.",
    );
    config.database.max_connections = 2;
    config.database.min_connections = 1;

    let pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");

    let _guard = MIGRATION_LOCK.lock().await;
    if MIGRATIONS_RUN.get().is_none() {
        pool.run_migrations()
            .await
            .expect("Failed to run migrations");
        let _ = MIGRATIONS_RUN.set(());
    }

    pool
}

/// A freshly inserted organization with one active employee and the
/// default leave type. Every test gets its own, so reruns never collide.
pub struct Seeded {
    pub org: Uuid,
    pub employee: Uuid,
    pub leave_type_id: Uuid,
}

pub async fn seed(pool: &DbPool) -> Seeded {
    let conn = pool.connection();
    let org = Uuid::now_v7();
    let now = Utc::now();

    conn.execute_unprepared(&format!(
        "INSERT INTO organizations (id, name) VALUES ('{}', 'store-test-{}')",
        org,
        org.simple()
    ))
    .await
    .expect("Failed to insert organization");

    let employee = employee::ActiveModel {
        id: Set(Uuid::now_v7()),
        organization_id: Set(org),
        email: Set(format!("{}@example.com", Uuid::now_v7().simple())),
        full_name: Set("Store Test".to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
    .expect("Failed to insert employee");

    let leave_type = leave_type::ActiveModel {
        id: Set(Uuid::now_v7()),
        organization_id: Set(org),
        name: Set(DEFAULT_LEAVE_TYPE.to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .expect("Failed to insert leave type");

    Seeded {
        org,
        employee: employee.id,
        leave_type_id: leave_type.id,
    }
}

/// Insert one activity sample covering `[start, end)` on `date`.
pub async fn add_activity(
    pool: &DbPool,
    seeded: &Seeded,
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) {
    activity_log::ActiveModel {
        id: Set(Uuid::now_v7()),
        organization_id: Set(seeded.org),
        employee_id: Set(seeded.employee),
        activity_date: Set(date),
        started_at: Set(start),
        ended_at: Set(end),
        duration_seconds: Set((end - start).num_seconds()),
        application: Set(Some("editor".to_string())),
        created_at: Set(Utc::now()),
    }
    .insert(pool.connection())
    .await
    .expect("Failed to insert activity sample");
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

pub fn at(date: NaiveDate, h: u32, m: u32) -> DateTime<Utc> {
    date.and_hms_opt(h, m, 0).unwrap().and_utc()
}
