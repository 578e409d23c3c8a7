//! Reconciliation end to end on the PostgreSQL store.

use trackpro_lib::config::defaults::DEFAULT_LEAVE_TYPE;
use trackpro_lib::models::{ListAutoLeaveQuery, PresenceStatus};
use trackpro_lib::services::attendance::AttendanceDeriver;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_half_day_reconcile_is_idempotent() {
    let pool = create_test_pool().await;
    let seeded = seed(&pool).await;
    add_activity(&pool, &seeded, day(12), at(day(12), 9, 0), at(day(12), 11, 0)).await;
    let deriver = AttendanceDeriver::new(&pool, DEFAULT_LEAVE_TYPE);

    let first = deriver
        .reconcile_detailed(seeded.employee, day(12), seeded.org)
        .await
        .unwrap();
    let second = deriver
        .reconcile_detailed(seeded.employee, day(12), seeded.org)
        .await
        .unwrap();

    assert_eq!(first.record.status, PresenceStatus::HalfDay);
    assert_eq!(first.record.total_active_seconds, 7_200);
    assert!(first.created_leave);
    assert!(!second.created_leave);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(second.record.leave_request_id, first.record.leave_request_id);

    let leave = pool
        .list_auto_detected_leave(seeded.org, &ListAutoLeaveQuery::default())
        .await
        .unwrap();
    assert_eq!(leave.len(), 1);
    assert_eq!(leave[0].total_days, 0.5);
    assert_eq!(first.record.leave_request_id, Some(leave[0].id));
}

#[actix_rt::test]
async fn test_batch_over_seeded_organization() {
    let pool = create_test_pool().await;
    let seeded = seed(&pool).await;
    let deriver = AttendanceDeriver::new(&pool, DEFAULT_LEAVE_TYPE);

    let summary = deriver
        .reconcile_batch(seeded.org, None, day(14))
        .await
        .unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.absent, 1);
    assert_eq!(summary.new_leave_requests, 1);
    assert!(summary.errors.is_empty());
}
