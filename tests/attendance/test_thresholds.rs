//! Classification thresholds as seen through a full reconciliation.

use trackpro_lib::models::PresenceStatus;

use super::test_helpers::*;

async fn status_for(seconds: i64) -> PresenceStatus {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    fx.store.set_activity(emp, day(12), seconds);

    fx.deriver()
        .reconcile(emp, day(12), fx.org)
        .await
        .unwrap()
        .status
}

#[actix_rt::test]
async fn test_threshold_boundaries() {
    assert_eq!(status_for(0).await, PresenceStatus::Absent);
    assert_eq!(status_for(1_799).await, PresenceStatus::Absent);
    assert_eq!(status_for(1_800).await, PresenceStatus::HalfDay);
    assert_eq!(status_for(14_399).await, PresenceStatus::HalfDay);
    assert_eq!(status_for(14_400).await, PresenceStatus::Present);
    assert_eq!(status_for(30_000).await, PresenceStatus::Present);
}

#[actix_rt::test]
async fn test_no_activity_records_zero_seconds() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);

    let record = fx.deriver().reconcile(emp, day(12), fx.org).await.unwrap();

    assert_eq!(record.status, PresenceStatus::Absent);
    assert_eq!(record.total_active_seconds, 0);
    assert!(record.first_activity_at.is_none());
    assert!(record.last_activity_at.is_none());
}

#[actix_rt::test]
async fn test_present_day_stores_activity_window() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    fx.store.set_activity(emp, day(12), 20_000);

    let record = fx.deriver().reconcile(emp, day(12), fx.org).await.unwrap();

    assert_eq!(record.status, PresenceStatus::Present);
    assert_eq!(record.total_active_seconds, 20_000);
    assert!(record.first_activity_at < record.last_activity_at);
    assert!(record.leave_request_id.is_none());
    assert!(fx.store.auto_leave_rows(emp, day(12)).is_empty());
}
