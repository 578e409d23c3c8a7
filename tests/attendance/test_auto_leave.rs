//! Auto-detected leave lifecycle: create, adjust, retain, and idempotence.

use trackpro_lib::models::PresenceStatus;
use trackpro_lib::services::attendance::{AUTO_LEAVE_REASON, LeaveEffect};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_absent_day_creates_full_day_leave() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);

    let result = fx
        .deriver()
        .reconcile_detailed(emp, day(12), fx.org)
        .await
        .unwrap();

    let rows = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_days, 1.0);
    assert_eq!(rows[0].start_date, day(12));
    assert_eq!(rows[0].end_date, day(12));
    assert_eq!(rows[0].leave_type_id, fx.leave_type_id);
    assert_eq!(rows[0].reason.as_deref(), Some(AUTO_LEAVE_REASON));

    assert!(result.created_leave);
    assert_eq!(result.record.leave_request_id, Some(rows[0].id));
}

#[actix_rt::test]
async fn test_half_day_creates_half_day_leave() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    fx.store.set_activity(emp, day(12), 7_200);

    let record = fx.deriver().reconcile(emp, day(12), fx.org).await.unwrap();

    assert_eq!(record.status, PresenceStatus::HalfDay);
    let rows = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_days, 0.5);
}

#[actix_rt::test]
async fn test_rerun_without_new_activity_changes_nothing() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    fx.store.set_activity(emp, day(12), 7_200);
    let deriver = fx.deriver();

    let first = deriver.reconcile(emp, day(12), fx.org).await.unwrap();
    let writes = fx.store.leave_writes();
    let second = deriver
        .reconcile_detailed(emp, day(12), fx.org)
        .await
        .unwrap();

    assert_eq!(second.record, first);
    assert!(!second.created_leave);
    assert!(matches!(second.leave_effect, Some(LeaveEffect::Link { .. })));
    assert_eq!(fx.store.leave_writes(), writes);
    assert_eq!(fx.store.auto_leave_rows(emp, day(12)).len(), 1);
    assert_eq!(fx.store.presence_rows(emp, day(12)).len(), 1);
}

#[actix_rt::test]
async fn test_absent_then_half_day_adjusts_in_place() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    let deriver = fx.deriver();

    deriver.reconcile(emp, day(12), fx.org).await.unwrap();
    let original = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(original[0].total_days, 1.0);

    fx.store.set_activity(emp, day(12), 5_000);
    let result = deriver
        .reconcile_detailed(emp, day(12), fx.org)
        .await
        .unwrap();

    let rows = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, original[0].id);
    assert_eq!(rows[0].total_days, 0.5);
    assert_eq!(result.record.status, PresenceStatus::HalfDay);
    assert!(!result.created_leave);
    assert_eq!(result.record.leave_request_id, Some(rows[0].id));
}

#[actix_rt::test]
async fn test_insert_conflict_converges_on_existing_row() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    let deriver = fx.deriver();

    deriver.reconcile(emp, day(12), fx.org).await.unwrap();
    let existing = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(existing[0].total_days, 1.0);

    // Lookup misses, so the insert hits the row another run already wrote.
    fx.store.set_activity(emp, day(12), 5_000);
    fx.store.hide_auto_leave_once();
    let result = deriver
        .reconcile_detailed(emp, day(12), fx.org)
        .await
        .unwrap();

    let rows = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, existing[0].id);
    assert_eq!(rows[0].total_days, 0.5);
    assert!(!result.created_leave);
    assert_eq!(
        result.leave_effect,
        Some(LeaveEffect::Create { total_days: 0.5 })
    );
    assert_eq!(result.record.status, PresenceStatus::HalfDay);
    assert_eq!(result.record.leave_request_id, Some(existing[0].id));
}

#[actix_rt::test]
async fn test_half_day_then_absent_adjusts_back_up() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    let deriver = fx.deriver();

    fx.store.set_activity(emp, day(12), 3_000);
    deriver.reconcile(emp, day(12), fx.org).await.unwrap();

    fx.store.set_activity(emp, day(12), 600);
    let record = deriver.reconcile(emp, day(12), fx.org).await.unwrap();

    let rows = fx.store.auto_leave_rows(emp, day(12));
    assert_eq!(record.status, PresenceStatus::Absent);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_days, 1.0);
}

#[actix_rt::test]
async fn test_present_day_keeps_earlier_auto_detected_leave() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    let deriver = fx.deriver();

    deriver.reconcile(emp, day(12), fx.org).await.unwrap();
    let before = fx.store.auto_leave_rows(emp, day(12));

    // Late-arriving activity pushes the day over the present threshold.
    fx.store.set_activity(emp, day(12), 15_000);
    let result = deriver
        .reconcile_detailed(emp, day(12), fx.org)
        .await
        .unwrap();

    assert_eq!(result.record.status, PresenceStatus::Present);
    assert_eq!(
        result.leave_effect,
        Some(LeaveEffect::RetainExisting { id: before[0].id })
    );
    assert_eq!(result.record.leave_request_id, Some(before[0].id));
    assert_eq!(fx.store.auto_leave_rows(emp, day(12)), before);
}

#[actix_rt::test]
async fn test_missing_leave_type_still_records_presence() {
    let fx = Fixture::without_leave_type();
    let emp = fx.store.add_employee(fx.org);

    let result = fx
        .deriver()
        .reconcile_detailed(emp, day(12), fx.org)
        .await
        .unwrap();

    assert_eq!(result.record.status, PresenceStatus::Absent);
    assert!(result.record.leave_request_id.is_none());
    assert!(!result.created_leave);
    assert!(fx.store.auto_leave_rows(emp, day(12)).is_empty());
}

#[actix_rt::test]
async fn test_each_day_gets_its_own_leave() {
    let fx = Fixture::new();
    let emp = fx.store.add_employee(fx.org);
    let deriver = fx.deriver();

    deriver.reconcile(emp, day(12), fx.org).await.unwrap();
    deriver.reconcile(emp, day(13), fx.org).await.unwrap();

    let a = fx.store.auto_leave_rows(emp, day(12));
    let b = fx.store.auto_leave_rows(emp, day(13));
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_ne!(a[0].id, b[0].id);
}
