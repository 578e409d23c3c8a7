//! Daily activity aggregation.

use trackpro_lib::models::DailyActivity;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_day_without_samples_aggregates_to_zero() {
    let pool = create_test_pool().await;
    let seeded = seed(&pool).await;

    let activity = pool
        .get_daily_activity(seeded.employee, day(12))
        .await
        .unwrap();

    assert_eq!(activity, DailyActivity::default());
    assert_eq!(activity.total_active_seconds, 0);
    assert!(activity.first_activity_at.is_none());
    assert!(activity.last_activity_at.is_none());
}

#[actix_rt::test]
async fn test_samples_sum_and_bound_the_day() {
    let pool = create_test_pool().await;
    let seeded = seed(&pool).await;
    add_activity(&pool, &seeded, day(12), at(day(12), 9, 0), at(day(12), 10, 0)).await;
    add_activity(&pool, &seeded, day(12), at(day(12), 13, 0), at(day(12), 13, 30)).await;
    // Other days do not leak into the aggregate.
    add_activity(&pool, &seeded, day(13), at(day(13), 8, 0), at(day(13), 16, 0)).await;

    let activity = pool
        .get_daily_activity(seeded.employee, day(12))
        .await
        .unwrap();

    assert_eq!(activity.total_active_seconds, 5_400);
    assert_eq!(activity.first_activity_at, Some(at(day(12), 9, 0)));
    assert_eq!(activity.last_activity_at, Some(at(day(12), 13, 30)));
}
