//! HTTP surface: authentication, roles, and the auto-detect summary.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use secrecy::SecretString;
use serde_json::Value;
use uuid::Uuid;

use trackpro_lib::api;
use trackpro_lib::auth::{AdminKey, SessionVerifier};
use trackpro_lib::config::{ADMIN_KEY_HEADER, AttendanceSettings, SessionSettings};
use trackpro_lib::models::Role;
use trackpro_lib::services::attendance::AttendanceStore;

use super::memory_store::MemoryStore;
use super::test_helpers::*;

const TEST_ADMIN_KEY: &str = "test-admin-key";

fn verifier() -> SessionVerifier {
    SessionVerifier::new(&SessionSettings {
        secret: SecretString::from("test-session-secret".to_string()),
        issuer: "trackpro-test".to_string(),
    })
}

fn token(employee_id: Uuid, organization_id: Uuid, role: Role) -> String {
    verifier()
        .issue(employee_id, organization_id, role, 300)
        .unwrap()
}

async fn create_test_app(
    store: Arc<MemoryStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store: web::Data<dyn AttendanceStore> =
        web::Data::from(store as Arc<dyn AttendanceStore>);

    test::init_service(
        App::new()
            .app_data(store)
            .app_data(web::Data::new(AttendanceSettings::default()))
            .app_data(web::Data::new(AdminKey::new(Some(TEST_ADMIN_KEY.to_string()))))
            .app_data(web::Data::new(verifier()))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_attendance_routes)
                    .configure(api::configure_leave_routes),
            ),
    )
    .await
}

/// Organization with one manager and one employee, both without activity.
fn seeded() -> (Arc<MemoryStore>, Uuid, Uuid, Uuid) {
    let fx = Fixture::new();
    let manager = fx.store.add_employee(fx.org);
    let employee = fx.store.add_employee(fx.org);
    (Arc::new(fx.store), fx.org, manager, employee)
}

#[actix_rt::test]
async fn test_auto_detect_requires_credentials() {
    let (store, _, _, _) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_auto_detect_rejects_bad_token() {
    let (store, _, _, _) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_auto_detect_forbidden_for_employee_role() {
    let (store, org, _, employee) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .insert_header((
            "Authorization",
            format!("Bearer {}", token(employee, org, Role::Employee)),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
async fn test_auto_detect_returns_summary_for_manager() {
    let (store, org, manager, _) = seeded();
    let app = create_test_app(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .insert_header((
            "Authorization",
            format!("Bearer {}", token(manager, org, Role::Manager)),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["date"], "2026-10-12");
    assert_eq!(body["processed"], 2);
    assert_eq!(body["absent"], 2);
    assert_eq!(body["present"], 0);
    assert_eq!(body["half_day"], 0);
    assert_eq!(body["leave"], 0);
    assert_eq!(body["new_leave_requests"], 2);
    assert_eq!(body["failed"], 0);
}

#[actix_rt::test]
async fn test_admin_key_must_name_organization() {
    let (store, org, _, _) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/v1/attendance/auto-detect?date=2026-10-12&organization_id={}",
            org
        ))
        .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_wrong_admin_key_is_rejected() {
    let (store, org, _, _) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/v1/attendance/auto-detect?organization_id={}",
            org
        ))
        .insert_header((ADMIN_KEY_HEADER, "not-the-key"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_employee_reads_only_own_presence() {
    let (store, org, manager, employee) = seeded();
    let app = create_test_app(store).await;
    let manager_token = token(manager, org, Role::Manager);
    let employee_token = token(employee, org, Role::Employee);

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .insert_header(("Authorization", format!("Bearer {}", manager_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/{}/2026-10-12", employee))
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "absent");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/{}/2026-10-12", manager))
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    // Listing is narrowed to the caller for the employee role.
    let req = test::TestRequest::get()
        .uri("/api/v1/attendance?date=2026-10-12")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["records"][0]["employee_id"], employee.to_string());
}

#[actix_rt::test]
async fn test_missing_presence_is_not_found() {
    let (store, org, manager, employee) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/{}/2026-10-12", employee))
        .insert_header((
            "Authorization",
            format!("Bearer {}", token(manager, org, Role::Manager)),
        ))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_rt::test]
async fn test_invalid_date_is_bad_request() {
    let (store, org, manager, employee) = seeded();
    let app = create_test_app(store).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/{}/12-10-2026", employee))
        .insert_header((
            "Authorization",
            format!("Bearer {}", token(manager, org, Role::Manager)),
        ))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_rt::test]
async fn test_list_auto_detected_leave() {
    let (store, org, manager, _) = seeded();
    let app = create_test_app(store).await;
    let auth = format!("Bearer {}", token(manager, org, Role::Manager));

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/auto-detect?date=2026-10-12")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/leave-requests/auto-detected?from=2026-10-12&to=2026-10-12")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body["leave_requests"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["status"] == "auto_detected"));
    assert!(rows.iter().all(|r| r["total_days"] == 1.0));

    let req = test::TestRequest::get()
        .uri("/api/v1/leave-requests/auto-detected?from=2026-10-13&to=2026-10-12")
        .insert_header(("Authorization", auth))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}
