//! Attendance API handlers.

use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::auth::SessionAuth;
use crate::config::AttendanceSettings;
use crate::error::{AppError, AppResult};
use crate::models::{
    AutoDetectQuery, AutoDetectResponse, ListPresenceQuery, Pagination, PaginationParams,
    PresenceListResponse,
};
use crate::services::attendance::{AttendanceDeriver, AttendanceStore};

/// Run attendance auto-detection for one employee or the whole organization.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/auto-detect",
    tag = "Attendance",
    params(
        ("employee_id" = Option<Uuid>, Query, description = "Reconcile a single employee"),
        ("date" = Option<String>, Query, description = "Day to reconcile (YYYY-MM-DD, default today UTC)"),
        ("organization_id" = Option<Uuid>, Query, description = "Organization (required with the admin key)")
    ),
    responses(
        (status = 200, description = "Reconciliation summary", body = AutoDetectResponse),
        (status = 400, description = "Invalid parameters", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = crate::error::ErrorResponse),
        (status = 403, description = "Manager or admin role required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []), ("admin_key" = []))
)]
pub async fn auto_detect(
    auth: SessionAuth,
    store: web::Data<dyn AttendanceStore>,
    settings: web::Data<AttendanceSettings>,
    query: web::Query<AutoDetectQuery>,
) -> AppResult<HttpResponse> {
    auth.require_manager()?;
    let organization_id = auth.organization(query.organization_id)?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    info!(
        %organization_id,
        %date,
        employee_id = ?query.employee_id,
        caller = if auth.caller.is_admin_key() { "admin_key" } else { auth.caller.subject.as_str() },
        "Attendance auto-detection requested"
    );

    let deriver = AttendanceDeriver::new(store.get_ref(), &settings.default_leave_type);
    let summary = deriver
        .reconcile_batch(organization_id, query.employee_id, date)
        .await?;

    Ok(HttpResponse::Ok().json(AutoDetectResponse { date, summary }))
}

/// List presence records of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    tag = "Attendance",
    params(
        ("date" = Option<String>, Query, description = "Filter by day (YYYY-MM-DD)"),
        ("employee_id" = Option<Uuid>, Query, description = "Filter by employee"),
        ("status" = Option<String>, Query, description = "Filter by status (present, half_day, absent, leave)"),
        ("organization_id" = Option<Uuid>, Query, description = "Organization (required with the admin key)"),
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Records per page (default 100, max 100)")
    ),
    responses(
        (status = 200, description = "Presence records", body = PresenceListResponse),
        (status = 401, description = "Missing or invalid credentials", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []), ("admin_key" = []))
)]
pub async fn list_presence(
    auth: SessionAuth,
    store: web::Data<dyn AttendanceStore>,
    query: web::Query<ListPresenceQuery>,
) -> AppResult<HttpResponse> {
    let mut query = query.into_inner();
    let organization_id = auth.organization(query.organization_id)?;

    // Employees only ever see their own days.
    if !auth.caller.role.can_manage_attendance() {
        query.employee_id = auth.caller.employee_id;
    }

    let pagination = PaginationParams {
        page: query.page,
        limit: query.limit,
    };

    let (records, total) = store
        .list_presence(organization_id, &query, &pagination)
        .await?;

    Ok(HttpResponse::Ok().json(PresenceListResponse {
        records,
        pagination: Pagination::new(pagination.page(), pagination.clamped_limit(), total),
    }))
}

/// Get the presence record of one employee-day.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{employee_id}/{date}",
    tag = "Attendance",
    params(
        ("employee_id" = Uuid, Path, description = "Employee ID"),
        ("date" = String, Path, description = "Day (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Presence record", body = crate::models::PresenceRecord),
        (status = 403, description = "Not allowed to read this employee", body = crate::error::ErrorResponse),
        (status = 404, description = "No record for this day", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []), ("admin_key" = []))
)]
pub async fn get_presence(
    auth: SessionAuth,
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<(Uuid, String)>,
) -> AppResult<HttpResponse> {
    let (employee_id, date) = path.into_inner();
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;

    auth.require_self_or_manager(employee_id)?;

    let record = store
        .find_presence(employee_id, date)
        .await?
        .filter(|r| {
            auth.caller
                .organization_id
                .is_none_or(|org| org == r.organization_id)
        })
        .ok_or_else(|| {
            AppError::NotFound(format!("Presence for employee {} on {}", employee_id, date))
        })?;

    Ok(HttpResponse::Ok().json(record))
}

/// Configure attendance routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/attendance/auto-detect").route(web::post().to(auto_detect)))
        .service(web::resource("/attendance").route(web::get().to(list_presence)))
        .service(
            web::resource("/attendance/{employee_id}/{date}").route(web::get().to(get_presence)),
        );
}
