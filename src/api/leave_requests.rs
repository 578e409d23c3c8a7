//! Leave request API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::SessionAuth;
use crate::error::{AppError, AppResult};
use crate::models::{AutoLeaveListResponse, ListAutoLeaveQuery};
use crate::services::attendance::AttendanceStore;

/// List auto-detected leave of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/v1/leave-requests/auto-detected",
    tag = "Leave",
    params(
        ("employee_id" = Option<Uuid>, Query, description = "Filter by employee"),
        ("from" = Option<String>, Query, description = "Inclusive start day (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Inclusive end day (YYYY-MM-DD)"),
        ("organization_id" = Option<Uuid>, Query, description = "Organization (required with the admin key)")
    ),
    responses(
        (status = 200, description = "Auto-detected leave requests", body = AutoLeaveListResponse),
        (status = 400, description = "Invalid date range", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []), ("admin_key" = []))
)]
pub async fn list_auto_detected(
    auth: SessionAuth,
    store: web::Data<dyn AttendanceStore>,
    query: web::Query<ListAutoLeaveQuery>,
) -> AppResult<HttpResponse> {
    let mut query = query.into_inner();
    let organization_id = auth.organization(query.organization_id)?;

    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(AppError::InvalidInput(
            "'from' must not be after 'to'".to_string(),
        ));
    }

    if !auth.caller.role.can_manage_attendance() {
        query.employee_id = auth.caller.employee_id;
    }

    let leave_requests = store
        .list_auto_detected_leave(organization_id, &query)
        .await?;

    Ok(HttpResponse::Ok().json(AutoLeaveListResponse { leave_requests }))
}

/// Configure leave request routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/leave-requests/auto-detected").route(web::get().to(list_auto_detected)),
    );
}
