//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::config::ADMIN_KEY_HEADER;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TrackPro Attendance Server",
        version = "0.1.0",
        description = "Derives daily presence from tracked activity and leave, and records auto-detected leave"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Attendance endpoints
        api::attendance::auto_detect,
        api::attendance::list_presence,
        api::attendance::get_presence,
        // Leave endpoints
        api::leave_requests::list_auto_detected,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::Pagination,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Attendance
            models::PresenceStatus,
            models::PresenceRecord,
            models::PresenceListResponse,
            models::AutoDetectQuery,
            models::AutoDetectResponse,
            models::ReconcileSummary,
            models::ReconcileFailure,
            // Leave
            models::LeaveStatus,
            models::LeaveRequest,
            models::AutoLeaveListResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Attendance", description = "Presence derivation and lookup"),
        (name = "Leave", description = "Auto-detected leave requests")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Register the session token and admin key security schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ADMIN_KEY_HEADER))),
            );
        }
    }
}
