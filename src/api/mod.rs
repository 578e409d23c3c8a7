//! API endpoint modules.

pub mod attendance;
pub mod health;
pub mod leave_requests;
pub mod openapi;

pub use attendance::configure_routes as configure_attendance_routes;
pub use health::configure_health_routes;
pub use leave_requests::configure_routes as configure_leave_routes;
pub use openapi::ApiDoc;
