//! Employee model.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Employee belonging to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
}
