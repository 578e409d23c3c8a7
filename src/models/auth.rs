//! Session claims and authenticated caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Admins and managers may act on every employee of their organization.
    pub fn can_manage_attendance(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub employee_id: Uuid,
    pub organization_id: Uuid,
    pub role: Role,
}

/// Authenticated caller info (from a session token or the admin key).
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    /// Token subject, or "admin" for the admin key
    pub subject: String,
    /// Employee behind the session; `None` for the admin key
    pub employee_id: Option<Uuid>,
    /// Organization the session is scoped to; `None` for the admin key
    pub organization_id: Option<Uuid>,
    pub role: Role,
}

impl AuthenticatedCaller {
    /// Caller authenticated with the bootstrap admin key.
    pub fn admin_key() -> Self {
        Self {
            subject: "admin".to_string(),
            employee_id: None,
            organization_id: None,
            role: Role::Admin,
        }
    }

    pub fn is_admin_key(&self) -> bool {
        self.organization_id.is_none() && self.role == Role::Admin
    }
}

impl From<SessionClaims> for AuthenticatedCaller {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject: claims.sub,
            employee_id: Some(claims.employee_id),
            organization_id: Some(claims.organization_id),
            role: claims.role,
        }
    }
}
