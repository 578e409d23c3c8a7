//! Actix-web extractor for session and admin-key authentication.
//!
//! Accepted credentials, checked in order:
//! 1. `X-Admin-Key: <key>` (bootstrap and scheduled jobs)
//! 2. `Authorization: Bearer <session token>`

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};
use uuid::Uuid;

use super::{AdminKey, SessionVerifier};
use crate::config::ADMIN_KEY_HEADER;
use crate::error::{AppError, ErrorResponse};
use crate::models::AuthenticatedCaller;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Extract the token of an `Authorization: Bearer` header.
fn extract_bearer_token(req: &HttpRequest) -> Option<SecretString> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| SecretString::from(t.trim().to_string()))
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a valid session token or the admin key.
///
/// ```ignore
/// async fn protected_handler(auth: SessionAuth) -> impl Responder {
///     // auth.caller contains the authenticated caller info
/// }
/// ```
pub struct SessionAuth {
    pub caller: AuthenticatedCaller,
}

impl SessionAuth {
    /// Organization the request acts on.
    ///
    /// Session callers are pinned to their token's organization; admin-key
    /// callers must name one explicitly.
    pub fn organization(&self, requested: Option<Uuid>) -> Result<Uuid, AppError> {
        match (self.caller.organization_id, requested) {
            (Some(own), Some(other)) if own != other => Err(AppError::Forbidden(
                "Session is not scoped to the requested organization".to_string(),
            )),
            (Some(own), _) => Ok(own),
            (None, Some(requested)) => Ok(requested),
            (None, None) => Err(AppError::InvalidInput(
                "organization_id is required when using the admin key".to_string(),
            )),
        }
    }

    /// Require admin or manager role.
    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.caller.role.can_manage_attendance() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Manager or admin role required".to_string(),
            ))
        }
    }

    /// Employees may only act on themselves; managers on anyone.
    pub fn require_self_or_manager(&self, employee_id: Uuid) -> Result<(), AppError> {
        if self.caller.role.can_manage_attendance() || self.caller.employee_id == Some(employee_id)
        {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Employees may only access their own attendance".to_string(),
            ))
        }
    }
}

impl FromRequest for SessionAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let provided_admin_key = extract_secret_header(req, ADMIN_KEY_HEADER);
        if let Some(ref provided) = provided_admin_key {
            let verified = req
                .app_data::<web::Data<AdminKey>>()
                .is_some_and(|key| key.verify(provided.expose_secret()));
            if verified {
                return ready(Ok(SessionAuth {
                    caller: AuthenticatedCaller::admin_key(),
                }));
            }
            return ready(Err(AuthError {
                message: "Invalid admin key".to_string(),
            }));
        }

        let Some(verifier) = req.app_data::<web::Data<SessionVerifier>>() else {
            return ready(Err(AuthError {
                message: "Internal configuration error".to_string(),
            }));
        };

        match extract_bearer_token(req) {
            Some(token) => match verifier.verify(token.expose_secret()) {
                Ok(claims) => ready(Ok(SessionAuth {
                    caller: claims.into(),
                })),
                Err(message) => ready(Err(AuthError { message })),
            },
            None => ready(Err(AuthError {
                message: "Missing credentials. Provide an Authorization: Bearer token."
                    .to_string(),
            })),
        }
    }
}
