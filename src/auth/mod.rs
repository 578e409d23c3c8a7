//! Authentication: session token verification and the admin key.

mod extractor;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use uuid::Uuid;

pub use extractor::SessionAuth;

use crate::config::SessionSettings;
use crate::models::{Role, SessionClaims};

/// Wrapper type for the bootstrap admin key.
/// Uses `SecretString` to prevent accidental logging and zeroize on drop.
#[derive(Clone)]
pub struct AdminKey(Option<SecretString>);

impl AdminKey {
    /// Create a new AdminKey from an optional string.
    pub fn new(key: Option<String>) -> Self {
        Self(key.map(SecretString::from))
    }

    /// Securely compare the provided key with the stored admin key.
    ///
    /// `ConstantTimeEq` returns false for unequal lengths without an early exit.
    pub fn verify(&self, provided: &str) -> bool {
        match &self.0 {
            Some(secret) => secret
                .expose_secret()
                .as_bytes()
                .ct_eq(provided.as_bytes())
                .into(),
            None => false,
        }
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "AdminKey([REDACTED])"),
            None => write!(f, "AdminKey(None)"),
        }
    }
}

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionVerifier {
    secret: SecretString,
    issuer: String,
}

impl SessionVerifier {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            issuer: settings.issuer.clone(),
        }
    }

    /// Create a signed session token.
    pub fn issue(
        &self,
        employee_id: Uuid,
        organization_id: Uuid,
        role: Role,
        ttl_secs: u64,
    ) -> Result<String, String> {
        let now = Utc::now();
        let exp = i64::try_from(ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| format!("Session TTL of {} seconds is out of range", ttl_secs))?;

        let claims = SessionClaims {
            sub: employee_id.to_string(),
            iss: self.issuer.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            employee_id,
            organization_id,
            role,
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::default(), &claims, &key)
            .map_err(|e| format!("Failed to create session token: {}", e))
    }

    /// Verify a session token and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, String> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(token, &key, &validation)
            .map_err(|e| format!("Invalid session token: {}", e))?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
