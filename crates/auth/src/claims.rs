use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roofline_core::UserId;

use crate::Role;

/// Claims expected in an admin token once its signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin user the token was issued to.
    pub sub: UserId,

    pub email: String,

    pub roles: Vec<Role>,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl AdminClaims {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::ADMIN)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("token does not grant the admin role")]
    NotAdmin,

    #[error("malformed or unsigned token: {0}")]
    Malformed(String),
}

/// Deterministically validate admin claims against `now`.
///
/// Checks the time window and the admin role. Signature verification happens
/// before this, in [`crate::JwtValidator`].
pub fn validate_claims(claims: &AdminClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    if !claims.is_admin() {
        return Err(TokenValidationError::NotAdmin);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(roles: Vec<Role>, issued_at: DateTime<Utc>, ttl: Duration) -> AdminClaims {
        AdminClaims {
            sub: UserId::new(),
            email: "ops@example.com".to_string(),
            roles,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    #[test]
    fn accepts_admin_within_window() {
        let now = Utc::now();
        let c = claims(vec![Role::ADMIN], now - Duration::minutes(1), Duration::minutes(10));
        assert_eq!(validate_claims(&c, now), Ok(()));
    }

    #[test]
    fn rejects_expired_and_future_tokens() {
        let now = Utc::now();
        let expired = claims(vec![Role::ADMIN], now - Duration::hours(2), Duration::hours(1));
        assert_eq!(validate_claims(&expired, now), Err(TokenValidationError::Expired));

        let future = claims(vec![Role::ADMIN], now + Duration::hours(1), Duration::hours(1));
        assert_eq!(validate_claims(&future, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn rejects_inverted_window() {
        let now = Utc::now();
        let c = claims(vec![Role::ADMIN], now, Duration::minutes(-5));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::InvalidTimeWindow));
    }

    #[test]
    fn rejects_non_admin_roles() {
        let now = Utc::now();
        let c = claims(vec![Role::new("editor")], now, Duration::minutes(10));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotAdmin));
    }

    #[test]
    fn roles_serialize_as_plain_strings() {
        let json = serde_json::to_string(&vec![Role::ADMIN]).unwrap();
        assert_eq!(json, r#"["admin"]"#);
    }
}
