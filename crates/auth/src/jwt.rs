use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::claims::{AdminClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and returns its admin claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AdminClaims, TokenValidationError>;
}

/// HS256 shared-secret validator.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time claims are RFC3339 fields checked by `validate_claims`, not `exp`.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            key: DecodingKey::from_secret(&secret),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AdminClaims, TokenValidationError> {
        let data = decode::<AdminClaims>(token, &self.key, &self.validation)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use roofline_core::UserId;

    use crate::Role;

    fn mint(secret: &str, roles: Vec<Role>) -> String {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: UserId::new(),
            email: "ops@example.com".to_string(),
            roles,
            issued_at: now - Duration::seconds(5),
            expires_at: now + Duration::minutes(10),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_same_secret() {
        let validator = Hs256JwtValidator::new(b"s3cret".to_vec());
        let claims = validator.validate(&mint("s3cret", vec![Role::ADMIN]), Utc::now()).unwrap();
        assert!(claims.is_admin());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let validator = Hs256JwtValidator::new(b"s3cret".to_vec());
        let err = validator
            .validate(&mint("other", vec![Role::ADMIN]), Utc::now())
            .unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }

    #[test]
    fn rejects_garbage() {
        let validator = Hs256JwtValidator::new(b"s3cret".to_vec());
        assert!(validator.validate("not.a.jwt", Utc::now()).is_err());
    }

    #[test]
    fn signature_ok_but_not_admin_is_rejected() {
        let validator = Hs256JwtValidator::new(b"s3cret".to_vec());
        let err = validator
            .validate(&mint("s3cret", vec![Role::new("editor")]), Utc::now())
            .unwrap_err();
        assert_eq!(err, TokenValidationError::NotAdmin);
    }
}
