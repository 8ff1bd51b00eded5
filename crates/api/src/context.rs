use roofline_auth::{AdminClaims, Role};
use roofline_core::UserId;

/// Authenticated admin for a request. Present on every `/admin` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    user_id: UserId,
    email: String,
    roles: Vec<Role>,
}

impl AdminContext {
    pub fn from_claims(claims: AdminClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            roles: claims.roles,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
