//! `roofline-auth`: admin token validation boundary.
//!
//! Tokens are issued elsewhere (the managed backend's auth service); this
//! crate only verifies them and decides whether the bearer may enter the
//! admin area. It is decoupled from HTTP and storage.

pub mod claims;
pub mod jwt;
pub mod roles;

pub use claims::{AdminClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use roles::Role;
