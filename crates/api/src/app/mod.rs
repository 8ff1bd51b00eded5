//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: adapter selection and the notification worker
//! - `routes/`: handlers, one file per site area
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use roofline_infra::config::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
pub async fn build_app(cfg: AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(&cfg).await?;
    Ok(router(Arc::new(services), cfg.auth.jwt_secret.into_bytes()))
}

/// Router over already-assembled services.
pub fn router(services: Arc<services::AppServices>, jwt_secret: Vec<u8>) -> Router {
    let jwt = Arc::new(roofline_auth::Hs256JwtValidator::new(jwt_secret));
    let auth_state = middleware::AuthState { jwt };

    let admin = routes::admin_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::admin_auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .nest("/admin", admin)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
