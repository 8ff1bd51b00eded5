use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use roofline_catalog::LocationRepository;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn list_locations(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.locations.list_active().await {
        Ok(locations) => Json(locations).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn get_location(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.locations.find_by_slug(&slug).await {
        Ok(Some(location)) => Json(location).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "location not found"),
        Err(e) => errors::repository_error_to_response(e),
    }
}
