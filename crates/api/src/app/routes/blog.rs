use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use roofline_catalog::BlogRepository;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

const DEFAULT_PAGE: usize = 10;
const MAX_PAGE: usize = 50;

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::LimitQuery>,
) -> axum::response::Response {
    let limit = query.resolve(DEFAULT_PAGE, MAX_PAGE);

    match services.blog.list_published(Utc::now(), limit).await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.blog.find_published(&slug, Utc::now()).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "post not found"),
        Err(e) => errors::repository_error_to_response(e),
    }
}
