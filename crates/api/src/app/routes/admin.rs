use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    response::IntoResponse,
};

use roofline_infra::QuoteStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AdminContext;

const DEFAULT_PAGE: usize = 50;
const MAX_PAGE: usize = 200;

pub async fn whoami(Extension(admin): Extension<AdminContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": admin.user_id().to_string(),
        "email": admin.email(),
        "roles": admin.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    }))
}

/// `GET /admin/quotes?limit=`: stored quote requests, newest first.
pub async fn list_quotes(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::LimitQuery>,
) -> axum::response::Response {
    let limit = query.resolve(DEFAULT_PAGE, MAX_PAGE);

    match services.quotes.recent(limit).await {
        Ok(leads) => Json(leads).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
