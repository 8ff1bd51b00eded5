use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    response::IntoResponse,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `GET /products?city=`: active tiers for the city, or the default city's.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CityQuery>,
) -> axum::response::Response {
    match services.calculator.pricing_for(query.city.as_deref()).await {
        Ok(pricing) => Json(dto::ProductListResponse::from(&pricing)).into_response(),
        Err(e) => errors::quote_error_to_response(&e),
    }
}
