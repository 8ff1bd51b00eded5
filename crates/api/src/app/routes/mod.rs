use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod blog;
pub mod locations;
pub mod products;
pub mod quotes;
pub mod system;

/// Public site endpoints.
pub fn public_router() -> Router {
    Router::new()
        .route("/quotes/calculate", post(quotes::calculate))
        .route("/quotes", post(quotes::submit))
        .route("/products", get(products::list_products))
        .route("/locations", get(locations::list_locations))
        .route("/locations/:slug", get(locations::get_location))
        .route("/blog", get(blog::list_posts))
        .route("/blog/:slug", get(blog::get_post))
}

/// Endpoints behind the admin token check.
pub fn admin_router() -> Router {
    Router::new()
        .route("/whoami", get(admin::whoami))
        .route("/quotes", get(admin::list_quotes))
}
