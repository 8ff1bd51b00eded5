use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use roofline_api::app::services::{Adapters, AppServices};
use roofline_auth::{AdminClaims, Role};
use roofline_catalog::{Category, PricingRecord, SolutionId};
use roofline_core::UserId;
use roofline_infra::InMemoryCatalog;
use roofline_infra::config::AppConfig;
use roofline_notify::LoggingNotifier;
use roofline_quotes::CalculatorSettings;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Production wiring with the seeded in-memory catalog.
    async fn spawn() -> Self {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = JWT_SECRET.to_string();

        let app = roofline_api::app::build_app(cfg)
            .await
            .expect("failed to build app");
        Self::serve(app).await
    }

    /// Same router over a caller-supplied catalog.
    async fn spawn_with_catalog(catalog: InMemoryCatalog) -> Self {
        let services = AppServices::start(
            Adapters::from_catalog(Arc::new(catalog)),
            CalculatorSettings::default(),
            Arc::new(LoggingNotifier),
        );
        let app = roofline_api::app::router(Arc::new(services), JWT_SECRET.as_bytes().to_vec());
        Self::serve(app).await
    }

    async fn serve(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(roles: Vec<Role>) -> String {
    let now = Utc::now();
    let claims = AdminClaims {
        sub: UserId::new(),
        email: "ops@example.com".to_string(),
        roles,
        issued_at: now - ChronoDuration::seconds(5),
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn tier(id: &str, rank: i32, category: Category, cash: f64, installments: f64) -> PricingRecord {
    PricingRecord {
        internal_id: SolutionId::parse(id).unwrap(),
        title: format!("Tier {id}"),
        category,
        price_per_area_cash: cash,
        price_per_area_installments: installments,
        order_rank: rank,
        city: "Campinas".to_string(),
        description: None,
        warranty_years: None,
        active: true,
    }
}

fn two_tier_catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog.insert_pricing(tier("a", 1, Category::Concrete, 100.0, 120.0)).unwrap();
    catalog.insert_pricing(tier("b", 2, Category::Concrete, 150.0, 180.0)).unwrap();
    catalog
}

async fn calculate(srv: &TestServer, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let res = reqwest::Client::new()
        .post(srv.url("/quotes/calculate"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn quote_with_upsell_for_the_next_tier() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let (status, body) = calculate(&srv, json!({ "area": 100, "solution_id": "a" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": { "totalCash": 10000, "totalInstallments": 12000 },
            "upsell": {
                "totalCash": 15000,
                "totalInstallments": 18000,
                "title": "Tier b",
                "internal_id": "b"
            }
        })
    );
}

#[tokio::test]
async fn small_area_is_raised_to_the_minimum_price() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let (status, body) = calculate(&srv, json!({ "area": 10, "solution_id": "a" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCash"], 5900);
    assert_eq!(body["data"]["totalInstallments"], 5900);
}

#[tokio::test]
async fn top_tier_has_no_upsell() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let (status, body) = calculate(&srv, json!({ "area": 100, "solution_id": "b" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["upsell"].is_null());
}

#[tokio::test]
async fn invalid_input_returns_the_failure_envelope() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let (status, body) = calculate(&srv, json!({ "area": 0, "solution_id": "a" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_area");
    assert!(body["upsell"].is_null());

    let (status, body) = calculate(&srv, json!({ "area": 50 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_solution_id");
}

#[tokio::test]
async fn unreadable_body_still_gets_the_failure_envelope() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let res = reqwest::Client::new()
        .post(srv.url("/quotes/calculate"))
        .header("content-type", "application/json")
        .body("area=100&solution_id=a")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_area");
    assert!(body["upsell"].is_null());
}

#[tokio::test]
async fn oversized_area_is_rejected_as_invalid_input() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let (status, body) = calculate(&srv, json!({ "area": 1e18, "solution_id": "a" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_area");
}

#[tokio::test]
async fn unknown_solution_is_not_found() {
    let srv = TestServer::spawn_with_catalog(two_tier_catalog()).await;

    let (status, body) = calculate(&srv, json!({ "area": 100, "solution_id": "zzz" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "solution_not_found");
}

#[tokio::test]
async fn empty_catalog_is_pricing_unavailable() {
    let srv = TestServer::spawn_with_catalog(InMemoryCatalog::new()).await;

    let (status, body) = calculate(
        &srv,
        json!({ "area": 100, "solution_id": "a", "city": "Sorocaba" }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "pricing_unavailable");
}

#[tokio::test]
async fn unknown_city_falls_back_to_default_pricing() {
    let srv = TestServer::spawn().await;

    let (status, body) = calculate(
        &srv,
        json!({ "area": 100, "solution_id": "manta-asfaltica", "city": "Manaus" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCash"], 8990);
    assert_eq!(body["data"]["totalInstallments"], 10790);
    assert_eq!(body["upsell"]["internal_id"], "manta-liquida");
    assert_eq!(body["upsell"]["totalCash"], 11990);
}

#[tokio::test]
async fn products_report_which_city_priced_them() {
    let srv = TestServer::spawn().await;

    let body: serde_json::Value = reqwest::get(srv.url("/products?city=Sorocaba"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["pricing_city"], "Sorocaba");
    let ranks: Vec<i64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["order_rank"].as_i64().unwrap())
        .collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);

    let body: serde_json::Value = reqwest::get(srv.url("/products?city=Manaus"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["city"], "Manaus");
    assert_eq!(body["pricing_city"], "Campinas");
}

#[tokio::test]
async fn locations_are_listed_by_state_then_city() {
    let srv = TestServer::spawn().await;

    let body: serde_json::Value = reqwest::get(srv.url("/locations"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["belo-horizonte", "campinas", "jundiai", "sorocaba"]);

    let res = reqwest::get(srv.url("/locations/campinas")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = reqwest::get(srv.url("/locations/manaus")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_hides_drafts_and_lists_newest_first() {
    let srv = TestServer::spawn().await;

    let body: serde_json::Value = reqwest::get(srv.url("/blog?limit=2"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["telhado-metalico-no-verao", "manta-asfaltica-ou-liquida"]);

    let res = reqwest::get(srv.url("/blog/garantia-estendida")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_require_an_admin_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/admin/whoami")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(srv.url("/admin/whoami"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(srv.url("/admin/quotes"))
        .bearer_auth(mint_jwt(vec![Role::new("editor")]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/admin/whoami"))
        .bearer_auth(mint_jwt(vec![Role::ADMIN]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["email"], "ops@example.com");
    assert!(body["roles"].as_array().unwrap().iter().any(|r| r == "admin"));
}

#[tokio::test]
async fn submitted_quote_is_visible_to_admins() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/quotes"))
        .json(&json!({
            "customer_name": "Maria Souza",
            "phone": "(19) 99876-5432",
            "city": "Campinas",
            "area": 100,
            "solution_id": "manta-asfaltica"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["quote"]["success"], true);
    assert_eq!(created["quote"]["data"]["totalCash"], 8990);

    let leads: serde_json::Value = client
        .get(srv.url("/admin/quotes?limit=10"))
        .bearer_auth(mint_jwt(vec![Role::ADMIN]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let lead = &leads.as_array().unwrap()[0];
    assert_eq!(lead["id"], id.as_str());
    assert_eq!(lead["phone"], "19998765432");
    assert_eq!(lead["total_cash"], 8990);
}

#[tokio::test]
async fn submission_with_bad_phone_is_rejected() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .post(srv.url("/quotes"))
        .json(&json!({
            "customer_name": "Maria",
            "phone": "1234",
            "area": 100,
            "solution_id": "manta-asfaltica"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_lead");
}
