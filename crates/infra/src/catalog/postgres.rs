//! Postgres-backed catalog.
//!
//! SQLx errors are mapped to `RepositoryError` as follows:
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | PoolClosed / PoolTimedOut / Io / Tls | `Unavailable` |
//! | ColumnDecode / ColumnNotFound | `Decode` |
//! | anything else | `Query` |
//!
//! Values that decode but break a record invariant (blank id, unknown
//! category, negative warranty) are also reported as `Decode`.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use async_trait::async_trait;
use roofline_catalog::{
    BlogPost, BlogRepository, Category, Location, LocationRepository, PricingRecord,
    PricingRepository, RepositoryError, SolutionId,
};

use crate::db::is_unavailable;

#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        ref e if is_unavailable(e) => RepositoryError::Unavailable(e.to_string()),
        e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_)) => {
            RepositoryError::Decode(e.to_string())
        }
        e => RepositoryError::Query(e.to_string()),
    }
}

fn pricing_from_row(row: &PgRow) -> Result<PricingRecord, RepositoryError> {
    let internal_id: String = row.try_get("internal_id").map_err(map_sqlx_error)?;
    let category: String = row.try_get("category").map_err(map_sqlx_error)?;
    let warranty_years: Option<i32> = row.try_get("warranty_years").map_err(map_sqlx_error)?;

    let internal_id =
        SolutionId::parse(&internal_id).map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let category: Category = category
        .parse()
        .map_err(|e: roofline_core::DomainError| RepositoryError::Decode(e.to_string()))?;
    let warranty_years = warranty_years
        .map(u32::try_from)
        .transpose()
        .map_err(|_| RepositoryError::Decode("warranty_years must not be negative".to_string()))?;

    Ok(PricingRecord {
        internal_id,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        category,
        price_per_area_cash: row.try_get("price_per_area_cash").map_err(map_sqlx_error)?,
        price_per_area_installments: row
            .try_get("price_per_area_installments")
            .map_err(map_sqlx_error)?,
        order_rank: row.try_get("order_rank").map_err(map_sqlx_error)?,
        city: row.try_get("city").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        warranty_years,
        active: row.try_get("active").map_err(map_sqlx_error)?,
    })
}

fn location_from_row(row: &PgRow) -> Result<Location, RepositoryError> {
    Ok(Location {
        slug: row.try_get("slug").map_err(map_sqlx_error)?,
        city: row.try_get("city").map_err(map_sqlx_error)?,
        state: row.try_get("state").map_err(map_sqlx_error)?,
        address: row.try_get("address").map_err(map_sqlx_error)?,
        phone: row.try_get("phone").map_err(map_sqlx_error)?,
        whatsapp: row.try_get("whatsapp").map_err(map_sqlx_error)?,
        latitude: row.try_get("latitude").map_err(map_sqlx_error)?,
        longitude: row.try_get("longitude").map_err(map_sqlx_error)?,
        active: row.try_get("active").map_err(map_sqlx_error)?,
    })
}

fn post_from_row(row: &PgRow) -> Result<BlogPost, RepositoryError> {
    Ok(BlogPost {
        slug: row.try_get("slug").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        excerpt: row.try_get("excerpt").map_err(map_sqlx_error)?,
        body: row.try_get("body").map_err(map_sqlx_error)?,
        cover_url: row.try_get("cover_url").map_err(map_sqlx_error)?,
        published_at: row.try_get("published_at").map_err(map_sqlx_error)?,
        tags: row.try_get("tags").map_err(map_sqlx_error)?,
    })
}

#[async_trait]
impl PricingRepository for PostgresCatalog {
    #[instrument(skip(self), err)]
    async fn pricing_for_city(&self, city: &str) -> Result<Vec<PricingRecord>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT internal_id, title, category, price_per_area_cash,
                   price_per_area_installments, order_rank, city,
                   description, warranty_years, active
            FROM pricing
            WHERE lower(city) = lower($1) AND active
            ORDER BY order_rank ASC, internal_id ASC
            "#,
        )
        .bind(city.trim())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(pricing_from_row).collect()
    }
}

const LOCATION_COLUMNS: &str =
    "slug, city, state, address, phone, whatsapp, latitude, longitude, active";

#[async_trait]
impl LocationRepository for PostgresCatalog {
    #[instrument(skip(self), err)]
    async fn list_active(&self) -> Result<Vec<Location>, RepositoryError> {
        let sql = format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE active ORDER BY upper(state), lower(city)"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(location_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, RepositoryError> {
        let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE slug = $1 AND active");
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(location_from_row).transpose()
    }
}

const POST_COLUMNS: &str = "slug, title, excerpt, body, cover_url, published_at, tags";

#[async_trait]
impl BlogRepository for PostgresCatalog {
    #[instrument(skip(self), err)]
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts \
             WHERE published_at IS NOT NULL AND published_at <= $1 \
             ORDER BY published_at DESC LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(now)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(post_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_published(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts \
             WHERE slug = $1 AND published_at IS NOT NULL AND published_at <= $2"
        );
        let row = sqlx::query(&sql)
            .bind(slug)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(post_from_row).transpose()
    }
}
