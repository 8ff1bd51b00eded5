//! Read-only repository boundaries over the managed data store.
//!
//! The calculator and the public routes depend on these traits only, so tests
//! run against in-memory fakes and production runs against Postgres.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{BlogPost, Location, PricingRecord};

/// Repository operation error.
///
/// "No rows" is never an error: lookups return an empty `Vec` / `None` and the
/// caller decides what emptiness means.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached (pool closed, network, timeout).
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// The query itself failed.
    #[error("query failed: {0}")]
    Query(String),

    /// A row could not be mapped into a record.
    #[error("row decode failed: {0}")]
    Decode(String),
}

/// Capability: fetch the ordered pricing rows for a city.
#[async_trait]
pub trait PricingRepository: Send + Sync {
    /// Active rows for `city`, ascending by `order_rank`.
    async fn pricing_for_city(&self, city: &str) -> Result<Vec<PricingRecord>, RepositoryError>;
}

#[async_trait]
impl<R> PricingRepository for Arc<R>
where
    R: PricingRepository + ?Sized,
{
    async fn pricing_for_city(&self, city: &str) -> Result<Vec<PricingRecord>, RepositoryError> {
        (**self).pricing_for_city(city).await
    }
}

/// Branch locator lookups.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Active locations ordered by state, then city.
    async fn list_active(&self) -> Result<Vec<Location>, RepositoryError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, RepositoryError>;
}

#[async_trait]
impl<R> LocationRepository for Arc<R>
where
    R: LocationRepository + ?Sized,
{
    async fn list_active(&self) -> Result<Vec<Location>, RepositoryError> {
        (**self).list_active().await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, RepositoryError> {
        (**self).find_by_slug(slug).await
    }
}

/// Blog lookups. Only posts published at `now` are ever returned.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Newest first, at most `limit` posts.
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<BlogPost>, RepositoryError>;

    async fn find_published(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, RepositoryError>;
}

#[async_trait]
impl<R> BlogRepository for Arc<R>
where
    R: BlogRepository + ?Sized,
{
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        (**self).list_published(now, limit).await
    }

    async fn find_published(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        (**self).find_published(slug, now).await
    }
}
