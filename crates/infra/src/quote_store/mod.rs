//! Persistence for submitted quote requests.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use roofline_core::QuoteId;
use roofline_quotes::QuoteLead;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryQuoteStore;
pub use postgres::PostgresQuoteStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteStoreError {
    #[error("a quote with id {0} already exists")]
    Duplicate(QuoteId),

    #[error("quote store unavailable: {0}")]
    Unavailable(String),

    #[error("quote store query failed: {0}")]
    Query(String),

    #[error("stored quote could not be decoded: {0}")]
    Decode(String),
}

/// Append-only store of quote leads.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn append(&self, lead: &QuoteLead) -> Result<(), QuoteStoreError>;

    /// Newest first, at most `limit` leads.
    async fn recent(&self, limit: usize) -> Result<Vec<QuoteLead>, QuoteStoreError>;

    async fn get(&self, id: &QuoteId) -> Result<Option<QuoteLead>, QuoteStoreError>;
}

#[async_trait]
impl<S> QuoteStore for Arc<S>
where
    S: QuoteStore + ?Sized,
{
    async fn append(&self, lead: &QuoteLead) -> Result<(), QuoteStoreError> {
        (**self).append(lead).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<QuoteLead>, QuoteStoreError> {
        (**self).recent(limit).await
    }

    async fn get(&self, id: &QuoteId) -> Result<Option<QuoteLead>, QuoteStoreError> {
        (**self).get(id).await
    }
}
