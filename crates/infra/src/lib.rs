//! Infrastructure adapters: configuration, storage, the submission pipeline
//! and the notification worker.
//!
//! Domain crates define the traits; this crate provides the in-memory and
//! Postgres implementations and wires them into the use cases the HTTP layer
//! calls.

pub mod catalog;
pub mod config;
pub mod db;
pub mod notifications;
pub mod quote_store;
pub mod submission;

pub use catalog::{InMemoryCatalog, PostgresCatalog};
pub use config::{AppConfig, load_config};
pub use notifications::{build_notifier, spawn_notification_worker};
pub use quote_store::{InMemoryQuoteStore, PostgresQuoteStore, QuoteStore, QuoteStoreError};
pub use submission::{QuoteSubmitter, QuoteSubmittedEnvelope, SubmitError, SubmitQuote, SubmittedQuote};
