//! Catalog repository implementations.
//!
//! - `in_memory`: `RwLock`-backed store for tests and database-less runs
//! - `postgres`: sqlx queries over the `pricing`, `locations` and `blog_posts` tables
//! - `seed`: demo records loaded when no database is configured

pub mod in_memory;
pub mod postgres;
pub mod seed;

pub use in_memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;
