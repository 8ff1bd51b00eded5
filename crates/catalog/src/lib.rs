//! Catalog records: regional pricing tiers, branch locations and blog posts.
//!
//! This crate holds the record types and the repository boundaries they are
//! read through. Records are owned by an external administration process;
//! nothing here mutates them.

pub mod blog;
pub mod location;
pub mod pricing;
pub mod repository;

pub use blog::BlogPost;
pub use location::Location;
pub use pricing::{Category, PricingRecord, SolutionId, same_city};
pub use repository::{BlogRepository, LocationRepository, PricingRepository, RepositoryError};
