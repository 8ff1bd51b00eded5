//! `roofline-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! money, roof area, identifiers and the shared error model.

pub mod area;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use area::RoofArea;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{QuoteId, UserId};
pub use money::{Money, round_half_up};
pub use value_object::ValueObject;
