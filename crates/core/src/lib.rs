//! `adminboard-core` — shared building blocks for the dashboard's access layer.
//!
//! This crate contains **pure** primitives (no IO, no framework types).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::UserId;
