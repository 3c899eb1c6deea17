//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`.
//! This crate contains the database stores and bearer token validation.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database driver, in-memory store only
//! - `postgres` - PostgreSQL stores via SeaORM

pub mod auth;
pub mod database;

// Re-exports
pub use auth::{JwtConfig, JwtTokenService};
pub use database::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
