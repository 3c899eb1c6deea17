//! # Agora Core
//!
//! The domain layer of the Agora community service.
//! This crate contains profiles, posts, the content repository façade and the
//! authorization policy, with zero infrastructure dependencies.

pub mod content;
pub mod domain;
pub mod error;
pub mod lookup;
pub mod policy;
pub mod ports;

pub use content::ContentRepository;
pub use error::{DomainError, RepoError};
pub use lookup::Lookup;
