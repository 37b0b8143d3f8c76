//! Domain layer containing business entities and storage contracts.
//!
//! This module holds the data model of the service and the repository traits
//! the application layer depends on. It has no knowledge of Postgres, Redis or
//! HTTP.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Storage-level error type shared by all repositories
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])

pub mod entities;
pub mod errors;
pub mod repositories;
