//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` structs.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - Short link storage, click counting and revocation
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_short_link_repository;
pub mod pg_token_repository;

pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_token_repository::PgTokenRepository;
