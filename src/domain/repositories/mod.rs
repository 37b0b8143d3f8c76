//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the persistent store following the Repository pattern.
//! Concrete implementations live in `crate::infrastructure::persistence`; tests
//! use the `mockall` automocks or in-memory fakes.
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - Short link storage, click accounting and revocation
//! - [`TokenRepository`] - Bearer token storage

pub mod short_link_repository;
pub mod token_repository;

pub use short_link_repository::ShortLinkRepository;
pub use token_repository::TokenRepository;

#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
