//! Application layer services implementing business logic.
//!
//! Services orchestrate validation, key generation, the persistent store and the
//! cache. They receive their collaborators at construction time and are shared
//! by the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short URL lifecycle (create, resolve, revoke, sweep)
//! - [`services::auth_service::AuthService`] - Bearer token issuance and authentication
//!
//! Lifecycle failures are reported as [`errors::LinkError`].

pub mod errors;
pub mod services;
