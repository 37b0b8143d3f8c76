//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Everything that needs the current time
//! takes it as a parameter so expiry checks stay deterministic in tests.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short key mapped to a long URL
//! - [`AuthToken`] - A bearer token allowed to call the administrative API
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewShortLink` and `NewAuthToken` carry only what the caller decides, the
//! store fills in ids, timestamps and counters.

pub mod auth_token;
pub mod short_link;

pub use auth_token::{AuthToken, NewAuthToken};
pub use short_link::{NewShortLink, ShortLink};
