//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;
pub mod tokens;

pub use health::health_handler;
pub use links::{auto_revoke_handler, link_info_handler, revoke_link_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use tokens::{create_token_handler, list_tokens_handler, revoke_token_handler};
