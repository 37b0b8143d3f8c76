//! Utility functions for key generation, validation and hashing.
//!
//! - [`code_generator`] - Short key generation and custom key validation
//! - [`url_normalizer`] - Long URL validation and normalization
//! - [`duration`] - `expires_in` duration parsing
//! - [`passkey`] - Passkey hashing and verification
//! - [`db_error`] - Mapping of `sqlx` errors onto [`crate::domain::errors::StoreError`]

pub mod code_generator;
pub mod db_error;
pub mod duration;
pub mod passkey;
pub mod url_normalizer;
