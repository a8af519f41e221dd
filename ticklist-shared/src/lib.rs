//! # Ticklist Shared Library
//!
//! This crate contains the models, authentication primitives, and database
//! layer shared by the Ticklist API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, tasks) and their CRUD operations
//! - `auth`: Password hashing and token issuance/verification
//! - `db`: Connection pooling and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Ticklist shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
