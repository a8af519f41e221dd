/// Authentication primitives
///
/// This module provides the two building blocks the API server authenticates
/// with:
///
/// - [`password`]: Argon2id password hashing and constant-time verification
/// - [`jwt`]: signed, time-limited bearer tokens encoding a user identity
///
/// Both are pure library capabilities; the request-level auth gate that uses
/// them lives in the API crate's middleware.
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::auth::{jwt, password};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = password::hash_password("user_password")?;
/// assert!(password::verify_password("user_password", &hash)?);
///
/// let token = jwt::issue_token(Uuid::new_v4(), "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod password;
