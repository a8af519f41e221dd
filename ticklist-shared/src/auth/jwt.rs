/// Token issuance and verification
///
/// Bearer tokens are HS256-signed JWTs encoding the user identity in the `sub`
/// claim, valid for 30 days from issuance. The same process-wide secret must be
/// used for issue and verify within a deployment; rotating it invalidates every
/// outstanding token (there is no rotation or refresh support).
///
/// # Example
///
/// ```
/// use ticklist_shared::auth::jwt::{issue_token, verify_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "secret-key-at-least-32-bytes-long!!";
///
/// let token = issue_token(user_id, secret)?;
/// let claims = verify_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 30 days from issuance
pub const TOKEN_TTL_DAYS: i64 = 30;

const ISSUER: &str = "ticklist";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature does not match (tampered token or wrong secret)
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Token is past its expiry
    #[error("Token has expired")]
    Expired,

    /// Token cannot be parsed
    #[error("Malformed token: {0}")]
    Malformed(String),
}

/// JWT claims carried by every Ticklist token
///
/// `sub` is the user identity the auth gate resolves against the credential
/// store on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "ticklist"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims expiring [`TOKEN_TTL_DAYS`] from now
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, Duration::days(TOKEN_TTL_DAYS))
    }

    /// Creates claims with a custom expiration window
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues a signed bearer token for a user
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, JwtError> {
    create_token(&Claims::new(user_id), secret)
}

/// Signs a claims set into a token string
///
/// The secret should be at least 32 bytes of random data, loaded once at
/// startup from configuration.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and extracts its claims
///
/// Checks the signature, expiry, not-before, and issuer.
///
/// # Errors
///
/// - `JwtError::InvalidSignature` if the signature doesn't match (tampered or
///   wrong secret)
/// - `JwtError::Expired` if past expiry
/// - `JwtError::Malformed` if the token cannot be parsed
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::Malformed(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "ticklist");
        assert!(!claims.is_expired());

        // 30-day window, allowing a second of slack for the test itself
        let ttl = claims.exp - claims.iat;
        assert!(ttl >= 30 * 24 * 3600 - 1 && ttl <= 30 * 24 * 3600 + 1);
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, SECRET).expect("Should create token");
        let claims = verify_token(&token, SECRET).expect("Should verify token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "ticklist");
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), SECRET).expect("Should create token");

        let result = verify_token(&token, "a-completely-different-secret-value");
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_verify_expired_token() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = verify_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_verify_garbage_token() {
        let result = verify_token("not-even-a-jwt", SECRET);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_flipped_signature_bit_fails() {
        let token = issue_token(Uuid::new_v4(), SECRET).expect("Should create token");

        // Corrupt the signature segment only; header and payload stay intact
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);

        let sig = parts[2].clone();
        let last = sig.chars().last().unwrap();
        let flipped = if last == 'A' { 'B' } else { 'A' };
        parts[2] = format!("{}{}", &sig[..sig.len() - 1], flipped);

        let tampered = parts.join(".");
        assert_ne!(tampered, token);

        let result = verify_token(&tampered, SECRET);
        assert!(result.is_err(), "Tampered signature must never verify");
    }

    #[test]
    fn test_tampered_payload_fails() {
        let token = issue_token(Uuid::new_v4(), SECRET).expect("Should create token");

        // Re-sign-free payload swap: substitute the payload of a token issued
        // for a different user, keeping the original signature
        let other = issue_token(Uuid::new_v4(), SECRET).expect("Should create token");

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        let result = verify_token(&spliced, SECRET);
        assert!(result.is_err(), "Spliced payload must never verify");
    }
}
