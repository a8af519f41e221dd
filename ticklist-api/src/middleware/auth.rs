/// Bearer-token auth gate
///
/// Every protected request passes through [`require_auth`], which settles into
/// one of four terminal outcomes:
///
/// 1. No `Authorization: Bearer <token>` header → `401 "Not authorized, no token."`
/// 2. Token malformed, bad signature, or expired → `401 "Not authorized, token failed."`
/// 3. Token valid but the user row is gone (deleted after issuance) →
///    `401 "Not authorized, user not found."`
/// 4. Token valid and resolves to a live user → a [`CurrentUser`] is attached
///    to the request and the downstream handler runs.
///
/// The token is stateless, so each request is independently re-verified:
/// exactly one user lookup per gated request, no caching of the resolved
/// identity across requests, no retry.
///
/// Handlers receive the identity explicitly:
///
/// ```no_run
/// use axum::Extension;
/// use ticklist_api::middleware::auth::CurrentUser;
///
/// async fn handler(Extension(user): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{app::AppState, error::ApiError};
use ticklist_shared::{auth::jwt, models::user::User};

/// Resolved caller identity attached to gated requests
///
/// Carries everything a handler needs to scope its queries; the password hash
/// never leaves the model layer.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Auth gate middleware for protected routes
///
/// Applied via `axum::middleware::from_fn_with_state` on the `/tasks` router.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Outcome 1: no credential presented
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Not authorized, no token.".to_string()))?;

    // Outcome 2: credential presented but invalid
    let claims = jwt::verify_token(token, state.jwt_secret()).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        ApiError::Unauthorized("Not authorized, token failed.".to_string())
    })?;

    // Outcome 3: credential valid but the user no longer exists
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authorized, user not found.".to_string()))?;

    // Outcome 4: attach the resolved identity and proceed
    req.extensions_mut().insert(CurrentUser::from(&user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_current_user_from_user_drops_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let current = CurrentUser::from(&user);
        assert_eq!(current.id, user.id);
        assert_eq!(current.username, "jdoe");
        assert_eq!(current.email, "jdoe@example.com");

        let debug = format!("{:?}", current);
        assert!(!debug.contains("argon2id"));
    }
}
