/// Authentication endpoints
///
/// These are the only routes that bypass the auth gate; they read and write
/// the credential store directly and hand out tokens.
///
/// # Endpoints
///
/// - `POST /auth/register` - Register new user
/// - `POST /auth/login` - Login with email + password

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use ticklist_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
///
/// Fields default to empty when absent so a missing field reports the same
/// validation failure as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (3-30 chars, globally unique)
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 30,
        message = "Username must be between 3 and 30 characters."
    ))]
    pub username: String,

    /// Email address (globally unique)
    #[serde(default)]
    #[validate(email(message = "Invalid email format."))]
    pub email: String,

    /// Password (hashed before storage, never persisted as plaintext)
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Login request
///
/// Absent fields behave like empty ones: the lookup fails and the caller
/// sees the uniform invalid-credentials response.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,

    /// Password
    #[serde(default)]
    pub password: String,
}

/// Outward user representation returned by both auth endpoints
///
/// `{id, username, email, token}` - the password hash is never serialized.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Signed bearer token, valid 30 days
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "username": "jdoe",
///   "email": "user@example.com",
///   "password": "hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failure, or email/username already taken.
///   Both duplicate checks run before insertion so the more specific message
///   is reported (email first, then username).
/// - `500 Internal Server Error`: hashing or storage failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Duplicate(
            "User with this email already exists.".to_string(),
        ));
    }
    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Duplicate("Username is already taken.".to_string()));
    }

    // Hashing is an explicit step before persistence; the model layer only
    // ever sees the hash
    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let token = jwt::issue_token(user.id, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            token,
        }),
    ))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `{"message": "Invalid credentials."}` - the same
///   response whether the email is unknown or the password is wrong
/// - `500 Internal Server Error`: storage failure or unreadable stored hash
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = match User::find_by_email(&state.db, &req.email).await? {
        Some(user) => user,
        None => return Err(ApiError::InvalidCredentials),
    };

    // Comparison goes through the hasher's verifier, never plain equality
    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = jwt::issue_token(user.id, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        token,
    }))
}
