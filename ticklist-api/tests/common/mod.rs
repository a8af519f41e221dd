/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations run on first connect)
/// - Registering users through the real API
/// - Request helpers driving the router directly
/// - Cleanup (user deletion cascades to tasks)
///
/// Tests expect `DATABASE_URL` and `JWT_SECRET` in the environment (or a
/// `.env` file), same as the server itself.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use ticklist_api::app::{build_router, AppState};
use ticklist_api::config::Config;
use ticklist_shared::models::user::User;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Deletes a test user; owned tasks go with it via the cascade
    pub async fn cleanup_user(&self, id: Uuid) -> anyhow::Result<()> {
        User::delete(&self.db, id).await?;
        Ok(())
    }
}

/// A user registered through the API during a test
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Sends a request to the app and returns (status, parsed JSON body)
///
/// An empty response body (204) parses as `Value::Null`.
pub async fn request(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Registers a fresh user with a unique username/email via the API
pub async fn register_user(ctx: &TestContext, prefix: &str) -> anyhow::Result<TestUser> {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("{}-{}", prefix, &suffix[..12]);
    let email = format!("{}-{}@example.com", prefix, suffix);
    let password = format!("pw-{}", suffix);

    let (status, body) = request(
        ctx,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": password,
        })),
    )
    .await;

    anyhow::ensure!(
        status == StatusCode::CREATED,
        "registration failed: {}",
        body
    );

    Ok(TestUser {
        id: body["id"].as_str().unwrap().parse()?,
        username,
        email,
        password,
        token: body["token"].as_str().unwrap().to_string(),
    })
}

/// Creates a task through the API, returning its id
pub async fn create_task(ctx: &TestContext, user: &TestUser, text: &str) -> anyhow::Result<Uuid> {
    let (status, body) = request(
        ctx,
        "POST",
        "/tasks",
        Some(&user.token),
        Some(json!({ "text": text })),
    )
    .await;

    anyhow::ensure!(
        status == StatusCode::CREATED,
        "task creation failed: {}",
        body
    );

    Ok(body["id"].as_str().unwrap().parse()?)
}
