//! # Ticklist API Server
//!
//! Minimal multi-user to-do list backend: registration/login with password
//! hashing and token issuance, and per-user task CRUD where every operation
//! is scoped to the authenticated owner.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/ticklist \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p ticklist-api
//! ```

use ticklist_api::{
    app::{build_router, AppState},
    config::Config,
};
use ticklist_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticklist_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Ticklist API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Configuration and storage failures here are fatal; there is nothing to
    // serve without them
    let config = Config::from_env()?;

    migrations::ensure_database_exists(&config.database.url).await?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let state = AppState::new(db.clone(), config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, exiting...");
}
