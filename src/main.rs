// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ulepszenia API Server
//!
//! Records meditation listening progress and serves streaks, daily
//! summaries, and achievements to the web frontend.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ulepszenia_api::{
    config::{AdminBootstrap, Config},
    db::Database,
    error::AppError,
    models::Role,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Ulepszenia API");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Database ready, migrations applied"
    );

    let state = Arc::new(AppState::new(config.clone(), db));

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(&state, admin).await?;
    }

    let app = ulepszenia_api::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Create the configured admin account unless the email is already taken.
async fn bootstrap_admin(state: &AppState, admin: &AdminBootstrap) -> Result<(), AppError> {
    match state
        .accounts
        .create(&admin.email, "Administrator", &admin.password, Role::Admin)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Admin account created");
            Ok(())
        }
        Err(AppError::Conflict(_)) => {
            tracing::debug!("Admin account already exists");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ulepszenia_api=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
