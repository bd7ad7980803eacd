//! A registration server for individual and business accounts.

/// Configuration and argument parsing
mod config;

/// Errors and how they look to clients
mod error;

/// Request handlers, one per route
mod handlers;

/// Postgres-backed account storage
mod postgres;

/// Route table and middleware
mod router;

/// Shared state for handlers
mod state;

use clap::Parser;
use signup_core::{Argon2Hasher, InMemoryUserRepository, UserRepository};
use sqlx::postgres::PgPoolOptions;
use std::{error::Error, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let repository: Arc<dyn UserRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new().connect(database_url).await?;
            postgres::MIGRATOR.run(&pool).await?;
            tracing::info!("connected to postgres");

            Arc::new(postgres::PgUserRepository::new(pool))
        }
        None => {
            tracing::warn!("no database configured; accounts will be lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let hasher = Arc::new(Argon2Hasher::new(config.hash_cost())?);

    let app = router::router(
        state::State::new(repository, hasher),
        config.body_limit,
        config.request_timeout,
    );

    let listener = TcpListener::bind(&config.address).await?;
    tracing::info!(address = ?listener.local_addr(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

/// Resolves when we get Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
