//! # substationsd: substation registry daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository and the listing service
//! - Build the axum router and serve it until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use substations_adapter_http_axum::state::AppState;
use substations_adapter_storage_sqlite_sqlx::SqliteSubstationRepository;
use substations_app::services::substation_service::SubstationService;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    // Database
    let db = substations_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let repo = SqliteSubstationRepository::new(db.pool().clone());

    // Services
    let policy = config.listing_policy()?;
    tracing::info!(
        page_size = policy.page_size().get(),
        types = ?policy.types().labels().collect::<Vec<_>>(),
        "listing policy"
    );
    let substation_service = SubstationService::new(repo, policy);

    // HTTP
    let state = AppState::new(substation_service);
    let app = substations_adapter_http_axum::router::build(state, config.static_dir());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("substationsd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("substationsd stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received");
}
