// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cbdc_identity::{
    api::router,
    auth::Authenticator,
    config::{Config, IdentitySource, LogFormat},
    identity::{IdentityStore, InMemoryIdentityStore, RestIdentityStore},
    state::AppState,
    storage::{LocalCache, StoragePaths, UserCache},
};

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Invalid configuration");
    init_tracing(config.log_format);

    let store: Arc<dyn IdentityStore> = match &config.identity {
        IdentitySource::Remote(remote) => {
            info!(
                base_url = %remote.base_url,
                table = %remote.table,
                "Using remote identity store"
            );
            Arc::new(
                RestIdentityStore::new(remote.clone())
                    .expect("Failed to create identity store client"),
            )
        }
        IdentitySource::Seed(path) => {
            warn!(path = %path.display(), "Using in-memory identity store seeded from file");
            Arc::new(
                InMemoryIdentityStore::from_json_file(path).expect("Failed to load seed users"),
            )
        }
    };

    let mut authenticator = Authenticator::new(store);
    if config.user_cache {
        let mut cache = LocalCache::new(StoragePaths::new(&config.data_dir));
        match cache.initialize() {
            Ok(()) => {
                info!(data_dir = %config.data_dir.display(), "User cache enabled");
                authenticator = authenticator.with_cache(UserCache::new(cache));
            }
            Err(e) => warn!(error = %e, "User cache disabled: failed to initialize"),
        }
    }

    let state = AppState::new(authenticator).with_session_timeout(config.session_timeout);
    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    info!(%addr, "CBDC identity server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
