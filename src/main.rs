use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_radar::cache::SnapshotCache;
use review_radar::config::Config;
use review_radar::github::GitHubClient;
use review_radar::refresh::{RefreshConfig, run_refresh_loop};
use review_radar::server::{AppState, build_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_radar=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let client = match GitHubClient::from_token(config.token.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to construct GitHub client");
            std::process::exit(1);
        }
    };

    let cache = SnapshotCache::new();
    let shutdown = CancellationToken::new();

    let refresh_config = RefreshConfig {
        repositories: config.repositories.clone(),
        bot_logins: config.bot_logins.clone(),
        interval: config.refresh_interval,
    };
    tokio::spawn(run_refresh_loop(
        client,
        refresh_config,
        cache.clone(),
        shutdown.clone(),
    ));

    let app = build_router(AppState::new(cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on_ctrl_c(shutdown))
        .await
        .unwrap();
}

/// Resolves on ctrl-c and cancels the refresh task on the way out.
async fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("ctrl-c received, shutting down");
    shutdown.cancel();
}
