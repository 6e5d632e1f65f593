use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

use hangman_core::WordCatalog;
use hangman_persistence::{FileStore, KeyValueStore, LeaderboardRepository, MemoryStore};
use hangman_server::{config::Config, create_routes, session_manager::SessionManager};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let catalog = match &config.words_directory {
        Some(words_dir) => {
            info!("Loading words from directory: {}", words_dir.display());
            match WordCatalog::from_directory(words_dir) {
                Ok(catalog) => catalog,
                Err(e) => {
                    error!("Failed to load words from '{}': {:#}", words_dir.display(), e);
                    error!("Set WORDS_DIRECTORY to a directory of <Category>.txt files, or unset it.");
                    std::process::exit(1);
                }
            }
        }
        None => {
            info!("Using the built-in word lists");
            WordCatalog::builtin()
        }
    };
    info!("Categories: {}", catalog.category_names().join(", "));

    let store: Arc<dyn KeyValueStore> = match FileStore::open(&config.data_directory).await {
        Ok(store) => {
            info!("Saving scores under {}", store.root().display());
            Arc::new(store)
        }
        Err(e) => {
            warn!(
                "Cannot use data directory '{}', scores will not survive a restart: {:#}",
                config.data_directory.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    };
    let leaderboard = Arc::new(LeaderboardRepository::new(store));

    let session_manager = Arc::new(SessionManager::new(Arc::new(catalog), leaderboard));

    let routes = create_routes(session_manager.clone(), config.static_directory.clone());

    // Start cleanup task
    let cleanup_session_manager = session_manager.clone();
    let session_timeout = Duration::from_secs(config.session_timeout_seconds);
    let cleanup_interval = Duration::from_secs(config.cleanup_interval_seconds.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            cleanup_session_manager
                .cleanup_idle_sessions(session_timeout)
                .await;
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = match warp::serve(routes)
        .try_bind_with_graceful_shutdown((config.host, config.port), shutdown_signal())
    {
        Ok(bound) => bound,
        Err(e) => {
            error!("Failed to bind {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!(
        "Server shutdown complete with {} open sessions.",
        session_manager.active_sessions_count().await
    );
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let (mut sigint, mut sigterm) = match (
            signal::unix::signal(signal::unix::SignalKind::interrupt()),
            signal::unix::signal(signal::unix::SignalKind::terminate()),
        ) {
            (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                std::future::pending::<()>().await;
                return;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
