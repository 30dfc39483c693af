//! TTL Cache - demo binary
//!
//! Loads a single secret, reads it back, waits out its TTL plus one sweep
//! and reads it again.

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{Cache, CacheConfig, CancellationToken};

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache, which starts its sweep task
/// 4. Load `key` with the default TTL and read it back
/// 5. Wait TTL + one sweep interval (or until Ctrl+C/SIGTERM) and read again
/// 6. Cancel the cache lifetime and wait for the sweeper to exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env().context("Failed to load cache configuration")?;
    info!(
        "Configuration loaded: sweep_interval={:?}, default_ttl={:?}, freshness={:?}",
        config.sweep_interval, config.default_ttl, config.freshness
    );

    let lifetime = CancellationToken::new();
    let cache: Cache<String> = Cache::with_config(&config, lifetime.child_token());

    cache.load_default("key", "password1".to_string()).await;
    println!("{:?}", cache.get("key").await);

    let wait = cache.default_ttl() + cache.sweep_interval();
    info!("Waiting {:?} for the entry to expire and be swept", wait);

    tokio::select! {
        _ = tokio::time::sleep(wait) => {
            println!("{:?}", cache.get("key").await);
        }
        _ = shutdown_signal() => {}
    }

    lifetime.cancel();
    cache.sweeper_stopped().await;

    info!(stats = ?cache.stats().await, "Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
