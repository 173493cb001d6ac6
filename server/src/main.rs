use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use todo_server::{logging, router, Config, MemoryStore, SqliteStore, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init_logging(&config.log_filter).context("failed to install logger")?;

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    info!(addr = %config.addr(), "listening");

    match config.database_url.as_deref() {
        Some(url) => {
            let store = SqliteStore::connect(url)
                .await
                .with_context(|| format!("failed to open {url}"))?;
            serve(listener, store, &config).await
        }
        None => {
            info!("no database url configured; todos are kept in memory");
            serve(listener, MemoryStore::new(), &config).await
        }
    }
}

async fn serve<S: TodoStore>(
    listener: TcpListener,
    store: S,
    config: &Config,
) -> anyhow::Result<()> {
    let app = router(Arc::new(store)).layer(TimeoutLayer::new(config.request_timeout()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
