use std::net::SocketAddr;
use std::sync::Arc;

use deliverydesk::config::{database, Config};
use deliverydesk::repository::Store;
use deliverydesk::services::AppState;
use deliverydesk::{create_router, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    let config = Config::from_env()?;

    let store = match config.database_url.as_deref() {
        Some(url) => {
            let pool = database::create_pool(url).await?;
            database::init_db(&pool).await?;
            Store::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data will be kept in memory");
            Store::in_memory()
        }
    };

    let state = Arc::new(AppState::new(store, config.clone()));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
