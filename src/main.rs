//! Trego edge process: static asset host + reverse proxy for the backend.

mod config;
mod proxy;
mod routes;
mod state;
mod telemetry;
mod trace_id;

use std::net::SocketAddr;

use config::{EdgeConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();

    let config = match EdgeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing(LogFormat::Text);
            tracing::error!(error = %e, "invalid edge configuration");
            return Err(e.into());
        }
    };
    telemetry::init_tracing(config.log_format);

    let addr = config.listen_addr();
    let state = state::AppState::new(config)?;
    tracing::info!(
        static_dir = %state.config.static_dir.display(),
        "web server: http://localhost:{}  (proxy -> {})",
        state.config.port,
        state.upstream.target()
    );

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "trego edge listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("trego edge shut down");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
