use common::tracing::init_tracing;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use weather_proxy::{app, build_state, config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env();
    init_tracing(config.log_format);

    if config.api_key.is_empty() {
        warn!("OPENWEATHER_API_KEY is not set, upstream calls will be rejected");
    }

    let state = build_state(&config)?;
    let app = app(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        upstream = %config.openweather_url,
        trailing_day = ?config.trailing_day,
        "Weather proxy starting on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Weather proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
