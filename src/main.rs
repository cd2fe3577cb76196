//! delivery-preview - preview a delivered image collection on a map
//!
//! Builds the map state from a catalog file, prints or writes it as JSON and
//! optionally serves it over HTTP.

use anyhow::Context;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

use delivery_preview::handlers::{heartbeat, router};
use delivery_preview::{
    init_tracing, log_error, run_preview, AppState, Config, MapState, PreviewError, StaticCatalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, catalog_path) = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting delivery-preview v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        log_error(&e, "configuration");
        e
    })?;

    let catalog = StaticCatalog::load(&catalog_path).map_err(|e| {
        log_error(&e, "catalog load");
        e
    })?;

    let mut map = MapState::new(config.display.width, config.display.height);
    let outcome = run_preview(&catalog, &mut map, &config.preview).map_err(|e| {
        log_error(&e, "preview");
        e
    })?;
    info!(image = %outcome.image, "Centered on selected image");

    let json = map.to_json_pretty()?;
    match &config.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write map state to {}", path.display()))?;
            info!(path = %path.display(), "Map state written");
        }
        None => println!("{}", json),
    }

    if config.serve {
        serve(config, catalog_path, map).await?;
    }

    Ok(())
}

/// Serve the finished map until Ctrl+C or SIGTERM
async fn serve(
    config: Config,
    catalog_path: std::path::PathBuf,
    map: MapState,
) -> Result<(), PreviewError> {
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| PreviewError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let app = router(AppState::new_shared(config, catalog_path, map));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PreviewError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    heartbeat::mark_started();
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PreviewError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
