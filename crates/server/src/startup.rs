use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Connect the store and build the application router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.bootstrap_schema {
        models::schema::create_tables(&db).await?;
    }
    let state = ServerState::new(db, cfg.server.page_size)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {addr}: {e}")))?;
    info!(%addr, "backoffice server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    Ok(())
}
