//! Process bootstrap for the `articlesd` server.
//!
//! # Responsibility
//! - Resolve configuration and initialize logging.
//! - Open the SQLite store, mount the HTTP router and serve until Ctrl-C.

pub mod config;
mod error;

pub use config::{command, CliOverrides, FileConfig, ServerConfig};
pub use error::{ServerError, ServerResult};

use articles_core::db::{open_db, open_db_in_memory};
use articles_core::{init_logging, init_stderr_logging, ArticleService, SqliteArticleStore};
use articles_http::{make_router, AppState};
use axum::Router;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Initializes logging for `config`: rolling files when a directory is set,
/// stderr otherwise.
pub fn init_server_logging(config: &ServerConfig) -> ServerResult<()> {
    match &config.log_dir {
        Some(dir) => {
            let dir = dir.to_str().ok_or_else(|| {
                ServerError::Logging(format!(
                    "log directory `{}` is not valid UTF-8",
                    dir.display()
                ))
            })?;
            init_logging(&config.log_level, dir)
        }
        None => init_stderr_logging(&config.log_level),
    }
    .map_err(ServerError::Logging)
}

/// Opens the configured database and builds the application router.
pub fn build_app(config: &ServerConfig) -> ServerResult<Router> {
    let conn = match &config.database {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = ArticleService::new(SqliteArticleStore::new(conn));
    Ok(make_router(Arc::new(AppState::new(service))))
}

/// Serves the article API on `config.address` until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> ServerResult<()> {
    let app = build_app(config)?;
    let listener = TcpListener::bind(config.address).await?;
    info!(
        "event=server_start module=server status=ok address={} database={}",
        listener.local_addr()?,
        config
            .database
            .as_ref()
            .map_or_else(|| "memory".to_string(), |path| path.display().to_string())
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal_listen module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_requested module=server status=ok");
}
