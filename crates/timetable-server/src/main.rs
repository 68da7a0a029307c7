//! # Timetable Server
//!
//! Loads configuration, runs migrations, wires the DI module and serves the
//! REST API until Ctrl+C or SIGTERM.

use std::sync::Arc;
use timetable_config::ConfigLoader;
use timetable_core::{TimetableError, TimetableResult};
use timetable_repository::DatabaseHealthCheck;
use timetable_rest::{create_router, AppState};
use timetable_server::{
    di::{build_timetable_module, DatabaseResolver},
    observability::init_logging,
    startup::{print_banner, print_startup_info},
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> TimetableResult<()> {
    let config = ConfigLoader::from_default_location()?.into_config();

    init_logging(&config.observability)?;
    print_banner();

    info!("Starting timetable server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let module = build_timetable_module(&config).await?;

    let db_pool = module.database_pool();
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let app_state = AppState::from_module(module.as_ref())
        .with_health_check(Arc::new(DatabaseHealthCheck::new(db_pool.clone())));

    let router = create_router(app_state, &config.server);

    let rest_addr = config.server.rest_addr();
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| TimetableError::internal(format!("Failed to bind REST: {}", e)))?;

    print_startup_info(&config.server);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TimetableError::internal(format!("REST server error: {}", e)))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
