use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faculty_workload::api::router;
use faculty_workload::config::AppConfig;
use faculty_workload::db;
use faculty_workload::error::AppError;
use faculty_workload::services::WorkloadService;
use faculty_workload::state::AppState;
use faculty_workload::store::SqliteRosterStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(AppConfig::log_filter_from_env()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Application starting...");
    let config = AppConfig::new_from_env().inspect_err(|e| {
        error!("Error loading configuration: {}", e);
    })?;
    if let Err(e) = run(config).await {
        error!("Error in main execution: {}", e);
        return Err(e.into());
    }
    info!("Application closed.");
    Ok(())
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Connecting to database {}", config.database_url);
    let pool = db::connect(&config.database_url).await?;

    let store = Arc::new(SqliteRosterStore::new(pool.clone()));
    let service = Arc::new(WorkloadService::load(store).await?);

    let state = AppState { service: service.clone() };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing application...");
    service.save().await?;
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
