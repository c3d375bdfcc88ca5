use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

mod config;
mod models;
mod routes;
mod schema;
mod services;

use campus_shared::clients::db::{create_pool, DbPool};
use config::AppConfig;

pub struct AppState {
    pub db: DbPool,
    pub metrics_handle: PrometheusHandle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campus_shared::middleware::init_tracing("campus-matching");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url, config.db_pool_size)?;
    let metrics_handle = campus_shared::middleware::init_metrics()?;

    let state = Arc::new(AppState { db, metrics_handle });
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "campus-matching starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
