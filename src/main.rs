use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use biosearch::config::AppConfig;
use biosearch::db;
use biosearch::router::build_router;
use biosearch::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    if config.manager_token == "changeme" {
        tracing::warn!("MANAGER_TOKEN is not set, using the default token");
    }

    let conn = db::init_db(&config.database_url)?;
    tracing::info!(
        database = %config.database_url,
        slot_step_minutes = config.slot_step_minutes,
        initial_status = config.booking_initial_status.as_str(),
        "database ready"
    );

    let state = Arc::new(AppState::new(conn, config.clone()));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
