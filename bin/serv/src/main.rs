use std::net::SocketAddr;

use gp_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    gp_api::tracing::init_tracing(&config.env);

    // Connect, create the database if needed, and run migrations
    let pool = gp_db::create_pool(&config.database_url, config.max_db_connections).await?;
    gp_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    let state = ApiState::new(&config, pool);

    let app = gp_api::router::router()
        .with_state(state)
        .layer(axum::middleware::from_fn(
            gp_api::middleware::request_id::request_id_middleware,
        ))
        .layer(gp_api::middleware::cors::create_cors_layer(
            config.allowed_origins.clone(),
        ))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "server listening");

    // ConnectInfo feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
