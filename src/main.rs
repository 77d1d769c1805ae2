//! Member register server binary.
//!
//! Wires the production adapters to the report pipeline and serves the
//! export endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::middleware;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use member_register::adapters::auth::{
    AuthorityConfig, HttpAdminAuthority, SessionIdentityResolver,
};
use member_register::adapters::http::middleware::{identity_middleware, IdentityState};
use member_register::adapters::http::report::{report_routes, ReportAppState};
use member_register::adapters::postgres::PostgresReportReader;
use member_register::config::AppConfig;
use member_register::ports::{AdminAuthority, ReportReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    // RUST_LOG wins over the configured filter when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    info!("database pool ready");

    let resolver: IdentityState =
        Arc::new(SessionIdentityResolver::new(&config.auth.session_secret));

    let authority: Arc<dyn AdminAuthority> = Arc::new(HttpAdminAuthority::new(
        AuthorityConfig::new(
            config.auth.authority_url.clone(),
            config.auth.authority_api_key.clone(),
        )
        .with_timeout(config.auth.authority_timeout()),
    ));

    let reader: Arc<dyn ReportReader> = Arc::new(PostgresReportReader::new(
        pool,
        config.database.query_timeout(),
    ));

    let state = ReportAppState { authority, reader };

    let cors_origins = config
        .server
        .cors_origins_list()
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(cors_origins))
    };

    let app = report_routes(state)
        .layer(middleware::from_fn_with_state(resolver, identity_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
