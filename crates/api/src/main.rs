use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_api::config::ServerConfig;
use campus_api::routes;
use campus_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_api=debug,tower_http=debug".into());
    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = campus_db::create_pool(&database_url).await.expect("Database connection failed");
    campus_db::health_check(&pool).await.expect("Database health check failed");
    campus_db::run_migrations(&pool).await.expect("Failed to run database migrations");
    tracing::info!("Database reachable, migrations applied");

    // --- Router ---
    let state = AppState { pool, config: Arc::new(config.clone()) };
    let request_id = HeaderName::from_static("x-request-id");

    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout_secs),
    );
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Health stays at the root so load balancers can probe without the
    // /api/v1 prefix. The middleware stack applies bottom-up: request IDs
    // are set before the trace layer runs so spans carry them, and the
    // timeout sits inside panic recovery.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(timeout)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(trace)
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(&config))
        .with_state(state);

    // --- Serve ---
    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST address"), config.port);
    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind to address");
    tracing::info!(%addr, "HTTP server listening");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    server.await.expect("Server error");

    tracing::info!("Shutdown complete");
}

/// Resolve when the process receives SIGINT (Ctrl-C) or, on Unix,
/// SIGTERM, so in-flight requests drain before exit under both
/// interactive use and a process manager.
async fn shutdown_signal() {
    let sigint = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl-C handler");
        "SIGINT"
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<&str>();

    let received = tokio::select! {
        name = sigint => name,
        name = sigterm => name,
    };
    tracing::info!(signal = received, "Termination signal received, draining requests");
}

/// Build the CORS layer from the configured origin list.
///
/// An unparseable origin panics during startup, before the listener
/// binds.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut origins = Vec::with_capacity(config.cors_origins.len());
    for origin in &config.cors_origins {
        match origin.parse() {
            Ok(parsed) => origins.push(parsed),
            Err(e) => panic!("Invalid CORS origin '{origin}': {e}"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
