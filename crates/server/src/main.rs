//! Fig & Clover registry server - wedding RSVP and gift registry API.
//!
//! This binary serves the invitation page's backend on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework exposing a small JSON API plus an SSE delta stream
//! - `PostgreSQL` as the registry store, reached only through the gateway
//!   repositories in [`db`]
//! - A `LISTEN/NOTIFY` change feed ([`feed`]) keeping the in-memory
//!   availability projection ([`registry`]) current for every session
//!
//! The invitation page itself (countdown, map, styling) is a separate
//! static frontend; this process owns only registry state and sync.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod feed;
mod models;
mod registry;
mod routes;
mod state;

use config::ServerConfig;
use db::GiftRepository;
use sentry::integrations::tracing as sentry_tracing;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "figclover_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p figclover-cli -- migrate

    let cors = cors_layer(&config);

    // Build application state
    let state = AppState::new(config.clone(), pool);

    // Seed the availability projection, then attach to the change feed.
    // A remote change landing between these two steps is neither in the
    // snapshot nor on the feed - an accepted staleness window.
    seed_projection(&state)
        .await
        .expect("Failed to seed availability projection");
    start_feed(&state);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("registry server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Rebuild the projection from full gateway fetches.
async fn seed_projection(state: &AppState) -> Result<(), db::RepositoryError> {
    let repo = GiftRepository::new(state.pool());
    let available = repo.list_available().await?;
    let reserved = repo.list_reserved().await?;
    tracing::info!(
        available = available.len(),
        reserved = reserved.len(),
        "Availability projection seeded"
    );

    let projection = state.projection();
    projection.write().await.seed(available, reserved);
    Ok(())
}

/// Spawn the `LISTEN` task and the projection updater.
fn start_feed(state: &AppState) {
    let projection_sub = state.feed().subscribe();
    tokio::spawn(registry::run_projection(state.projection(), projection_sub));

    let pool = state.pool().clone();
    let feed = state.feed().clone();
    tokio::spawn(async move {
        if let Err(e) = feed::listener::run(&pool, feed).await {
            tracing::error!(error = %e, "Gift change feed could not be established");
        }
    });
}

/// Build the CORS layer for the invitation-page origin.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    config.allowed_origin.as_ref().map_or_else(
        CorsLayer::permissive,
        |origin| {
            let origin = origin
                .parse::<HeaderValue>()
                .expect("Invalid REGISTRY_ALLOWED_ORIGIN");
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        },
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
