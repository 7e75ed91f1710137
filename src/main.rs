//! wb_tokens - Wildberries token administration service
//!
//! Serves token deletion over HTTP and relays token messages
//! on the in-process `wildberries` transport.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::broadcast::error::RecvError;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wb_tokens::api::{self, AppState};
use wb_tokens::messenger::{InMemoryBus, OutboundMessage, WILDBERRIES_TRANSPORT};
use wb_tokens::store::PgTokenStore;
use wb_tokens::{db, Config, DeleteTokenHandler, LogFormat};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wb_tokens=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    let request_id = axum::http::HeaderName::from_static(api::middleware::REQUEST_ID_HEADER);

    // Layers run last-added first: set id -> trace -> log -> handler
    let protected_routes = api::create_router().layer(middleware::from_fn(
        api::middleware::logging_middleware,
    ));

    Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", protected_routes)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Log every message published on the wildberries transport
async fn relay_wildberries(bus: InMemoryBus) -> anyhow::Result<()> {
    let mut receiver = bus.subscribe(WILDBERRIES_TRANSPORT)?;

    loop {
        match receiver.recv().await {
            Ok(OutboundMessage::WbToken(message)) => {
                tracing::info!(
                    transport = WILDBERRIES_TRANSPORT,
                    token_id = %message.id,
                    event_id = %message.event,
                    last_event_id = %message.last,
                    "WbTokenMessage received"
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(transport = WILDBERRIES_TRANSPORT, skipped, "Message relay lagged");
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(environment = %config.environment, "Starting wb_tokens server");
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    db::verify_connection(&pool).await?;
    if !db::check_schema(&pool).await? {
        tracing::error!("Database schema is not complete. Please run migrations.");
        return Err(anyhow::anyhow!("Database schema incomplete"));
    }

    tracing::info!("Database connected successfully");

    let bus = InMemoryBus::wildberries(config.bus_capacity);
    let relay = tokio::spawn(relay_wildberries(bus.clone()));

    let handler = DeleteTokenHandler::new(
        Arc::new(PgTokenStore::new(pool.clone())),
        Arc::new(bus),
    );
    let app = build_router(AppState::new(handler));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    relay.abort();
    pool.close().await;
    tracing::info!("Database connections closed. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
