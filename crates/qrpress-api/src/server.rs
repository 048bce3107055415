//! HTTP server configuration and request routing.
//!
//! Provides Axum server setup with the middleware stack and graceful
//! shutdown. Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Request deadline enforcement
//! 4. Body size limit (generation route only)
//! 5. Handler execution
//!
//! # Graceful Shutdown
//!
//! The server stops accepting new connections on SIGINT/SIGTERM and waits
//! for in-flight requests; the binary bounds that wait with the configured
//! shutdown timeout.

use std::net::SocketAddr;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use qrpress_core::QrService;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::{config::Config, error::ApiError, handlers, AppState};

/// Creates the Axum router with all routes and middleware.
///
/// The configuration and encoder are injected here; handlers see them only
/// through the shared state.
pub fn create_router(config: &Config, qr: QrService) -> Router {
    let state = AppState { qr, limits: config.limits() };

    let generate_routes = Router::new()
        .route(
            "/generate",
            get(handlers::generate_get)
                .post(handlers::generate_post)
                .fallback(generate_method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(config.max_body_size));

    Router::new()
        .route("/", get(handlers::service_info).fallback(get_only_method_not_allowed))
        .route("/health", get(handlers::health_check).fallback(get_only_method_not_allowed))
        .merge(generate_routes)
        .fallback(not_found)
        .layer(TimeoutLayer::new(config.request_deadline()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds `0.0.0.0` on the configured port and serves requests until a
/// shutdown signal is received.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is already in use or the network
/// interface is unavailable.
pub async fn start_server(config: Config, qr: QrService) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(&config, qr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!(
        addr = %actual_addr,
        read_timeout_secs = config.read_timeout.as_secs(),
        write_timeout_secs = config.write_timeout.as_secs(),
        read_header_timeout_secs = config.read_header_timeout.as_secs(),
        idle_timeout_secs = config.idle_timeout.as_secs(),
        "HTTP server listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Middleware to inject a request ID into all responses.
///
/// Adds an `X-Request-Id` header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Fallback for unsupported methods on the generation route.
async fn generate_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed { allowed: "GET or POST" }
}

/// Fallback for unsupported methods on GET-only routes.
async fn get_only_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed { allowed: "GET" }
}

/// Router fallback for unknown paths.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Waits for a shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
