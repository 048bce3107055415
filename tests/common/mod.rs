//! Shared helpers for integration tests.
#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::net::SocketAddr;

use qrpress_api::{create_router, Config};
use qrpress_core::QrService;

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Starts the full router on an ephemeral port and returns its address.
pub async fn spawn_app(config: Config) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    let app = create_router(&config, QrService::new());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}

/// Starts the router with built-in default configuration.
pub async fn spawn_default_app() -> SocketAddr {
    spawn_app(Config::default()).await
}
