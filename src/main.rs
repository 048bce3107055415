//! qrpress QR code generation service.
//!
//! Main entry point. Loads configuration from the environment, initializes
//! structured logging, and runs the HTTP server until a shutdown signal
//! arrives.

use qrpress_api::{Config, LogFormat};
use qrpress_core::QrService;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Configuration first: logging format and level come from it.
    let config = Config::from_env();
    init_tracing(&config);

    info!(
        port = config.port,
        env = %config.env,
        log_level = %config.log_level,
        log_format = ?config.log_format,
        max_body_size = config.max_body_size,
        min_qr_size = config.min_qr_size,
        max_qr_size = config.max_qr_size,
        default_qr_size = config.default_qr_size,
        shutdown_timeout_secs = config.shutdown_timeout.as_secs(),
        "Configuration loaded"
    );

    let shutdown_timeout = config.shutdown_timeout;
    let mut server_handle = tokio::spawn(qrpress_api::start_server(config, QrService::new()));

    tokio::select! {
        result = &mut server_handle => {
            match result {
                Ok(Ok(())) => info!("Server stopped"),
                Ok(Err(e)) => {
                    error!(error = %e, "Server failed");
                    std::process::exit(1);
                },
                Err(e) => {
                    error!(error = %e, "Server task panicked");
                    std::process::exit(1);
                },
            }
        },
        () = shutdown_signal() => {
            info!("Shutdown signal received, starting graceful shutdown");

            // Give in-flight requests a bounded drain period.
            tokio::select! {
                () = tokio::time::sleep(shutdown_timeout) => {
                    warn!("Shutdown grace period expired");
                },
                _ = &mut server_handle => {
                    info!("Server stopped");
                },
            }
        },
    }

    info!("qrpress shutdown complete");
}

/// Initializes tracing from the loaded configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set; the
/// output format follows `LOG_FORMAT`.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match config.log_level.trim().to_ascii_lowercase().as_str() {
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry().with(filter).with(fmt::layer().json()).init();
        },
        LogFormat::Text => {
            tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
        },
    }
}

/// Waits for a shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C signal");
        },
        () = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
