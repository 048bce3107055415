//! Environment-driven service configuration.
//!
//! Every setting comes from an environment variable with a built-in
//! default; values that fail to parse fall back to the default so the
//! service always boots. The loaded value is immutable and passed
//! explicitly into the router constructor.

use std::{str::FromStr, time::Duration};

/// Default QR size applied when `DEFAULT_QR_SIZE` is zero or unparseable.
const FALLBACK_DEFAULT_QR_SIZE: u32 = 256;

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    /// TCP port the HTTP server binds to (`PORT`, default 8080).
    pub port: u16,
    /// Request read allowance in seconds (`READ_TIMEOUT`, default 5).
    pub read_timeout: Duration,
    /// Response write allowance in seconds (`WRITE_TIMEOUT`, default 10).
    pub write_timeout: Duration,
    /// Header read allowance in seconds (`READ_HEADER_TIMEOUT`, default 2).
    pub read_header_timeout: Duration,
    /// Keep-alive idle allowance in seconds (`IDLE_TIMEOUT`, default 60).
    pub idle_timeout: Duration,
    /// Graceful-shutdown drain bound in seconds (`SHUTDOWN_TIMEOUT`,
    /// default 5).
    pub shutdown_timeout: Duration,

    // Request and QR limits
    /// POST body cap in bytes (`MAX_BODY_SIZE`, default 1 MiB).
    pub max_body_size: usize,
    /// Smallest accepted pixel size (`MIN_QR_SIZE`, default 64).
    pub min_qr_size: u32,
    /// Largest accepted pixel size (`MAX_QR_SIZE`, default 512).
    pub max_qr_size: u32,
    /// Pixel size used when the `size` parameter is absent
    /// (`DEFAULT_QR_SIZE`, default 256).
    pub default_qr_size: u32,

    // Environment and logging
    /// Deployment environment label (`ENV`, default "development").
    pub env: String,
    /// Log level: debug, info, warn, error (`LOG_LEVEL`, default "info").
    pub log_level: String,
    /// Log output format (`LOG_FORMAT`; auto-derived from `ENV` when
    /// unset).
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for development.
    Text,
    /// Structured JSON output for production environments.
    Json,
}

impl LogFormat {
    /// Resolves the format from `LOG_FORMAT`, deriving it from the
    /// deployment environment when the variable is unset.
    fn resolve(raw: Option<&str>, env: &str) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) if s.eq_ignore_ascii_case("json") => Self::Json,
            Some(_) => Self::Text,
            None => match env {
                "production" | "prod" | "staging" | "live" => Self::Json,
                _ => Self::Text,
            },
        }
    }
}

/// Bounds applied to a single generation request.
///
/// Carried in router state; cheap to copy per request.
#[derive(Debug, Clone, Copy)]
pub struct QrLimits {
    /// POST body cap in bytes.
    pub max_body_size: usize,
    /// Smallest accepted pixel size.
    pub min_qr_size: u32,
    /// Largest accepted pixel size.
    pub max_qr_size: u32,
    /// Pixel size used when the `size` parameter is absent.
    pub default_qr_size: u32,
}

impl Config {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an injected variable lookup.
    ///
    /// Keeps the loader testable without mutating process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = get_or(&lookup, "ENV", "development");
        let log_format = LogFormat::resolve(lookup("LOG_FORMAT").as_deref(), &env);

        let mut config = Self {
            port: get_parsed(&lookup, "PORT", 8080),
            read_timeout: get_secs(&lookup, "READ_TIMEOUT", 5),
            write_timeout: get_secs(&lookup, "WRITE_TIMEOUT", 10),
            read_header_timeout: get_secs(&lookup, "READ_HEADER_TIMEOUT", 2),
            idle_timeout: get_secs(&lookup, "IDLE_TIMEOUT", 60),
            shutdown_timeout: get_secs(&lookup, "SHUTDOWN_TIMEOUT", 5),
            max_body_size: get_parsed(&lookup, "MAX_BODY_SIZE", 1024 * 1024),
            min_qr_size: get_parsed(&lookup, "MIN_QR_SIZE", 64),
            max_qr_size: get_parsed(&lookup, "MAX_QR_SIZE", 512),
            default_qr_size: get_parsed(&lookup, "DEFAULT_QR_SIZE", FALLBACK_DEFAULT_QR_SIZE),
            log_level: get_or(&lookup, "LOG_LEVEL", "info"),
            log_format,
            env,
        };
        config.normalize();
        config
    }

    /// Repairs inconsistent size bounds instead of failing startup.
    fn normalize(&mut self) {
        if self.min_qr_size > self.max_qr_size {
            std::mem::swap(&mut self.min_qr_size, &mut self.max_qr_size);
        }
        // Lower bound is at least one pixel.
        self.min_qr_size = self.min_qr_size.max(1);
        if self.default_qr_size == 0 {
            self.default_qr_size = FALLBACK_DEFAULT_QR_SIZE;
        }
    }

    /// Per-request limits handed to the HTTP handlers.
    pub fn limits(&self) -> QrLimits {
        QrLimits {
            max_body_size: self.max_body_size,
            min_qr_size: self.min_qr_size,
            max_qr_size: self.max_qr_size,
            default_qr_size: self.default_qr_size,
        }
    }

    /// Total time budget for handling a single request.
    pub fn request_deadline(&self) -> Duration {
        self.read_timeout + self.write_timeout
    }
}

impl Default for Config {
    /// Built-in defaults, ignoring the process environment.
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn get_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: &str) -> String {
    lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| fallback.to_string())
}

fn get_parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: T) -> T {
    lookup(key).and_then(|v| v.trim().parse().ok()).unwrap_or(fallback)
}

fn get_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: u64) -> Duration {
    Duration::from_secs(get_parsed(lookup, key, fallback))
}
