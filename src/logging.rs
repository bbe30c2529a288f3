//! # Structured Logging Module
//!
//! Environment-aware structured logging for debugging the sequential step
//! pipeline and its collaborator calls.

use std::sync::OnceLock;

use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(EnvFilter::new(log_level)),
        );

        // Use try_init to avoid panic if a global subscriber already exists
        // (e.g. set by the surrounding runtime).
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("MINTFLOW_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for step operations
pub fn log_step_operation(
    step: &str,
    order_id: Option<&str>,
    payment_id: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        step = %step,
        order_id = order_id,
        payment_id = payment_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "STEP_OPERATION"
    );
}

/// Log structured data for callback delivery
pub fn log_callback_operation(
    callback_url: &str,
    payload_status: &str,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        callback_url = %callback_url,
        payload_status = %payload_status,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "CALLBACK_OPERATION"
    );
}
