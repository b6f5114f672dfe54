//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Service URLs parse and use http/https
//! - Timeouts are non-zero, addresses parse, coordinates are in range
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashboardConfig → Result<(), Vec<FieldError>>

use std::fmt;
use std::net::SocketAddr;
use url::Url;

use crate::config::schema::DashboardConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut push = |field: &'static str, message: String| errors.push(FieldError { field, message });

    if let Err(message) = check_socket_addr(&config.listener.bind_address) {
        push("listener.bind_address", message);
    }
    if config.listener.request_timeout_secs == 0 {
        push("listener.request_timeout_secs", "must be greater than 0".to_string());
    }

    if let Err(message) = check_service_url(&config.ledger.base_url) {
        push("ledger.base_url", message);
    }
    if config.ledger.timeout_secs == 0 {
        push("ledger.timeout_secs", "must be greater than 0".to_string());
    }

    if let Err(message) = check_service_url(&config.fraud.base_url) {
        push("fraud.base_url", message);
    }
    if config.fraud.timeout_secs == 0 {
        push("fraud.timeout_secs", "must be greater than 0".to_string());
    }

    let context = &config.fraud.context;
    if !(-90.0..=90.0).contains(&context.latitude) {
        push("fraud.context.latitude", format!("{} is outside -90..=90", context.latitude));
    }
    if !(-180.0..=180.0).contains(&context.longitude) {
        push("fraud.context.longitude", format!("{} is outside -180..=180", context.longitude));
    }
    if !context.location_deviation.is_finite() || context.location_deviation < 0.0 {
        push("fraud.context.location_deviation", "must be a non-negative number".to_string());
    }

    if config.contracts.default_type.trim().is_empty() {
        push("contracts.default_type", "must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        push(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        );
    }
    if config.observability.metrics_enabled {
        if let Err(message) = check_socket_addr(&config.observability.metrics_address) {
            push("observability.metrics_address", message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_service_url(raw: &str) -> Result<(), String> {
    let url: Url = raw.parse().map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

fn check_socket_addr(raw: &str) -> Result<(), String> {
    raw.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| format!("invalid address '{}': {}", raw, e))
}
