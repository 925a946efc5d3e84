//! Environment configuration.
//!
//! # Responsibilities
//! - Read listen port, backend list, and timeout override from the
//!   environment, once at startup
//! - Fall back to sensible defaults when variables are unset
//!
//! Parsing is split from env access so it can be tested without touching
//! process state.

use std::time::Duration;

/// Runtime configuration for the proxy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the listener on.
    pub bind_address: String,
    /// Backend URL strings, in selection order.
    pub backends: Vec<String>,
    /// Optional per-request upstream timeout override.
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from `PORT`, `BACKENDS`, and `UPSTREAM_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self {
            bind_address: bind_address(std::env::var("PORT").ok()),
            backends: backend_list(std::env::var("BACKENDS").ok()),
            upstream_timeout: timeout_override(std::env::var("UPSTREAM_TIMEOUT_MS").ok()),
        }
    }
}

fn bind_address(port: Option<String>) -> String {
    let port = port.filter(|p| !p.is_empty());
    format!("0.0.0.0:{}", port.as_deref().unwrap_or("8080"))
}

fn backend_list(raw: Option<String>) -> Vec<String> {
    match raw.filter(|r| !r.is_empty()) {
        Some(raw) => raw
            .split(',')
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect(),
        None => vec![
            "http://localhost:8081".to_string(),
            "http://localhost:8082".to_string(),
            "http://localhost:8083".to_string(),
        ],
    }
}

fn timeout_override(raw: Option<String>) -> Option<Duration> {
    raw.and_then(|ms| ms.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8080() {
        assert_eq!(bind_address(None), "0.0.0.0:8080");
        assert_eq!(bind_address(Some(String::new())), "0.0.0.0:8080");
        assert_eq!(bind_address(Some("9000".to_string())), "0.0.0.0:9000");
    }

    #[test]
    fn default_backends_are_three_localhost_ports() {
        let backends = backend_list(None);
        assert_eq!(
            backends,
            vec![
                "http://localhost:8081",
                "http://localhost:8082",
                "http://localhost:8083",
            ]
        );
    }

    #[test]
    fn backend_list_is_trimmed_and_ordered() {
        let backends = backend_list(Some("http://a:1, http://b:2 ,http://c:3".to_string()));
        assert_eq!(backends, vec!["http://a:1", "http://b:2", "http://c:3"]);
    }

    #[test]
    fn timeout_override_parses_milliseconds() {
        assert_eq!(
            timeout_override(Some("250".to_string())),
            Some(Duration::from_millis(250))
        );
        assert_eq!(timeout_override(Some("abc".to_string())), None);
        assert_eq!(timeout_override(None), None);
    }
}
