//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single validated upstream target
//! - Enforce http/https scheme at construction
//! - Build the outbound URL for a given inbound path+query

use url::Url;

use crate::balancer::error::ConfigError;

/// A single upstream server, parsed and validated once at startup.
///
/// The set of backends is fixed for the process lifetime; a `Backend` is
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Parsed base URL (scheme, host, port, base path).
    url: Url,
    /// Base URL rendered without a trailing slash, for target construction.
    base: String,
}

impl Backend {
    /// Parse a backend address string into a validated `Backend`.
    ///
    /// Fails if the string is not an absolute URL or does not use the
    /// http/https scheme.
    pub fn parse(address: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(address).map_err(|source| ConfigError::InvalidUrl {
            address: address.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(ConfigError::UnsupportedScheme {
                    address: address.to_string(),
                });
            }
        }

        let base = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, base })
    }

    /// Host (and port, if non-default) of this backend, for log lines.
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Build the full target URL for an inbound path+query.
    ///
    /// The backend's base path is kept as a prefix and the inbound
    /// path+query is appended verbatim.
    pub fn target_url(&self, path_and_query: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base, path_and_query))
    }
}
