// ⚙️ Server Config - Bind address, body cap, error detail exposure
//
// Loaded from an optional `expenses.toml` in the working directory, then
// overridden by `EXPENSES_*` environment variables (e.g. `EXPENSES_PORT=8080`).

use serde::{Deserialize, Serialize};

/// Default cap on a POST body, in bytes
pub const MAX_BODY_BYTES: usize = 1_000_000;

/// Runtime settings for the expense server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted POST body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Include the underlying error message as `details` in 500 responses
    #[serde(default = "default_true")]
    pub expose_error_details: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_body_bytes() -> usize {
    MAX_BODY_BYTES
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            expose_error_details: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("expenses").required(false))
            .add_source(config::Environment::with_prefix("EXPENSES").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.max_body_bytes, 1_000_000);
        assert!(config.expose_error_details);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_empty_source_falls_back_to_defaults() {
        let config: ServerConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ServerConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "port = 8080\nexpose_error_details = false",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 8080);
        assert!(!config.expose_error_details);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_body_bytes, MAX_BODY_BYTES);
    }
}
