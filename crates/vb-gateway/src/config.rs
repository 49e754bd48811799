//! Gateway configuration.

use std::net::SocketAddr;

use crate::error::GatewayError;

/// CORS configuration. An empty origin list (or `"*"`) allows any origin.
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address, e.g. `127.0.0.1:4000`.
    pub http_addr: String,
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:4000".to_string(),
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate the configuration before serving.
    pub fn validate(&self) -> Result<(), GatewayError> {
        self.http_addr
            .parse::<SocketAddr>()
            .map_err(|e| GatewayError::Config(format!("invalid http_addr {:?}: {e}", self.http_addr)))?;
        Ok(())
    }
}
