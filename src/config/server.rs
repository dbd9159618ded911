//! Server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,

    /// Base URL of the frontend, used to build shareable profile links
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".parse().unwrap(),
            request_timeout: 30,
            cors_origins: vec!["http://localhost:3000".to_string()],
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}
