use std::net::SocketAddr;

use crate::error::AppError;

/// Server configuration loaded explicitly from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<SocketAddr>,
}

impl Config {
    /// Optional:
    /// - `MCP_TCP_LISTEN_ADDR`: e.g. "127.0.0.1:7400" (omit to serve on stdio)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let tcp_listen_addr = match var("MCP_TCP_LISTEN_ADDR").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<SocketAddr>().map_err(|e| {
                AppError::Config(format!(
                    "MCP_TCP_LISTEN_ADDR must be a socket address like 127.0.0.1:7400, got '{raw}': {e}"
                ))
            })?),
            None => None,
        };

        Ok(Self { tcp_listen_addr })
    }
}
