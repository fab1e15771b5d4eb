/*
[INPUT]:  HTTP configuration (timeouts) and a tokio runtime handle
[OUTPUT]: Shared reqwest client plus the runtime requests are executed on
[POS]:    HTTP layer - transport shared by every request
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

use crate::http::{Error, Result};

/// Base URL of the public Coinpaprika API
pub const DEFAULT_BASE_URL: &str = "https://api.coinpaprika.com/v1/";

/// HTTP transport configuration.
///
/// Unset timeouts leave reqwest's defaults in place (no total timeout).
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

/// Process-wide HTTP transport.
///
/// Cloning is cheap: clones share the same connection pool and runtime.
#[derive(Debug, Clone)]
pub struct Transport {
    http_client: Client,
    handle: Handle,
}

impl Transport {
    /// Create a transport with default configuration on the current runtime
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration on the current runtime
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|err| Error::Config(format!("no tokio runtime available: {err}")))?;
        Self::with_handle(config, handle)
    }

    /// Create a transport that executes requests on an explicit runtime
    pub fn with_handle(config: TransportConfig, handle: Handle) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder
            .build()
            .map_err(|err| Error::Config(format!("failed to build http client: {err}")))?;

        debug!(
            timeout_ms = config.timeout.map(|timeout| timeout.as_millis() as u64),
            connect_timeout_ms = config.connect_timeout.map(|timeout| timeout.as_millis() as u64),
            "http transport created"
        );

        Ok(Self {
            http_client,
            handle,
        })
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// Runtime that network exchanges are spawned on
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_requires_runtime() {
        match Transport::new() {
            Err(Error::Config(msg)) => assert!(msg.contains("tokio runtime")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_on_current_runtime() {
        let transport = Transport::new();
        assert!(transport.is_ok());
    }

    #[test]
    fn test_transport_with_explicit_handle() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let transport = Transport::with_handle(TransportConfig::default(), runtime.handle().clone());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_default_config_sets_no_timeouts() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.connect_timeout, None);
    }
}
