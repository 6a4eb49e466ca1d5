//! Reusable proxy connector
//!
//! Holds a validated proxy endpoint and credentials so any number of
//! independent tunnels can be opened through the same proxy.

use super::handshake::handshake;
use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use crate::socks::{Credentials, TargetAddr};
use crate::transport::{ProxyEndpoint, TcpTransport};
use std::time::Duration;
use tokio::net::TcpStream;

/// Opens tunnels through one SOCKS5 proxy
#[derive(Debug, Clone)]
pub struct Connector {
    endpoint: ProxyEndpoint,
    credentials: Credentials,
    transport: TcpTransport,
    handshake_timeout: Option<Duration>,
}

impl Connector {
    /// Create a connector with default socket options and no timeouts
    pub fn new(endpoint: ProxyEndpoint, credentials: Credentials) -> Self {
        Connector {
            endpoint,
            credentials,
            transport: TcpTransport::with_defaults(),
            handshake_timeout: None,
        }
    }

    /// Create a connector from configuration
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        Ok(Connector {
            endpoint: config.endpoint()?,
            credentials: config.credentials()?,
            transport: TcpTransport::from_config(config),
            handshake_timeout: config.handshake_timeout(),
        })
    }

    /// Replace the transport
    pub fn with_transport(mut self, transport: TcpTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Bound the SOCKS5 handshake
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }

    /// The proxy this connector dials
    pub fn endpoint(&self) -> &ProxyEndpoint {
        &self.endpoint
    }

    /// Open a tunnel to `target`
    ///
    /// The returned stream has completed the handshake and carries only
    /// application data. Any failure closes the proxy connection.
    pub async fn connect(&self, target: &TargetAddr) -> Result<TcpStream> {
        let result = self.establish(target).await;

        match &result {
            Ok(_) => tracing::info!("Tunnel to {} open via {}", target, self.endpoint),
            Err(e) => tracing::warn!("Tunnel to {} via {} failed: {}", target, self.endpoint, e),
        }

        result
    }

    async fn establish(&self, target: &TargetAddr) -> Result<TcpStream> {
        let stream = self.transport.connect(&self.endpoint).await?;
        let session = handshake(stream, &self.credentials, target);

        match self.handshake_timeout {
            Some(timeout) => tokio::time::timeout(timeout, session)
                .await
                .map_err(|_| Error::Timeout("SOCKS5 handshake"))?,
            None => session.await,
        }
    }
}
