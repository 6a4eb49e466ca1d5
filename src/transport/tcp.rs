//! TCP transport implementation
//!
//! Provides the plain TCP connection to the proxy.

use super::{ProxyEndpoint, SocketOpts};
use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use std::time::Duration;
use tokio::net::TcpStream;

/// TCP transport for plain connections
#[derive(Debug, Clone)]
pub struct TcpTransport {
    /// Socket options to apply to connections
    socket_opts: SocketOpts,
    /// Connection timeout; `None` waits as long as the OS does
    connect_timeout: Option<Duration>,
}

impl TcpTransport {
    /// Create a new TCP transport with default options and no timeout
    pub fn with_defaults() -> Self {
        TcpTransport {
            socket_opts: SocketOpts::default(),
            connect_timeout: None,
        }
    }

    /// Create a transport from proxy configuration
    pub fn from_config(config: &ProxyConfig) -> Self {
        TcpTransport {
            socket_opts: SocketOpts::from_tcp_config(&config.tcp),
            connect_timeout: config.connect_timeout(),
        }
    }

    /// Set socket options
    pub fn with_socket_opts(mut self, opts: SocketOpts) -> Self {
        self.socket_opts = opts;
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Connect to the proxy
    ///
    /// A socket that fails to connect, or rejects the configured socket
    /// options, is closed before the error is returned.
    pub async fn connect(&self, endpoint: &ProxyEndpoint) -> Result<TcpStream> {
        let addr = endpoint.socket_addr();

        let stream = match self.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, TcpStream::connect(addr))
                .await
                .map_err(|_| Error::Timeout("connecting to proxy"))??,
            None => TcpStream::connect(addr).await?,
        };

        self.socket_opts.apply(&stream)?;

        tracing::debug!("TCP connection established to proxy {}", endpoint);

        Ok(stream)
    }
}
