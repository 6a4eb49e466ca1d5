//! Client configuration types
//!
//! Defines where the SOCKS5 proxy lives and how to authenticate with it.

use super::TcpConfig;
use crate::error::{Error, Result};
use crate::helper::{duration_from_secs, DEFAULT_PROXY_ADDR, DEFAULT_PROXY_PORT};
use crate::socks::Credentials;
use crate::transport::ProxyEndpoint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Proxy configuration
    #[serde(default)]
    pub proxy: ProxyConfig,
}

/// Default proxy address
fn default_proxy_addr() -> String {
    DEFAULT_PROXY_ADDR.to_string()
}

/// Default proxy port
fn default_proxy_port() -> u16 {
    DEFAULT_PROXY_PORT
}

/// SOCKS5 proxy configuration
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Numeric IPv4 address of the proxy (e.g., "127.0.0.1")
    #[serde(default = "default_proxy_addr")]
    pub addr: String,

    /// Proxy port
    #[serde(default = "default_proxy_port")]
    pub port: u16,

    /// Username for SOCKS5 auth
    #[serde(default)]
    pub username: Option<String>,

    /// Password for SOCKS5 auth
    #[serde(default)]
    pub password: Option<String>,

    /// Connect timeout in seconds; unbounded when unset
    #[serde(default)]
    pub connect_timeout: Option<u64>,

    /// Timeout for the whole SOCKS5 handshake in seconds; unbounded when unset
    #[serde(default)]
    pub handshake_timeout: Option<u64>,

    /// Socket options for the proxy connection
    #[serde(default)]
    pub tcp: TcpConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            addr: default_proxy_addr(),
            port: default_proxy_port(),
            username: None,
            password: None,
            connect_timeout: None,
            handshake_timeout: None,
            tcp: TcpConfig::default(),
        }
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("addr", &self.addr)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .field("handshake_timeout", &self.handshake_timeout)
            .field("tcp", &self.tcp)
            .finish()
    }
}

impl ProxyConfig {
    /// Check if authentication credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Parse the proxy endpoint
    pub fn endpoint(&self) -> Result<ProxyEndpoint> {
        let port = self.port.to_string();
        Ok(ProxyEndpoint::parse(self.addr.as_bytes(), port.as_bytes())?)
    }

    /// Build validated credentials
    pub fn credentials(&self) -> Result<Credentials> {
        let username = self
            .username
            .as_ref()
            .ok_or_else(|| Error::Config("Username not configured".to_string()))?;
        let password = self
            .password
            .as_ref()
            .ok_or_else(|| Error::Config("Password not configured".to_string()))?;

        Ok(Credentials::new(username.as_bytes(), password.as_bytes())?)
    }

    /// Connect timeout, if any
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(duration_from_secs)
    }

    /// Handshake timeout, if any
    pub fn handshake_timeout(&self) -> Option<Duration> {
        self.handshake_timeout.map(duration_from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.endpoint()?;
        self.credentials()?;
        Ok(())
    }
}
