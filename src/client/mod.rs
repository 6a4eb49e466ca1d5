//! Client module for Sockdial
//!
//! Sequences proxy connection, method negotiation, authentication and the
//! CONNECT request into a single operation that either yields a ready
//! tunnel or an [`Error`](crate::error::Error) with nothing left open.

mod connector;
mod handshake;

pub use connector::Connector;
pub use handshake::handshake;

use crate::error::Result;
use crate::socks::{Credentials, TargetAddr};
use crate::transport::ProxyEndpoint;
use tokio::net::TcpStream;

/// Connect to `dest_host:dest_port` through the SOCKS5 proxy at
/// `proxy_host:proxy_port`, authenticating with `username`/`password`
///
/// All arguments are raw text. Every one of them is validated before a
/// socket is opened; the destination host is resolved by the proxy.
///
/// ```rust,ignore
/// let stream = sockdial::connect_via_proxy(
///     "example.com", "80", "127.0.0.1", "9050", "alice", "s3cr3t",
/// ).await?;
/// ```
pub async fn connect_via_proxy(
    dest_host: impl AsRef<[u8]>,
    dest_port: impl AsRef<[u8]>,
    proxy_host: impl AsRef<[u8]>,
    proxy_port: impl AsRef<[u8]>,
    username: impl AsRef<[u8]>,
    password: impl AsRef<[u8]>,
) -> Result<TcpStream> {
    let target = TargetAddr::parse(dest_host.as_ref(), dest_port.as_ref())?;
    let endpoint = ProxyEndpoint::parse(proxy_host.as_ref(), proxy_port.as_ref())?;
    let credentials = Credentials::new(username.as_ref(), password.as_ref())?;

    Connector::new(endpoint, credentials).connect(&target).await
}
