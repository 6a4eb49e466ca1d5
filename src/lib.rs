//! # Sockdial - SOCKS5 client dialer
//!
//! Sockdial opens TCP connections to remote destinations through a SOCKS5
//! proxy such as a local Tor daemon. It performs method negotiation,
//! username/password authentication (RFC 1929) and a CONNECT request
//! (RFC 1928), then hands back a stream positioned at the first byte of
//! tunneled data.
//!
//! ## Features
//!
//! - **Proxy-side resolution**: destinations are always sent as domain names
//! - **Per-connection credentials**: useful for Tor stream isolation
//! - **Tagged errors**: input, transport, protocol, authentication and
//!   remote refusal failures are distinguishable
//! - **Async and blocking APIs**: tokio-based, with a blocking wrapper
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tokio::io::{AsyncReadExt, AsyncWriteExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut stream = sockdial::connect_via_proxy(
//!         "example.com", "80", "127.0.0.1", "9050", "alice", "s3cr3t",
//!     )
//!     .await?;
//!
//!     stream.write_all(b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n").await?;
//!     let mut response = Vec::new();
//!     stream.read_to_end(&mut response).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! connect_via_proxy
//!   -> transport (TCP to proxy)
//!   -> socks::negotiate_method -> socks::authenticate -> socks::connect
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod helper;
pub mod socks;
pub mod transport;

// Re-export commonly used items
pub use client::{connect_via_proxy, handshake, Connector};
pub use config::{load_config, Config, ProxyConfig};
pub use error::{Error, ErrorKind, Result};
pub use socks::{Credentials, TargetAddr};
pub use transport::ProxyEndpoint;

/// Version of the Sockdial library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the application
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "sockdial");
    }
}
