//! Proxy endpoint parsing
//!
//! The proxy is addressed by a numeric IPv4 address and port given as text.
//! No name resolution is ever performed here.

use crate::error::InputError;
use crate::socks::parse_port;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Numeric IPv4 address and port of a SOCKS5 proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyEndpoint {
    addr: SocketAddrV4,
}

impl ProxyEndpoint {
    /// Create an endpoint from already parsed parts
    pub fn new(ip: Ipv4Addr, port: u16) -> Result<Self, InputError> {
        if port == 0 {
            return Err(InputError::ZeroPort {
                field: "proxy port",
            });
        }
        Ok(ProxyEndpoint {
            addr: SocketAddrV4::new(ip, port),
        })
    }

    /// Parse a dotted-decimal IPv4 address and decimal port text
    pub fn parse(host: &[u8], port: &[u8]) -> Result<Self, InputError> {
        let invalid = || InputError::InvalidProxyAddr(String::from_utf8_lossy(host).into_owned());

        let ip = std::str::from_utf8(host)
            .map_err(|_| invalid())?
            .parse::<Ipv4Addr>()
            .map_err(|_| invalid())?;
        let port = parse_port("proxy port", port)?;

        Self::new(ip, port.get())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(self.addr)
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

impl TryFrom<SocketAddrV4> for ProxyEndpoint {
    type Error = InputError;

    fn try_from(addr: SocketAddrV4) -> Result<Self, Self::Error> {
        Self::new(*addr.ip(), addr.port())
    }
}
