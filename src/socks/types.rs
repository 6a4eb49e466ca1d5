//! SOCKS5 type definitions
//!
//! Length-checked wire fields and the addresses exchanged with the proxy.

use super::consts::MAX_FIELD_LEN;
use crate::error::InputError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::num::NonZeroU16;

/// Byte string that fits a SOCKS5 one-byte length prefix
///
/// The length is checked on construction to lie in `1..=255`, so a value of
/// this type can always be written as `<len:1> <bytes>`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WireBytes(Vec<u8>);

impl WireBytes {
    /// Validate `bytes` as the field called `field`
    pub fn new(field: &'static str, bytes: impl Into<Vec<u8>>) -> Result<Self, InputError> {
        let bytes = bytes.into();
        match bytes.len() {
            0 => Err(InputError::Empty { field }),
            len if len > MAX_FIELD_LEN => Err(InputError::TooLong { field, len }),
            _ => Ok(WireBytes(bytes)),
        }
    }

    /// Raw bytes, without the length prefix
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The length prefix byte
    pub fn len_byte(&self) -> u8 {
        // Bounded by MAX_FIELD_LEN in `new`
        self.0.len() as u8
    }

    /// Append `<len:1> <bytes>` to `buf`
    pub fn write_prefixed(&self, buf: &mut Vec<u8>) {
        buf.push(self.len_byte());
        buf.extend_from_slice(&self.0);
    }
}

impl fmt::Debug for WireBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for WireBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Parse decimal port text into a nonzero port number
pub fn parse_port(field: &'static str, text: &[u8]) -> Result<NonZeroU16, InputError> {
    let invalid = || InputError::InvalidPort {
        field,
        value: String::from_utf8_lossy(text).into_owned(),
    };

    if text.is_empty() || !text.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let port = std::str::from_utf8(text)
        .map_err(|_| invalid())?
        .parse::<u16>()
        .map_err(|_| invalid())?;

    NonZeroU16::new(port).ok_or(InputError::ZeroPort { field })
}

/// Username/password pair for RFC 1929 authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: WireBytes,
    password: WireBytes,
}

impl Credentials {
    /// Validate a username and password
    pub fn new(
        username: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
    ) -> Result<Self, InputError> {
        Ok(Credentials {
            username: WireBytes::new("username", username)?,
            password: WireBytes::new("password", password)?,
        })
    }

    /// The username
    pub fn username(&self) -> &WireBytes {
        &self.username
    }

    /// The password
    pub fn password(&self) -> &WireBytes {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Destination of a CONNECT request
///
/// The host is always sent as a domain name (ATYP 0x03) and left for the
/// proxy to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAddr {
    host: WireBytes,
    port: NonZeroU16,
}

impl TargetAddr {
    /// Create a target from a hostname and a numeric port
    pub fn new(host: impl Into<Vec<u8>>, port: u16) -> Result<Self, InputError> {
        let host = WireBytes::new("hostname", host)?;
        let port = NonZeroU16::new(port).ok_or(InputError::ZeroPort {
            field: "destination port",
        })?;
        Ok(TargetAddr { host, port })
    }

    /// Create a target from a hostname and decimal port text
    pub fn parse(host: impl Into<Vec<u8>>, port: &[u8]) -> Result<Self, InputError> {
        let host = WireBytes::new("hostname", host)?;
        let port = parse_port("destination port", port)?;
        Ok(TargetAddr { host, port })
    }

    /// The hostname
    pub fn host(&self) -> &WireBytes {
        &self.host
    }

    /// The port number
    pub fn port(&self) -> u16 {
        self.port.get()
    }
}

impl fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Address the proxy reports it used to reach the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundAddr {
    /// IP address with port
    Ip(SocketAddr),
    /// Domain name with port
    Domain(String, u16),
}

impl BoundAddr {
    /// Create from an IPv4 address and port
    pub fn ipv4(octets: [u8; 4], port: u16) -> Self {
        BoundAddr::Ip(SocketAddr::new(IpAddr::V4(Ipv4Addr::from(octets)), port))
    }

    /// Create from an IPv6 address and port
    pub fn ipv6(octets: [u8; 16], port: u16) -> Self {
        BoundAddr::Ip(SocketAddr::new(IpAddr::V6(Ipv6Addr::from(octets)), port))
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        match self {
            BoundAddr::Ip(addr) => addr.port(),
            BoundAddr::Domain(_, port) => *port,
        }
    }
}

impl fmt::Display for BoundAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundAddr::Ip(addr) => write!(f, "{}", addr),
            BoundAddr::Domain(domain, port) => write!(f, "{}:{}", domain, port),
        }
    }
}
