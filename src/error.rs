//! Error types for Sockdial
//!
//! Every failure of a proxied connect is reported through [`Error`], which
//! keeps input validation, transport, protocol, authentication and remote
//! refusal failures apart so callers can branch on them.

use std::io;
use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for Sockdial operations
#[derive(Error, Debug)]
pub enum Error {
    /// A caller supplied value cannot be sent on the wire
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// IO error on the proxy socket
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The proxy answered with something RFC 1928/1929 does not allow here
    #[error("SOCKS5 protocol error: {0}")]
    Protocol(#[from] Socks5Error),

    /// Username/password subnegotiation completed with a failure status
    #[error("Authentication failed (status {status:#04x})")]
    AuthFailed {
        /// Status byte returned by the proxy
        status: u8,
    },

    /// The proxy could not open the requested connection
    #[error("Connect request rejected: {} ({code:#04x})", reply_reason(.code))]
    ConnectRejected {
        /// Raw REP field of the CONNECT reply
        code: u8,
    },

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network activity
    InvalidInput,
    /// Socket creation, connect, send or receive failed
    Transport,
    /// Unexpected wire value from the proxy
    Protocol,
    /// Credentials were refused
    AuthFailed,
    /// The destination could not be reached through the proxy
    RemoteRefusal,
    /// A configured deadline expired
    Timeout,
    /// Configuration could not be used
    Config,
}

impl Error {
    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Io(_) => ErrorKind::Transport,
            Error::Protocol(_) => ErrorKind::Protocol,
            Error::AuthFailed { .. } => ErrorKind::AuthFailed,
            Error::ConnectRejected { .. } => ErrorKind::RemoteRefusal,
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// Decode the reply code of a rejected CONNECT, if it is one RFC 1928 defines
    pub fn reply_code(&self) -> Option<Socks5ReplyCode> {
        match self {
            Error::ConnectRejected { code } => Socks5ReplyCode::try_from(*code).ok(),
            _ => None,
        }
    }
}

/// Input validation errors, detected before any socket is opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Zero-length field
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the offending field
        field: &'static str,
    },

    /// Field does not fit a one-byte length prefix
    #[error("{field} is {len} bytes long, at most 255 allowed")]
    TooLong {
        /// Name of the offending field
        field: &'static str,
        /// Actual length in bytes
        len: usize,
    },

    /// Port text is not a decimal 16-bit number
    #[error("Invalid {field}: {value:?}")]
    InvalidPort {
        /// Name of the offending field
        field: &'static str,
        /// The text as given (lossily decoded)
        value: String,
    },

    /// Port zero
    #[error("{field} must be nonzero")]
    ZeroPort {
        /// Name of the offending field
        field: &'static str,
    },

    /// Proxy address is not dotted-decimal IPv4
    #[error("Proxy address is not a numeric IPv4 address: {0:?}")]
    InvalidProxyAddr(String),
}

/// SOCKS5 protocol violations observed on the client side
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Socks5Error {
    /// Unsupported SOCKS version
    #[error("Unsupported SOCKS version: {0}")]
    UnsupportedVersion(u8),

    /// No acceptable authentication method
    #[error("No acceptable authentication method")]
    NoAcceptableMethod,

    /// Proxy picked a method that was never offered
    #[error("Proxy selected a method that was not offered: {0:#04x}")]
    UnexpectedMethod(u8),

    /// Wrong username/password subnegotiation version
    #[error("Unsupported auth subnegotiation version: {0}")]
    InvalidAuthVersion(u8),

    /// Reserved byte of the reply was not zero
    #[error("Reserved byte must be zero, got {0:#04x}")]
    NonZeroReserved(u8),

    /// Address type not supported
    #[error("Address type not supported: {0}")]
    AddressTypeNotSupported(u8),
}

/// Reply codes for SOCKS5 protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Socks5ReplyCode {
    /// Command succeeded
    Succeeded = 0x00,
    /// General SOCKS server failure
    GeneralFailure = 0x01,
    /// Connection not allowed by ruleset
    ConnectionNotAllowed = 0x02,
    /// Network unreachable
    NetworkUnreachable = 0x03,
    /// Host unreachable
    HostUnreachable = 0x04,
    /// Connection refused
    ConnectionRefused = 0x05,
    /// TTL expired
    TtlExpired = 0x06,
    /// Command not supported
    CommandNotSupported = 0x07,
    /// Address type not supported
    AddressTypeNotSupported = 0x08,
}

impl From<Socks5ReplyCode> for u8 {
    fn from(code: Socks5ReplyCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for Socks5ReplyCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Socks5ReplyCode::Succeeded),
            0x01 => Ok(Socks5ReplyCode::GeneralFailure),
            0x02 => Ok(Socks5ReplyCode::ConnectionNotAllowed),
            0x03 => Ok(Socks5ReplyCode::NetworkUnreachable),
            0x04 => Ok(Socks5ReplyCode::HostUnreachable),
            0x05 => Ok(Socks5ReplyCode::ConnectionRefused),
            0x06 => Ok(Socks5ReplyCode::TtlExpired),
            0x07 => Ok(Socks5ReplyCode::CommandNotSupported),
            0x08 => Ok(Socks5ReplyCode::AddressTypeNotSupported),
            other => Err(other),
        }
    }
}

impl Socks5ReplyCode {
    /// Human readable text of the code
    pub fn as_str(self) -> &'static str {
        match self {
            Socks5ReplyCode::Succeeded => "succeeded",
            Socks5ReplyCode::GeneralFailure => "general SOCKS server failure",
            Socks5ReplyCode::ConnectionNotAllowed => "connection not allowed by ruleset",
            Socks5ReplyCode::NetworkUnreachable => "network unreachable",
            Socks5ReplyCode::HostUnreachable => "host unreachable",
            Socks5ReplyCode::ConnectionRefused => "connection refused",
            Socks5ReplyCode::TtlExpired => "TTL expired",
            Socks5ReplyCode::CommandNotSupported => "command not supported",
            Socks5ReplyCode::AddressTypeNotSupported => "address type not supported",
        }
    }
}

fn reply_reason(code: &u8) -> &'static str {
    Socks5ReplyCode::try_from(*code)
        .map(Socks5ReplyCode::as_str)
        .unwrap_or("unassigned reply code")
}
