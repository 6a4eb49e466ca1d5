//! Username/password authentication
//!
//! Implements the client side of RFC 1929.

use super::consts::*;
use super::io::{recv_all, send_all};
use super::types::Credentials;
use crate::error::{Error, Result, Socks5Error};
use tokio::io::{AsyncRead, AsyncWrite};

/// Build the subnegotiation request
///
/// ```text
/// +----+------+----------+------+----------+
/// |VER | ULEN |  UNAME   | PLEN |  PASSWD  |
/// +----+------+----------+------+----------+
/// | 1  |  1   | 1 to 255 |  1   | 1 to 255 |
/// +----+------+----------+------+----------+
/// ```
pub fn encode_auth_request(credentials: &Credentials) -> Vec<u8> {
    let username = credentials.username();
    let password = credentials.password();

    let mut request = Vec::with_capacity(3 + username.as_bytes().len() + password.as_bytes().len());
    request.push(SOCKS5_AUTH_VERSION);
    username.write_prefixed(&mut request);
    password.write_prefixed(&mut request);
    request
}

/// Authenticate with username and password
///
/// The proxy answers with `VER STATUS`; any nonzero status is an
/// authentication failure and is never retried.
pub async fn authenticate<S>(stream: &mut S, credentials: &Credentials) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + ?Sized,
{
    let request = encode_auth_request(credentials);
    send_all(stream, &request).await?;

    let mut reply = [0u8; 2];
    recv_all(stream, &mut reply).await?;

    let [version, status] = reply;
    if version != SOCKS5_AUTH_VERSION {
        return Err(Socks5Error::InvalidAuthVersion(version).into());
    }

    if status != SOCKS5_AUTH_STATUS_SUCCESS {
        tracing::warn!(
            "Proxy rejected credentials for user {} (status {:#04x})",
            credentials.username(),
            status
        );
        return Err(Error::AuthFailed { status });
    }

    tracing::debug!("Authenticated as {}", credentials.username());
    Ok(())
}
