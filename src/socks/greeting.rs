//! Method negotiation
//!
//! Offers username/password as the only authentication method.

use super::consts::*;
use super::io::{recv_all, send_all};
use crate::error::{Result, Socks5Error};
use tokio::io::{AsyncRead, AsyncWrite};

/// Greeting sent to the proxy: version, one method, username/password
pub const GREETING: [u8; 3] = [SOCKS5_VERSION, 1, SOCKS5_AUTH_METHOD_PASSWORD];

/// Negotiate the authentication method
///
/// ```text
/// +----+----------+----------+      +----+--------+
/// |VER | NMETHODS | METHODS  |  ->  |VER | METHOD |
/// +----+----------+----------+      +----+--------+
/// | 1  |    1     | 1 to 255 |      | 1  |   1    |
/// +----+----------+----------+      +----+--------+
/// ```
///
/// Succeeds only when the proxy echoes version 5 and selects method 0x02.
pub async fn negotiate_method<S>(stream: &mut S) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + ?Sized,
{
    send_all(stream, &GREETING).await?;

    let mut reply = [0u8; 2];
    recv_all(stream, &mut reply).await?;

    let [version, method] = reply;
    if version != SOCKS5_VERSION {
        return Err(Socks5Error::UnsupportedVersion(version).into());
    }

    match method {
        SOCKS5_AUTH_METHOD_PASSWORD => {
            tracing::debug!("Proxy selected username/password authentication");
            Ok(())
        }
        SOCKS5_AUTH_METHOD_NOT_ACCEPTABLE => Err(Socks5Error::NoAcceptableMethod.into()),
        other => Err(Socks5Error::UnexpectedMethod(other).into()),
    }
}
