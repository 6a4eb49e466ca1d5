//! Full SOCKS5 client handshake over an established stream

use crate::error::Result;
use crate::socks::{authenticate, connect, negotiate_method, Credentials, TargetAddr};
use tokio::io::{AsyncRead, AsyncWrite};

/// Run method negotiation, authentication and CONNECT in order
///
/// On success the stream is handed back positioned at the first byte of
/// tunneled data. On failure the stream is dropped, which closes it.
pub async fn handshake<S>(
    mut stream: S,
    credentials: &Credentials,
    target: &TargetAddr,
) -> Result<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    negotiate_method(&mut stream).await?;
    authenticate(&mut stream, credentials).await?;
    connect(&mut stream, target).await?;
    Ok(stream)
}
