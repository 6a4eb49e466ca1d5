//! Full-buffer I/O on the proxy stream
//!
//! All protocol steps talk to the proxy exclusively through these helpers,
//! so a partial read or write is never visible above this module.

use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Write the whole buffer and flush it
///
/// A peer that stops accepting data surfaces as an error
/// (`WriteZero`, `BrokenPipe`, ...). After a failure the number of bytes
/// already handed to the transport is unknown and the stream must be dropped.
pub async fn send_all<S>(stream: &mut S, bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin + ?Sized,
{
    stream.write_all(bytes).await?;
    stream.flush().await?;
    tracing::trace!("Sent {} bytes to proxy", bytes.len());
    Ok(())
}

/// Fill `buf` completely
///
/// End of stream before the buffer is full is reported as `UnexpectedEof`.
pub async fn recv_all<S>(stream: &mut S, buf: &mut [u8]) -> io::Result<()>
where
    S: AsyncRead + Unpin + ?Sized,
{
    stream.read_exact(buf).await?;
    tracing::trace!("Received {} bytes from proxy", buf.len());
    Ok(())
}

/// Read exactly `len` bytes into a new buffer
pub async fn recv_vec<S>(stream: &mut S, len: usize) -> io::Result<Vec<u8>>
where
    S: AsyncRead + Unpin + ?Sized,
{
    let mut buf = vec![0u8; len];
    recv_all(stream, &mut buf).await?;
    Ok(buf)
}
