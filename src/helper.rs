//! Helper utilities for Sockdial
//!
//! This module provides common utility functions used throughout the application.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

/// Default proxy address (a local Tor daemon)
pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1";

/// Default proxy port (Tor's SOCKS port)
pub const DEFAULT_PROXY_PORT: u16 = 9050;

/// Parse duration from seconds
pub fn duration_from_secs(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

/// Relay between a tunnel and a local input/output pair
///
/// `input` is copied into the tunnel; when it ends the tunnel's write side is
/// shut down and the remaining tunnel data is still drained into `output`.
/// Returns as soon as the remote side closes the tunnel.
pub async fn relay<S, R, W>(tunnel: S, mut input: R, mut output: W) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut tunnel_rd, mut tunnel_wr) = tokio::io::split(tunnel);

    let downstream = async {
        let received = tokio::io::copy(&mut tunnel_rd, &mut output).await?;
        output.flush().await?;
        Ok::<u64, std::io::Error>(received)
    };
    tokio::pin!(downstream);

    let upstream = async {
        let sent = tokio::io::copy(&mut input, &mut tunnel_wr).await?;
        tunnel_wr.shutdown().await?;
        Ok::<u64, std::io::Error>(sent)
    };

    tokio::select! {
        sent = upstream => {
            let sent = sent?;
            let received = downstream.await?;
            tracing::debug!("Relay finished: {} bytes sent, {} bytes received", sent, received);
        }
        received = &mut downstream => {
            tracing::debug!("Tunnel closed by remote after {} bytes", received?);
        }
    }

    Ok(())
}
