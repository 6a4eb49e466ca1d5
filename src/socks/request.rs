//! CONNECT request and reply
//!
//! Sends the destination as a domain name and consumes the proxy's reply up
//! to the last byte of the bound address, so the stream is left at the start
//! of tunneled data.

use super::consts::*;
use super::io::{recv_all, recv_vec, send_all};
use super::types::{BoundAddr, TargetAddr};
use crate::error::{Error, Result, Socks5Error};
use tokio::io::{AsyncRead, AsyncWrite};

/// Build a CONNECT request for `target`
///
/// ```text
/// +----+-----+-------+------+----------+----------+
/// |VER | CMD |  RSV  | ATYP | DST.ADDR | DST.PORT |
/// +----+-----+-------+------+----------+----------+
/// | 1  |  1  | X'00' |  1   | Variable |    2     |
/// +----+-----+-------+------+----------+----------+
/// ```
pub fn encode_connect_request(target: &TargetAddr) -> Vec<u8> {
    let host = target.host();

    let mut request = Vec::with_capacity(4 + 1 + host.as_bytes().len() + 2);
    request.extend_from_slice(&[
        SOCKS5_VERSION,
        SOCKS5_CMD_TCP_CONNECT,
        SOCKS5_RESERVED,
        SOCKS5_ADDR_TYPE_DOMAIN,
    ]);
    host.write_prefixed(&mut request);
    request.extend_from_slice(&target.port().to_be_bytes());
    request
}

/// Ask the proxy to connect to `target`
///
/// Returns the bound address from the reply once it has been fully read.
pub async fn connect<S>(stream: &mut S, target: &TargetAddr) -> Result<BoundAddr>
where
    S: AsyncRead + AsyncWrite + Unpin + ?Sized,
{
    let request = encode_connect_request(target);
    send_all(stream, &request).await?;

    let bound = read_reply(stream).await?;
    tracing::debug!("Proxy connected to {} via {}", target, bound);
    Ok(bound)
}

/// Read and validate a CONNECT reply
///
/// ```text
/// +----+-----+-------+------+----------+----------+
/// |VER | REP |  RSV  | ATYP | BND.ADDR | BND.PORT |
/// +----+-----+-------+------+----------+----------+
/// | 1  |  1  | X'00' |  1   | Variable |    2     |
/// +----+-----+-------+------+----------+----------+
/// ```
pub async fn read_reply<S>(stream: &mut S) -> Result<BoundAddr>
where
    S: AsyncRead + Unpin + ?Sized,
{
    let mut header = [0u8; 4];
    recv_all(stream, &mut header).await?;

    let [version, reply, reserved, addr_type] = header;

    if version != SOCKS5_VERSION {
        return Err(Socks5Error::UnsupportedVersion(version).into());
    }

    // All failure codes are treated alike; the raw value is kept for diagnostics
    if reply != SOCKS5_REPLY_SUCCEEDED {
        return Err(Error::ConnectRejected { code: reply });
    }

    if reserved != SOCKS5_RESERVED {
        return Err(Socks5Error::NonZeroReserved(reserved).into());
    }

    read_bound_addr(stream, addr_type).await
}

/// Drain BND.ADDR and BND.PORT for the given address type
async fn read_bound_addr<S>(stream: &mut S, addr_type: u8) -> Result<BoundAddr>
where
    S: AsyncRead + Unpin + ?Sized,
{
    match addr_type {
        SOCKS5_ADDR_TYPE_IPV4 => {
            let mut addr = [0u8; 4];
            recv_all(stream, &mut addr).await?;
            let port = read_port(stream).await?;

            Ok(BoundAddr::ipv4(addr, port))
        }

        SOCKS5_ADDR_TYPE_DOMAIN => {
            let mut len_buf = [0u8; 1];
            recv_all(stream, &mut len_buf).await?;

            let domain = recv_vec(stream, len_buf[0] as usize).await?;
            let port = read_port(stream).await?;

            Ok(BoundAddr::Domain(
                String::from_utf8_lossy(&domain).into_owned(),
                port,
            ))
        }

        SOCKS5_ADDR_TYPE_IPV6 => {
            let mut addr = [0u8; 16];
            recv_all(stream, &mut addr).await?;
            let port = read_port(stream).await?;

            Ok(BoundAddr::ipv6(addr, port))
        }

        _ => Err(Socks5Error::AddressTypeNotSupported(addr_type).into()),
    }
}

async fn read_port<S>(stream: &mut S) -> Result<u16>
where
    S: AsyncRead + Unpin + ?Sized,
{
    let mut port_buf = [0u8; 2];
    recv_all(stream, &mut port_buf).await?;
    Ok(u16::from_be_bytes(port_buf))
}
