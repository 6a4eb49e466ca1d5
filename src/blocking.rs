//! Blocking API
//!
//! Runs the handshake on a private current-thread runtime and returns a
//! plain blocking [`std::net::TcpStream`]. Must not be called from within an
//! async context.

use crate::client::Connector;
use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use crate::socks::{Credentials, TargetAddr};
use crate::transport::ProxyEndpoint;
use std::net::TcpStream;
use std::time::Duration;

/// Blocking version of [`crate::connect_via_proxy`]
///
/// Blocks the calling thread until the tunnel is open or the attempt failed.
/// Without configured timeouts a silent proxy blocks indefinitely.
pub fn connect_via_proxy(
    dest_host: impl AsRef<[u8]>,
    dest_port: impl AsRef<[u8]>,
    proxy_host: impl AsRef<[u8]>,
    proxy_port: impl AsRef<[u8]>,
    username: impl AsRef<[u8]>,
    password: impl AsRef<[u8]>,
) -> Result<TcpStream> {
    let target = TargetAddr::parse(dest_host.as_ref(), dest_port.as_ref())?;
    let endpoint = ProxyEndpoint::parse(proxy_host.as_ref(), proxy_port.as_ref())?;
    let credentials = Credentials::new(username.as_ref(), password.as_ref())?;

    connect(&Connector::new(endpoint, credentials), &target)
}

/// Open a tunnel using proxy configuration
pub fn connect_with_config(config: &ProxyConfig, target: &TargetAddr) -> Result<TcpStream> {
    connect(&Connector::from_config(config)?, target)
}

fn connect(connector: &Connector, target: &TargetAddr) -> Result<TcpStream> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let stream = connector.connect(target).await?;
        let stream = stream.into_std()?;
        stream.set_nonblocking(false)?;
        Ok::<_, Error>(stream)
    })
}

/// Set read and write timeouts on a tunnel returned by this module
pub fn set_io_timeout(stream: &TcpStream, timeout: Option<Duration>) -> Result<()> {
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn mock_proxy(listener: TcpListener) -> thread::JoinHandle<Vec<u8>> {
        thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();

            let mut greeting = [0u8; 3];
            socket.read_exact(&mut greeting).unwrap();
            socket.write_all(&[0x05, 0x02]).unwrap();

            let mut auth = [0u8; 1 + 1 + 5 + 1 + 6];
            socket.read_exact(&mut auth).unwrap();
            socket.write_all(&[0x01, 0x00]).unwrap();

            let mut request = [0u8; 4 + 1 + 11 + 2];
            socket.read_exact(&mut request).unwrap();
            socket
                .write_all(&[0x05, 0x00, 0x00, 0x01, 127, 0, 0, 1, 0x1F, 0x90])
                .unwrap();
            socket.write_all(b"welcome").unwrap();

            let mut echo = [0u8; 4];
            socket.read_exact(&mut echo).unwrap();
            echo.to_vec()
        })
    }

    #[test]
    fn test_blocking_connect_via_proxy() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        let proxy = mock_proxy(listener);

        let mut stream =
            connect_via_proxy("example.com", "80", "127.0.0.1", &port, "alice", "s3cr3t").unwrap();
        set_io_timeout(&stream, Some(Duration::from_secs(5))).unwrap();

        let mut banner = [0u8; 7];
        stream.read_exact(&mut banner).unwrap();
        assert_eq!(&banner, b"welcome");

        stream.write_all(b"ping").unwrap();
        assert_eq!(proxy.join().unwrap(), b"ping");
    }

    #[test]
    fn test_blocking_rejects_invalid_input() {
        let err = connect_via_proxy("", "80", "127.0.0.1", "9050", "alice", "s3cr3t").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_blocking_connect_with_config_requires_credentials() {
        let target = TargetAddr::parse("example.com", b"80").unwrap();
        let err = connect_with_config(&ProxyConfig::default(), &target).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
