//! Test utilities and mocks for Sockdial
//!
//! Provides a scripted SOCKS5 proxy listening on loopback that records what
//! the client sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Create a test TCP listener on an available port
pub async fn create_test_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Build a CONNECT reply with an IPv4 bound address
pub fn reply_ipv4(rep: u8, ip: [u8; 4], port: u16) -> Vec<u8> {
    let mut reply = vec![0x05, rep, 0x00, 0x01];
    reply.extend_from_slice(&ip);
    reply.extend_from_slice(&port.to_be_bytes());
    reply
}

/// Build a CONNECT reply with a domain bound address
pub fn reply_domain(domain: &str, port: u16) -> Vec<u8> {
    let mut reply = vec![0x05, 0x00, 0x00, 0x03, domain.len() as u8];
    reply.extend_from_slice(domain.as_bytes());
    reply.extend_from_slice(&port.to_be_bytes());
    reply
}

/// Build a CONNECT reply with an IPv6 bound address
pub fn reply_ipv6(ip: [u8; 16], port: u16) -> Vec<u8> {
    let mut reply = vec![0x05, 0x00, 0x00, 0x04];
    reply.extend_from_slice(&ip);
    reply.extend_from_slice(&port.to_be_bytes());
    reply
}

/// Everything the mock proxy observed on its single connection
#[derive(Debug, Default)]
pub struct Observed {
    /// Raw greeting (VER NMETHODS METHODS)
    pub greeting: Vec<u8>,
    /// Username and password, if the client authenticated
    pub credentials: Option<(Vec<u8>, Vec<u8>)>,
    /// Raw CONNECT request, if one was sent
    pub request: Option<Vec<u8>>,
    /// Bytes received after the last scripted step, up to EOF
    pub trailing: Vec<u8>,
}

/// Scripted SOCKS5 proxy
#[derive(Debug, Clone)]
pub struct MockProxy {
    method: u8,
    auth_reply: [u8; 2],
    connect_reply: Vec<u8>,
    banner: Vec<u8>,
}

impl Default for MockProxy {
    fn default() -> Self {
        MockProxy {
            method: 0x02,
            auth_reply: [0x01, 0x00],
            connect_reply: reply_ipv4(0x00, [0, 0, 0, 0], 0),
            banner: Vec::new(),
        }
    }
}

impl MockProxy {
    /// A conformant proxy that accepts any credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Method selected in the greeting reply
    pub fn method(mut self, method: u8) -> Self {
        self.method = method;
        self
    }

    /// Status byte of the auth reply
    pub fn auth_status(mut self, status: u8) -> Self {
        self.auth_reply[1] = status;
        self
    }

    /// Version byte of the auth reply
    pub fn auth_version(mut self, version: u8) -> Self {
        self.auth_reply[0] = version;
        self
    }

    /// Full CONNECT reply
    pub fn connect_reply(mut self, reply: Vec<u8>) -> Self {
        self.connect_reply = reply;
        self
    }

    /// Tunneled data sent immediately after the CONNECT reply
    pub fn banner(mut self, banner: &[u8]) -> Self {
        self.banner = banner.to_vec();
        self
    }

    /// Listen on loopback and serve one connection
    pub async fn spawn(self) -> (SocketAddr, JoinHandle<Observed>) {
        let (listener, addr) = create_test_listener().await;
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            self.serve(socket).await
        });
        (addr, handle)
    }

    async fn serve(self, mut socket: TcpStream) -> Observed {
        let mut observed = Observed::default();

        // Greeting
        let mut header = [0u8; 2];
        socket.read_exact(&mut header).await.unwrap();
        let mut methods = vec![0u8; header[1] as usize];
        socket.read_exact(&mut methods).await.unwrap();
        observed.greeting = [&header[..], &methods[..]].concat();

        socket.write_all(&[0x05, self.method]).await.unwrap();
        if self.method != 0x02 {
            return drain(socket, observed).await;
        }

        // RFC 1929 subnegotiation
        let mut header = [0u8; 2];
        socket.read_exact(&mut header).await.unwrap();
        let mut username = vec![0u8; header[1] as usize];
        socket.read_exact(&mut username).await.unwrap();
        let mut plen = [0u8; 1];
        socket.read_exact(&mut plen).await.unwrap();
        let mut password = vec![0u8; plen[0] as usize];
        socket.read_exact(&mut password).await.unwrap();
        observed.credentials = Some((username, password));

        socket.write_all(&self.auth_reply).await.unwrap();
        if self.auth_reply != [0x01, 0x00] {
            return drain(socket, observed).await;
        }

        // CONNECT
        let mut header = [0u8; 5];
        socket.read_exact(&mut header).await.unwrap();
        let mut rest = vec![0u8; header[4] as usize + 2];
        socket.read_exact(&mut rest).await.unwrap();
        observed.request = Some([&header[..], &rest[..]].concat());

        socket.write_all(&self.connect_reply).await.unwrap();
        socket.write_all(&self.banner).await.unwrap();

        drain(socket, observed).await
    }
}

/// Read until the client closes the connection
async fn drain(mut socket: TcpStream, mut observed: Observed) -> Observed {
    let _ = socket.read_to_end(&mut observed.trailing).await;
    observed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_listener() {
        let (listener, addr) = create_test_listener().await;
        assert!(addr.port() > 0);
        drop(listener);
    }

    #[test]
    fn test_reply_builders() {
        assert_eq!(
            reply_ipv4(0x00, [127, 0, 0, 1], 80),
            vec![5, 0, 0, 1, 127, 0, 0, 1, 0, 80]
        );
        assert_eq!(reply_domain("ab", 1), vec![5, 0, 0, 3, 2, b'a', b'b', 0, 1]);
        assert_eq!(reply_ipv6([0; 16], 0).len(), 4 + 16 + 2);
    }
}
