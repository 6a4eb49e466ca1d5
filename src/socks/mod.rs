//! SOCKS5 client protocol
//!
//! The three client steps of RFC 1928/1929 (method negotiation,
//! username/password authentication, CONNECT) built on full-buffer I/O.

mod auth;
mod consts;
mod greeting;
mod io;
mod request;
mod types;

pub use auth::{authenticate, encode_auth_request};
pub use consts::*;
pub use greeting::{negotiate_method, GREETING};
pub use io::{recv_all, recv_vec, send_all};
pub use request::{connect, encode_connect_request, read_reply};
pub use types::{parse_port, BoundAddr, Credentials, TargetAddr, WireBytes};
