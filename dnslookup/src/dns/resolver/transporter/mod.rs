//! # DNS Transporter
//!
//! Configuration handed to the UDP transports: which nameserver to ask, how long to
//! wait for its answer and how the query is flagged.
//!
//! ## Defaults
//!
//! - nameserver `1.1.1.1:53`
//! - timeout of 1 second
//! - recursion desired, standard query
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use dnslookup::dns::resolver::transporter::{ResolverConfig, parse_nameserver};
//!
//! let config = ResolverConfig {
//!     nameserver: parse_nameserver("8.8.8.8").unwrap(),
//!     timeout: Duration::from_secs(2),
//!     ..ResolverConfig::default()
//! };
//! assert_eq!(config.nameserver.port(), 53);
//! ```
//!
//! This module does not perform network I/O.
use crate::dns::codec::header::OpCodeOptions;
use crate::dns::message::QueryOptions;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Well-known DNS port.
pub const DNS_PORT: u16 = 53;
/// Largest datagram read from the nameserver (RFC 1035 §2.3.4, no EDNS).
pub const MAX_UDP_PAYLOAD: usize = 512;

const DEFAULT_NAMESERVER: Ipv4Addr = Ipv4Addr::new(1, 1, 1, 1);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Where and how a lookup is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub nameserver: SocketAddr,
    /// Upper bound on the wait for the single response datagram.
    pub timeout: Duration,
    pub query: QueryOptions,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            nameserver: SocketAddr::new(IpAddr::V4(DEFAULT_NAMESERVER), DNS_PORT),
            timeout: DEFAULT_TIMEOUT,
            query: QueryOptions {
                opcode: OpCodeOptions::StandardQuery,
                recursion_desired: true,
            },
        }
    }
}

/// Parses a nameserver address.
///
/// Accepts `ip:port`, `[ipv6]:port` or a bare IP address, which gets port 53.
///
/// Returns:
/// - `Ok(addr)` on success.
/// - `Err(TransporterErrors::InvalidServer)` if the input is neither form.
pub fn parse_nameserver(server: &str) -> Result<SocketAddr, TransporterErrors> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| TransporterErrors::InvalidServer(server.to_string()))
}

/// Errors that can occur when configuring the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransporterErrors {
    /// Raised when a provided server string could not be parsed into a valid [`SocketAddr`].
    #[error("The server {0} is invalid")]
    InvalidServer(String),
}
