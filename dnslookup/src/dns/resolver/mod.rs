//! # DNS Resolver
//!
//! Sends one A-record query over UDP and decodes the single response.
//!
//! ## Features
//!
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | **blocking** transport on `std::net::UdpSocket` (`resolve_ipv4`) |
//! | `tokio-dep` | **asynchronous** transport on `tokio::net::UdpSocket` (`resolve_ipv4_async`) |
//!
//! Each lookup sends one datagram to [`ResolverConfig::nameserver`], waits at most
//! [`ResolverConfig::timeout`] for one datagram of up to 512 bytes, checks that the
//! response id matches the query id and hands the bytes to
//! [`DnsMessage::parse_response`]. There is no retry and no fallback to another
//! nameserver.
//!
//! A timeout is reported as its own error variant (`UdpErrors::TimedOut` /
//! `TokioUdpErrors::Elapsed`), never as a decoding failure.
//!
//! ## Transports
//!
//! The socket work sits behind `BlockingTransport` / `AsyncTransport` so a lookup can
//! run against anything that turns query bytes into response bytes.
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), dnslookup::dns::resolver::ResolverErrors> {
//! use dnslookup::dns::resolver::resolve_ipv4;
//! use dnslookup::dns::resolver::transporter::ResolverConfig;
//!
//! let response = resolve_ipv4("example.com", &ResolverConfig::default())?;
//! if let Some((addr, ttl)) = response.first_ipv4() {
//!     println!("{addr} (TTL: {ttl})");
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```
pub mod transporter;

use crate::dns::message::DnsMessage;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use transporter::ResolverConfig;

#[cfg(test)]
pub(crate) mod test_support;

mod internal {
    /// `true` only when the response carries an id and it differs from `id`. Shorter
    /// buffers are left for the decoder to reject.
    pub(crate) fn id_mismatch(response: &[u8], id: u16) -> bool {
        match response.get(..2) {
            Some(bytes) => id != u16::from_be_bytes([bytes[0], bytes[1]]),
            None => false,
        }
    }
}

/// Wildcard local address of the same family as `nameserver`.
fn local_bind_addr(nameserver: SocketAddr) -> SocketAddr {
    match nameserver.ip() {
        IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        use crate::dns::errors::{DecodeQueryErrors, EncodeQueryErrors};
        use crate::dns::message::generate_id;
        use std::io::ErrorKind;
        use std::net::UdpSocket;
        use std::time::Duration;
        use thiserror::Error;
        use tracing::{debug, warn};
        use transporter::MAX_UDP_PAYLOAD;

        /// Turns one query datagram into one response datagram, blocking.
        pub trait BlockingTransport {
            fn exchange(&self, query: &[u8], config: &ResolverConfig) -> Result<Vec<u8>, UdpErrors>;
        }

        /// Plain UDP on an ephemeral local port.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct UdpTransport;

        impl BlockingTransport for UdpTransport {
            fn exchange(&self, query: &[u8], config: &ResolverConfig) -> Result<Vec<u8>, UdpErrors> {
                let socket = UdpSocket::bind(local_bind_addr(config.nameserver))?;
                // a zero read timeout is rejected by the socket
                socket.set_read_timeout(Some(config.timeout.max(Duration::from_millis(1))))?;

                socket.send_to(query, config.nameserver)?;
                debug!(nameserver = %config.nameserver, bytes = query.len(), "query sent");

                let mut buf = [0u8; MAX_UDP_PAYLOAD];
                let (len, src) = match socket.recv_from(&mut buf) {
                    Ok(v) => v,
                    Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                        warn!(nameserver = %config.nameserver, timeout = ?config.timeout, "no response");
                        return Err(UdpErrors::TimedOut(config.timeout));
                    }
                    Err(e) => return Err(UdpErrors::SocketIo(e)),
                };
                debug!(%src, bytes = len, "response received");

                Ok(buf[..len].to_vec())
            }
        }

        /// Resolves an IPv4 (`A`) record for `name` with a blocking UDP query.
        ///
        /// # Errors
        /// Returns [`ResolverErrors`] if the query could not be encoded, sent, answered
        /// in time or decoded.
        pub fn resolve_ipv4(name: &str, config: &ResolverConfig) -> Result<DnsMessage, ResolverErrors> {
            resolve_ipv4_with(name, config, &UdpTransport, generate_id())
        }

        /// Same as [`resolve_ipv4`] over any transport and with a fixed message id.
        pub fn resolve_ipv4_with<T: BlockingTransport + ?Sized>(
            name: &str,
            config: &ResolverConfig,
            transport: &T,
            id: u16,
        ) -> Result<DnsMessage, ResolverErrors> {
            let query = DnsMessage::build_request_with_id(name, id, config.query)?;
            Ok(send_query_blocking(&query, id, config, transport)?)
        }

        fn send_query_blocking<T: BlockingTransport + ?Sized>(
            query: &[u8],
            id: u16,
            config: &ResolverConfig,
            transport: &T,
        ) -> Result<DnsMessage, UdpErrors> {
            let response = transport.exchange(query, config)?;

            if internal::id_mismatch(&response, id) {
                warn!(id, "response id does not match the query");
                return Err(UdpErrors::IdResponseInvalid(id));
            }

            Ok(DnsMessage::parse_response(&response)?)
        }

        /// Represents errors that may occur when sending or receiving DNS queries over UDP.
        #[derive(Debug, Error)]
        pub enum UdpErrors {
            #[error("{0}")]
            SocketIo(#[from] std::io::Error),
            #[error("Timed out after {0:?} waiting for a DNS response")]
            TimedOut(Duration),
            #[error("The DNS query's response ID didn't match with the DNS question sent.\nId: {0}")]
            IdResponseInvalid(u16),
            #[error("{0}")]
            DecodeQueryErrors(#[from] DecodeQueryErrors),
        }

        /// Represents high-level resolver errors exposed to users.
        #[derive(Debug, Error)]
        pub enum ResolverErrors {
            #[error("{0}")]
            EncodingQuery(#[from] EncodeQueryErrors),
            #[error("{0}")]
            SendingUdpQuery(#[from] UdpErrors),
        }

        impl ResolverErrors {
            pub fn is_timeout(&self) -> bool {
                matches!(self, ResolverErrors::SendingUdpQuery(UdpErrors::TimedOut(_)))
            }
        }

        #[cfg(test)]
        mod blocking_tests {
            use super::*;
            use super::test_support::answer_for;
            use std::thread;

            struct FnTransport<F: Fn(&[u8]) -> Result<Vec<u8>, UdpErrors>>(F);

            fn fn_transport<F: Fn(&[u8]) -> Result<Vec<u8>, UdpErrors>>(f: F) -> FnTransport<F> {
                FnTransport(f)
            }

            impl<F: Fn(&[u8]) -> Result<Vec<u8>, UdpErrors>> BlockingTransport for FnTransport<F> {
                fn exchange(&self, query: &[u8], _config: &ResolverConfig) -> Result<Vec<u8>, UdpErrors> {
                    (self.0)(query)
                }
            }

            #[test]
            fn test_resolve_ipv4_with_transport() {
                let transport = fn_transport(|query: &[u8]| Ok(answer_for(query, [93, 184, 216, 34])));
                let msg = resolve_ipv4_with("example.com", &ResolverConfig::default(), &transport, 77)
                    .unwrap();

                assert_eq!(msg.header.id, 77);
                assert_eq!(msg.question[0].name, "example.com");
                assert_eq!(msg.first_ipv4(), Some((Ipv4Addr::new(93, 184, 216, 34), 3600)));
            }

            #[test]
            fn test_resolve_ipv4_sends_configured_flags() {
                let transport = fn_transport(|query: &[u8]| {
                    // recursion desired, standard query
                    assert_eq!(&query[2..4], &[0x01, 0x00]);
                    Ok(answer_for(query, [1, 2, 3, 4]))
                });
                assert!(resolve_ipv4_with("a.io", &ResolverConfig::default(), &transport, 1).is_ok());
            }

            #[test]
            fn test_resolve_ipv4_id_mismatch() {
                let transport = fn_transport(|query: &[u8]| {
                    let mut response = answer_for(query, [1, 2, 3, 4]);
                    response[1] ^= 0xFF;
                    Ok(response)
                });
                let err = resolve_ipv4_with("a.io", &ResolverConfig::default(), &transport, 5).unwrap_err();
                assert!(matches!(
                    err,
                    ResolverErrors::SendingUdpQuery(UdpErrors::IdResponseInvalid(5))
                ));
            }

            #[test]
            fn test_resolve_ipv4_timeout_is_distinct() {
                let transport = fn_transport(|_: &[u8]| Err(UdpErrors::TimedOut(Duration::from_secs(1))));
                let err = resolve_ipv4_with("a.io", &ResolverConfig::default(), &transport, 5).unwrap_err();
                assert!(err.is_timeout());
            }

            #[test]
            fn test_resolve_ipv4_response_error() {
                let transport = fn_transport(|query: &[u8]| {
                    let mut response = query.to_vec();
                    response[2..4].copy_from_slice(&0x8183u16.to_be_bytes());
                    Ok(response)
                });
                let err = resolve_ipv4_with("nope.invalid", &ResolverConfig::default(), &transport, 9)
                    .unwrap_err();
                assert!(matches!(
                    err,
                    ResolverErrors::SendingUdpQuery(UdpErrors::DecodeQueryErrors(
                        DecodeQueryErrors::ResponseNameError
                    ))
                ));
                assert!(!err.is_timeout());
            }

            #[test]
            fn test_resolve_ipv4_invalid_name() {
                let transport = fn_transport(|_: &[u8]| -> Result<Vec<u8>, UdpErrors> {
                    panic!("nothing should be sent")
                });
                let name = "a".repeat(64);
                let err = resolve_ipv4_with(&name, &ResolverConfig::default(), &transport, 1).unwrap_err();
                assert!(matches!(err, ResolverErrors::EncodingQuery(EncodeQueryErrors::LabelTooLong(_))));
            }

            #[test]
            fn test_udp_transport_loopback() {
                let server = UdpSocket::bind("127.0.0.1:0").unwrap();
                let nameserver = server.local_addr().unwrap();

                let handle = thread::spawn(move || {
                    let mut buf = [0u8; MAX_UDP_PAYLOAD];
                    let (len, src) = server.recv_from(&mut buf).unwrap();
                    server.send_to(&answer_for(&buf[..len], [127, 0, 0, 9]), src).unwrap();
                });

                let config = ResolverConfig {
                    nameserver,
                    timeout: Duration::from_secs(5),
                    ..ResolverConfig::default()
                };
                let msg = resolve_ipv4("loopback.test", &config).unwrap();
                handle.join().unwrap();

                assert_eq!(msg.first_ipv4(), Some((Ipv4Addr::new(127, 0, 0, 9), 3600)));
            }

            #[test]
            fn test_udp_transport_times_out() {
                let silent = UdpSocket::bind("127.0.0.1:0").unwrap();
                let config = ResolverConfig {
                    nameserver: silent.local_addr().unwrap(),
                    timeout: Duration::from_millis(50),
                    ..ResolverConfig::default()
                };

                let err = resolve_ipv4("quiet.test", &config).unwrap_err();
                assert!(err.is_timeout());
            }
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        use async_trait::async_trait;
        use tokio::net::UdpSocket as TokioUdpSocket;
        use tokio::time::error::Elapsed;
        use tokio::time::timeout;

        /// Turns one query datagram into one response datagram, asynchronously.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        #[async_trait]
        pub trait AsyncTransport: Send + Sync {
            async fn exchange(&self, query: &[u8], config: &ResolverConfig) -> Result<Vec<u8>, TokioUdpErrors>;
        }

        /// UDP on an ephemeral local port, driven by the tokio runtime.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct TokioUdpTransport;

        #[async_trait]
        impl AsyncTransport for TokioUdpTransport {
            async fn exchange(&self, query: &[u8], config: &ResolverConfig) -> Result<Vec<u8>, TokioUdpErrors> {
                let socket = TokioUdpSocket::bind(local_bind_addr(config.nameserver)).await?;

                let exchange = async {
                    socket.send_to(query, config.nameserver).await?;
                    tracing::debug!(nameserver = %config.nameserver, bytes = query.len(), "query sent");

                    let mut buf = [0u8; transporter::MAX_UDP_PAYLOAD];
                    let (len, src) = socket.recv_from(&mut buf).await?;
                    tracing::debug!(%src, bytes = len, "response received");
                    Ok::<_, std::io::Error>(buf[..len].to_vec())
                };

                match timeout(config.timeout, exchange).await {
                    Ok(Ok(response)) => Ok(response),
                    Ok(Err(e)) => Err(TokioUdpErrors::SocketIo(e)),
                    Err(e) => {
                        tracing::warn!(nameserver = %config.nameserver, timeout = ?config.timeout, "no response");
                        Err(TokioUdpErrors::Elapsed(e))
                    }
                }
            }
        }

        /// Resolves an IPv4 (`A`) record for `name` with an asynchronous UDP query.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub async fn resolve_ipv4_async(name: &str, config: &ResolverConfig) -> Result<DnsMessage, ResolverErrorsAsync> {
            let id = crate::dns::message::generate_id();
            resolve_ipv4_async_with(name, config, &TokioUdpTransport, id).await
        }

        /// Same as [`resolve_ipv4_async`] over any transport and with a fixed message id.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub async fn resolve_ipv4_async_with<T: AsyncTransport + ?Sized>(
            name: &str,
            config: &ResolverConfig,
            transport: &T,
            id: u16,
        ) -> Result<DnsMessage, ResolverErrorsAsync> {
            let query = DnsMessage::build_request_with_id(name, id, config.query)?;
            Ok(send_query_async(&query, id, config, transport).await?)
        }

        async fn send_query_async<T: AsyncTransport + ?Sized>(
            query: &[u8],
            id: u16,
            config: &ResolverConfig,
            transport: &T,
        ) -> Result<DnsMessage, TokioUdpErrors> {
            let response = transport.exchange(query, config).await?;

            if internal::id_mismatch(&response, id) {
                tracing::warn!(id, "response id does not match the query");
                return Err(TokioUdpErrors::IdResponseInvalid(id));
            }

            Ok(DnsMessage::parse_response(&response)?)
        }

        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        #[derive(Debug, thiserror::Error)]
        pub enum TokioUdpErrors {
            #[error("{0}")]
            SocketIo(#[from] std::io::Error),
            #[error("Timed out waiting for a DNS response: {0}")]
            Elapsed(#[from] Elapsed),
            #[error("The DNS query's response ID didn't match with the DNS question sent.\nId: {0}")]
            IdResponseInvalid(u16),
            #[error("{0}")]
            DecodeQueryErrors(#[from] crate::dns::errors::DecodeQueryErrors),
        }

        /// Represents high-level resolver errors exposed to users.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        #[derive(Debug, thiserror::Error)]
        pub enum ResolverErrorsAsync {
            #[error("{0}")]
            EncodingQuery(#[from] crate::dns::errors::EncodeQueryErrors),
            #[error("{0}")]
            SendingUdpQuery(#[from] TokioUdpErrors),
        }

        impl ResolverErrorsAsync {
            pub fn is_timeout(&self) -> bool {
                matches!(self, ResolverErrorsAsync::SendingUdpQuery(TokioUdpErrors::Elapsed(_)))
            }
        }

    }
}
