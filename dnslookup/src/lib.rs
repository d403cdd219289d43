#![cfg_attr(docsrs, feature(doc_cfg))]
//! # dnslookup
//!
//! A small DNS client library: build an RFC 1035 A-record query, send it over UDP,
//! wait for one response and decode its header, question and answer sections.
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dnslookup = { version = "0.1", features = ["std"]}
//! dnslookup = { version = "0.1", features = ["tokio-dep"]}
//! dnslookup = { version = "0.1", default-features = false, features = ["agnostic"]}
//! ```
//!
//! ### Blocking lookup
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")]
//! # {
//! use dnslookup::dns::resolver::resolve_ipv4;
//! use dnslookup::dns::resolver::transporter::ResolverConfig;
//!
//! match resolve_ipv4("example.com", &ResolverConfig::default()) {
//!     Ok(response) => {
//!         for (addr, ttl) in response.ipv4_answers() {
//!             println!("{addr} (TTL {ttl})");
//!         }
//!     }
//!     Err(e) => eprintln!("DNS resolution failed: {e}"),
//! }
//! # }
//! ```
//!
//! ### Codec only
//!
//! ```rust
//! use dnslookup::dns::message::{DnsMessage, QueryOptions};
//!
//! let (query, id) = DnsMessage::build_request(
//!     "example.com",
//!     QueryOptions::default(),
//!     &mut rand::rng(),
//! ).unwrap();
//! assert_eq!(u16::from_be_bytes([query[0], query[1]]), id);
//!
//! // ... send `query`, receive `datagram` ...
//! # let datagram = [0u8; 12];
//! let response = DnsMessage::parse_response(&datagram);
//! # assert!(response.is_ok());
//! ```
//!
//! ## Error Handling
//!
//! - `EncodeQueryErrors` — the domain cannot be written as a qname.
//! - `DecodeQueryErrors` — malformed bytes, or a response code 1 to 5.
//! - `UdpErrors` / `TokioUdpErrors` — socket failures, timeouts, mismatched ids.
//! - `ResolverErrors` / `ResolverErrorsAsync` — what the `resolve_*` functions return.
//!
//! The codec never logs. The resolver emits `tracing` events at `debug` and `warn`.

#[cfg(all(feature = "agnostic", any(feature = "std", feature = "tokio-dep")))]
compile_error!("Features `agnostic` and (`std`/`tokio`) cannot be enabled at the same time");

pub mod dns;
