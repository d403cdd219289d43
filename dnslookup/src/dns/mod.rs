//! # DNS
//!
//! An RFC 1035 client for A-record lookups over UDP.
//!
//! The library is split into features that allow you to choose the level of functionality:
//!
//! ## Features
//!
//! - **Agnostic (`agnostic`)**
//!   - Only the wire-format codec and message assembly.
//!   - No transport; send the bytes however you like.
//!
//! - **Standard (`std`, default)**
//!   - Blocking resolver on `std::net::UdpSocket`.
//!
//! - **Tokio (`tokio-dep`)**
//!   - Async resolver on `tokio::net::UdpSocket`.
//!
//! ## Modules
//!
//! - `codec` — header, name and record encoding/decoding.
//! - `message` — request construction and response parsing.
//! - `errors` — the error taxonomy shared by all of the above.
//! - `resolver` — UDP transport and `resolve_ipv4*` entry points (`std` / `tokio-dep`).
//!
//! ## Limitations
//!
//! - Message compression pointers are rejected, not followed.
//! - Only A/IN answers are interpreted; everything else is returned as raw bytes.
//! - UDP only, one datagram of at most 512 bytes, no retries.
pub mod codec;
pub mod errors;
pub mod message;

cfg_if::cfg_if! {
    if #[cfg(any(feature = "std", feature = "tokio-dep"))] {
        pub mod resolver;
    }
}
