//! # DNS codec errors
//!
//! Every failure raised while building or decoding a message. The codec never recovers
//! from these internally: they are returned to the caller untouched.
//!
//! - [`EncodeQueryErrors`] — a domain that cannot be written as a qname.
//! - [`DecodeQueryErrors`] — a buffer that cannot be decoded ([`DecodeQueryErrors::MalformedInput`])
//!   or a response whose `rcode` signals a server-side error.
use thiserror::Error;

/// Errors raised while encoding a domain name into wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeQueryErrors {
    /// A single label is longer than 63 bytes.
    #[error("Label too long (>63): {0}")]
    LabelTooLong(String),
    /// The whole encoded name is longer than 255 bytes.
    #[error("Name is too long (>255): {0}")]
    NameTooLong(String),
}

/// Errors raised while decoding a DNS response.
///
/// The `Response*` variants map one-to-one to `rcode` values 1 to 5 (RFC 1035 §4.1.1).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeQueryErrors {
    #[error("Malformed input: {0}")]
    MalformedInput(Malformed),
    #[error("Format error - The name server was unable to interpret the query.")]
    ResponseFormatError,
    #[error(
        "Server failure - The name server was unable to process this query due to a problem with the name server."
    )]
    ResponseServerFailure,
    #[error(
        "Name Error - Meaningful only for responses from an authoritative name server, this code signifies that the domain name referenced in the query does not exist."
    )]
    ResponseNameError,
    #[error("Not Implemented - The name server does not support the requested kind of query.")]
    ResponseNotImplemented,
    #[error(
        "Refused - The name server refuses to perform the specified operation for policy reasons."
    )]
    ResponseRefused,
}

/// What exactly was wrong with a buffer. Offsets are relative to the start of the
/// buffer handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("{field} needs {needed} byte(s) at offset {offset}, only {available} left")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("compression pointer {byte:#04x} at offset {offset} is not supported")]
    CompressionPointer { offset: usize, byte: u8 },
    #[error("label at offset {offset} is not valid UTF-8")]
    InvalidLabel { offset: usize },
    #[error("A record data must be 4 bytes, got {rd_length}")]
    InvalidAddressLength { rd_length: u16 },
}

impl From<Malformed> for DecodeQueryErrors {
    fn from(value: Malformed) -> Self {
        DecodeQueryErrors::MalformedInput(value)
    }
}
