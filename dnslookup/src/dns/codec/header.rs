//! # Header codec
//!
//! The fixed 12-byte header of every DNS message (RFC 1035 §4.1.1):
//!
//! ```text
//!   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    QDCOUNT                    |
//! |                    ANCOUNT                    |
//! |                    NSCOUNT                    |
//! |                    ARCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
//!
//! Only query headers are ever encoded. Decoding extracts the bits as plain integers:
//! `opcode` and `rcode` are not checked against their enumerated meanings here.
use super::reader::Reader;
use crate::dns::errors::DecodeQueryErrors;

/// Size of an encoded header in bytes.
pub const HEADER_LEN: usize = 12;

/// Represents the header section of a DNS message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeaderSection {
    /// Identifier to match requests and responses.
    pub id: u16,
    /// Flags and control bits for the DNS message.
    pub flags: DnsHeaderFlags,
    /// Number of entries in the question section.
    pub qd_count: u16,
    /// Number of resource records in the answer section.
    pub an_count: u16,
    /// Number of name server records in the authority section.
    pub ns_count: u16,
    /// Number of resource records in the additional section.
    pub ar_count: u16,
}

impl HeaderSection {
    /// Builds a query header: `qr`, `aa`, `tc`, `ra`, `z` and `rcode` are always zero,
    /// and so are the answer, authority and additional counts.
    pub fn new_query(
        id: u16,
        qd_count: u16,
        opcode: OpCodeOptions,
        recursion_desired: bool,
    ) -> Self {
        HeaderSection {
            id,
            flags: DnsHeaderFlags {
                qr: false,
                opcode: opcode as u8,
                aa: false,
                tc: false,
                rd: recursion_desired,
                ra: false,
                z: 0,
                rcode: 0,
            },
            qd_count,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Converts the header into a 12-byte array suitable for network transmission.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..2].copy_from_slice(&self.id.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.flags.to_u16().to_be_bytes());
        bytes[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.ar_count.to_be_bytes());
        bytes
    }

    /// Decodes the first 12 bytes of `bytes`. Anything after them is ignored.
    ///
    /// # Errors
    /// [`DecodeQueryErrors::MalformedInput`] if fewer than 12 bytes are supplied.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeQueryErrors> {
        let mut reader = Reader::new(bytes);
        let raw = reader.take_slice(HEADER_LEN, "header")?;
        let word = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);

        Ok(HeaderSection {
            id: word(0),
            flags: DnsHeaderFlags::from_u16(word(2)),
            qd_count: word(4),
            an_count: word(6),
            ns_count: word(8),
            ar_count: word(10),
        })
    }
}

/// Represents the 16-bit DNS flags field (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DnsHeaderFlags {
    /// Query/Response flag
    pub qr: bool,
    /// Operation code, see [`OpCodeOptions`]
    pub opcode: u8,
    /// Authoritative Answer
    pub aa: bool,
    /// Truncation flag
    pub tc: bool,
    /// Recursion Desired
    pub rd: bool,
    /// Recursion Available
    pub ra: bool,
    /// Reserved bits
    pub z: u8,
    /// Response code
    pub rcode: u8,
}

impl DnsHeaderFlags {
    /// Encode the flags into a 16-bit integer.
    pub fn to_u16(self) -> u16 {
        ((self.qr as u16) << 15)
            | ((self.opcode as u16 & 0b1111) << 11)
            | ((self.aa as u16) << 10)
            | ((self.tc as u16) << 9)
            | ((self.rd as u16) << 8)
            | ((self.ra as u16) << 7)
            | ((self.z as u16 & 0b111) << 4)
            | (self.rcode as u16 & 0b1111)
    }

    /// Decode from a 16-bit integer into structured flags.
    pub fn from_u16(value: u16) -> Self {
        Self {
            qr: (value >> 15) & 1 != 0,
            opcode: ((value >> 11) & 0b1111) as u8,
            aa: (value >> 10) & 1 != 0,
            tc: (value >> 9) & 1 != 0,
            rd: (value >> 8) & 1 != 0,
            ra: (value >> 7) & 1 != 0,
            z: ((value >> 4) & 0b111) as u8,
            rcode: (value & 0b1111) as u8,
        }
    }
}

// 3-15 reserved for future use
/// Operation codes a query can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpCodeOptions {
    #[default]
    StandardQuery = 0,
    InverseQuery = 1,
    ServerStatusRequest = 2,
}

impl OpCodeOptions {
    /// Maps an operation name to an opcode, ignoring case.
    ///
    /// `"query"` is a standard query and `"iquery"` an inverse query. Every other
    /// string, including unknown ones, maps to [`OpCodeOptions::ServerStatusRequest`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "query" => OpCodeOptions::StandardQuery,
            "iquery" => OpCodeOptions::InverseQuery,
            _ => OpCodeOptions::ServerStatusRequest,
        }
    }
}
