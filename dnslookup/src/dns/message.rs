//! # DNS messages
//!
//! Entry points that assemble whole messages from the codec pieces:
//!
//! - [`DnsMessage::build_request`] — header plus a single A/IN question, ready to be sent
//!   as one UDP datagram.
//! - [`DnsMessage::parse_response`] — header, questions and answers of a received
//!   datagram, with the response code mapped to an error.
//!
//! Authority and additional sections are not decoded.
//!
//! ```rust
//! use dnslookup::dns::message::{DnsMessage, QueryOptions};
//!
//! let bytes = DnsMessage::build_request_with_id("example.com", 0x1234, QueryOptions::default())
//!     .unwrap();
//! assert_eq!(&bytes[..2], &[0x12, 0x34]);
//! assert_eq!(&bytes[12..], b"\x07example\x03com\x00\x00\x01\x00\x01");
//! ```
use crate::dns::codec::header::{HEADER_LEN, HeaderSection, OpCodeOptions};
use crate::dns::codec::reader::Reader;
use crate::dns::codec::record::{AnswerSection, QuestionSection, RData, read_answers, read_questions};
use crate::dns::errors::{DecodeQueryErrors, EncodeQueryErrors};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::net::Ipv4Addr;

/// Generates a random 16-bit ID for a DNS query.
pub fn generate_id() -> u16 {
    let mut thread_rng = rand::rng();
    let mut rng = SmallRng::from_rng(&mut thread_rng);

    rng.random::<u16>()
}

/// How the query header is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub opcode: OpCodeOptions,
    pub recursion_desired: bool,
}

/// A decoded response: header, question section and answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DnsMessage {
    pub header: HeaderSection,
    // The questions echoed by the name server
    pub question: Vec<QuestionSection>,
    // RRs answering the question
    pub answer: Vec<AnswerSection>,
}

impl DnsMessage {
    /// Builds an A/IN query for `domain`, drawing the message id from `rng`.
    ///
    /// Returns the encoded message together with its id so the caller can match the
    /// response.
    pub fn build_request<R: Rng + ?Sized>(
        domain: &str,
        options: QueryOptions,
        rng: &mut R,
    ) -> Result<(Vec<u8>, u16), EncodeQueryErrors> {
        let id = rng.random::<u16>();
        let bytes = Self::build_request_with_id(domain, id, options)?;
        Ok((bytes, id))
    }

    /// Builds an A/IN query for `domain` with a caller-chosen message id.
    pub fn build_request_with_id(
        domain: &str,
        id: u16,
        options: QueryOptions,
    ) -> Result<Vec<u8>, EncodeQueryErrors> {
        let header = HeaderSection::new_query(id, 1, options.opcode, options.recursion_desired);

        let mut message = Vec::with_capacity(HEADER_LEN + domain.len() + 6);
        message.extend_from_slice(&header.to_bytes());
        QuestionSection::ipv4(domain).encode_into(&mut message)?;
        Ok(message)
    }

    /// Decodes a response datagram.
    ///
    /// A non-zero `rcode` between 1 and 5 fails right after the header, before any
    /// question or answer is looked at. Reserved codes 6 to 15 are not errors; see
    /// [`ResponseCode::Reserved`].
    ///
    /// # Errors
    /// - the `Response*` variants of [`DecodeQueryErrors`] for rcode 1 to 5;
    /// - [`DecodeQueryErrors::MalformedInput`] if any section runs past the buffer.
    pub fn parse_response(bytes: &[u8]) -> Result<DnsMessage, DecodeQueryErrors> {
        let header = HeaderSection::from_bytes(bytes)?;
        ResponseCode::from_u8(header.flags.rcode).check()?;

        let mut reader = Reader::at(bytes, HEADER_LEN);
        let question = read_questions(&mut reader, header.qd_count)?;
        let answer = read_answers(&mut reader, header.an_count)?;

        Ok(DnsMessage {
            header,
            question,
            answer,
        })
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8(self.header.flags.rcode)
    }

    /// Address and TTL of every A/IN answer, in wire order.
    pub fn ipv4_answers(&self) -> impl Iterator<Item = (Ipv4Addr, u32)> + '_ {
        self.answer.iter().filter_map(|a| match a.r_data {
            RData::Ipv4(addr) => Some((addr, a.ttl)),
            RData::Raw(_) => None,
        })
    }

    pub fn first_ipv4(&self) -> Option<(Ipv4Addr, u32)> {
        self.ipv4_answers().next()
    }
}

/// Typed view of the 4-bit `rcode` header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    /// 6-15, unassigned in RFC 1035 and passed through as success.
    Reserved(u8),
}

impl ResponseCode {
    pub fn from_u8(rcode: u8) -> Self {
        match rcode & 0b1111 {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            n => ResponseCode::Reserved(n),
        }
    }

    /// `Ok` for `NoError` and reserved codes, the matching response error otherwise.
    pub fn check(self) -> Result<(), DecodeQueryErrors> {
        match self {
            ResponseCode::NoError | ResponseCode::Reserved(_) => Ok(()),
            ResponseCode::FormatError => Err(DecodeQueryErrors::ResponseFormatError),
            ResponseCode::ServerFailure => Err(DecodeQueryErrors::ResponseServerFailure),
            ResponseCode::NameError => Err(DecodeQueryErrors::ResponseNameError),
            ResponseCode::NotImplemented => Err(DecodeQueryErrors::ResponseNotImplemented),
            ResponseCode::Refused => Err(DecodeQueryErrors::ResponseRefused),
        }
    }
}
