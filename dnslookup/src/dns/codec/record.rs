//! # Record codec
//!
//! Question entries (RFC 1035 §4.1.2) and resource records of the answer section
//! (§4.1.3). Every record starts with a name decoded by the name codec, followed by
//! fixed big-endian integer fields.
use super::name::{encode_qname_into, read_qname};
use super::reader::Reader;
use crate::dns::errors::{DecodeQueryErrors, EncodeQueryErrors, Malformed};
use std::fmt::Display;
use std::net::Ipv4Addr;

/// `TYPE` value of a host address record.
pub const TYPE_A: u16 = 1;
/// `CLASS` value of the Internet.
pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuestionSection {
    /// The domain name being queried.
    pub name: String,
    /// The type of DNS record being requested.
    pub record_type: u16,
    /// The class of the DNS record (usually IN for Internet).
    pub class: u16,
}

impl QuestionSection {
    /// An A record question in the Internet class.
    pub fn ipv4(name: &str) -> Self {
        QuestionSection {
            name: name.to_string(),
            record_type: TYPE_A,
            class: CLASS_IN,
        }
    }

    /// Appends qname, qtype and qclass to `message`.
    pub fn encode_into(&self, message: &mut Vec<u8>) -> Result<(), EncodeQueryErrors> {
        encode_qname_into(&self.name, message)?;
        message.extend_from_slice(&self.record_type.to_be_bytes());
        message.extend_from_slice(&self.class.to_be_bytes());
        Ok(())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeQueryErrors> {
        let name = read_qname(reader)?;
        let record_type = reader.take_u16("qtype")?;
        let class = reader.take_u16("qclass")?;
        Ok(QuestionSection {
            name,
            record_type,
            class,
        })
    }
}

/// Represents a single answer record in a DNS message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnswerSection {
    /// The domain name that owns this record.
    pub owner_name: String,
    pub record_type: u16,
    pub class: u16,
    /// Time-to-live of the record in seconds.
    pub ttl: u32,
    /// Length of the RDATA field as declared on the wire.
    pub rd_length: u16,
    pub r_data: RData,
}

impl AnswerSection {
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeQueryErrors> {
        let owner_name = read_qname(reader)?;
        let record_type = reader.take_u16("type")?;
        let class = reader.take_u16("class")?;
        let ttl = reader.take_u32("ttl")?;
        let rd_length = reader.take_u16("rdlength")?;
        let data = reader.take_slice(rd_length as usize, "rdata")?;

        let r_data = if record_type == TYPE_A && class == CLASS_IN {
            let octets: [u8; 4] = data
                .try_into()
                .map_err(|_| Malformed::InvalidAddressLength { rd_length })?;
            RData::Ipv4(Ipv4Addr::from(octets))
        } else {
            RData::Raw(data.to_vec())
        };

        Ok(AnswerSection {
            owner_name,
            record_type,
            class,
            ttl,
            rd_length,
            r_data,
        })
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self.r_data, RData::Ipv4(_))
    }
}

/// Record data. Only A records in the Internet class are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RData {
    Ipv4(Ipv4Addr),
    /// Exactly `rd_length` bytes, untouched.
    Raw(Vec<u8>),
}

impl Display for RData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RData::Ipv4(addr) => write!(f, "{}", addr),
            RData::Raw(bytes) => {
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

/// Decodes `count` consecutive questions from the start of `buf`.
///
/// Returns the questions in wire order and the number of bytes they took, which is
/// where the next section begins.
pub fn decode_questions(
    buf: &[u8],
    count: u16,
) -> Result<(Vec<QuestionSection>, usize), DecodeQueryErrors> {
    let mut reader = Reader::new(buf);
    let questions = read_questions(&mut reader, count)?;
    Ok((questions, reader.position()))
}

/// Decodes `count` consecutive answer records from the start of `buf`.
pub fn decode_answers(buf: &[u8], count: u16) -> Result<Vec<AnswerSection>, DecodeQueryErrors> {
    read_answers(&mut Reader::new(buf), count)
}

pub(crate) fn read_questions(
    reader: &mut Reader<'_>,
    count: u16,
) -> Result<Vec<QuestionSection>, DecodeQueryErrors> {
    (0..count).map(|_| QuestionSection::read(reader)).collect()
}

pub(crate) fn read_answers(
    reader: &mut Reader<'_>,
    count: u16,
) -> Result<Vec<AnswerSection>, DecodeQueryErrors> {
    (0..count).map(|_| AnswerSection::read(reader)).collect()
}
