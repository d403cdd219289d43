//! # DNS wire-format codec
//!
//! Pure, synchronous transforms between bytes and structured values. No I/O, no
//! logging and no shared state: every function takes its input by reference and
//! returns an owned value or an error.
//!
//! - [`header`] — the fixed 12-byte header and its flag word.
//! - [`name`] — qname label encoding/decoding.
//! - [`record`] — question entries and answer resource records.
pub mod header;
pub mod name;
pub mod record;
pub(crate) mod reader;

pub use self::header::{DnsHeaderFlags, HEADER_LEN, HeaderSection, OpCodeOptions};
pub use self::name::{decode_qname, encode_qname, encode_qname_into};
pub use self::record::{
    AnswerSection, CLASS_IN, QuestionSection, RData, TYPE_A, decode_answers, decode_questions,
};
