//! # Name codec
//!
//! Domain names travel as a sequence of length-prefixed labels closed by a zero-length
//! label (RFC 1035 §3.1):
//!
//! ```text
//! "www.example.com" -> 03 'w' 'w' 'w' 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
//! ```
//!
//! Encoding splits the domain on `.` and writes every segment as it comes, empty ones
//! included. A leading, trailing or doubled dot therefore produces a zero-length label
//! in the middle or at the end of the name (`"a.b."` -> `01 61 01 62 00 00`), and the
//! empty string encodes as `00 00`. Such names decode back only up to the first empty
//! label.
//!
//! Message compression (RFC 1035 §4.1.4) is not supported. A length byte whose two
//! high bits are set is a pointer into the message; the decoder rejects it with
//! [`Malformed::CompressionPointer`] instead of following it. Any other non-zero
//! length byte is taken as a plain count, so labels of 64 to 191 bytes still decode.
use super::reader::Reader;
use crate::dns::errors::{DecodeQueryErrors, EncodeQueryErrors, Malformed};

/// Longest label a length byte can describe without colliding with the pointer bits.
pub const MAX_LABEL_LEN: usize = 63;
/// Longest encoded name, length bytes and terminator included.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0b1100_0000;

/// Encodes `domain` into a freshly allocated qname.
///
/// # Errors
/// - [`EncodeQueryErrors::LabelTooLong`] if a label is longer than 63 bytes.
/// - [`EncodeQueryErrors::NameTooLong`] if the encoded name exceeds 255 bytes.
pub fn encode_qname(domain: &str) -> Result<Vec<u8>, EncodeQueryErrors> {
    let mut qname = Vec::with_capacity(domain.len() + 2);
    encode_qname_into(domain, &mut qname)?;
    Ok(qname)
}

/// Appends the qname for `domain` to `message`. Nothing is written on error.
pub fn encode_qname_into(domain: &str, message: &mut Vec<u8>) -> Result<(), EncodeQueryErrors> {
    let mut encoded_len = 1;
    for label in domain.split('.') {
        if label.len() > MAX_LABEL_LEN {
            return Err(EncodeQueryErrors::LabelTooLong(label.to_string()));
        }
        encoded_len += 1 + label.len();
    }
    if encoded_len > MAX_NAME_LEN {
        return Err(EncodeQueryErrors::NameTooLong(domain.to_string()));
    }

    message.reserve(encoded_len);
    for label in domain.split('.') {
        message.push(label.len() as u8);
        message.extend_from_slice(label.as_bytes());
    }
    message.push(0);
    Ok(())
}

/// Decodes the qname at the start of `buf`.
///
/// Returns the dot-joined domain (no trailing dot, `""` for the root) and the number
/// of bytes consumed, terminator included.
///
/// # Errors
/// [`DecodeQueryErrors::MalformedInput`] if a label runs past the end of `buf`, the
/// terminator is missing, a label is not UTF-8 or a compression pointer shows up.
pub fn decode_qname(buf: &[u8]) -> Result<(String, usize), DecodeQueryErrors> {
    let mut reader = Reader::new(buf);
    let domain = read_qname(&mut reader)?;
    Ok((domain, reader.position()))
}

pub(crate) fn read_qname(reader: &mut Reader<'_>) -> Result<String, DecodeQueryErrors> {
    let mut domain = String::new();

    loop {
        let offset = reader.position();
        let len = reader.take("qname length")?;

        if len & POINTER_MASK == POINTER_MASK {
            return Err(Malformed::CompressionPointer { offset, byte: len }.into());
        }

        if len == 0 {
            return Ok(domain);
        }

        let label = reader.take_slice(len as usize, "qname label")?;
        let label = std::str::from_utf8(label)
            .map_err(|_| Malformed::InvalidLabel { offset: offset + 1 })?;

        if !domain.is_empty() {
            domain.push('.');
        }
        domain.push_str(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_qname_basic() {
        assert_eq!(encode_qname("a.b.c").unwrap(), b"\x01a\x01b\x01c\x00");

        let expected = [
            7u8, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3u8, b'c', b'o', b'm', 0u8,
        ];
        assert_eq!(encode_qname("example.com").unwrap(), expected);
    }

    #[test]
    fn test_encode_qname_empty_labels_are_kept() {
        // naive split: every empty segment becomes a zero-length label
        assert_eq!(encode_qname("a.b.").unwrap(), b"\x01a\x01b\x00\x00");
        assert_eq!(encode_qname(".a").unwrap(), b"\x00\x01a\x00");
        assert_eq!(encode_qname("a..b").unwrap(), b"\x01a\x00\x01b\x00");
        assert_eq!(encode_qname("").unwrap(), b"\x00\x00");
    }

    #[test]
    fn test_encode_qname_label_too_long() {
        let long_label = "a".repeat(64);
        let name = format!("{}.com", long_label);
        assert_eq!(
            encode_qname(&name),
            Err(EncodeQueryErrors::LabelTooLong(long_label))
        );

        let max_label = "a".repeat(63);
        assert!(encode_qname(&max_label).is_ok());
    }

    #[test]
    fn test_encode_qname_name_too_long() {
        // 4 labels of 63 bytes: 4 * 64 + 1 = 257 encoded bytes
        let name = vec!["a".repeat(63); 4].join(".");
        assert!(matches!(
            encode_qname(&name),
            Err(EncodeQueryErrors::NameTooLong(_))
        ));

        // 3 * 64 + 62 + 1 = 255
        let name = format!("{}.{}", vec!["a".repeat(63); 3].join("."), "a".repeat(61));
        assert_eq!(encode_qname(&name).unwrap().len(), 255);
    }

    #[test]
    fn test_encode_qname_into_leaves_buffer_untouched_on_error() {
        let mut message = vec![0xAA, 0xBB];
        let result = encode_qname_into(&"x".repeat(70), &mut message);
        assert!(result.is_err());
        assert_eq!(message, vec![0xAA, 0xBB]);

        encode_qname_into("ab", &mut message).unwrap();
        assert_eq!(message, vec![0xAA, 0xBB, 2, b'a', b'b', 0]);
    }

    #[test]
    fn test_decode_qname_root() {
        assert_eq!(decode_qname(&[0x00, 0x01, 0x02]).unwrap(), (String::new(), 1));
    }

    #[test]
    fn test_decode_qname_stops_at_terminator() {
        let mut buf = encode_qname("www.example.com").unwrap();
        let qname_len = buf.len();
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

        assert_eq!(
            decode_qname(&buf).unwrap(),
            ("www.example.com".to_string(), qname_len)
        );
    }

    #[test]
    fn test_qname_round_trip() {
        let domains = [
            "a".to_string(),
            "example.com".to_string(),
            "mail.sub.example.org".to_string(),
            format!("{}.{}", "x".repeat(63), "y"),
            "xn--bcher-kva.example".to_string(),
        ];

        for domain in domains.iter() {
            let encoded = encode_qname(domain).unwrap();
            assert_eq!(
                decode_qname(&encoded).unwrap(),
                (domain.clone(), encoded.len())
            );
        }
    }

    #[test]
    fn test_decode_qname_empty_label_quirk() {
        let encoded = encode_qname("a..b").unwrap();
        // decoding stops at the first zero-length label
        assert_eq!(decode_qname(&encoded).unwrap(), ("a".to_string(), 3));
    }

    #[test]
    fn test_decode_qname_label_past_end() {
        let result = decode_qname(&[0x05, b'a', b'b']);
        assert_eq!(
            result,
            Err(DecodeQueryErrors::MalformedInput(Malformed::Truncated {
                field: "qname label",
                offset: 1,
                needed: 5,
                available: 2,
            }))
        );
    }

    #[test]
    fn test_decode_qname_missing_terminator() {
        let result = decode_qname(b"\x03com");
        assert!(matches!(
            result,
            Err(DecodeQueryErrors::MalformedInput(Malformed::Truncated {
                field: "qname length",
                offset: 4,
                ..
            }))
        ));
        assert!(decode_qname(&[]).is_err());
    }

    #[test]
    fn test_decode_qname_rejects_compression_pointer() {
        let result = decode_qname(&[0x03, b'w', b'w', b'w', 0xC0, 0x0C]);
        assert_eq!(
            result,
            Err(DecodeQueryErrors::MalformedInput(
                Malformed::CompressionPointer {
                    offset: 4,
                    byte: 0xC0,
                }
            ))
        );
    }

    #[test]
    fn test_decode_qname_long_label_is_a_plain_count() {
        let mut buf = vec![64u8];
        buf.extend_from_slice(&[b'a'; 64]);
        buf.push(0);

        assert_eq!(decode_qname(&buf), Ok(("a".repeat(64), 66)));
    }

    #[test]
    fn test_decode_qname_high_length_bytes_still_bounds_checked() {
        assert_eq!(
            decode_qname(&[0x80, b'a', 0x00]),
            Err(DecodeQueryErrors::MalformedInput(Malformed::Truncated {
                field: "qname label",
                offset: 1,
                needed: 128,
                available: 2,
            }))
        );
    }

    #[test]
    fn test_decode_qname_invalid_utf8() {
        assert_eq!(
            decode_qname(&[0x02, 0xFF, 0xFE, 0x00]),
            Err(DecodeQueryErrors::MalformedInput(Malformed::InvalidLabel {
                offset: 1
            }))
        );
    }
}
