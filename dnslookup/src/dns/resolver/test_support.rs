use crate::dns::codec::header::HEADER_LEN;
use crate::dns::codec::name::{decode_qname, encode_qname};

/// Turns a query into a response carrying one A record for the queried name:
/// same id and question, flags `0x8180`, TTL 3600.
pub(crate) fn answer_for(query: &[u8], address: [u8; 4]) -> Vec<u8> {
    let (name, _) = decode_qname(&query[HEADER_LEN..]).unwrap();

    let mut response = query.to_vec();
    response[2..4].copy_from_slice(&0x8180u16.to_be_bytes());
    response[6..8].copy_from_slice(&1u16.to_be_bytes());

    response.extend_from_slice(&encode_qname(&name).unwrap());
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    response.extend_from_slice(&3600u32.to_be_bytes());
    response.extend_from_slice(&4u16.to_be_bytes());
    response.extend_from_slice(&address);
    response
}
