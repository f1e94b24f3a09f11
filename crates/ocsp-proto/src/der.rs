//! Minimal DER encoding
//!
//! OCSP requests only need a handful of universal types plus explicit
//! context-specific tags, so they are encoded directly as tag/length/value
//! triples. Decoding goes through `der-parser` (see `response`).

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_NULL: u8 = 0x05;
const TAG_OID: u8 = 0x06;
const TAG_SEQUENCE: u8 = 0x30;

/// Encode a SEQUENCE
pub(crate) fn der_sequence(contents: &[u8]) -> Vec<u8> {
    der_tlv(TAG_SEQUENCE, contents)
}

/// Encode an OCTET STRING
pub(crate) fn der_octet_string(contents: &[u8]) -> Vec<u8> {
    der_tlv(TAG_OCTET_STRING, contents)
}

/// Encode an INTEGER from its big-endian two's complement content
///
/// The content is taken as-is: certificate serials are copied from the
/// certificate's own encoding, which is already minimal.
pub(crate) fn der_integer(content: &[u8]) -> Vec<u8> {
    if content.is_empty() {
        return der_tlv(TAG_INTEGER, &[0x00]);
    }
    der_tlv(TAG_INTEGER, content)
}

/// Encode an OBJECT IDENTIFIER
pub(crate) fn der_oid(arcs: &[u64]) -> Vec<u8> {
    der_tlv(TAG_OID, &oid_content(arcs))
}

/// Encode NULL
pub(crate) fn der_null() -> Vec<u8> {
    vec![TAG_NULL, 0x00]
}

/// Encode context-specific explicit tag `[tag]`
pub(crate) fn der_explicit_context(tag: u8, contents: &[u8]) -> Vec<u8> {
    der_tlv(0xA0 | tag, contents)
}

/// Content octets of an OBJECT IDENTIFIER
fn oid_content(arcs: &[u64]) -> Vec<u8> {
    if arcs.len() < 2 {
        return Vec::new();
    }

    // First two arcs are packed as 40*v1 + v2
    let mut encoded = encode_base128(40 * arcs[0] + arcs[1]);
    for &arc in &arcs[2..] {
        encoded.extend_from_slice(&encode_base128(arc));
    }
    encoded
}

/// Encode Tag-Length-Value
fn der_tlv(tag: u8, contents: &[u8]) -> Vec<u8> {
    let mut result = vec![tag];
    result.extend_from_slice(&der_length(contents.len()));
    result.extend_from_slice(contents);
    result
}

/// Encode DER length
fn der_length(length: usize) -> Vec<u8> {
    if length < 128 {
        return vec![length as u8];
    }

    // Long form: first byte has high bit set and counts the length bytes
    let mut length_bytes = Vec::new();
    let mut len = length;
    while len > 0 {
        length_bytes.insert(0, (len & 0xFF) as u8);
        len >>= 8;
    }
    let mut result = vec![0x80 | length_bytes.len() as u8];
    result.extend_from_slice(&length_bytes);
    result
}

/// Encode value in base-128 (for OID arcs)
fn encode_base128(mut value: u64) -> Vec<u8> {
    let mut result = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        result.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_der_length_forms() {
        assert_eq!(der_length(0), vec![0x00]);
        assert_eq!(der_length(127), vec![0x7F]);
        assert_eq!(der_length(128), vec![0x81, 0x80]);
        assert_eq!(der_length(0x0102), vec![0x82, 0x01, 0x02]);
    }

    #[test]
    fn test_oid_encoding() {
        // 1.3.6.1.5.5.7.48.1 (id-ad-ocsp)
        assert_eq!(
            der_oid(&[1, 3, 6, 1, 5, 5, 7, 48, 1]),
            vec![0x06, 0x08, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01]
        );
        // 2.16.840.1.101.3.4.2.1 (sha256) has multi-byte arcs
        assert_eq!(
            oid_content(&[2, 16, 840, 1, 101, 3, 4, 2, 1]),
            vec![0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01]
        );
    }

    #[test]
    fn test_integer_and_null() {
        assert_eq!(der_integer(&[0x00, 0xC0, 0xFF, 0xEE]), vec![0x02, 0x04, 0x00, 0xC0, 0xFF, 0xEE]);
        assert_eq!(der_integer(&[]), vec![0x02, 0x01, 0x00]);
        assert_eq!(der_null(), vec![0x05, 0x00]);
    }

    #[test]
    fn test_long_form_octet_string() {
        let encoded = der_octet_string(&[0x41u8; 300]);
        assert_eq!(&encoded[..4], &[0x04, 0x82, 0x01, 0x2C]);
        assert_eq!(encoded.len(), 304);
    }

    #[test]
    fn test_explicit_context_wraps_contents() {
        assert_eq!(der_explicit_context(2, &der_null()), vec![0xA2, 0x02, 0x05, 0x00]);
        assert_eq!(der_sequence(&[]), vec![0x30, 0x00]);
    }
}
