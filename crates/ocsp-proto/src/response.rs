//! OCSP response interpretation (RFC 6960 Section 4.2)
//!
//! ```asn1
//! OCSPResponse ::= SEQUENCE {
//!     responseStatus      OCSPResponseStatus,
//!     responseBytes       [0] EXPLICIT ResponseBytes OPTIONAL
//! }
//!
//! BasicOCSPResponse ::= SEQUENCE {
//!     tbsResponseData     ResponseData,
//!     signatureAlgorithm  AlgorithmIdentifier,
//!     signature           BIT STRING,
//!     certs               [0] EXPLICIT SEQUENCE OF Certificate OPTIONAL
//! }
//!
//! ResponseData ::= SEQUENCE {
//!     version             [0] EXPLICIT Version DEFAULT v1,
//!     responderID         ResponderID,
//!     producedAt          GeneralizedTime,
//!     responses           SEQUENCE OF SingleResponse,
//!     responseExtensions  [1] EXPLICIT Extensions OPTIONAL
//! }
//!
//! SingleResponse ::= SEQUENCE {
//!     certID              CertID,
//!     certStatus          CertStatus,
//!     thisUpdate          GeneralizedTime,
//!     nextUpdate          [0] EXPLICIT GeneralizedTime OPTIONAL,
//!     singleExtensions    [1] EXPLICIT Extensions OPTIONAL
//! }
//!
//! CertStatus ::= CHOICE {
//!     good                [0] IMPLICIT NULL,
//!     revoked             [1] IMPLICIT RevokedInfo,
//!     unknown             [2] IMPLICIT UnknownInfo
//! }
//! ```
//!
//! The signature and the responder's certificates are skipped: the body is
//! trusted as received.

use crate::error::OcspError;
use chrono::{DateTime, NaiveDate, Utc};
use der_parser::ber::BerObjectContent;
use der_parser::der::{DerObject, parse_der};
use std::fmt;
use x509_parser::oid_registry::asn1_rs::{ASN1TimeZone, Class, Tag, oid};

/// Top-level OCSP response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Successful,
    MalformedRequest,
    InternalError,
    TryLater,
    SigRequired,
    Unauthorized,
}

impl ResponseStatus {
    /// Map the wire value; 4 is unassigned
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ResponseStatus::Successful),
            1 => Some(ResponseStatus::MalformedRequest),
            2 => Some(ResponseStatus::InternalError),
            3 => Some(ResponseStatus::TryLater),
            5 => Some(ResponseStatus::SigRequired),
            6 => Some(ResponseStatus::Unauthorized),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Successful => "successful",
            ResponseStatus::MalformedRequest => "malformedRequest",
            ResponseStatus::InternalError => "internalError",
            ResponseStatus::TryLater => "tryLater",
            ResponseStatus::SigRequired => "sigRequired",
            ResponseStatus::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRL reason code (RFC 5280 Section 5.3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationReason {
    Unspecified,
    KeyCompromise,
    CaCompromise,
    AffiliationChanged,
    Superseded,
    CessationOfOperation,
    CertificateHold,
    RemoveFromCrl,
    PrivilegeWithdrawn,
    AaCompromise,
}

impl RevocationReason {
    /// Map the wire value; 7 is unassigned
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(RevocationReason::Unspecified),
            1 => Some(RevocationReason::KeyCompromise),
            2 => Some(RevocationReason::CaCompromise),
            3 => Some(RevocationReason::AffiliationChanged),
            4 => Some(RevocationReason::Superseded),
            5 => Some(RevocationReason::CessationOfOperation),
            6 => Some(RevocationReason::CertificateHold),
            8 => Some(RevocationReason::RemoveFromCrl),
            9 => Some(RevocationReason::PrivilegeWithdrawn),
            10 => Some(RevocationReason::AaCompromise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationReason::Unspecified => "unspecified",
            RevocationReason::KeyCompromise => "keyCompromise",
            RevocationReason::CaCompromise => "cACompromise",
            RevocationReason::AffiliationChanged => "affiliationChanged",
            RevocationReason::Superseded => "superseded",
            RevocationReason::CessationOfOperation => "cessationOfOperation",
            RevocationReason::CertificateHold => "certificateHold",
            RevocationReason::RemoveFromCrl => "removeFromCRL",
            RevocationReason::PrivilegeWithdrawn => "privilegeWithdrawn",
            RevocationReason::AaCompromise => "aACompromise",
        }
    }
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the requested certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertStatus {
    Good,
    Revoked {
        revocation_time: DateTime<Utc>,
        reason: Option<RevocationReason>,
    },
    Unknown,
}

impl CertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertStatus::Good => "good",
            CertStatus::Revoked { .. } => "revoked",
            CertStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a successful response for the requested certificate
///
/// All timestamps are UTC as sent by the responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicResponse {
    pub cert_status: CertStatus,
    pub this_update: DateTime<Utc>,
    pub next_update: Option<DateTime<Utc>>,
    pub produced_at: DateTime<Utc>,
    /// Nonce echoed in responseExtensions, if any
    pub nonce: Option<Vec<u8>>,
}

/// Normalized OCSP response
///
/// Certificate fields exist only for a successful response, so the two
/// cases are separate variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcspResponse {
    Successful(BasicResponse),
    Unsuccessful(ResponseStatus),
}

impl OcspResponse {
    /// Decode a DER response and select the entry for `serial`
    ///
    /// `serial` holds the INTEGER content octets of the requested
    /// certificate's serial number.
    pub fn parse(der: &[u8], serial: &[u8]) -> Result<Self, OcspError> {
        let outer = parse_exact(der, "OCSPResponse")?;
        let fields = sequence(&outer, "OCSPResponse")?;

        let status_field = fields
            .first()
            .ok_or_else(|| protocol_msg("missing responseStatus"))?;
        let code = enumerated(status_field, "responseStatus")?;
        let status = ResponseStatus::from_code(code)
            .ok_or_else(|| protocol_msg(format!("unknown responseStatus {}", code)))?;

        if status != ResponseStatus::Successful {
            // responseBytes carry nothing meaningful here
            return Ok(OcspResponse::Unsuccessful(status));
        }

        let response_bytes = fields
            .get(1)
            .and_then(|field| context_contents(field, 0))
            .ok_or_else(|| protocol_msg("successful response without responseBytes"))?;

        let basic_der = parse_response_bytes(response_bytes)?;
        let basic = parse_basic_response(basic_der, serial)?;
        Ok(OcspResponse::Successful(basic))
    }

    /// Top-level response status
    pub fn response_status(&self) -> ResponseStatus {
        match self {
            OcspResponse::Successful(_) => ResponseStatus::Successful,
            OcspResponse::Unsuccessful(status) => *status,
        }
    }

    /// Certificate-level fields, present only when successful
    pub fn basic(&self) -> Option<&BasicResponse> {
        match self {
            OcspResponse::Successful(basic) => Some(basic),
            OcspResponse::Unsuccessful(_) => None,
        }
    }
}

fn protocol_msg(msg: impl Into<String>) -> OcspError {
    OcspError::Protocol(msg.into())
}

fn malformed(what: &str, err: impl fmt::Debug) -> OcspError {
    OcspError::Protocol(format!("malformed {}: {:?}", what, err))
}

/// Decode one DER object spanning all of `bytes`
pub(crate) fn parse_exact<'a>(bytes: &'a [u8], what: &str) -> Result<DerObject<'a>, OcspError> {
    let (rest, object) = parse_der(bytes).map_err(|e| malformed(what, e))?;
    if !rest.is_empty() {
        return Err(protocol_msg(format!("{}: {} trailing bytes", what, rest.len())));
    }
    Ok(object)
}

/// Decode consecutive DER objects until `bytes` is used up
fn parse_all<'a>(mut bytes: &'a [u8], what: &str) -> Result<Vec<DerObject<'a>>, OcspError> {
    let mut objects = Vec::new();
    while !bytes.is_empty() {
        let (rest, object) = parse_der(bytes).map_err(|e| malformed(what, e))?;
        objects.push(object);
        bytes = rest;
    }
    Ok(objects)
}

fn sequence<'o, 'a>(
    object: &'o DerObject<'a>,
    what: &str,
) -> Result<&'o [DerObject<'a>], OcspError> {
    object
        .as_sequence()
        .map(Vec::as_slice)
        .map_err(|e| malformed(what, e))
}

fn is_context(object: &DerObject<'_>, tag: u32) -> bool {
    object.header.class() == Class::ContextSpecific && object.header.tag() == Tag(tag)
}

/// Content octets of a context-specific `[tag]`, explicit or implicit
///
/// The parser leaves context-specific objects undecoded; for an explicit
/// tag the contents are the DER of the wrapped value.
pub(crate) fn context_contents<'a>(object: &DerObject<'a>, tag: u32) -> Option<&'a [u8]> {
    if !is_context(object, tag) {
        return None;
    }
    match &object.content {
        BerObjectContent::Unknown(any) => Some(any.data),
        _ => None,
    }
}

fn enumerated(object: &DerObject<'_>, what: &str) -> Result<u32, OcspError> {
    match &object.content {
        BerObjectContent::Enum(code) => u32::try_from(*code)
            .map_err(|_| protocol_msg(format!("{} {} out of range", what, code))),
        _ => Err(protocol_msg(format!("{} is not an ENUMERATED", what))),
    }
}

pub(crate) fn octet_string<'a>(object: &DerObject<'a>, what: &str) -> Result<&'a [u8], OcspError> {
    match &object.content {
        BerObjectContent::OctetString(bytes) => Ok(*bytes),
        _ => Err(protocol_msg(format!("{} is not an OCTET STRING", what))),
    }
}

/// Unwrap ResponseBytes down to the BasicOCSPResponse DER
fn parse_response_bytes(contents: &[u8]) -> Result<&[u8], OcspError> {
    let response_bytes = parse_exact(contents, "ResponseBytes")?;
    let parts = sequence(&response_bytes, "ResponseBytes")?;
    if parts.len() != 2 {
        return Err(protocol_msg("ResponseBytes must have two fields"));
    }

    let response_type = parts[0]
        .as_oid()
        .map_err(|e| malformed("responseType", e))?;
    if *response_type != oid!(1.3.6.1.5.5.7.48.1.1) {
        return Err(protocol_msg(format!(
            "unsupported response type {}, expected id-pkix-ocsp-basic",
            response_type
        )));
    }

    octet_string(&parts[1], "response")
}

fn parse_basic_response(der: &[u8], serial: &[u8]) -> Result<BasicResponse, OcspError> {
    let basic = parse_exact(der, "BasicOCSPResponse")?;
    let tbs = sequence(&basic, "BasicOCSPResponse")?
        .first()
        .ok_or_else(|| protocol_msg("missing tbsResponseData"))?;

    let mut fields = sequence(tbs, "ResponseData")?.iter().peekable();

    // version [0] is optional and v1 is the only defined value
    if fields.peek().is_some_and(|field| is_context(field, 0)) {
        fields.next();
    }

    match fields.next() {
        Some(field) if is_context(field, 1) || is_context(field, 2) => {}
        _ => return Err(protocol_msg("missing responderID")),
    }

    let produced_at = fields
        .next()
        .ok_or_else(|| protocol_msg("missing producedAt"))
        .and_then(|field| generalized_time(field, "producedAt"))?;

    let responses = fields
        .next()
        .ok_or_else(|| protocol_msg("missing responses"))
        .and_then(|field| sequence(field, "responses"))?;

    let nonce = match fields.next().and_then(|field| context_contents(field, 1)) {
        Some(extensions) => find_nonce(extensions)?,
        None => None,
    };

    let mut matched = None;
    for single in responses {
        let single_fields = sequence(single, "SingleResponse")?;
        let cert_id = single_fields
            .first()
            .ok_or_else(|| protocol_msg("SingleResponse without certID"))?;
        if same_serial(cert_id_serial(cert_id)?, serial) {
            matched = Some(single_fields);
            break;
        }
    }

    let single_fields =
        matched.ok_or_else(|| protocol_msg("no SingleResponse for the requested serial number"))?;
    let (cert_status, this_update, next_update) = parse_single_response(single_fields)?;

    Ok(BasicResponse {
        cert_status,
        this_update,
        next_update,
        produced_at,
        nonce,
    })
}

fn cert_id_serial<'a>(cert_id: &DerObject<'a>) -> Result<&'a [u8], OcspError> {
    let parts = sequence(cert_id, "CertID")?;
    match parts.get(3).map(|part| &part.content) {
        Some(BerObjectContent::Integer(bytes)) => Ok(*bytes),
        _ => Err(protocol_msg("CertID without serialNumber")),
    }
}

/// Compare INTEGER contents, ignoring leading zero octets
fn same_serial(a: &[u8], b: &[u8]) -> bool {
    fn trim(bytes: &[u8]) -> &[u8] {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        &bytes[start..]
    }
    trim(a) == trim(b)
}

type SingleFields = (CertStatus, DateTime<Utc>, Option<DateTime<Utc>>);

fn parse_single_response(fields: &[DerObject<'_>]) -> Result<SingleFields, OcspError> {
    let status_field = fields
        .get(1)
        .ok_or_else(|| protocol_msg("SingleResponse without certStatus"))?;
    let cert_status = parse_cert_status(status_field)?;

    let this_update = fields
        .get(2)
        .ok_or_else(|| protocol_msg("SingleResponse without thisUpdate"))
        .and_then(|field| generalized_time(field, "thisUpdate"))?;

    let next_update = match fields.get(3).and_then(|field| context_contents(field, 0)) {
        Some(contents) => Some(generalized_time(
            &parse_exact(contents, "nextUpdate")?,
            "nextUpdate",
        )?),
        None => None,
    };

    Ok((cert_status, this_update, next_update))
}

fn parse_cert_status(field: &DerObject<'_>) -> Result<CertStatus, OcspError> {
    if field.header.class() != Class::ContextSpecific {
        return Err(protocol_msg("certStatus is not context-specific"));
    }

    match field.header.tag() {
        Tag(0) => Ok(CertStatus::Good),
        Tag(2) => Ok(CertStatus::Unknown),
        Tag(1) => {
            // RevokedInfo ::= SEQUENCE { revocationTime, revocationReason [0] EXPLICIT CRLReason OPTIONAL }
            let contents = context_contents(field, 1)
                .ok_or_else(|| protocol_msg("undecodable RevokedInfo"))?;
            let revoked = parse_all(contents, "RevokedInfo")?;
            let revocation_time = revoked
                .first()
                .ok_or_else(|| protocol_msg("RevokedInfo without revocationTime"))
                .and_then(|field| generalized_time(field, "revocationTime"))?;

            let reason = match revoked.get(1).and_then(|field| context_contents(field, 0)) {
                Some(wrapped) => {
                    let code = enumerated(
                        &parse_exact(wrapped, "revocationReason")?,
                        "revocationReason",
                    )?;
                    Some(RevocationReason::from_code(code).ok_or_else(|| {
                        protocol_msg(format!("unknown revocation reason {}", code))
                    })?)
                }
                None => None,
            };

            Ok(CertStatus::Revoked {
                revocation_time,
                reason,
            })
        }
        other => Err(protocol_msg(format!("unknown certStatus tag [{}]", other.0))),
    }
}

/// GeneralizedTime in UTC; fractional seconds are truncated
fn generalized_time(object: &DerObject<'_>, what: &str) -> Result<DateTime<Utc>, OcspError> {
    let BerObjectContent::GeneralizedTime(time) = &object.content else {
        return Err(protocol_msg(format!("{} is not a GeneralizedTime", what)));
    };
    if !matches!(time.tz, ASN1TimeZone::Z) {
        return Err(protocol_msg(format!("{} is not UTC", what)));
    }

    i32::try_from(time.year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, u32::from(time.month), u32::from(time.day)))
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(time.hour),
                u32::from(time.minute),
                u32::from(time.second),
            )
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| protocol_msg(format!("{} out of range", what)))
}

/// Find the nonce among the responseExtensions contents
fn find_nonce(contents: &[u8]) -> Result<Option<Vec<u8>>, OcspError> {
    let extensions = parse_exact(contents, "responseExtensions")?;
    for extension in sequence(&extensions, "responseExtensions")? {
        let parts = sequence(extension, "Extension")?;
        let is_nonce = parts
            .first()
            .and_then(|part| part.as_oid().ok())
            .is_some_and(|id| *id == oid!(1.3.6.1.5.5.7.48.1.2));
        if !is_nonce {
            continue;
        }

        // extnValue is last; a critical BOOLEAN may sit in between
        let value = parts
            .last()
            .ok_or_else(|| protocol_msg("nonce extension without extnValue"))
            .and_then(|part| octet_string(part, "extnValue"))?;
        // The nonce itself is usually wrapped in a further OCTET STRING
        let nonce = match parse_der(value) {
            Ok((rest, inner)) if rest.is_empty() => match inner.content {
                BerObjectContent::OctetString(bytes) => bytes.to_vec(),
                _ => value.to_vec(),
            },
            _ => value.to_vec(),
        };
        return Ok(Some(nonce));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::{der_explicit_context, der_octet_string, der_oid, der_sequence};
    use crate::request::OID_OCSP_NONCE;
    use chrono::TimeZone;

    const GOOD: &[u8] = include_bytes!("../tests/fixtures/good-resp.der");
    const REVOKED: &[u8] = include_bytes!("../tests/fixtures/revoked-resp.der");
    const UNKNOWN: &[u8] = include_bytes!("../tests/fixtures/unknown-resp.der");

    const LEAF_SERIAL: &[u8] = &[0x1A, 0x2B, 0x3C, 0x4D, 0x5E];
    const REVOKED_SERIAL: &[u8] = &[0x00, 0xC0, 0xFF, 0xEE];
    const STRANGER_SERIAL: &[u8] = &[0x0B, 0xAD, 0xF0, 0x0D];

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_good_response() {
        let response = OcspResponse::parse(GOOD, LEAF_SERIAL).unwrap();
        assert_eq!(response.response_status(), ResponseStatus::Successful);

        let basic = response.basic().unwrap();
        assert_eq!(basic.cert_status, CertStatus::Good);
        assert_eq!(basic.this_update, utc(2026, 10, 16, 6, 55, 45));
        assert_eq!(basic.next_update, Some(utc(2026, 10, 23, 6, 55, 45)));
        assert_eq!(basic.produced_at, utc(2026, 10, 16, 6, 55, 45));
        assert_eq!(basic.nonce, None);
    }

    #[test]
    fn test_revoked_response_with_reason() {
        let response = OcspResponse::parse(REVOKED, REVOKED_SERIAL).unwrap();
        let basic = response.basic().unwrap();
        assert_eq!(
            basic.cert_status,
            CertStatus::Revoked {
                revocation_time: utc(2025, 3, 1, 8, 30, 0),
                reason: Some(RevocationReason::KeyCompromise),
            }
        );
        assert_eq!(basic.cert_status.to_string(), "revoked");
    }

    #[test]
    fn test_unknown_response() {
        let response = OcspResponse::parse(UNKNOWN, STRANGER_SERIAL).unwrap();
        assert_eq!(response.basic().unwrap().cert_status, CertStatus::Unknown);
    }

    #[test]
    fn test_serial_mismatch_is_protocol_error() {
        let err = OcspResponse::parse(GOOD, STRANGER_SERIAL).unwrap_err();
        match err {
            OcspError::Protocol(msg) => assert!(msg.contains("requested serial")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_serial_match_ignores_sign_octet() {
        assert!(OcspResponse::parse(REVOKED, &[0xC0, 0xFF, 0xEE]).is_ok());
    }

    #[test]
    fn test_unsuccessful_statuses_have_no_cert_fields() {
        for (code, expected) in [
            (1u8, ResponseStatus::MalformedRequest),
            (2, ResponseStatus::InternalError),
            (3, ResponseStatus::TryLater),
            (5, ResponseStatus::SigRequired),
            (6, ResponseStatus::Unauthorized),
        ] {
            let der = [0x30, 0x03, 0x0A, 0x01, code];
            let response = OcspResponse::parse(&der, LEAF_SERIAL).unwrap();
            assert_eq!(response, OcspResponse::Unsuccessful(expected));
            assert!(response.basic().is_none());
        }
        assert_eq!(ResponseStatus::TryLater.to_string(), "tryLater");
    }

    #[test]
    fn test_unassigned_status_code_is_rejected() {
        let err = OcspResponse::parse(&[0x30, 0x03, 0x0A, 0x01, 0x04], LEAF_SERIAL).unwrap_err();
        assert!(matches!(err, OcspError::Protocol(_)));
    }

    #[test]
    fn test_garbage_is_protocol_error() {
        let cases: [&[u8]; 3] = [b"", b"<html>busy</html>", &[0x30, 0x05, 0x0A]];
        for bytes in cases {
            let err = OcspResponse::parse(bytes, LEAF_SERIAL).unwrap_err();
            assert!(matches!(err, OcspError::Protocol(_)), "{:?}", bytes);
        }
    }

    #[test]
    fn test_successful_without_response_bytes() {
        let err = OcspResponse::parse(&[0x30, 0x03, 0x0A, 0x01, 0x00], LEAF_SERIAL).unwrap_err();
        assert!(matches!(err, OcspError::Protocol(_)));
    }

    #[test]
    fn test_non_basic_response_type_is_rejected() {
        let mut bytes = der_oid(&[1, 3, 6, 1, 5, 5, 7, 48, 1, 99]);
        bytes.extend_from_slice(&der_octet_string(&[0x30, 0x00]));
        let mut body = vec![0x0A, 0x01, 0x00];
        body.extend_from_slice(&der_explicit_context(0, &der_sequence(&bytes)));
        let der = der_sequence(&body);

        let err = OcspResponse::parse(&der, LEAF_SERIAL).unwrap_err();
        match err {
            OcspError::Protocol(msg) => assert!(msg.contains("id-pkix-ocsp-basic")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    fn decode_time(text: &[u8]) -> Result<DateTime<Utc>, OcspError> {
        let mut der = vec![0x18, text.len() as u8];
        der.extend_from_slice(text);
        generalized_time(&parse_exact(&der, "time")?, "time")
    }

    #[test]
    fn test_generalized_time_forms() {
        assert_eq!(decode_time(b"20250301083000Z").unwrap(), utc(2025, 3, 1, 8, 30, 0));
        assert_eq!(
            decode_time(b"20250301083000.123Z").unwrap(),
            utc(2025, 3, 1, 8, 30, 0)
        );
        assert!(decode_time(b"20250301083000").is_err());
        assert!(decode_time(b"not a time").is_err());
    }

    #[test]
    fn test_time_field_with_wrong_type() {
        let der = der_octet_string(b"20250301083000Z");
        let object = parse_exact(&der, "time").unwrap();
        assert!(matches!(
            generalized_time(&object, "thisUpdate"),
            Err(OcspError::Protocol(_))
        ));
    }

    #[test]
    fn test_reason_names() {
        assert_eq!(RevocationReason::from_code(1).unwrap().as_str(), "keyCompromise");
        assert_eq!(RevocationReason::from_code(2).unwrap().as_str(), "cACompromise");
        assert_eq!(RevocationReason::from_code(8).unwrap().as_str(), "removeFromCRL");
        assert!(RevocationReason::from_code(7).is_none());
    }

    #[test]
    fn test_find_nonce() {
        let mut ext = der_oid(OID_OCSP_NONCE);
        ext.extend_from_slice(&der_octet_string(&der_octet_string(&[1, 2, 3])));
        let extensions = der_sequence(&der_sequence(&ext));
        assert_eq!(find_nonce(&extensions).unwrap(), Some(vec![1, 2, 3]));

        let mut other = der_oid(&[2, 5, 29, 21]);
        other.extend_from_slice(&der_octet_string(&[0x0A, 0x01, 0x01]));
        assert_eq!(find_nonce(&der_sequence(&der_sequence(&other))).unwrap(), None);
    }
}
