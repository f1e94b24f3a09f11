//! OCSP request construction (RFC 6960 Section 4.1)
//!
//! ```asn1
//! OCSPRequest ::= SEQUENCE {
//!     tbsRequest          TBSRequest,
//!     optionalSignature   [0] EXPLICIT Signature OPTIONAL
//! }
//!
//! TBSRequest ::= SEQUENCE {
//!     version             [0] EXPLICIT Version DEFAULT v1,
//!     requestorName       [1] EXPLICIT GeneralName OPTIONAL,
//!     requestList         SEQUENCE OF Request,
//!     requestExtensions   [2] EXPLICIT Extensions OPTIONAL
//! }
//!
//! Request ::= SEQUENCE {
//!     reqCert                 CertID,
//!     singleRequestExtensions [0] EXPLICIT Extensions OPTIONAL
//! }
//!
//! CertID ::= SEQUENCE {
//!     hashAlgorithm       AlgorithmIdentifier,
//!     issuerNameHash      OCTET STRING,
//!     issuerKeyHash       OCTET STRING,
//!     serialNumber        CertificateSerialNumber
//! }
//! ```
//!
//! Requests are unsigned and carry exactly one certificate. The leaf/issuer
//! relationship is not checked here; a mismatched issuer still produces a
//! well-formed request that the responder will answer `unknown` or reject.

use crate::cert::Certificate;
use crate::config::DigestAlgorithm;
use crate::der::{
    der_explicit_context, der_integer, der_null, der_octet_string, der_oid, der_sequence,
};

/// id-pkix-ocsp-nonce (1.3.6.1.5.5.7.48.1.2)
pub(crate) const OID_OCSP_NONCE: &[u64] = &[1, 3, 6, 1, 5, 5, 7, 48, 1, 2];

/// Single-certificate OCSP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcspRequest {
    digest_algorithm: DigestAlgorithm,
    issuer_name_hash: Vec<u8>,
    issuer_key_hash: Vec<u8>,
    serial_number: Vec<u8>,
    nonce: Option<Vec<u8>>,
}

impl OcspRequest {
    /// Create a request for `leaf` as issued by `issuer`
    ///
    /// Hashes the issuer's DER subject name and its subject public key
    /// (BIT STRING contents, without tag, length or unused-bits octet).
    pub fn new(leaf: &Certificate, issuer: &Certificate, digest_algorithm: DigestAlgorithm) -> Self {
        Self {
            digest_algorithm,
            issuer_name_hash: digest_algorithm.digest(issuer.subject_der()),
            issuer_key_hash: digest_algorithm.digest(issuer.public_key_bits()),
            serial_number: leaf.raw_serial().to_vec(),
            nonce: None,
        }
    }

    /// Attach a nonce extension
    pub fn with_nonce(mut self, nonce: Vec<u8>) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// 16 random bytes suitable for [`OcspRequest::with_nonce`]
    pub fn generate_nonce() -> Vec<u8> {
        rand::random::<[u8; 16]>().to_vec()
    }

    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest_algorithm
    }

    pub fn issuer_name_hash(&self) -> &[u8] {
        &self.issuer_name_hash
    }

    pub fn issuer_key_hash(&self) -> &[u8] {
        &self.issuer_key_hash
    }

    /// Serial number content octets of the certificate being checked
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    pub fn nonce(&self) -> Option<&[u8]> {
        self.nonce.as_deref()
    }

    /// Encode the request to DER
    pub fn to_der(&self) -> Vec<u8> {
        // Inside out: CertID -> Request -> TBSRequest -> OCSPRequest
        let cert_id = self.build_cert_id();
        let request = der_sequence(&cert_id);
        let tbs_request = self.build_tbs_request(&request);
        der_sequence(&tbs_request)
    }

    fn build_cert_id(&self) -> Vec<u8> {
        let mut hash_algo = der_oid(self.digest_algorithm.oid_arcs());
        hash_algo.extend_from_slice(&der_null());

        let mut cert_id = der_sequence(&hash_algo);
        cert_id.extend_from_slice(&der_octet_string(&self.issuer_name_hash));
        cert_id.extend_from_slice(&der_octet_string(&self.issuer_key_hash));
        cert_id.extend_from_slice(&der_integer(&self.serial_number));

        der_sequence(&cert_id)
    }

    fn build_tbs_request(&self, request: &[u8]) -> Vec<u8> {
        // version and requestorName are omitted
        let mut tbs = der_sequence(request);

        if let Some(ref nonce) = self.nonce {
            tbs.extend_from_slice(&der_explicit_context(2, &build_nonce_extension(nonce)));
        }

        der_sequence(&tbs)
    }
}

/// `Extensions` holding a single nonce extension
///
/// The extnValue wraps the nonce in its own OCTET STRING (RFC 8954).
fn build_nonce_extension(nonce: &[u8]) -> Vec<u8> {
    let mut ext = der_oid(OID_OCSP_NONCE);
    ext.extend_from_slice(&der_octet_string(&der_octet_string(nonce)));
    der_sequence(&der_sequence(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{context_contents, octet_string, parse_exact};

    const LEAF: &[u8] = include_bytes!("../tests/fixtures/leaf.pem");
    const ISSUER: &[u8] = include_bytes!("../tests/fixtures/issuer.pem");
    const REVOKED: &[u8] = include_bytes!("../tests/fixtures/revoked.pem");
    const OPENSSL_SHA1_REQUEST: &[u8] = include_bytes!("../tests/fixtures/leaf-req-sha1.der");
    const OPENSSL_SHA256_REQUEST: &[u8] = include_bytes!("../tests/fixtures/leaf-req-sha256.der");

    fn pair() -> (Certificate, Certificate) {
        Certificate::load_pair(LEAF, ISSUER).unwrap()
    }

    #[test]
    fn test_sha1_request_matches_openssl() {
        let (leaf, issuer) = pair();
        let request = OcspRequest::new(&leaf, &issuer, DigestAlgorithm::Sha1);
        assert_eq!(request.to_der(), OPENSSL_SHA1_REQUEST);
    }

    #[test]
    fn test_sha256_request_matches_openssl() {
        let (leaf, issuer) = pair();
        let request = OcspRequest::new(&leaf, &issuer, DigestAlgorithm::Sha256);
        assert_eq!(request.to_der(), OPENSSL_SHA256_REQUEST);
    }

    #[test]
    fn test_hash_lengths_follow_algorithm() {
        let (leaf, issuer) = pair();
        let sha1 = OcspRequest::new(&leaf, &issuer, DigestAlgorithm::Sha1);
        assert_eq!(sha1.issuer_name_hash().len(), 20);
        assert_eq!(sha1.issuer_key_hash().len(), 20);

        let sha256 = OcspRequest::new(&leaf, &issuer, DigestAlgorithm::Sha256);
        assert_eq!(sha256.issuer_name_hash().len(), 32);
        assert_eq!(sha256.issuer_key_hash().len(), 32);
    }

    #[test]
    fn test_serial_with_high_bit_keeps_sign_octet() {
        let leaf = Certificate::from_pem(REVOKED).unwrap();
        let issuer = Certificate::from_pem(ISSUER).unwrap();
        let request = OcspRequest::new(&leaf, &issuer, DigestAlgorithm::Sha256);
        assert_eq!(request.serial_number(), &[0x00, 0xC0, 0xFF, 0xEE]);
    }

    #[test]
    fn test_nonce_extension_layout() {
        let (leaf, issuer) = pair();
        let nonce = vec![0xAB; 16];
        let der = OcspRequest::new(&leaf, &issuer, DigestAlgorithm::Sha256)
            .with_nonce(nonce.clone())
            .to_der();

        let ocsp_request = parse_exact(&der, "OCSPRequest").unwrap();
        let tbs = &ocsp_request.as_sequence().unwrap()[0];
        let tbs_fields = tbs.as_sequence().unwrap();
        assert_eq!(tbs_fields.len(), 2);
        let wrapped = context_contents(&tbs_fields[1], 2).expect("requestExtensions is [2]");

        let extensions = parse_exact(wrapped, "Extensions").unwrap();
        let extension = &extensions.as_sequence().unwrap()[0];
        let fields = extension.as_sequence().unwrap();
        assert_eq!(
            fields[0].as_oid().unwrap().to_id_string(),
            "1.3.6.1.5.5.7.48.1.2"
        );
        let value = octet_string(&fields[1], "extnValue").unwrap();
        let inner = parse_exact(value, "nonce").unwrap();
        assert_eq!(octet_string(&inner, "nonce").unwrap(), nonce.as_slice());
    }

    #[test]
    fn test_generated_nonces_differ() {
        let a = OcspRequest::generate_nonce();
        let b = OcspRequest::generate_nonce();
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
    }
}
