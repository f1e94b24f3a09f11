//! Certificate loading
//!
//! Decodes PEM bytes into an owned [`Certificate`] carrying exactly what the
//! rest of the pipeline needs: display metadata, the serial number, the
//! extension list with decoded Authority Information Access entries, and the
//! issuer-side inputs for the OCSP CertID hashes.

use crate::error::OcspError;
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use std::sync::LazyLock;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::oid_registry::asn1_rs::oid;
use x509_parser::oid_registry::{OidEntry, OidRegistry};
use x509_parser::prelude::*;

/// Attribute names used when rendering subject and issuer names
///
/// The stock x509 names plus `UID` for userId (0.9.2342.19200300.100.1.1).
static NAME_REGISTRY: LazyLock<OidRegistry<'static>> = LazyLock::new(|| {
    let mut registry = OidRegistry::default().with_crypto().with_x509();
    registry.insert(oid!(0.9.2342.19200300.100.1.1), OidEntry::new("UID", "userId"));
    registry
});

/// Authority Information Access extension (1.3.6.1.5.5.7.1.1)
pub const OID_AUTHORITY_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.1";

/// id-ad-ocsp access method (1.3.6.1.5.5.7.48.1)
pub const OID_ACCESS_METHOD_OCSP: &str = "1.3.6.1.5.5.7.48.1";

/// One certificate extension in encoding order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Dotted extension OID
    pub oid: String,
    /// Critical flag
    pub critical: bool,
    /// Raw extnValue contents
    pub value: Vec<u8>,
}

/// One AccessDescription of the Authority Information Access extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDescription {
    /// Dotted access method OID
    pub method: String,
    /// Access location, when it is a URI
    pub location: Option<String>,
}

/// Parsed X.509 certificate
#[derive(Debug, Clone)]
pub struct Certificate {
    /// Subject distinguished name, e.g. `C=VN, O=Example, CN=Example Corp`
    pub subject: String,
    /// Issuer distinguished name
    pub issuer: String,
    /// Serial number
    pub serial: BigUint,
    /// Start of the validity window
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    pub not_after: DateTime<Utc>,
    /// Extensions in certificate order
    pub extensions: Vec<Extension>,
    /// Decoded Authority Information Access entries in extension order
    pub access_descriptions: Vec<AccessDescription>,
    raw_serial: Vec<u8>,
    subject_der: Vec<u8>,
    public_key_bits: Vec<u8>,
}

impl Certificate {
    /// Parse a PEM-encoded certificate
    pub fn from_pem(pem_data: &[u8]) -> Result<Self, OcspError> {
        let (_, pem) = x509_parser::pem::parse_x509_pem(pem_data)
            .map_err(|e| OcspError::Parse(format!("invalid PEM: {}", e)))?;

        if pem.label != "CERTIFICATE" {
            return Err(OcspError::Parse(format!(
                "unexpected PEM label '{}'",
                pem.label
            )));
        }

        Self::from_der(&pem.contents)
    }

    /// Parse a DER-encoded certificate
    pub fn from_der(der: &[u8]) -> Result<Self, OcspError> {
        let (_, cert) = parse_x509_certificate(der)
            .map_err(|e| OcspError::Parse(format!("invalid X.509 structure: {}", e)))?;

        let validity = cert.validity();
        let not_before = asn1_to_utc(&validity.not_before)?;
        let not_after = asn1_to_utc(&validity.not_after)?;

        let mut extensions = Vec::new();
        let mut access_descriptions = Vec::new();
        for ext in cert.extensions() {
            let oid = ext.oid.to_id_string();
            if oid == OID_AUTHORITY_INFO_ACCESS {
                if let ParsedExtension::AuthorityInfoAccess(aia) = ext.parsed_extension() {
                    for desc in aia.accessdescs.iter() {
                        let location = match &desc.access_location {
                            GeneralName::URI(uri) => Some(uri.to_string()),
                            _ => None,
                        };
                        access_descriptions.push(AccessDescription {
                            method: desc.access_method.to_id_string(),
                            location,
                        });
                    }
                }
            }
            extensions.push(Extension {
                oid,
                critical: ext.critical,
                value: ext.value.to_vec(),
            });
        }

        let public_key_bits: &[u8] = cert.public_key().subject_public_key.data.as_ref();

        Ok(Self {
            subject: name_to_string(cert.subject()),
            issuer: name_to_string(cert.issuer()),
            serial: cert.serial.clone(),
            not_before,
            not_after,
            extensions,
            access_descriptions,
            raw_serial: cert.raw_serial().to_vec(),
            subject_der: cert.subject().as_raw().to_vec(),
            public_key_bits: public_key_bits.to_vec(),
        })
    }

    /// Parse the leaf and issuer certificates of one check
    ///
    /// Errors name which of the two inputs failed.
    pub fn load_pair(leaf_pem: &[u8], issuer_pem: &[u8]) -> Result<(Self, Self), OcspError> {
        let leaf = Self::from_pem(leaf_pem).map_err(|e| label_parse_error("leaf", e))?;
        let issuer = Self::from_pem(issuer_pem).map_err(|e| label_parse_error("issuer", e))?;
        Ok((leaf, issuer))
    }

    /// Whether the certificate carries an extension with this OID
    pub fn has_extension(&self, oid: &str) -> bool {
        self.extensions.iter().any(|ext| ext.oid == oid)
    }

    /// Serial number content octets exactly as encoded in the certificate
    pub fn raw_serial(&self) -> &[u8] {
        &self.raw_serial
    }

    /// DER encoding of the subject name (input to the issuer name hash)
    pub fn subject_der(&self) -> &[u8] {
        &self.subject_der
    }

    /// Subject public key BIT STRING contents (input to the issuer key hash)
    pub fn public_key_bits(&self) -> &[u8] {
        &self.public_key_bits
    }
}

fn label_parse_error(which: &str, err: OcspError) -> OcspError {
    match err {
        OcspError::Parse(msg) => OcspError::Parse(format!("{} certificate: {}", which, msg)),
        other => other,
    }
}

fn asn1_to_utc(time: &ASN1Time) -> Result<DateTime<Utc>, OcspError> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| OcspError::Parse("validity time out of range".to_string()))
}

/// Render a distinguished name in certificate order, `, ` between RDNs
fn name_to_string(name: &X509Name) -> String {
    name.to_string_with_registry(&NAME_REGISTRY)
        .unwrap_or_else(|_| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF: &[u8] = include_bytes!("../tests/fixtures/leaf.pem");
    const ISSUER: &[u8] = include_bytes!("../tests/fixtures/issuer.pem");
    const NO_AIA: &[u8] = include_bytes!("../tests/fixtures/no-aia.pem");
    const GARBAGE: &[u8] = include_bytes!("../tests/fixtures/garbage.pem");

    #[test]
    fn test_load_leaf_metadata() {
        let cert = Certificate::from_pem(LEAF).unwrap();
        assert_eq!(cert.subject, "C=VN, O=Example, CN=Example Corp, UID=MST:0101234567");
        assert_eq!(cert.issuer, "C=VN, O=Example Trust, CN=Example Issuing CA");
        assert_eq!(cert.serial, BigUint::from(0x1A2B3C4D5Eu64));
        assert_eq!(cert.raw_serial(), &[0x1A, 0x2B, 0x3C, 0x4D, 0x5E]);
        assert!(cert.not_before < cert.not_after);
    }

    #[test]
    fn test_load_leaf_access_descriptions_in_order() {
        let cert = Certificate::from_pem(LEAF).unwrap();
        assert!(cert.has_extension(OID_AUTHORITY_INFO_ACCESS));

        let methods: Vec<_> = cert
            .access_descriptions
            .iter()
            .map(|d| d.method.as_str())
            .collect();
        assert_eq!(
            methods,
            vec!["1.3.6.1.5.5.7.48.2", OID_ACCESS_METHOD_OCSP, OID_ACCESS_METHOD_OCSP]
        );
        assert_eq!(
            cert.access_descriptions[1].location.as_deref(),
            Some("http://ocsp.example.test/primary")
        );
    }

    #[test]
    fn test_certificate_without_aia() {
        let cert = Certificate::from_pem(NO_AIA).unwrap();
        assert!(!cert.has_extension(OID_AUTHORITY_INFO_ACCESS));
        assert!(cert.access_descriptions.is_empty());
    }

    #[test]
    fn test_issuer_hash_inputs() {
        let issuer = Certificate::from_pem(ISSUER).unwrap();
        // Subject name is a DER SEQUENCE
        assert_eq!(issuer.subject_der()[0], 0x30);
        // RSA-2048 public key: SEQUENCE { modulus, exponent }
        assert_eq!(issuer.public_key_bits()[0], 0x30);
        assert!(issuer.public_key_bits().len() > 256);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = Certificate::from_pem(GARBAGE).unwrap_err();
        assert!(matches!(err, OcspError::Parse(_)));
    }

    #[test]
    fn test_non_pem_is_parse_error() {
        let err = Certificate::from_pem(b"definitely not a certificate").unwrap_err();
        assert!(matches!(err, OcspError::Parse(_)));
    }

    #[test]
    fn test_load_pair_labels_failing_input() {
        let err = Certificate::load_pair(LEAF, GARBAGE).unwrap_err();
        match err {
            OcspError::Parse(msg) => assert!(msg.starts_with("issuer certificate")),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = Certificate::load_pair(b"nope", ISSUER).unwrap_err();
        match err {
            OcspError::Parse(msg) => assert!(msg.starts_with("leaf certificate")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
