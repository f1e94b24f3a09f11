//! OCSP responder discovery
//!
//! The responder URI comes from the leaf certificate's Authority Information
//! Access extension. Only entries with the `id-ad-ocsp` access method count;
//! `caIssuers` and any other methods are skipped. When several OCSP entries
//! exist, the first one carrying a URI wins.

use crate::cert::{Certificate, OID_ACCESS_METHOD_OCSP, OID_AUTHORITY_INFO_ACCESS};
use crate::error::OcspError;
use std::fmt;

/// Where the responder was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderLocation {
    /// Responder URI
    pub uri: String,
    /// Access method OID the URI was listed under (always `id-ad-ocsp`)
    pub access_method: String,
}

impl fmt::Display for ResponderLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Find the OCSP responder of `cert`
pub fn locate_responder(cert: &Certificate) -> Result<ResponderLocation, OcspError> {
    if !cert.has_extension(OID_AUTHORITY_INFO_ACCESS) {
        return Err(OcspError::NoResponder(
            "certificate has no Authority Information Access extension".to_string(),
        ));
    }

    cert.access_descriptions
        .iter()
        .filter(|desc| desc.method == OID_ACCESS_METHOD_OCSP)
        .find_map(|desc| desc.location.clone())
        .map(|uri| ResponderLocation {
            uri,
            access_method: OID_ACCESS_METHOD_OCSP.to_string(),
        })
        .ok_or_else(|| {
            OcspError::NoResponder(
                "Authority Information Access extension has no OCSP URI entry".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::AccessDescription;

    const LEAF: &[u8] = include_bytes!("../tests/fixtures/leaf.pem");
    const NO_OCSP: &[u8] = include_bytes!("../tests/fixtures/no-ocsp.pem");
    const NO_AIA: &[u8] = include_bytes!("../tests/fixtures/no-aia.pem");

    #[test]
    fn test_first_ocsp_entry_is_selected() {
        let cert = Certificate::from_pem(LEAF).unwrap();
        let location = locate_responder(&cert).unwrap();
        assert_eq!(location.uri, "http://ocsp.example.test/primary");
        assert_eq!(location.access_method, OID_ACCESS_METHOD_OCSP);
        assert_eq!(location.to_string(), "http://ocsp.example.test/primary");
    }

    #[test]
    fn test_aia_without_ocsp_entry() {
        let cert = Certificate::from_pem(NO_OCSP).unwrap();
        let err = locate_responder(&cert).unwrap_err();
        match err {
            OcspError::NoResponder(msg) => assert!(msg.contains("no OCSP URI entry")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_aia_extension() {
        let cert = Certificate::from_pem(NO_AIA).unwrap();
        let err = locate_responder(&cert).unwrap_err();
        match err {
            OcspError::NoResponder(msg) => {
                assert!(msg.contains("no Authority Information Access extension"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ocsp_entry_without_uri_is_skipped() {
        let mut cert = Certificate::from_pem(LEAF).unwrap();
        cert.access_descriptions = vec![
            AccessDescription {
                method: OID_ACCESS_METHOD_OCSP.to_string(),
                location: None,
            },
            AccessDescription {
                method: OID_ACCESS_METHOD_OCSP.to_string(),
                location: Some("http://fallback.example.test".to_string()),
            },
        ];
        let location = locate_responder(&cert).unwrap();
        assert_eq!(location.uri, "http://fallback.example.test");
    }
}
