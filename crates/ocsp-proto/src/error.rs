//! Error types for OCSP status checking
//!
//! Every pipeline stage fails with one of the four stage variants of
//! [`OcspError`]; an invalid configuration is rejected before the first
//! stage runs. Errors are terminal for the check that raised them and their
//! `Display` text is meant to be shown to the operator as-is.

/// Errors that can occur while checking a certificate's OCSP status
#[derive(Debug, thiserror::Error)]
pub enum OcspError {
    /// Input bytes are not a PEM/DER encoded X.509 certificate
    #[error("File is not a certificate: {0}")]
    Parse(String),

    /// The leaf certificate does not name an OCSP responder
    #[error("No OCSP responder: {0}")]
    NoResponder(String),

    /// The HTTP round trip to the responder failed
    #[error("OCSP transport error: {0}")]
    Transport(#[from] TransportError),

    /// The responder's answer is not a well-formed OCSP response
    #[error("Malformed OCSP response: {0}")]
    Protocol(String),

    /// The check configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OcspError {
    /// HTTP status code carried by a transport failure, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            OcspError::Transport(TransportError::Status(code)) => Some(*code),
            _ => None,
        }
    }
}

/// Failures of the single HTTP POST to the responder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Responder answered with a non-success HTTP status
    #[error("responder returned HTTP {0}")]
    Status(u16),

    /// Request did not complete within the configured timeout
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Connection or I/O failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body exceeds the configured size limit
    #[error("response of {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Invalid check configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid OCSP check configuration: {0}")]
pub struct ConfigError(pub String);
