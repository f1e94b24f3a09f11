//! OCSP Certificate Status Checking
//!
//! This crate checks whether a certificate has been revoked by asking the
//! OCSP responder (RFC 6960) named in the certificate itself.
//!
//! # Pipeline
//!
//! 1. Load the leaf and issuer certificates from PEM ([`Certificate`])
//! 2. Find the responder in the leaf's Authority Information Access extension
//!    ([`locate_responder`])
//! 3. Build a DER request for the leaf ([`OcspRequest`])
//! 4. POST it once to the responder ([`OcspTransport`], [`HttpTransport`])
//! 5. Decode the answer ([`OcspResponse`])
//! 6. Render the operator report ([`StatusReport`])
//!
//! Any failing stage ends the check. There is no caching and no retry.
//!
//! # Security Notes
//!
//! The responder's signature is **not** verified. The report says so on its
//! own line, and callers that need a trustworthy verdict must validate the
//! response signature themselves.
//!
//! # Example
//!
//! ```no_run
//! use ocsp_proto::{check_status, CheckConfig, DigestAlgorithm};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let leaf = std::fs::read("leaf.pem")?;
//! let issuer = std::fs::read("issuer.pem")?;
//!
//! let config = CheckConfig::new()
//!     .with_digest(DigestAlgorithm::Sha256)
//!     .with_display_offset_minutes(7 * 60);
//!
//! let report = check_status(&leaf, &issuer, &config)?;
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cert;
pub mod checker;
pub mod config;
mod der;
pub mod error;
pub mod locator;
pub mod report;
pub mod request;
pub mod response;
pub mod serial;
pub mod transport;

pub use cert::Certificate;
pub use checker::{StatusChecker, check_status};
pub use config::{CheckConfig, DigestAlgorithm};
pub use error::{ConfigError, OcspError, TransportError};
pub use locator::{ResponderLocation, locate_responder};
pub use report::{CertificateSummary, NOT_AVAILABLE, StatusReport, render_serial};
pub use request::OcspRequest;
pub use response::{BasicResponse, CertStatus, OcspResponse, ResponseStatus, RevocationReason};
pub use serial::{decimal_to_hex, hex_to_decimal};
pub use transport::{HttpTransport, OcspTransport};
