//! The check pipeline
//!
//! load -> locate -> build -> transport -> interpret -> format, strictly in
//! that order. The first failing stage ends the check and its error is
//! returned unchanged; no stage is retried.

use crate::cert::Certificate;
use crate::config::CheckConfig;
use crate::error::OcspError;
use crate::locator::locate_responder;
use crate::report::StatusReport;
use crate::request::OcspRequest;
use crate::response::OcspResponse;
use crate::serial::serial_to_hex;
use crate::transport::{HttpTransport, OcspTransport};
use tracing::{debug, info, warn, Span};

/// Runs status checks against one transport
///
/// The checker holds no per-check state; any number of checks may run
/// through the same instance.
#[derive(Debug)]
pub struct StatusChecker<T: OcspTransport> {
    config: CheckConfig,
    transport: T,
    span: Option<Span>,
}

impl StatusChecker<HttpTransport> {
    /// Create a checker that talks HTTP with the configured limits
    pub fn http(config: CheckConfig) -> Result<Self, OcspError> {
        let transport = HttpTransport::new(config.http_timeout_secs, config.max_response_bytes)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: OcspTransport> StatusChecker<T> {
    pub fn new(config: CheckConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            span: None,
        }
    }

    /// Run every check inside `span` (e.g. an operator session span)
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check the revocation status of `leaf_pem` as issued by `issuer_pem`
    pub fn check(&self, leaf_pem: &[u8], issuer_pem: &[u8]) -> Result<StatusReport, OcspError> {
        let _entered = self.span.as_ref().map(Span::enter);

        let result = self.run(leaf_pem, issuer_pem);
        if let Err(ref e) = result {
            warn!(error = %e, "OCSP check failed");
        }
        result
    }

    fn run(&self, leaf_pem: &[u8], issuer_pem: &[u8]) -> Result<StatusReport, OcspError> {
        let offset = self.config.display_offset()?;

        let (leaf, issuer) = Certificate::load_pair(leaf_pem, issuer_pem)?;
        let serial = serial_to_hex(&leaf.serial);
        debug!(serial = %serial, subject = %leaf.subject, "certificates loaded");

        let responder = locate_responder(&leaf)?;
        debug!(uri = %responder.uri, "responder located");

        let mut request = OcspRequest::new(&leaf, &issuer, self.config.digest_algorithm);
        if self.config.include_nonce {
            request = request.with_nonce(OcspRequest::generate_nonce());
        }
        let request_der = request.to_der();
        debug!(
            digest = %self.config.digest_algorithm,
            request_len = request_der.len(),
            nonce = request.nonce().is_some(),
            "request built"
        );

        let response_der = self.transport.post(&responder.uri, &request_der)?;

        let response = OcspResponse::parse(&response_der, request.serial_number())?;
        if let (Some(sent), Some(basic)) = (request.nonce(), response.basic()) {
            // Responders may omit the nonce, but must not answer with a different one
            if let Some(ref echoed) = basic.nonce {
                if echoed.as_slice() != sent {
                    return Err(OcspError::Protocol(
                        "response nonce does not match request".to_string(),
                    ));
                }
            }
        }

        info!(
            serial = %serial,
            uri = %responder.uri,
            response_status = %response.response_status(),
            cert_status = response.basic().map(|b| b.cert_status.as_str()).unwrap_or("-"),
            "OCSP check completed"
        );

        Ok(StatusReport::new(response, responder, &leaf, offset))
    }
}

/// Check `leaf_pem` against `issuer_pem` over HTTP
///
/// The configuration is validated before any stage runs.
pub fn check_status(
    leaf_pem: &[u8],
    issuer_pem: &[u8],
    config: &CheckConfig,
) -> Result<StatusReport, OcspError> {
    config.validate()?;
    StatusChecker::http(config.clone())?.check(leaf_pem, issuer_pem)
}
