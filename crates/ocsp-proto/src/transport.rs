//! OCSP transport
//!
//! A check makes exactly one HTTP POST; there is no retry. The
//! [`OcspTransport`] trait is the seam tests use to count or fake calls.

use crate::error::TransportError;
use std::time::Duration;
use tracing::debug;

/// Sends one DER request to a responder and returns the raw response body
pub trait OcspTransport {
    fn post(&self, uri: &str, request: &[u8]) -> Result<Vec<u8>, TransportError>;
}

impl<T: OcspTransport + ?Sized> OcspTransport for &T {
    fn post(&self, uri: &str, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        (**self).post(uri, request)
    }
}

/// Blocking HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout_secs: u64,
    max_response_bytes: usize,
    http_client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with the given timeout and response size limit
    pub fn new(timeout_secs: u64, max_response_bytes: usize) -> Result<Self, TransportError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self::from_client(http_client, timeout_secs, max_response_bytes))
    }

    /// Wrap a preconfigured client (proxy settings, custom roots)
    ///
    /// `timeout_secs` is only used to label timeout errors; the client's
    /// own timeout applies.
    pub fn from_client(
        http_client: reqwest::blocking::Client,
        timeout_secs: u64,
        max_response_bytes: usize,
    ) -> Self {
        Self {
            timeout_secs,
            max_response_bytes,
            http_client,
        }
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout_secs)
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl OcspTransport for HttpTransport {
    fn post(&self, uri: &str, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        debug!(uri, request_len = request.len(), "posting OCSP request");

        let response = self
            .http_client
            .post(uri)
            .header(reqwest::header::CONTENT_TYPE, "application/ocsp-request")
            .header(reqwest::header::ACCEPT, "application/ocsp-response")
            .body(request.to_vec())
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        // The Content-Type of the answer is not checked, only the body is decoded
        if let Some(length) = response.content_length() {
            if length > self.max_response_bytes as u64 {
                return Err(TransportError::TooLarge {
                    size: length as usize,
                    limit: self.max_response_bytes,
                });
            }
        }

        let body = response.bytes().map_err(|e| self.map_send_error(e))?;
        if body.len() > self.max_response_bytes {
            return Err(TransportError::TooLarge {
                size: body.len(),
                limit: self.max_response_bytes,
            });
        }

        debug!(uri, response_len = body.len(), "received OCSP response");
        Ok(body.to_vec())
    }
}
