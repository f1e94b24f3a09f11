//! Status report rendering
//!
//! Turns a normalized [`OcspResponse`] and the leaf certificate into the
//! ordered text lines shown to the operator. Rendering never fails: missing
//! subject components degrade to [`NOT_AVAILABLE`].
//!
//! OCSP timestamps are shown in the configured display offset with the
//! offset spelled out, e.g. `2025-03-01 15:30:00 (UTC+07:00)`. Certificate
//! validity is always shown in UTC.

use crate::cert::Certificate;
use crate::locator::ResponderLocation;
use crate::response::{CertStatus, OcspResponse};
use crate::serial::{decimal_to_hex, serial_to_hex};
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

/// Sentinel for values that could not be determined
pub const NOT_AVAILABLE: &str = "N/A";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Certificate metadata shown in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    pub common_name: String,
    pub uid: String,
    /// Uppercase hexadecimal serial number
    pub serial_hex: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl CertificateSummary {
    pub fn from_certificate(cert: &Certificate) -> Self {
        Self {
            common_name: extract_common_name(&cert.subject)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            uid: extract_uid(&cert.subject).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            serial_hex: serial_to_hex(&cert.serial),
            not_before: cert.not_before,
            not_after: cert.not_after,
        }
    }
}

/// Result of one status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Normalized responder answer (timestamps in UTC)
    pub response: OcspResponse,
    /// Responder the request was sent to
    pub responder: ResponderLocation,
    /// Leaf certificate metadata
    pub certificate: CertificateSummary,
    lines: Vec<String>,
}

impl StatusReport {
    /// Build the report, rendering OCSP times in `offset`
    pub fn new(
        response: OcspResponse,
        responder: ResponderLocation,
        leaf: &Certificate,
        offset: FixedOffset,
    ) -> Self {
        let certificate = CertificateSummary::from_certificate(leaf);
        let lines = render_lines(&response, &responder, &certificate, offset);
        Self {
            response,
            responder,
            certificate,
            lines,
        }
    }

    /// Report lines in display order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Value of the first line starting with `label` followed by `": "`
    pub fn field(&self, label: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            line.strip_prefix(label)
                .and_then(|rest| rest.strip_prefix(": "))
        })
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn render_lines(
    response: &OcspResponse,
    responder: &ResponderLocation,
    certificate: &CertificateSummary,
    offset: FixedOffset,
) -> Vec<String> {
    let mut lines = vec![
        "----- OCSP Responder -----".to_string(),
        format!("Response Status: {}", response.response_status()),
    ];

    if let Some(basic) = response.basic() {
        lines.push(format!("Certificate Status: {}", basic.cert_status));
        if let CertStatus::Revoked {
            revocation_time,
            reason,
        } = &basic.cert_status
        {
            lines.push(format!(
                "Revocation Time: {}",
                format_offset_time(*revocation_time, offset)
            ));
            if let Some(reason) = reason {
                lines.push(format!("Revocation Reason: {}", reason));
            }
        }
        lines.push(format!(
            "This Update: {}",
            format_offset_time(basic.this_update, offset)
        ));
        if let Some(next_update) = basic.next_update {
            lines.push(format!(
                "Next Update: {}",
                format_offset_time(next_update, offset)
            ));
        }
    }

    lines.push(format!("OCSP URI: {}", responder.uri));
    lines.push("Responder Signature: not verified".to_string());
    lines.push(String::new());

    lines.push("----- Certificate Information -----".to_string());
    lines.push(format!("Subject: {}", certificate.common_name));
    lines.push(format!("UID: {}", certificate.uid));
    lines.push(format!("Serial Number: {}", certificate.serial_hex));
    lines.push(format!("Valid from: {}", format_utc_time(certificate.not_before)));
    lines.push(format!("Valid to: {}", format_utc_time(certificate.not_after)));
    lines
}

/// `2025-03-01 15:30:00 (UTC+07:00)`
pub fn format_offset_time(time: DateTime<Utc>, offset: FixedOffset) -> String {
    format!(
        "{} (UTC{})",
        time.with_timezone(&offset).format(TIME_FORMAT),
        offset
    )
}

/// `2025-03-01 08:30:00 (UTC)`
pub fn format_utc_time(time: DateTime<Utc>) -> String {
    format!("{} (UTC)", time.format(TIME_FORMAT))
}

/// Hex rendering of a decimal serial string, or [`NOT_AVAILABLE`]
pub fn render_serial(decimal: &str) -> String {
    decimal_to_hex(decimal).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Text of the `CN=` component of a subject string
pub fn extract_common_name(subject: &str) -> Option<String> {
    component_value(subject, "CN")
}

/// Text of the `UID=` component, without surrounding parentheses
pub fn extract_uid(subject: &str) -> Option<String> {
    let raw = component_value(subject, "UID")?;
    let value = raw.strip_prefix('(').unwrap_or(&raw);
    let value = value.split(')').next().unwrap_or(value).trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Components are separated by `,`; a value runs up to the next comma
fn component_value(subject: &str, key: &str) -> Option<String> {
    subject
        .split(',')
        .map(str::trim)
        .find_map(|component| {
            let (name, value) = component.split_once('=')?;
            (name.trim() == key).then(|| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
}
