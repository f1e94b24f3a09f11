//! Session audit log for OCSP checks
//!
//! One JSON line per check, appended to
//! `<log_dir>/<YYYY>/<MM>/<session_name>.log` (month of the check, UTC).
//! Directories are created on demand. A failed write is reported through
//! `tracing` and never fails the check it describes.

use chrono::{DateTime, Utc};
use ocsp_proto::serial::serial_to_hex;
use ocsp_proto::{Certificate, OcspError, StatusReport, locate_responder};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::error;

/// Audit event type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// A report was produced
    CheckCompleted,
    /// The check ended with an error
    CheckFailed,
}

/// What the leaf PEM alone tells about a check
///
/// Failed checks carry no report, so the serial and responder URI are taken
/// from here when the leaf gets far enough to yield them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafContext {
    pub serial: Option<String>,
    pub responder_uri: Option<String>,
}

impl LeafContext {
    pub fn from_pem(leaf_pem: &[u8]) -> Self {
        let Ok(leaf) = Certificate::from_pem(leaf_pem) else {
            return Self::default();
        };
        LeafContext {
            serial: Some(serial_to_hex(&leaf.serial)),
            responder_uri: locate_responder(&leaf).ok().map(|responder| responder.uri),
        }
    }
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Timestamp (Unix epoch seconds)
    pub timestamp: i64,
    /// ISO 8601 formatted timestamp
    pub timestamp_iso: String,
    /// Event type
    pub event_type: AuditEventType,
    /// Session that ran the check
    pub session: String,
    /// Leaf serial number, uppercase hex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// Responder URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_uri: Option<String>,
    /// OCSP response status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
    /// Certificate status (good/revoked/unknown)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_status: Option<String>,
    /// Error message or other details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Console version
    pub console_version: String,
}

impl AuditEntry {
    /// Create a new audit entry stamped now
    pub fn new(event_type: AuditEventType, session: impl Into<String>) -> Self {
        Self::at(event_type, session, Utc::now())
    }

    /// Create a new audit entry with an explicit time
    pub fn at(event_type: AuditEventType, session: impl Into<String>, time: DateTime<Utc>) -> Self {
        AuditEntry {
            timestamp: time.timestamp(),
            timestamp_iso: time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            event_type,
            session: session.into(),
            serial: None,
            responder_uri: None,
            response_status: None,
            cert_status: None,
            details: None,
            console_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Entry describing a finished check
    pub fn completed(session: impl Into<String>, report: &StatusReport) -> Self {
        let mut entry = Self::new(AuditEventType::CheckCompleted, session)
            .with_serial(report.certificate.serial_hex.clone())
            .with_responder_uri(report.responder.uri.clone());
        entry.response_status = Some(report.response.response_status().to_string());
        entry.cert_status = report
            .response
            .basic()
            .map(|basic| basic.cert_status.to_string());
        entry
    }

    /// Entry describing a failed check
    pub fn failed(session: impl Into<String>, err: &OcspError) -> Self {
        Self::new(AuditEventType::CheckFailed, session).with_details(err.to_string())
    }

    /// Fill in whatever serial and responder URI `context` knows
    pub fn with_leaf(mut self, context: &LeafContext) -> Self {
        if let Some(ref serial) = context.serial {
            self.serial = Some(serial.clone());
        }
        if let Some(ref uri) = context.responder_uri {
            self.responder_uri = Some(uri.clone());
        }
        self
    }

    /// Set serial number
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Set responder URI
    pub fn with_responder_uri(mut self, uri: impl Into<String>) -> Self {
        self.responder_uri = Some(uri.into());
        self
    }

    /// Set details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }
}

/// Audit logger
pub struct AuditLogger {
    /// Root directory; `None` disables logging
    log_dir: Option<PathBuf>,
    session_name: String,
    /// Serializes appends from concurrent checks
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_dir: Option<impl AsRef<Path>>, session_name: impl Into<String>) -> Self {
        AuditLogger {
            log_dir: log_dir.map(|dir| dir.as_ref().to_path_buf()),
            session_name: session_name.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Disabled logger
    pub fn disabled() -> Self {
        Self::new(None::<PathBuf>, "default")
    }

    /// Check if audit logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.log_dir.is_some()
    }

    /// Log file an entry at `time` goes to
    pub fn log_path_for(&self, time: DateTime<Utc>) -> Option<PathBuf> {
        let dir = self.log_dir.as_ref()?;
        Some(
            dir.join(time.format("%Y").to_string())
                .join(time.format("%m").to_string())
                .join(format!("{}.log", self.session_name)),
        )
    }

    /// Log an audit entry
    pub async fn log(&self, entry: AuditEntry) {
        let Some(path) = self.log_path_for(entry.time()) else {
            return;
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize audit entry: {}", e);
                return;
            }
        };

        let _guard = self.write_lock.lock().await;
        if let Err(e) = append_line(&path, &json) {
            error!(path = %path.display(), "Failed to write audit log: {}", e);
        }
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}
