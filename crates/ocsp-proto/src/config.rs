//! Configuration for a single OCSP status check
//!
//! All fields carry serde defaults so a partial JSON object (or `{}`) yields
//! a usable configuration.

use crate::error::ConfigError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Hash algorithm used for the CertID issuer name/key hashes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// SHA-1, for legacy responders that only understand it
    Sha1,
    /// SHA-256
    #[default]
    Sha256,
}

impl DigestAlgorithm {
    /// Arcs of the algorithm's object identifier
    pub fn oid_arcs(&self) -> &'static [u64] {
        match self {
            DigestAlgorithm::Sha1 => &[1, 3, 14, 3, 2, 26],
            DigestAlgorithm::Sha256 => &[2, 16, 840, 1, 101, 3, 4, 2, 1],
        }
    }

    /// Hash `data` with this algorithm
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Sha1 => write!(f, "sha1"),
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            other => Err(ConfigError(format!("unsupported digest algorithm: {}", other))),
        }
    }
}

/// OCSP check configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckConfig {
    /// Digest used for the request's CertID
    #[serde(default)]
    pub digest_algorithm: DigestAlgorithm,

    /// HTTP request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Maximum accepted response body size in bytes
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,

    /// Display offset for OCSP timestamps, in minutes east of UTC
    ///
    /// Timestamps are UTC on the wire. This offset only affects how the
    /// report renders revocation, this-update and next-update times.
    #[serde(default)]
    pub display_offset_minutes: i32,

    /// Attach a random nonce extension to the request
    #[serde(default)]
    pub include_nonce: bool,
}

impl CheckConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific CertID digest algorithm
    pub fn with_digest(mut self, digest_algorithm: DigestAlgorithm) -> Self {
        self.digest_algorithm = digest_algorithm;
        self
    }

    /// Use a specific display offset (minutes east of UTC)
    pub fn with_display_offset_minutes(mut self, minutes: i32) -> Self {
        self.display_offset_minutes = minutes;
        self
    }

    /// Display offset as a chrono timezone
    pub fn display_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.display_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError(format!(
                    "display offset of {} minutes is out of range",
                    self.display_offset_minutes
                ))
            })
    }

    /// Check the configuration for values no check could run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout_secs == 0 {
            return Err(ConfigError("HTTP timeout cannot be 0".to_string()));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError("maximum response size cannot be 0".to_string()));
        }
        self.display_offset()?;
        Ok(())
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            digest_algorithm: DigestAlgorithm::default(),
            http_timeout_secs: default_http_timeout(),
            max_response_bytes: default_max_response_bytes(),
            display_offset_minutes: 0,
            include_nonce: false,
        }
    }
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_response_bytes() -> usize {
    1024 * 1024 // 1 MiB
}
