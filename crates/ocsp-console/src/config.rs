use ocsp_proto::{CheckConfig, DigestAlgorithm};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ocsp_proto::ConfigError> for ConfigError {
    fn from(err: ocsp_proto::ConfigError) -> Self {
        ConfigError::Invalid(err.0)
    }
}

/// Console configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Operator or system name; tags log events and names the audit log file
    #[serde(default = "default_session_name")]
    pub session_name: String,

    /// Log level: "trace", "debug", "info", "warn", "error" (default: "info")
    #[serde(default)]
    pub log_level: Option<String>,

    /// Root directory of the session audit log (optional)
    ///
    /// Entries go to `<log_dir>/<YYYY>/<MM>/<session_name>.log`.
    #[serde(default)]
    pub log_dir: Option<String>,

    /// OCSP check settings
    #[serde(default)]
    pub ocsp: CheckConfig,

    /// Wall-clock bound for one check, in seconds (default: 30)
    #[serde(default = "default_check_timeout")]
    pub check_timeout_secs: u64,
}

fn default_session_name() -> String {
    "default".to_string()
}

fn default_check_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session_name: default_session_name(),
            log_level: None,
            log_dir: None,
            ocsp: CheckConfig::default(),
            check_timeout_secs: default_check_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(
        mut self,
        digest: Option<DigestAlgorithm>,
        offset_minutes: Option<i32>,
    ) -> Result<Self, ConfigError> {
        if let Some(digest) = digest {
            self.ocsp.digest_algorithm = digest;
        }
        if let Some(minutes) = offset_minutes {
            self.ocsp.display_offset_minutes = minutes;
        }
        self.validate()?;
        Ok(self)
    }

    /// Effective log level
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.session_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Session name cannot be empty".to_string(),
            ));
        }
        // The session name becomes a file name
        if self
            .session_name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0')
            || self.session_name == "."
            || self.session_name == ".."
        {
            return Err(ConfigError::Invalid(format!(
                "Session name '{}' is not a valid file name",
                self.session_name
            )));
        }

        if let Some(ref dir) = self.log_dir {
            if dir.is_empty() {
                return Err(ConfigError::Invalid(
                    "Log directory cannot be empty".to_string(),
                ));
            }
        }

        self.ocsp.validate()?;

        if self.check_timeout_secs < self.ocsp.http_timeout_secs {
            return Err(ConfigError::Invalid(format!(
                "Check timeout ({}s) is shorter than the HTTP timeout ({}s)",
                self.check_timeout_secs, self.ocsp.http_timeout_secs
            )));
        }

        Ok(())
    }

    /// Create an example configuration file
    pub fn example() -> Self {
        Config {
            session_name: "pki-operator".to_string(),
            log_level: Some("info".to_string()),
            log_dir: Some("/var/log/ocsp-console".to_string()),
            ocsp: CheckConfig::new()
                .with_digest(DigestAlgorithm::Sha256)
                .with_display_offset_minutes(7 * 60),
            check_timeout_secs: 30,
        }
    }
}
