//! Console error type

use crate::config::ConfigError;
use ocsp_proto::OcspError;
use thiserror::Error;

/// Errors surfaced to the operator by the console
///
/// Check errors are shown exactly as the pipeline produced them.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Check(#[from] OcspError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Check task failed: {0}")]
    Join(String),

    #[error("Check did not finish within {0}s")]
    Timeout(u64),
}

impl ConsoleError {
    /// Underlying pipeline error, if the check itself failed
    pub fn as_check_error(&self) -> Option<&OcspError> {
        match self {
            ConsoleError::Check(err) => Some(err),
            _ => None,
        }
    }
}
