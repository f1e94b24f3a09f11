//! OCSP Operator Console
//!
//! Front end for the `ocsp-proto` status checker: JSON configuration,
//! session-scoped logging, a per-session audit log, and off-thread check
//! execution for async callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use ocsp_console::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("ocsp-console.json")?;
//!     let session = Session::new(config);
//!
//!     let report = session.check_files("leaf.pem", "issuer.pem").await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod runner;
pub mod session;

pub use audit::{AuditEntry, AuditEventType, AuditLogger, LeafContext};
pub use config::{Config, ConfigError};
pub use error::ConsoleError;
pub use runner::check_status_async;
pub use session::Session;
