//! Operator session
//!
//! A session owns the console configuration, the audit logger and the
//! tracing span its checks run in. Every check, successful or not, leaves
//! one audit entry.

use crate::audit::{AuditEntry, AuditEventType, AuditLogger, LeafContext};
use crate::config::Config;
use crate::error::ConsoleError;
use crate::runner;
use ocsp_proto::{OcspTransport, StatusReport};
use std::path::Path;
use tracing::{Span, info, info_span};

pub struct Session {
    config: Config,
    audit: AuditLogger,
    span: Span,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let span = info_span!("session", name = %config.session_name);
        let audit = AuditLogger::new(config.log_dir.as_ref(), config.session_name.clone());
        if let Some(ref dir) = config.log_dir {
            info!(parent: &span, log_dir = %dir, "session audit log enabled");
        }
        Session {
            config,
            audit,
            span,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Read both PEM files and check the leaf over HTTP
    pub async fn check_files(
        &self,
        leaf_path: impl AsRef<Path>,
        issuer_path: impl AsRef<Path>,
    ) -> Result<StatusReport, ConsoleError> {
        let leaf = tokio::fs::read(leaf_path).await?;
        let issuer = tokio::fs::read(issuer_path).await?;
        self.check(leaf, issuer).await
    }

    /// Check the leaf over HTTP
    pub async fn check(&self, leaf: Vec<u8>, issuer: Vec<u8>) -> Result<StatusReport, ConsoleError> {
        let context = LeafContext::from_pem(&leaf);
        let result =
            runner::check_status_async(leaf, issuer, &self.config, self.span.clone()).await;
        self.record(&result, &context).await;
        result
    }

    /// Check the leaf through `transport`
    pub async fn check_with<T>(
        &self,
        leaf: Vec<u8>,
        issuer: Vec<u8>,
        transport: T,
    ) -> Result<StatusReport, ConsoleError>
    where
        T: OcspTransport + Send + 'static,
    {
        let context = LeafContext::from_pem(&leaf);
        let result = runner::check_with_transport(
            leaf,
            issuer,
            &self.config,
            transport,
            self.span.clone(),
        )
        .await;
        self.record(&result, &context).await;
        result
    }

    async fn record(&self, result: &Result<StatusReport, ConsoleError>, context: &LeafContext) {
        let name = self.config.session_name.as_str();
        let entry = match result {
            Ok(report) => AuditEntry::completed(name, report),
            Err(ConsoleError::Check(err)) => AuditEntry::failed(name, err).with_leaf(context),
            Err(other) => AuditEntry::new(AuditEventType::CheckFailed, name)
                .with_details(other.to_string())
                .with_leaf(context),
        };
        self.audit.log(entry).await;
    }
}
