//! Off-thread check execution
//!
//! The pipeline blocks on its HTTP call, so it runs on tokio's blocking pool
//! and the caller awaits only the finished report. Each check is bounded by
//! the console's `check_timeout_secs`; on timeout the caller gets an error
//! right away while the blocking task finishes on its own.

use crate::config::Config;
use crate::error::ConsoleError;
use ocsp_proto::{HttpTransport, OcspError, OcspTransport, StatusChecker, StatusReport};
use std::time::Duration;
use tracing::{Span, debug};

/// Run one HTTP status check off the async executor
pub async fn check_status_async(
    leaf: Vec<u8>,
    issuer: Vec<u8>,
    config: &Config,
    span: Span,
) -> Result<StatusReport, ConsoleError> {
    let ocsp = config.ocsp.clone();
    run_bounded(check_timeout(config), move || {
        ocsp.validate()?;
        let transport = HttpTransport::new(ocsp.http_timeout_secs, ocsp.max_response_bytes)?;
        StatusChecker::new(ocsp, transport)
            .with_span(span)
            .check(&leaf, &issuer)
    })
    .await
}

/// Same as [`check_status_async`] over a caller-supplied transport
pub async fn check_with_transport<T>(
    leaf: Vec<u8>,
    issuer: Vec<u8>,
    config: &Config,
    transport: T,
    span: Span,
) -> Result<StatusReport, ConsoleError>
where
    T: OcspTransport + Send + 'static,
{
    let ocsp = config.ocsp.clone();
    run_bounded(check_timeout(config), move || {
        ocsp.validate()?;
        StatusChecker::new(ocsp, transport)
            .with_span(span)
            .check(&leaf, &issuer)
    })
    .await
}

fn check_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.check_timeout_secs)
}

/// Run `check` on the blocking pool, giving up after `limit`
pub async fn run_bounded<F>(limit: Duration, check: F) -> Result<StatusReport, ConsoleError>
where
    F: FnOnce() -> Result<StatusReport, OcspError> + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(check);

    match tokio::time::timeout(limit, handle).await {
        Err(_) => {
            debug!(limit_secs = limit.as_secs(), "check timed out");
            Err(ConsoleError::Timeout(limit.as_secs()))
        }
        Ok(Err(join_err)) => Err(ConsoleError::Join(join_err.to_string())),
        Ok(Ok(result)) => result.map_err(ConsoleError::Check),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocsp_proto::TransportError;

    const LEAF: &[u8] = include_bytes!("../../ocsp-proto/tests/fixtures/leaf.pem");
    const ISSUER: &[u8] = include_bytes!("../../ocsp-proto/tests/fixtures/issuer.pem");
    const NO_AIA: &[u8] = include_bytes!("../../ocsp-proto/tests/fixtures/no-aia.pem");
    const GOOD_RESPONSE: &[u8] = include_bytes!("../../ocsp-proto/tests/fixtures/good-resp.der");

    struct CannedTransport(&'static [u8]);

    impl OcspTransport for CannedTransport {
        fn post(&self, _uri: &str, _request: &[u8]) -> Result<Vec<u8>, TransportError> {
            Ok(self.0.to_vec())
        }
    }

    #[tokio::test]
    async fn test_check_with_transport() {
        let report = check_with_transport(
            LEAF.to_vec(),
            ISSUER.to_vec(),
            &Config::default(),
            CannedTransport(GOOD_RESPONSE),
            Span::none(),
        )
        .await
        .unwrap();
        assert_eq!(report.field("Certificate Status"), Some("good"));
    }

    #[tokio::test]
    async fn test_pipeline_error_is_wrapped() {
        let err = check_status_async(NO_AIA.to_vec(), ISSUER.to_vec(), &Config::default(), Span::none())
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_check_error(),
            Some(OcspError::NoResponder(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_check_config_fails_before_network() {
        let mut config = Config::default();
        config.ocsp.max_response_bytes = 0;
        let err = check_status_async(LEAF.to_vec(), ISSUER.to_vec(), &config, Span::none())
            .await
            .unwrap_err();
        assert!(matches!(err.as_check_error(), Some(OcspError::Config(_))));
    }

    #[tokio::test]
    async fn test_slow_check_times_out() {
        let err = run_bounded(Duration::from_millis(50), || {
            std::thread::sleep(Duration::from_millis(500));
            Err(OcspError::Protocol("late".to_string()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ConsoleError::Timeout(0)));
    }

    #[tokio::test]
    async fn test_panicking_check_is_join_error() {
        let err = run_bounded(Duration::from_secs(5), || panic!("pipeline bug"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Join(_)));
    }
}
