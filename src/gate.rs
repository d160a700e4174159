//! Clarification gate protocol client
//!
//! Provides the service seam for the two request kinds the protocol
//! supports: the initial query (`binding = None`) and the bound-choice
//! query (`binding = Some(id)`).

mod client;
mod error;
mod verdict;

#[cfg(test)]
mod proptests;

pub use client::HttpGateClient;
pub use error::{GateError, GateErrorKind};
pub use verdict::{interpret, Choice, Verdict, DEFAULT_UNKNOWN_MESSAGE};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for gate exchanges
#[async_trait]
pub trait GateService: Send + Sync {
    /// Perform one exchange: the scenario context plus an optional binding.
    /// One round trip, no retry.
    async fn query(&self, context: &[String], binding: Option<&str>) -> Result<Verdict, GateError>;

    /// The configured remote endpoint
    fn endpoint(&self) -> &str;
}

/// Logging wrapper for gate services
pub struct LoggingGate {
    inner: Arc<dyn GateService>,
}

impl LoggingGate {
    pub fn new(inner: Arc<dyn GateService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GateService for LoggingGate {
    async fn query(&self, context: &[String], binding: Option<&str>) -> Result<Verdict, GateError> {
        let start = std::time::Instant::now();
        let result = self.inner.query(context, binding).await;
        let duration = start.elapsed();

        match &result {
            Ok(verdict) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    bound = binding.is_some(),
                    verdict = verdict.kind(),
                    "Gate exchange completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    bound = binding.is_some(),
                    error = %e.message,
                    "Gate exchange failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
