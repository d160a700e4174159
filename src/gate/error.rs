//! Gate exchange error types

use thiserror::Error;

/// Gate exchange error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GateError {
    pub kind: GateErrorKind,
    pub message: String,
}

impl GateError {
    pub fn new(kind: GateErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(
            GateErrorKind::Status(code),
            format!("Gate error: {code}: {}", message.into()),
        )
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GateErrorKind::Network, message)
    }
}

/// Error classification for the single round-trip exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateErrorKind {
    /// Non-2xx transport status
    Status(u16),
    /// Connection, timeout, or read failure before a usable response arrived
    Network,
}

impl GateErrorKind {
    /// Transport-level failures end the current round; the protocol has no
    /// retry, so nothing is retryable.
    #[allow(dead_code)] // Classification query utility
    pub fn is_transport(self) -> bool {
        matches!(self, Self::Status(_) | Self::Network)
    }
}
