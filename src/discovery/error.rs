//! Discovery error taxonomy

use thiserror::Error;

/// Failure resolving a single identifier.
///
/// Every variant is recoverable at the batch level: the orchestrator logs it
/// against the identifier and moves on.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A remote service answered with a non-success status
    #[error("{service} error: HTTP {status}")]
    Upstream { service: &'static str, status: u16 },

    /// A remote service answered successfully but the payload was unusable
    #[error("{service} returned a malformed payload: {message}")]
    MalformedPayload {
        service: &'static str,
        message: String,
    },

    /// The request never produced a response
    #[error("Network error: {0:#}")]
    Network(#[from] anyhow::Error),

    /// A credential needed by the resolver is not configured
    #[error("Credential {name} is not configured")]
    CredentialMissing { name: &'static str },
}

impl DiscoveryError {
    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        DiscoveryError::MalformedPayload {
            service,
            message: message.into(),
        }
    }
}

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
