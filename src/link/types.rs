//! Link error definitions.

use thiserror::Error;

use crate::config::ConfigError;
use crate::envsubst::EnvSubstError;
use crate::message::MessageKind;
use crate::net::TlsError;

/// Errors that can occur while building or using the link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Derived client options carry no TLS configuration.
    #[error("missing TLS configuration")]
    TlsConfigMissing,

    /// TLS material is unreadable, unparsable or incomplete.
    #[error("TLS configuration error: {0}")]
    Tls(#[from] TlsError),

    /// Configuration file could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Message content could not be encoded as JSON.
    #[error("failed to serialize message content: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The link has no URL for this kind of message.
    #[error("unsupported message kind: {0}")]
    UnsupportedKind(MessageKind),

    /// Every candidate address failed; one entry per attempt, in order.
    #[error("{}", .errors.join(";"))]
    AllAddressesFailed { errors: Vec<String> },

    /// The response contained a malformed `${...}` token.
    #[error("failed to substitute environment in response: {0}")]
    EnvSubst(#[from] EnvSubstError),

    /// The response body is not JSON.
    #[error("invalid response payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;
