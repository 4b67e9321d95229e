//!
//! Error taxonomy
//!
use thiserror::Error;

use crate::parser::IppParseError;

/// Errors surfaced by the request runtime ([`crate::client::IppClient`]).
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: DNS/socket error or a request timeout.
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// Server responded `426 Upgrade Required`.
    #[error("connection upgrade required{}", .upgrade.as_deref().map(|u| format!(" ({u})")).unwrap_or_default())]
    ConnectionUpgradeRequired { upgrade: Option<String> },

    /// Server responded with an HTTP 4xx/5xx status.
    #[error("HTTP {status}: {body}")]
    ResponseError {
        status: u16,
        content_type: Option<String>,
        body: String,
    },

    /// The response body could not be parsed as IPP.
    #[error("failed to parse IPP response: {0}")]
    ParseError(#[from] IppParseError),

    /// The server returned a non-success, non-version-mismatch status code.
    #[error("unexpected printer status code: {status_code:#06x}")]
    ProtocolError { status_code: i16 },

    /// The server returned `server-error-version-not-supported` (0x0503).
    #[error("IPP version not supported by server")]
    VersionNotSupported,

    /// The serializer was asked to emit an attribute with no known tag.
    #[error("unsupported attribute: {0}")]
    UnsupportedAttribute(String),

    /// An attribute's value does not match the tag it was given.
    #[error("datatype mismatch: {0}")]
    DatatypeMismatch(String),
}
