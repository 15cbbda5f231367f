//! Error types for the clavis client.
//!
//! Each variant carries a message. `Remote` is the only one produced by the
//! store itself; its message is the envelope's `msg`, shown verbatim.

use thiserror::Error;

/// Errors returned by `ClavisConfig`, `ClavisClient` and `Clavis`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClavisError {
    /// Required configuration is missing or empty.
    #[error("{0}")]
    Config(String),

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read to completion.
    #[error("read failed: {0}")]
    Io(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The response body is not the expected JSON envelope.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The store answered with a nonzero code.
    #[error("{0}")]
    Remote(String),
}
