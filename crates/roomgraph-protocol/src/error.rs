//! Error types for the protocol layer.
//!
//! Each roomgraph crate defines its own error enum. A `ProtocolError`
//! always means the bytes or the document were bad, never that a file
//! was missing or that the map wasn't ready yet.

use crate::RoomKey;

/// Errors that can occur while encoding, decoding, or validating a map
/// document.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, a room without a `key`, or an
    /// exit whose `dir` is not a string.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Two rooms in the same document share a key.
    ///
    /// Lookups by key would be ambiguous, so the whole document is
    /// rejected.
    #[error("duplicate room key {0}")]
    DuplicateRoomKey(RoomKey),

    /// The document decoded fine but breaks some other rule.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
