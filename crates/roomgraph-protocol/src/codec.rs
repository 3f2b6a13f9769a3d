//! Codec trait and implementations for map documents.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The map doesn't care HOW a document is serialized, only that something
//! implements [`Codec`]. Today that is [`JsonCodec`].

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec is moved into the map's
/// actor task and lives as long as it does.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use roomgraph_protocol::{Codec, JsonCodec, MapDocument};
///
/// let codec = JsonCodec;
/// let bytes = br#"{"rooms": [{"key": "WHOUS", "name": "West of House", "desc": ""}]}"#;
///
/// let doc: MapDocument = codec.decode(bytes).unwrap();
/// assert_eq!(doc.rooms[0].key.as_str(), "WHOUS");
/// assert!(doc.exits.is_empty());
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
