//! Error types for the map layer.

use std::sync::Arc;

use roomgraph_loader::LoadError;
use roomgraph_protocol::{ProtocolError, RoomKey};

/// Errors that can occur while loading or querying a room map.
///
/// An exit whose target names no room is NOT an error; it is skipped
/// during expansion.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The map is still loading. Queries are rejected until it is ready.
    #[error("map is still loading")]
    NotReady,

    /// The map's one and only load failed. The cause is shared between
    /// every caller that asks, so it sits behind an `Arc`.
    #[error("map failed to load: {0}")]
    LoadFailed(Arc<MapError>),

    /// The configured start room is not in the loaded document.
    #[error("start room {0} not found")]
    StartRoomNotFound(RoomKey),

    /// The document could not be decoded or failed validation.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The loader could not produce the document's bytes.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The map actor is gone (shut down, or its task ended).
    #[error("map is unavailable")]
    Unavailable,
}
