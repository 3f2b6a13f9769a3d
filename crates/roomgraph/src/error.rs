//! Unified error type for roomgraph.

use roomgraph_loader::LoadError;
use roomgraph_map::MapError;
use roomgraph_protocol::ProtocolError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `roomgraph` meta-crate you deal with this single error
/// type instead of importing errors from each sub-crate. `#[from]` lets
/// `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RoomGraphError {
    /// Fetching a map source failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A map document could not be decoded or validated.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A map query failed (not ready, load failed, actor gone).
    #[error(transparent)]
    Map(#[from] MapError),

    /// The builder was asked to spawn without a source or start room.
    #[error("missing builder setting: {0}")]
    Config(&'static str),
}
