//! Map configuration and load state machine.

use std::fmt;

use roomgraph_protocol::RoomKey;
use serde::{Deserialize, Serialize};

/// Default command channel size for map actors.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

fn default_channel_size() -> usize {
    DEFAULT_CHANNEL_SIZE
}

// ---------------------------------------------------------------------------
// MapConfig
// ---------------------------------------------------------------------------

/// Configuration for a map instance.
///
/// Can be embedded in a larger settings file; `channel_size` may be
/// omitted there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Where the document lives, as understood by the loader
    /// (a file name for `FileLoader`).
    pub source: String,

    /// Key of the room added to the graph once the map is loaded.
    pub start_key: RoomKey,

    /// Capacity of the actor's command channel. Senders wait when it is
    /// full. A value of 0 is treated as 1.
    #[serde(default = "default_channel_size")]
    pub channel_size: usize,
}

impl MapConfig {
    /// Creates a config with the default channel size.
    pub fn new(source: impl Into<String>, start_key: impl Into<RoomKey>) -> Self {
        Self {
            source: source.into(),
            start_key: start_key.into(),
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// MapState
// ---------------------------------------------------------------------------

/// The load state of a map.
///
/// A map loads exactly once, so there are only two transitions:
///
/// ```text
/// Loading → Ready
/// Loading → Failed
/// ```
///
/// - **Loading**: the loader hasn't delivered yet. Queries fail with
///   `MapError::NotReady`.
/// - **Ready**: rooms and exits are indexed and the start room has been
///   sent to the graph.
/// - **Failed**: loading, decoding, validation, or the start room lookup
///   failed. Terminal; queries fail with `MapError::LoadFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapState {
    Loading,
    Ready,
    Failed,
}

impl MapState {
    /// Returns `true` if queries can be answered.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` once loading has ended, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Loading, Self::Ready) | (Self::Loading, Self::Failed)
        )
    }
}

impl fmt::Display for MapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
