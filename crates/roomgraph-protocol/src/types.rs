//! Core types of a roomgraph map document.
//!
//! A map file is a JSON object with two arrays:
//!
//! ```json
//! {
//!   "rooms": [ { "key": "WHOUS", "name": "West of House", "desc": "..." } ],
//!   "exits": [ { "source": "WHOUS", "dir": "NORTH", "target": "NHOUS" } ]
//! }
//! ```
//!
//! Field names on the wire are kept short (`desc`, `dir`); the Rust side
//! uses full names and maps them with `#[serde(rename = ...)]`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The unique key of a room, e.g. `"WHOUS"`.
///
/// Exit sources and targets are `RoomKey`s too, even when a target names
/// no room at all ("The door is locked."). Such a key simply never
/// resolves during lookup.
///
/// `#[serde(transparent)]` keeps it a bare string in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(pub String);

impl RoomKey {
    /// Creates a key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for RoomKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

// ---------------------------------------------------------------------------
// Room and Exit
// ---------------------------------------------------------------------------

/// A named location. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique key, used by exits to refer to this room.
    pub key: RoomKey,
    /// Display name ("West of House").
    pub name: String,
    /// Description text. Stored as `desc` in the document.
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl Room {
    /// Creates a room.
    pub fn new(
        key: impl Into<RoomKey>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A directed, labelled connection attempt from one room toward a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Key of the room the exit leaves from.
    pub source: RoomKey,
    /// Free-form direction label ("NORTH", "UP", "WEST"...). Stored as `dir`.
    #[serde(rename = "dir")]
    pub direction: String,
    /// Key of the room the exit leads to, or a descriptive string when
    /// there is no room that way.
    pub target: RoomKey,
}

impl Exit {
    /// Creates an exit.
    pub fn new(
        source: impl Into<RoomKey>,
        direction: impl Into<String>,
        target: impl Into<RoomKey>,
    ) -> Self {
        Self {
            source: source.into(),
            direction: direction.into(),
            target: target.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// MapDocument
// ---------------------------------------------------------------------------

/// A whole map file: every room and every exit, in file order.
///
/// Missing arrays decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub exits: Vec<Exit>,
}

impl MapDocument {
    /// Checks the rules that decoding alone can't enforce.
    ///
    /// - every room key is non-empty
    /// - no two rooms share a key
    ///
    /// Exits are not checked: a target that names no room is normal, and
    /// an exit from an unknown source is just unreachable.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        let mut seen = HashSet::with_capacity(self.rooms.len());
        for (position, room) in self.rooms.iter().enumerate() {
            if room.key.as_str().is_empty() {
                return Err(ProtocolError::InvalidDocument(format!(
                    "room at position {position} has an empty key"
                )));
            }
            if !seen.insert(&room.key) {
                return Err(ProtocolError::DuplicateRoomKey(room.key.clone()));
            }
        }
        Ok(())
    }
}
