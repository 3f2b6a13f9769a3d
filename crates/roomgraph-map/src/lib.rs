//! The room map: lookups and traversal over a loaded room/exit document.
//!
//! A map loads its document once, in the background, then answers
//! queries and reveals rooms on a graph collaborator as they are
//! discovered.
//!
//! # Key types
//!
//! - [`RoomMap`]: handle to a running map actor (spawn, await, query)
//! - [`MapIndex`]: the loaded rooms and exits with key lookups
//! - [`GraphSink`]: the trait a graph/visualization component implements
//! - [`MapState`]: load state machine (`Loading → Ready | Failed`)
//! - [`MapConfig`]: source, start room, channel size

mod config;
mod error;
mod graph;
mod index;
mod map;

pub use config::{DEFAULT_CHANNEL_SIZE, MapConfig, MapState};
pub use error::MapError;
pub use graph::{GraphEvent, GraphSender, GraphSink};
pub use index::MapIndex;
pub use map::{MapInfo, RoomMap};
