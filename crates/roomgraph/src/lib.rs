//! # roomgraph
//!
//! Load a text-adventure room map and reveal it on a graph, room by room.
//!
//! A map document lists rooms and the exits between them. A [`RoomMap`]
//! loads it in the background, adds the start room to your graph
//! component (anything implementing [`GraphSink`]), and from then on adds
//! a room's neighbours whenever you ask it to.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roomgraph::prelude::*;
//!
//! # async fn run() -> Result<(), RoomGraphError> {
//! let (graph, mut events) = tokio::sync::mpsc::unbounded_channel::<GraphEvent>();
//! let map = RoomGraphBuilder::new()
//!     .source("zork.json")
//!     .start("WHOUS")
//!     .spawn_from_dir("maps", graph)?;
//! map.ready().await?;
//!
//! // The start room arrives first; reveal its neighbours.
//! if let Some(GraphEvent::AddNode(start)) = events.recv().await {
//!     map.add_room_exits(&start).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;

pub use builder::RoomGraphBuilder;
pub use error::RoomGraphError;

pub use roomgraph_loader::{FileLoader, LoadError, Loader, MemoryLoader};
pub use roomgraph_map::{
    GraphEvent, GraphSender, GraphSink, MapConfig, MapError, MapIndex, MapInfo, MapState, RoomMap,
};
pub use roomgraph_protocol::{Codec, Exit, JsonCodec, MapDocument, ProtocolError, Room, RoomKey};

/// Everything needed to load a map and drive a graph.
pub mod prelude {
    pub use crate::{
        GraphEvent, GraphSender, GraphSink, Loader, MapConfig, MapError, MapState, Room,
        RoomGraphBuilder, RoomGraphError, RoomKey, RoomMap,
    };
}
