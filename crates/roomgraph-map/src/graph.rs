//! The `GraphSink` trait: the one seam between a map and whatever draws it.
//!
//! A map only ever TELLS the graph about rooms and exits it has
//! discovered. It never asks the graph what it already has, so a sink
//! must tolerate the same node or link being added more than once.

use roomgraph_protocol::{Room, RoomKey};
use tokio::sync::mpsc;

/// Receives rooms (nodes) and exits (links) as a map reveals them.
///
/// Implement this for a visualization component. Two implementations ship
/// with the crate:
/// - `Vec<GraphEvent>` records every call, handy in tests
/// - [`GraphSender`] forwards every call to another task
pub trait GraphSink {
    /// Registers a room as a node. May be called repeatedly for the same
    /// room.
    fn add_node(&mut self, room: &Room);

    /// Registers a directed edge `source → target` labelled with the exit
    /// direction. Both endpoints have already been passed to `add_node`.
    fn add_link(&mut self, source: &RoomKey, target: &RoomKey, direction: &str);
}

/// One call made on a [`GraphSink`], as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    /// `add_node(room)`.
    AddNode(Room),
    /// `add_link(source, target, direction)`.
    AddLink {
        source: RoomKey,
        target: RoomKey,
        direction: String,
    },
}

impl GraphEvent {
    pub(crate) fn link(source: &RoomKey, target: &RoomKey, direction: &str) -> Self {
        Self::AddLink {
            source: source.clone(),
            target: target.clone(),
            direction: direction.to_string(),
        }
    }
}

impl GraphSink for Vec<GraphEvent> {
    fn add_node(&mut self, room: &Room) {
        self.push(GraphEvent::AddNode(room.clone()));
    }

    fn add_link(&mut self, source: &RoomKey, target: &RoomKey, direction: &str) {
        self.push(GraphEvent::link(source, target, direction));
    }
}

/// Channel sender for delivering graph events to another task.
pub type GraphSender = mpsc::UnboundedSender<GraphEvent>;

/// Silently drops events once the receiver is gone (nobody is drawing).
impl GraphSink for GraphSender {
    fn add_node(&mut self, room: &Room) {
        let _ = self.send(GraphEvent::AddNode(room.clone()));
    }

    fn add_link(&mut self, source: &RoomKey, target: &RoomKey, direction: &str) {
        let _ = self.send(GraphEvent::link(source, target, direction));
    }
}
