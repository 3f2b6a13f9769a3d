//! `MapIndex`: the loaded rooms and exits, plus the lookups over them.
//!
//! Rooms and exits are kept in document order. Two tables built once at
//! load time answer "which room has this key" and "which exits leave this
//! room" without scanning.

use std::collections::HashMap;

use roomgraph_protocol::{Exit, MapDocument, ProtocolError, Room, RoomKey};

use crate::GraphSink;

/// An immutable, indexed view of one map document.
#[derive(Debug, Clone)]
pub struct MapIndex {
    rooms: Vec<Room>,
    exits: Vec<Exit>,
    /// Room key → position in `rooms`. Keys are unique (validated).
    by_key: HashMap<RoomKey, usize>,
    /// Exit source → positions in `exits`, ascending.
    by_source: HashMap<RoomKey, Vec<usize>>,
}

impl MapIndex {
    /// Validates `document` and indexes it.
    ///
    /// # Errors
    /// Whatever [`MapDocument::validate`] rejects (duplicate or empty room
    /// keys).
    pub fn build(document: MapDocument) -> Result<Self, ProtocolError> {
        document.validate()?;
        let MapDocument { rooms, exits } = document;

        let by_key: HashMap<RoomKey, usize> = rooms
            .iter()
            .enumerate()
            .map(|(position, room)| (room.key.clone(), position))
            .collect();

        let mut by_source: HashMap<RoomKey, Vec<usize>> = HashMap::new();
        for (position, exit) in exits.iter().enumerate() {
            if !by_key.contains_key(&exit.source) {
                tracing::warn!(
                    source = %exit.source,
                    direction = %exit.direction,
                    "exit leaves from an unknown room"
                );
            }
            by_source.entry(exit.source.clone()).or_default().push(position);
        }

        Ok(Self {
            rooms,
            exits,
            by_key,
            by_source,
        })
    }

    /// Returns the room with this key, if there is one.
    pub fn get_room(&self, key: &RoomKey) -> Option<&Room> {
        self.by_key.get(key).map(|&position| &self.rooms[position])
    }

    /// Returns every exit leaving `key`, in document order.
    ///
    /// A room with no exits (or an unknown key) yields an empty list.
    pub fn get_exits(&self, key: &RoomKey) -> Vec<&Exit> {
        self.by_source
            .get(key)
            .map(|positions| positions.iter().map(|&p| &self.exits[p]).collect())
            .unwrap_or_default()
    }

    /// Reveals the neighbours of `room` on `graph`.
    ///
    /// For each exit of `room`, in order: if the target is a room, adds it
    /// as a node and then adds the link `room → target`. Exits whose
    /// target is not a room ("The door is locked.") are skipped.
    ///
    /// Nothing is remembered between calls; expanding the same room twice
    /// issues the same calls twice. Returns the number of links issued.
    pub fn add_room_exits<G: GraphSink + ?Sized>(&self, room: &Room, graph: &mut G) -> usize {
        let mut linked = 0;
        for exit in self.get_exits(&room.key) {
            match self.get_room(&exit.target) {
                Some(target) => {
                    graph.add_node(target);
                    graph.add_link(&room.key, &exit.target, &exit.direction);
                    linked += 1;
                }
                None => {
                    tracing::debug!(
                        room = %room.key,
                        direction = %exit.direction,
                        to = %exit.target,
                        "exit target is not a room, skipping"
                    );
                }
            }
        }
        linked
    }

    /// All rooms, in document order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All exits, in document order.
    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }
}
